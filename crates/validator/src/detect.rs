//! Independent re-derivation of facts from section code.
//!
//! Nothing here calls into the analyzer's extractors.

use crate::config::ContextAccessor;
use once_cell::sync::Lazy;
use regex::Regex;

static STATE_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"const\s+\[\s*\w+\s*,\s*\w+\s*\]\s*=\s*(?:React\.)?use(?:State|Reducer)\b").unwrap()
});

static URL_FETCH: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bfetch\s*\(\s*[`'"]"#).unwrap());

static USE_CONTEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"useContext\s*\(\s*(\w+)\s*\)").unwrap());

static DESTRUCTURED_PARAMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"function\s+\w+\s*\(\s*\{[^}]+\}").unwrap());

static PROPS_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:interface|type)\s+\w*Props\w*\s*=?\s*\{").unwrap());

/// Number of state/reducer declarations
#[must_use]
pub fn count_state_declarations(code: &str) -> usize {
    STATE_DECLARATION.find_iter(code).count()
}

/// Number of top-level entries in a rendered `[a, b<c, d>]` list
#[must_use]
pub fn count_listed_entries(value: &str) -> usize {
    let inner = value.trim().trim_start_matches('[').trim_end_matches(']');
    if inner.trim().is_empty() || value.trim() == sectionmeta_analyzer::format::NONE {
        return 0;
    }

    let mut depth = 0i32;
    let mut count = 1;
    let mut previous = None;
    for c in inner.chars() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            '>' if previous == Some('=') => {}
            ')' | ']' | '}' | '>' => depth -= 1,
            ',' if depth == 0 => count += 1,
            _ => {}
        }
        previous = Some(c);
    }
    count
}

/// Number of `fetch(` calls whose first argument is a string or template literal
#[must_use]
pub fn count_url_fetches(code: &str) -> usize {
    URL_FETCH.find_iter(code).count()
}

/// Contexts consumed directly or through a known accessor, first-seen order
#[must_use]
pub fn contexts_used(code: &str, accessors: &[ContextAccessor]) -> Vec<String> {
    let direct = USE_CONTEXT
        .captures_iter(code)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()));
    let via_accessor = accessors
        .iter()
        .filter(|a| calls(code, &a.accessor))
        .map(|a| a.context.clone());

    let mut found: Vec<String> = Vec::new();
    for context in direct.chain(via_accessor) {
        if !found.contains(&context) {
            found.push(context);
        }
    }
    found
}

/// Whether the code destructures parameters or declares a `*Props` type
#[must_use]
pub fn has_props(code: &str) -> bool {
    DESTRUCTURED_PARAMS.is_match(code) || PROPS_DECLARATION.is_match(code)
}

/// How many of `keywords` occur in already-lowercased text
#[must_use]
pub fn keyword_hits(lowercase_text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|kw| lowercase_text.contains(kw.as_str()))
        .count()
}

/// Whether `word` appears in `text` delimited by non-identifier characters
#[must_use]
pub fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    text.match_indices(word).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

/// Whether `name(` is called, with `name` on a word boundary
fn calls(code: &str, name: &str) -> bool {
    code.match_indices(name).any(|(start, _)| {
        let before = code[..start].chars().next_back();
        let rest = code[start + name.len()..].trim_start();
        !before.is_some_and(is_word_char) && rest.starts_with('(')
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidatorConfig;

    #[test]
    fn test_count_listed_entries() {
        assert_eq!(count_listed_entries("[none]"), 0);
        assert_eq!(count_listed_entries("[]"), 0);
        assert_eq!(count_listed_entries("[a:number]"), 1);
        assert_eq!(count_listed_entries("[m:Map<string, number>, b:boolean]"), 2);
        assert_eq!(count_listed_entries("[f:{ a: 1, b: 2 }, g:string, h:Array]"), 3);
        assert_eq!(count_listed_entries("[cb:() => void, a:number]"), 2);
        assert_eq!(count_listed_entries("[items:() => loadItems(), a:number, b:Map<K, V>]"), 3);
    }

    #[test]
    fn test_count_state_declarations() {
        let code = "\
const [a, setA] = useState(0);
const [s, dispatch] = useReducer(reducer, {});
const [x, y] = pair;
";
        assert_eq!(count_state_declarations(code), 2);
    }

    #[test]
    fn test_count_url_fetches() {
        let code = "fetch('/api/users'); fetch(`${BASE}/x`); fetch(url); prefetch('/y')";
        assert_eq!(count_url_fetches(code), 2);
    }

    #[test]
    fn test_contexts_used() {
        let accessors = ValidatorConfig::default().context_accessors;
        let code = "useContext(CartContext); const r = useRouter(); usePathname();";
        assert_eq!(contexts_used(code, &accessors), vec!["CartContext", "NextRouter"]);
        assert!(contexts_used("useAuthState()", &accessors).is_empty());
    }

    #[test]
    fn test_has_props() {
        assert!(has_props("function Card({ title }) {}"));
        assert!(has_props("type CardProps = { title: string }"));
        assert!(!has_props("function add(a, b) {}"));
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("<Modal open />", "Modal"));
        assert!(!contains_word("<ModalHeader />", "Modal"));
        assert!(!contains_word("anything", ""));
    }
}
