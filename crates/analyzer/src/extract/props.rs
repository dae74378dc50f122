use super::{is_identifier, push_unique};
use once_cell::sync::Lazy;
use regex::Regex;

static FUNCTION_PARAMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:export\s+(?:default\s+)?)?(?:async\s+)?function\s+\w+\s*\(\s*\{([^}]+)\}")
        .unwrap()
});

static ARROW_PARAMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:export\s+)?const\s+\w+\s*(?::\s*[\w.]+(?:<[^>]*>)?\s*)?=\s*(?:async\s*)?\(\s*\{([^}]+)\}",
    )
    .unwrap()
});

static PROPS_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:interface|type)\s+\w*Props\w*\s*=?\s*\{([^}]+)\}").unwrap());

/// Extract component parameter names.
///
/// Strategies are tried in order until one yields names: destructured function
/// parameters, destructured arrow parameters, then members of a `*Props` type.
#[must_use]
pub fn extract_props(code: &str) -> Vec<String> {
    let from_function = first_group(&FUNCTION_PARAMS, code)
        .map(|raw| names(raw.split(',')))
        .unwrap_or_default();
    if !from_function.is_empty() {
        return from_function;
    }

    let from_arrow = first_group(&ARROW_PARAMS, code)
        .map(|raw| names(raw.split(',')))
        .unwrap_or_default();
    if !from_arrow.is_empty() {
        return from_arrow;
    }

    first_group(&PROPS_TYPE, code)
        .map(|raw| names(raw.split(['\n', ';', ','])))
        .unwrap_or_default()
}

fn first_group<'a>(re: &Regex, code: &'a str) -> Option<&'a str> {
    re.captures(code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Identifier before any default value or type annotation, in first-seen order
fn names<'a>(entries: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.trim();
        if entry.is_empty() || entry.starts_with("//") {
            continue;
        }
        let name = entry
            .split(['=', ':', '?'])
            .next()
            .unwrap_or_default()
            .trim()
            .trim_start_matches("...")
            .trim_start_matches("readonly ")
            .trim();
        if is_identifier(name) {
            push_unique(&mut out, name.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn function_destructuring() {
        let code = "export default function Modal({ isOpen, onClose = noop, title }: ModalProps) {}";
        assert_eq!(extract_props(code), vec!["isOpen", "onClose", "title"]);
    }

    #[test]
    fn arrow_destructuring() {
        let code = "export const Badge: React.FC<BadgeProps> = ({ label, tone }) => null;";
        assert_eq!(extract_props(code), vec!["label", "tone"]);

        let code = "const Row = async ({ id, ...rest }) => {}";
        assert_eq!(extract_props(code), vec!["id", "rest"]);
    }

    #[test]
    fn props_type_members() {
        let code = "\
interface CardProps {
  title: string;
  subtitle?: string;
  // comment
  onSelect: (id: string) => void;
}
export function Card(props: CardProps) {}
";
        assert_eq!(extract_props(code), vec!["title", "subtitle", "onSelect"]);
    }

    #[test]
    fn earlier_strategy_wins() {
        let code = "\
type ButtonProps = { label: string; variant: string };
function Button({ label }: ButtonProps) {}
";
        assert_eq!(extract_props(code), vec!["label"]);
    }

    #[test]
    fn no_parameters() {
        assert!(extract_props("export function helper(a, b) { return a + b }").is_empty());
        assert!(extract_props("").is_empty());
    }
}
