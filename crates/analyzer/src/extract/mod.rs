//! Fact extractors.
//!
//! Each matcher is an independent pattern scan over a section body returning a
//! typed list in first-occurrence order. [`Extractor`] runs them all and bundles
//! the results; nothing here ever fails, unmatched input just yields empty lists.

mod context;
mod endpoints;
mod imports;
mod props;
mod state;

pub use context::{extract_contexts, CONTEXT_ACCESSORS};
pub use endpoints::EndpointMatcher;
pub use imports::{extract_imports, import_map, module_id, ImportBinding};
pub use props::extract_props;
pub use state::{extract_state, infer_type};

use crate::config::AnalyzerConfig;
use crate::types::{Endpoint, StateVar};

/// Everything the extractors found in one body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facts {
    pub state: Vec<StateVar>,
    pub props: Vec<String>,
    pub contexts: Vec<String>,
    pub endpoints: Vec<Endpoint>,
    pub imports: Vec<String>,
    /// Per-symbol import bindings, consumed by the dependency tree
    pub bindings: Vec<ImportBinding>,
}

/// Runs every fact matcher over a body
#[derive(Debug, Clone)]
pub struct Extractor {
    endpoints: EndpointMatcher,
    ignored_default_imports: Vec<String>,
}

impl Extractor {
    #[must_use]
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            endpoints: EndpointMatcher::new(&config.known_api_host, &config.placeholder),
            ignored_default_imports: config.ignored_default_imports.clone(),
        }
    }

    /// Run all matchers over `code`
    #[must_use]
    pub fn extract(&self, code: &str) -> Facts {
        Facts {
            state: extract_state(code),
            props: extract_props(code),
            contexts: extract_contexts(code),
            endpoints: self.endpoints.extract(code),
            imports: extract_imports(code),
            bindings: import_map(code, &self.ignored_default_imports),
        }
    }
}

/// Append `item` unless it is already present
pub(crate) fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Index just past the bracket closing the one at `open`.
///
/// Tracks `()`, `[]` and `{}` together and skips quoted string contents. Returns
/// `None` when the text ends before the bracket closes.
pub(crate) fn balanced_end(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = open;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
        } else {
            match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }

    None
}

/// Index just past the `>` closing the generic argument list opened at `open`.
///
/// Arrow tokens (`=>`) inside the list are not treated as closers.
pub(crate) fn generic_end(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;

    for i in open..bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'=' => {}
            b'>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Whether `s` is a plain identifier
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_end_skips_strings() {
        let text = "f(a, \")\", [1, 2]) rest";
        assert_eq!(balanced_end(text, 1), Some(17));
        assert_eq!(&text[1..17], "(a, \")\", [1, 2])");
        assert_eq!(balanced_end("f(open", 1), None);
    }

    #[test]
    fn test_generic_end_ignores_arrows() {
        let text = "<() => void>(x)";
        assert_eq!(generic_end(text, 0), Some(12));
        let nested = "<Map<string, number>>()";
        assert_eq!(&nested[..generic_end(nested, 0).unwrap()], "<Map<string, number>>");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("onClose"));
        assert!(is_identifier("$store"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_empty_body_has_no_facts() {
        let extractor = Extractor::new(&AnalyzerConfig::default());
        assert_eq!(extractor.extract(""), Facts::default());
    }
}
