use super::push_unique;
use once_cell::sync::Lazy;
use regex::Regex;

static USE_CONTEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"useContext\(\s*(\w+)\s*\)").unwrap());

/// Convenience accessors and the shared context each one reads
pub const CONTEXT_ACCESSORS: [(&str, &str); 11] = [
    ("useAuth", "AuthContext"),
    ("useWallet", "WalletContext"),
    ("useXRPL", "XRPLContext"),
    ("useTheme", "ThemeContext"),
    ("useSession", "SessionContext"),
    ("useUser", "UserContext"),
    ("useToast", "ToastContext"),
    ("useRouter", "NextRouter"),
    ("usePathname", "NextRouter"),
    ("useSearchParams", "NextRouter"),
    ("useParams", "NextRouter"),
];

static ACCESSOR_CALLS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    CONTEXT_ACCESSORS
        .iter()
        .map(|(accessor, context)| {
            let re = Regex::new(&format!(r"\b{accessor}\s*\(")).unwrap();
            (re, *context)
        })
        .collect()
});

/// Shared contexts consumed by the body.
///
/// Direct `useContext(X)` arguments come first, followed by canonical names of
/// any known accessor calls, each listed once.
#[must_use]
pub fn extract_contexts(code: &str) -> Vec<String> {
    let mut contexts = Vec::new();

    for caps in USE_CONTEXT.captures_iter(code) {
        if let Some(name) = caps.get(1) {
            push_unique(&mut contexts, name.as_str().to_string());
        }
    }

    for (call, context) in ACCESSOR_CALLS.iter() {
        if call.is_match(code) {
            push_unique(&mut contexts, (*context).to_string());
        }
    }

    contexts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn direct_and_accessor_contexts() {
        let code = "\
const theme = useContext(ThemeContext);
const { user } = useAuth();
const router = useRouter();
const path = usePathname();
";
        assert_eq!(
            extract_contexts(code),
            vec!["ThemeContext", "AuthContext", "NextRouter"]
        );
    }

    #[test]
    fn accessor_names_match_whole_calls() {
        // `useAuthGuard(` is not the `useAuth(` accessor
        assert!(extract_contexts("useAuthGuard();").is_empty());
        assert!(extract_contexts("import { useAuth } from './auth'").is_empty());
    }

    #[test]
    fn direct_context_listed_once() {
        let code = "useContext(AuthContext); useContext(AuthContext); useAuth();";
        assert_eq!(extract_contexts(code), vec!["AuthContext"]);
    }
}
