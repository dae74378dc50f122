use super::push_unique;
use crate::types::{Endpoint, HttpVerb};
use once_cell::sync::Lazy;
use regex::Regex;

static FETCH_APP_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"fetch\s*\(\s*['"`](/api/[^'"`]+)['"`]"#).unwrap());

static FETCH_BASE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"fetch\s*\(\s*`\$\{[^}]+\}(/[^`]+)`").unwrap());

static FETCH_ABSOLUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"fetch\s*\(\s*['"`]https?://([^/'"`]+)(/[^'"`]+)['"`]"#).unwrap());

static AXIOS_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"axios\.\w+\s*\(\s*['"`](/[^'"`]+)['"`]"#).unwrap());

static AXIOS_BASE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"axios\.\w+\s*\(\s*`\$\{[^}]+\}(/[^`]+)`").unwrap());

static VERB_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+(?:async\s+)?function\s+(GET|POST|PUT|DELETE|PATCH)\s*\(").unwrap()
});

static INTERPOLATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{[^}]+\}").unwrap());

/// Outbound-call matcher bound to the application's own API host
#[derive(Debug, Clone)]
pub struct EndpointMatcher {
    known_host: String,
    placeholder: String,
}

impl EndpointMatcher {
    #[must_use]
    pub fn new(known_host: &str, placeholder: &str) -> Self {
        Self {
            known_host: known_host.to_string(),
            placeholder: placeholder.to_string(),
        }
    }

    /// Outbound calls and route handlers, deduplicated in first-seen order
    #[must_use]
    pub fn extract(&self, code: &str) -> Vec<Endpoint> {
        let mut endpoints = Vec::new();

        for re in [&*FETCH_APP_PATH, &*FETCH_BASE_URL] {
            for path in groups(re, code, 1) {
                push_unique(&mut endpoints, self.path_endpoint(path));
            }
        }

        // Own-host paths are listed before every external call
        let absolute: Vec<(&str, &str)> = FETCH_ABSOLUTE
            .captures_iter(code)
            .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
            .collect();
        let (own, external): (Vec<_>, Vec<_>) = absolute
            .into_iter()
            .partition(|(host, _)| host.eq_ignore_ascii_case(&self.known_host));
        for (_, path) in own {
            push_unique(&mut endpoints, self.path_endpoint(path));
        }
        for (host, path) in external {
            let endpoint = Endpoint::External {
                host: host.to_string(),
                path: self.normalize(path),
            };
            push_unique(&mut endpoints, endpoint);
        }

        for re in [&*AXIOS_PATH, &*AXIOS_BASE_URL] {
            for path in groups(re, code, 1) {
                push_unique(&mut endpoints, self.path_endpoint(path));
            }
        }

        for verb in groups(&VERB_HANDLER, code, 1).filter_map(HttpVerb::parse) {
            push_unique(&mut endpoints, Endpoint::Handler(verb));
        }

        endpoints
    }

    fn path_endpoint(&self, path: &str) -> Endpoint {
        let normalized = self.normalize(path);
        if normalized == path {
            Endpoint::Literal(normalized)
        } else {
            Endpoint::Parameterized(normalized)
        }
    }

    /// Replace every `${...}` interpolation with the placeholder token
    fn normalize(&self, path: &str) -> String {
        INTERPOLATION
            .replace_all(path, regex::NoExpand(&self.placeholder))
            .into_owned()
    }
}

fn groups<'r, 'c>(re: &'r Regex, code: &'c str, group: usize) -> impl Iterator<Item = &'c str> + 'r
where
    'c: 'r,
{
    re.captures_iter(code)
        .filter_map(move |caps| caps.get(group).map(|m| m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matcher() -> EndpointMatcher {
        EndpointMatcher::new("api.dltpays.com", "{param}")
    }

    fn rendered(code: &str) -> Vec<String> {
        matcher().extract(code).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn in_app_paths() {
        let code = r#"
await fetch('/api/users');
await fetch(`/api/orders/${orderId}/items`);
await fetch("/api/users");
"#;
        assert_eq!(rendered(code), vec!["/api/users", "/api/orders/{param}/items"]);
        assert_eq!(
            matcher().extract(code)[1],
            Endpoint::Parameterized("/api/orders/{param}/items".into())
        );
    }

    #[test]
    fn base_url_templates() {
        let code = "fetch(`${API_URL}/affiliate/${id}/stats`); axios.post(`${API_URL}/login`, body)";
        assert_eq!(rendered(code), vec!["/affiliate/{param}/stats", "/login"]);
    }

    #[test]
    fn known_and_external_hosts() {
        let code = r#"
fetch('https://api.dltpays.com/nfc/scan');
fetch(`https://tokencanvas.io/api/mint/${tokenId}`);
"#;
        assert_eq!(
            rendered(code),
            vec!["/nfc/scan", "EXTERNAL:tokencanvas.io/api/mint/{param}"]
        );
    }

    #[test]
    fn own_host_paths_precede_external_calls() {
        let code = r#"
fetch('https://tokencanvas.io/api/mint');
fetch('https://api.dltpays.com/nfc/scan');
fetch('https://other.example/v1/ping');
fetch('https://api.dltpays.com/nfc/pay');
"#;
        assert_eq!(
            rendered(code),
            vec![
                "/nfc/scan",
                "/nfc/pay",
                "EXTERNAL:tokencanvas.io/api/mint",
                "EXTERNAL:other.example/v1/ping",
            ]
        );
    }

    #[test]
    fn axios_literal_paths() {
        assert_eq!(rendered("axios.get('/products')"), vec!["/products"]);
    }

    #[test]
    fn verb_handlers() {
        let code = "\
export async function GET(req: Request) {}
export function POST(req: Request) {}
export async function GET(other) {}
";
        assert_eq!(rendered(code), vec!["HANDLER:GET", "HANDLER:POST"]);
    }

    #[test]
    fn unrelated_calls_are_ignored() {
        assert!(rendered("fetch(url); axios(config); fetchData('/api/x')").is_empty());
    }
}
