use crate::error::{AnalyzerError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Configuration for classification and extraction heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Flow-ownership rules
    pub flow: FlowConfig,

    /// Path keywords that split `services/` and `lib/` files into services vs utilities
    pub service_keywords: Vec<String>,

    /// Host treated as the application's own API when called with an absolute URL
    pub known_api_host: String,

    /// Token that replaces every `${...}` interpolation in outbound-call paths
    pub placeholder: String,

    /// Maximum number of library entries rendered in the dependency tree
    pub max_tree_libs: usize,

    /// Framework hooks never listed as custom hooks in the dependency tree
    pub builtin_hooks: Vec<String>,

    /// Default-import names left out of the per-symbol import map
    pub ignored_default_imports: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            flow: FlowConfig::default(),
            service_keywords: strings(&["xrpl", "auth", "wallet", "sound"]),
            known_api_host: "api.dltpays.com".to_string(),
            placeholder: "{param}".to_string(),
            max_tree_libs: 8,
            builtin_hooks: strings(&[
                "useState",
                "useEffect",
                "useCallback",
                "useMemo",
                "useRef",
                "useReducer",
                "useContext",
                "useLayoutEffect",
                "useImperativeHandle",
                "useDebugValue",
                "useDeferredValue",
                "useTransition",
                "useId",
                "useSyncExternalStore",
                "useInsertionEffect",
            ]),
            ignored_default_imports: strings(&["React", "type"]),
        }
    }
}

impl AnalyzerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.known_api_host.trim().is_empty() {
            return Err(AnalyzerError::invalid_config(
                "known_api_host must not be empty",
            ));
        }

        if self.placeholder.is_empty() {
            return Err(AnalyzerError::invalid_config("placeholder must not be empty"));
        }

        if self.max_tree_libs == 0 {
            return Err(AnalyzerError::invalid_config("max_tree_libs must be > 0"));
        }

        self.flow.validate()
    }
}

/// Rules for assigning a file to a feature flow.
///
/// Domain A is the affiliate flow, domain B the vendor flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Path fragments that force SHARED before any keyword check
    pub shared_fragments: Vec<String>,

    /// Path fragments marking an affiliate-only file
    pub affiliate_path_markers: Vec<String>,

    /// Path fragments marking a vendor-only file
    pub vendor_path_markers: Vec<String>,

    /// Path fragments marking a member-only file
    pub member_path_markers: Vec<String>,

    /// Substring of the file name marking an affiliate file
    pub affiliate_name_marker: String,

    /// Substring of the file name marking a vendor file
    pub vendor_name_marker: String,

    /// Substring of the file name marking a member file
    pub member_name_marker: String,

    /// Whole-word patterns searched in the leading body window (affiliate)
    pub affiliate_body_patterns: Vec<String>,

    /// Whole-word patterns searched in the leading body window (vendor)
    pub vendor_body_patterns: Vec<String>,

    /// Number of leading body characters searched for domain words
    pub body_window: usize,

    /// Path fragment of the generic route group whose pages are content-scanned
    pub route_group: String,

    /// Whole-word patterns searched in route-group pages (affiliate)
    pub affiliate_route_patterns: Vec<String>,

    /// Whole-word patterns searched in route-group pages (vendor)
    pub vendor_route_patterns: Vec<String>,

    /// Number of leading body characters searched in route-group pages
    pub route_group_window: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            shared_fragments: strings(&[
                "/components/",
                "/lib/",
                "/services/",
                "/hooks/",
                "/utils/",
                "/context/",
                "/providers/",
                "/config/",
                "layout.tsx",
                "/api/",
                "/types/",
                "middleware",
            ]),
            affiliate_path_markers: strings(&["/affiliate"]),
            vendor_path_markers: strings(&["/vendor", "/pos", "/inventory", "/staff"]),
            member_path_markers: strings(&["/member"]),
            affiliate_name_marker: "affiliate".to_string(),
            vendor_name_marker: "vendor".to_string(),
            member_name_marker: "member".to_string(),
            affiliate_body_patterns: strings(&["affiliate"]),
            vendor_body_patterns: strings(&["vendor"]),
            body_window: 2000,
            route_group: "/(main)/".to_string(),
            affiliate_route_patterns: strings(&["affiliate", "referral", "commission", "share.*link"]),
            vendor_route_patterns: strings(&["vendor", "pos", "inventory", "staff", "barcode"]),
            route_group_window: 3000,
        }
    }
}

impl FlowConfig {
    /// Validate flow rules
    pub fn validate(&self) -> Result<()> {
        if self.body_window == 0 || self.route_group_window == 0 {
            return Err(AnalyzerError::invalid_config(
                "flow scan windows must be > 0",
            ));
        }

        if self.route_group.is_empty() {
            return Err(AnalyzerError::invalid_config("flow.route_group must not be empty"));
        }

        for (field, patterns) in self.pattern_sets() {
            word_pattern(field, patterns)?;
        }

        Ok(())
    }

    fn pattern_sets(&self) -> [(&'static str, &[String]); 4] {
        [
            ("flow.affiliate_body_patterns", &self.affiliate_body_patterns),
            ("flow.vendor_body_patterns", &self.vendor_body_patterns),
            ("flow.affiliate_route_patterns", &self.affiliate_route_patterns),
            ("flow.vendor_route_patterns", &self.vendor_route_patterns),
        ]
    }
}

/// Compile a list of regex fragments into one case-insensitive whole-word matcher.
///
/// An empty list yields `None`, which never matches.
pub(crate) fn word_pattern(field: &'static str, patterns: &[String]) -> Result<Option<Regex>> {
    let alternatives: Vec<&str> = patterns
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if alternatives.is_empty() {
        return Ok(None);
    }

    let source = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
    Regex::new(&source)
        .map(Some)
        .map_err(|e| AnalyzerError::invalid_pattern(field, e))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
