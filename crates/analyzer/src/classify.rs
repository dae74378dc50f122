//! Path- and content-based classifiers.
//!
//! Every classifier is a total function backed by a [`RuleTable`]: the first
//! matching rule decides the label and later rules are never evaluated.

use crate::config::{word_pattern, AnalyzerConfig};
use crate::error::Result;
use crate::language::SourceKind;
use crate::rules::{Rule, RuleTable};
use crate::types::{file_name, Flow, Framework, Role};
use once_cell::sync::Lazy;
use regex::Regex;

static EXPORTED_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s+(?:default\s+)?function\s+\w+").unwrap());

static EXPORTED_VERB_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+(?:async\s+)?function\s+(?:GET|POST|PUT|DELETE|PATCH)\s*\(").unwrap()
});

static SERVER_DATA_FUNCTIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"getServerSideProps|getStaticProps|generateMetadata|generateStaticParams")
        .unwrap()
});

/// Predicate over a file's path and content
pub type InputPredicate = fn(&ClassifyInput<'_>) -> bool;

/// Predicate over precomputed flow evidence
pub type SignalPredicate = fn(&FlowSignals) -> bool;

/// Everything a path/content rule may look at
pub struct ClassifyInput<'a> {
    /// Lowercased path with a leading `/`, so top-level directories match `/dir/`
    pub path: String,
    /// Lowercased file name
    pub name: String,
    /// File name as written
    pub file: String,
    /// File name without its extension, lowercased
    pub stem: String,
    pub code: &'a str,
    pub kind: SourceKind,
    pub config: &'a AnalyzerConfig,
}

impl<'a> ClassifyInput<'a> {
    pub fn new(path: &str, code: &'a str, config: &'a AnalyzerConfig) -> Self {
        let original = path;
        let lower = path.to_lowercase();
        let path = if lower.starts_with('/') {
            lower
        } else {
            format!("/{lower}")
        };
        let file = file_name(original).to_string();
        let name = file.to_lowercase();
        let stem = name
            .split_once('.')
            .map_or(name.as_str(), |(stem, _)| stem)
            .to_string();
        let kind = SourceKind::from_path(&name);

        Self {
            path,
            name,
            file,
            stem,
            code,
            kind,
            config,
        }
    }

    fn path_has(&self, fragment: &str) -> bool {
        self.path.contains(fragment)
    }

    fn path_has_any<S: AsRef<str>>(&self, fragments: &[S]) -> bool {
        fragments.iter().any(|f| self.path.contains(f.as_ref()))
    }
}

// Role rules

fn in_api_dir(i: &ClassifyInput) -> bool {
    i.path_has("/api/")
}

fn is_middleware(i: &ClassifyInput) -> bool {
    i.name.ends_with("middleware.ts") || i.name.ends_with("middleware.tsx")
}

fn is_hook(i: &ClassifyInput) -> bool {
    i.path_has("/hooks/")
        || i.file
            .strip_prefix("use")
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase() || c == '-')
}

fn in_service_dir(i: &ClassifyInput) -> bool {
    i.path_has_any(&["/services/", "/lib/"])
}

fn is_service(i: &ClassifyInput) -> bool {
    in_service_dir(i) && i.path_has_any(&i.config.service_keywords)
}

fn in_util_dir(i: &ClassifyInput) -> bool {
    i.path_has_any(&["/utils/", "/helpers/"])
}

fn is_config(i: &ClassifyInput) -> bool {
    i.path_has("/config/")
        || ["config.ts", "config.tsx", "config.js", "config.mjs"]
            .iter()
            .any(|suffix| i.name.ends_with(suffix))
}

fn is_page(i: &ClassifyInput) -> bool {
    i.stem == "page"
}

fn in_components_dir(i: &ClassifyInput) -> bool {
    i.path_has("/components/")
}

fn is_layout(i: &ClassifyInput) -> bool {
    i.stem == "layout"
}

fn in_context_dir(i: &ClassifyInput) -> bool {
    i.path_has_any(&["/context/", "/providers/"])
}

fn is_type_module(i: &ClassifyInput) -> bool {
    i.path_has("/types/") || i.name.ends_with(".d.ts")
}

fn looks_like_component(i: &ClassifyInput) -> bool {
    EXPORTED_FUNCTION.is_match(i.code) && i.code.contains('<')
}

fn exports_verb_handlers(i: &ClassifyInput) -> bool {
    EXPORTED_VERB_HANDLER.is_match(i.code)
}

static ROLE_RULES: &[Rule<InputPredicate, Role>] = &[
    Rule { name: "api-directory", predicate: in_api_dir, label: Role::ApiRoute },
    Rule { name: "middleware-file", predicate: is_middleware, label: Role::Middleware },
    Rule { name: "hook", predicate: is_hook, label: Role::Hook },
    Rule { name: "service-keyword", predicate: is_service, label: Role::Service },
    Rule { name: "service-directory", predicate: in_service_dir, label: Role::Utility },
    Rule { name: "utility-directory", predicate: in_util_dir, label: Role::Utility },
    Rule { name: "config", predicate: is_config, label: Role::Config },
    Rule { name: "page", predicate: is_page, label: Role::PageComponent },
    Rule { name: "components-directory", predicate: in_components_dir, label: Role::UiComponent },
    Rule { name: "layout", predicate: is_layout, label: Role::LayoutComponent },
    Rule { name: "context-directory", predicate: in_context_dir, label: Role::ContextProvider },
    Rule { name: "type-module", predicate: is_type_module, label: Role::TypeDefinition },
    Rule { name: "component-content", predicate: looks_like_component, label: Role::UiComponent },
    Rule { name: "handler-content", predicate: exports_verb_handlers, label: Role::ApiRoute },
];

// Framework rules

fn next_api_route(i: &ClassifyInput) -> bool {
    in_api_dir(i) && (i.code.contains("NextRequest") || i.code.contains("NextResponse"))
}

fn client_directive(i: &ClassifyInput) -> bool {
    i.code.contains("'use client'") || i.code.contains("\"use client\"")
}

fn server_directive(i: &ClassifyInput) -> bool {
    i.code.contains("use server")
}

fn server_data_fetching(i: &ClassifyInput) -> bool {
    SERVER_DATA_FUNCTIONS.is_match(i.code)
}

fn renders_markup(i: &ClassifyInput) -> bool {
    i.kind.allows_markup()
        && i.code.contains('<')
        && (i.code.contains("return") || i.code.contains("render"))
}

fn plain_typescript(i: &ClassifyInput) -> bool {
    i.kind.is_plain_typescript()
}

static FRAMEWORK_RULES: &[Rule<InputPredicate, Framework>] = &[
    Rule { name: "next-api-route", predicate: next_api_route, label: Framework::NextApiRoute },
    Rule { name: "api-directory", predicate: in_api_dir, label: Framework::Node },
    Rule { name: "client-directive", predicate: client_directive, label: Framework::ClientComponent },
    Rule { name: "server-directive", predicate: server_directive, label: Framework::ServerAction },
    Rule { name: "server-data", predicate: server_data_fetching, label: Framework::ServerComponent },
    Rule { name: "markup", predicate: renders_markup, label: Framework::ServerComponent },
    Rule { name: "plain-typescript", predicate: plain_typescript, label: Framework::TypeScript },
];

// Flow rules

/// Precomputed path and keyword evidence for flow ownership
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowSignals {
    pub structural_shared: bool,
    pub affiliate: bool,
    pub vendor: bool,
    pub member: bool,
    pub route_affiliate: bool,
    pub route_vendor: bool,
}

fn structural(s: &FlowSignals) -> bool {
    s.structural_shared
}

fn both_domains(s: &FlowSignals) -> bool {
    s.affiliate && s.vendor
}

fn affiliate(s: &FlowSignals) -> bool {
    s.affiliate
}

fn vendor(s: &FlowSignals) -> bool {
    s.vendor
}

fn member(s: &FlowSignals) -> bool {
    s.member
}

fn route_affiliate(s: &FlowSignals) -> bool {
    s.route_affiliate
}

fn route_vendor(s: &FlowSignals) -> bool {
    s.route_vendor
}

static FLOW_RULES: &[Rule<SignalPredicate, Flow>] = &[
    Rule { name: "structural-shared", predicate: structural, label: Flow::Shared },
    Rule { name: "both-domains", predicate: both_domains, label: Flow::Shared },
    Rule { name: "affiliate", predicate: affiliate, label: Flow::AffiliateOnly },
    Rule { name: "vendor", predicate: vendor, label: Flow::VendorOnly },
    Rule { name: "member", predicate: member, label: Flow::MemberOnly },
    Rule { name: "route-group-affiliate", predicate: route_affiliate, label: Flow::AffiliateOnly },
    Rule { name: "route-group-vendor", predicate: route_vendor, label: Flow::VendorOnly },
];

/// Role classification rules, in priority order
pub static ROLE_TABLE: RuleTable<InputPredicate, Role> = RuleTable::new(ROLE_RULES, Role::Module);

/// Framework tagging rules, in priority order
pub static FRAMEWORK_TABLE: RuleTable<InputPredicate, Framework> =
    RuleTable::new(FRAMEWORK_RULES, Framework::NextJs);

/// Flow ownership rules, in priority order
pub static FLOW_TABLE: RuleTable<SignalPredicate, Flow> = RuleTable::new(FLOW_RULES, Flow::Shared);

/// Classifies files by role, flow ownership and framework
#[derive(Debug, Clone)]
pub struct Classifier {
    config: AnalyzerConfig,
    affiliate_body: Option<Regex>,
    vendor_body: Option<Regex>,
    affiliate_route: Option<Regex>,
    vendor_route: Option<Regex>,
}

impl Classifier {
    /// Create a classifier, compiling the configured keyword patterns
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let flow = &config.flow;
        let affiliate_body = word_pattern("flow.affiliate_body_patterns", &flow.affiliate_body_patterns)?;
        let vendor_body = word_pattern("flow.vendor_body_patterns", &flow.vendor_body_patterns)?;
        let affiliate_route =
            word_pattern("flow.affiliate_route_patterns", &flow.affiliate_route_patterns)?;
        let vendor_route = word_pattern("flow.vendor_route_patterns", &flow.vendor_route_patterns)?;

        Ok(Self {
            config,
            affiliate_body,
            vendor_body,
            affiliate_route,
            vendor_route,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Structural role of a file
    #[must_use]
    pub fn role(&self, path: &str, code: &str) -> Role {
        let input = ClassifyInput::new(path, code, &self.config);
        ROLE_TABLE.evaluate(|rule| rule(&input))
    }

    /// Execution environment tag of a file
    #[must_use]
    pub fn framework(&self, path: &str, code: &str) -> Framework {
        let input = ClassifyInput::new(path, code, &self.config);
        FRAMEWORK_TABLE.evaluate(|rule| rule(&input))
    }

    /// Feature-flow ownership of a file
    #[must_use]
    pub fn flow(&self, path: &str, code: &str) -> Flow {
        let signals = self.flow_signals(path, code);
        match FLOW_TABLE.matching_rule(|rule| rule(&signals)) {
            Some(rule) => {
                log::debug!("flow {path}: {} via {}", rule.label, rule.name);
                rule.label
            }
            None => FLOW_TABLE.default_label(),
        }
    }

    /// Evidence used by [`Classifier::flow`]
    #[must_use]
    pub fn flow_signals(&self, path: &str, code: &str) -> FlowSignals {
        let input = ClassifyInput::new(path, code, &self.config);
        let flow = &self.config.flow;

        if input.path_has_any(&flow.shared_fragments) {
            return FlowSignals {
                structural_shared: true,
                ..FlowSignals::default()
            };
        }

        let body = leading_chars(code, flow.body_window);
        let affiliate = input.path_has_any(&flow.affiliate_path_markers)
            || contains_marker(&input.name, &flow.affiliate_name_marker)
            || matches(self.affiliate_body.as_ref(), body);
        let vendor = input.path_has_any(&flow.vendor_path_markers)
            || contains_marker(&input.name, &flow.vendor_name_marker)
            || matches(self.vendor_body.as_ref(), body);
        let member = input.path_has_any(&flow.member_path_markers)
            || contains_marker(&input.name, &flow.member_name_marker);

        let mut signals = FlowSignals {
            structural_shared: false,
            affiliate,
            vendor,
            member,
            route_affiliate: false,
            route_vendor: false,
        };

        if input.path_has(&flow.route_group.to_lowercase()) {
            let window = leading_chars(code, flow.route_group_window);
            signals.route_affiliate = matches(self.affiliate_route.as_ref(), window);
            signals.route_vendor = matches(self.vendor_route.as_ref(), window);
        }

        signals
    }
}

fn contains_marker(name: &str, marker: &str) -> bool {
    !marker.is_empty() && name.contains(&marker.to_lowercase())
}

fn matches(pattern: Option<&Regex>, text: &str) -> bool {
    pattern.is_some_and(|re| re.is_match(text))
}

/// Longest prefix of `text` holding at most `n` characters
#[must_use]
pub fn leading_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleTable;

    fn classifier() -> Classifier {
        Classifier::new(AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn input_normalizes_path_and_detects_kind() {
        let config = AnalyzerConfig::default();
        let input = ClassifyInput::new("App/Components/Card.TSX", "", &config);
        assert_eq!(input.path, "/app/components/card.tsx");
        assert_eq!(input.file, "Card.TSX");
        assert_eq!(input.name, "card.tsx");
        assert_eq!(input.stem, "card");
        assert_eq!(input.kind, SourceKind::Tsx);
    }

    #[test]
    fn role_follows_path_conventions() {
        let c = classifier();
        let cases = [
            ("app/api/users/route.ts", Role::ApiRoute),
            ("middleware.ts", Role::Middleware),
            ("src/hooks/useFoo.ts", Role::Hook),
            ("useWallet.ts", Role::Hook),
            ("lib/walletAuth.ts", Role::Service),
            ("lib/safeStorage.ts", Role::Utility),
            ("utils/format.ts", Role::Utility),
            ("next.config.mjs", Role::Config),
            ("app/(main)/dashboard/page.tsx", Role::PageComponent),
            ("components/Header.tsx", Role::UiComponent),
            ("app/layout.tsx", Role::LayoutComponent),
            ("context/AuthContext.tsx", Role::ContextProvider),
            ("types/global.d.ts", Role::TypeDefinition),
            ("scripts/seed.ts", Role::Module),
        ];
        for (path, expected) in cases {
            assert_eq!(c.role(path, ""), expected, "path {path}");
        }
    }

    #[test]
    fn user_prefixed_files_are_not_hooks() {
        assert_eq!(classifier().role("scripts/user.ts", ""), Role::Module);
    }

    #[test]
    fn role_falls_back_to_content() {
        let c = classifier();
        let component = "export default function Card() { return <div /> }";
        assert_eq!(c.role("widgets/Card.tsx", component), Role::UiComponent);

        let handler = "export async function POST(req) { return ok }";
        assert_eq!(c.role("server/handler.ts", handler), Role::ApiRoute);
    }

    #[test]
    fn path_rules_precede_content_rules() {
        let component = "export default function Card() { return <div /> }";
        assert_eq!(classifier().role("utils/Card.tsx", component), Role::Utility);
    }

    #[test]
    fn framework_tags() {
        let c = classifier();
        assert_eq!(
            c.framework("app/api/x/route.ts", "import { NextResponse } from 'next/server'"),
            Framework::NextApiRoute
        );
        assert_eq!(c.framework("app/api/x/route.ts", ""), Framework::Node);
        assert_eq!(
            c.framework("components/A.tsx", "'use client'\nexport default function A() {}"),
            Framework::ClientComponent
        );
        assert_eq!(c.framework("app/actions.ts", "'use server'"), Framework::ServerAction);
        assert_eq!(
            c.framework("app/blog/page.tsx", "export async function generateMetadata() {}"),
            Framework::ServerComponent
        );
        assert_eq!(
            c.framework("app/about/page.tsx", "export default function About() { return <main /> }"),
            Framework::ServerComponent
        );
        assert_eq!(c.framework("lib/math.ts", "export const x = 1"), Framework::TypeScript);
        assert_eq!(c.framework("public/sw.js", "self.addEventListener()"), Framework::NextJs);
    }

    #[test]
    fn hooks_directory_is_shared() {
        let c = classifier();
        assert_eq!(c.role("src/hooks/useFoo.ts", ""), Role::Hook);
        assert_eq!(c.flow("src/hooks/useFoo.ts", ""), Flow::Shared);
    }

    #[test]
    fn structural_paths_win_over_domain_keywords() {
        let c = classifier();
        assert_eq!(
            c.flow("components/AffiliateDashboardTour.tsx", "affiliate"),
            Flow::Shared
        );
        let signals = c.flow_signals("components/VendorTable.tsx", "vendor vendor");
        assert!(signals.structural_shared);
        assert!(!signals.vendor);
    }

    #[test]
    fn flow_from_domain_paths_and_names() {
        let c = classifier();
        assert_eq!(c.flow("app/affiliate-dashboard/page.tsx", ""), Flow::AffiliateOnly);
        assert_eq!(c.flow("app/staff/page.tsx", ""), Flow::VendorOnly);
        assert_eq!(c.flow("app/vendor/affiliate/page.tsx", ""), Flow::Shared);
        assert_eq!(c.flow("app/member/page.tsx", ""), Flow::MemberOnly);
        assert_eq!(c.flow("app/about/page.tsx", ""), Flow::Shared);
    }

    #[test]
    fn body_window_bounds_keyword_scan() {
        let c = classifier();
        let early = "// vendor settings\nexport default function P() {}";
        assert_eq!(c.flow("app/settings/page.tsx", early), Flow::VendorOnly);

        let late = format!("{}\n// vendor", "x".repeat(2500));
        assert_eq!(c.flow("app/settings/page.tsx", &late), Flow::Shared);
    }

    #[test]
    fn route_group_pages_are_content_scanned() {
        let c = classifier();
        let body = "Track your commission and referral earnings";
        assert_eq!(c.flow("app/(main)/earnings/page.tsx", body), Flow::AffiliateOnly);
        let body = "Scan a barcode at the register";
        assert_eq!(c.flow("app/(main)/checkout/page.tsx", body), Flow::VendorOnly);
        assert_eq!(c.flow("app/(main)/faq/page.tsx", "Questions"), Flow::Shared);
        // outside the route group the wider keyword set does not apply
        assert_eq!(c.flow("app/earnings/page.tsx", "commission"), Flow::Shared);
    }

    #[test]
    fn classifiers_are_deterministic() {
        let c = classifier();
        let inputs = [
            ("app/(main)/dashboard/page.tsx", "vendor pos inventory"),
            ("components/Foo.tsx", "export default function Foo() { return <a/> }"),
            ("lib/x.ts", ""),
        ];
        for (path, code) in inputs {
            let first = (c.role(path, code), c.flow(path, code), c.framework(path, code));
            for _ in 0..5 {
                assert_eq!(first, (c.role(path, code), c.flow(path, code), c.framework(path, code)));
            }
        }
    }

    #[test]
    fn tables_expose_rule_order() {
        fn first<P: 'static, L: Copy + 'static>(table: &RuleTable<P, L>) -> &'static str {
            table.rule_names().next().unwrap()
        }
        assert_eq!(first(&ROLE_TABLE), "api-directory");
        assert_eq!(first(&FLOW_TABLE), "structural-shared");
        assert_eq!(ROLE_TABLE.default_label(), Role::Module);
    }

    #[test]
    fn leading_chars_respects_char_boundaries() {
        assert_eq!(leading_chars("héllo", 2), "hé");
        assert_eq!(leading_chars("abc", 10), "abc");
    }
}
