//! The per-section checks and the cross-section structural checks.

use crate::config::ValidatorConfig;
use crate::detect::{
    contains_word, contexts_used, count_listed_entries, count_state_declarations,
    count_url_fetches, has_props, keyword_hits,
};
use crate::finding::{Category, Finding, Findings};
use crate::parse::AnnotatedSection;
use sectionmeta_analyzer::format::META_FIELDS;
use sectionmeta_analyzer::Flow;

/// Runs the eight checks over one section
pub struct SectionChecks<'a> {
    section: &'a AnnotatedSection,
    config: &'a ValidatorConfig,
    code: String,
}

impl<'a> SectionChecks<'a> {
    #[must_use]
    pub fn new(section: &'a AnnotatedSection, config: &'a ValidatorConfig) -> Self {
        Self {
            section,
            config,
            code: section.code(),
        }
    }

    fn path(&self) -> &str {
        &self.section.path
    }

    /// Run every check, returning the number of vague type hints seen
    pub fn run(&self, findings: &mut Findings) -> usize {
        self.flow(findings);
        self.metadata_complete(findings);
        self.state(findings);
        self.outbound_calls(findings);
        self.contexts(findings);
        self.props(findings);
        let vague = self.type_hints(findings);
        self.dependency_tree(findings);
        vague
    }

    /// Flow label against domain keyword density and affiliate-only routes
    pub fn flow(&self, findings: &mut Findings) {
        let Some(label) = self.section.flow_label() else {
            findings.push(Finding::error(Category::Flow, self.path(), "Missing FLOW label"));
            return;
        };

        let lower = self.code.to_lowercase();
        let affiliate_hits = || keyword_hits(&lower, &self.config.affiliate_keywords);
        let vendor_hits = || keyword_hits(&lower, &self.config.vendor_keywords);
        let threshold = self.config.flow_keyword_threshold;

        match Flow::from_label(label) {
            Some(Flow::AffiliateOnly) => {
                let (own, other) = (affiliate_hits(), vendor_hits());
                if other > threshold && own == 0 {
                    findings.push(Finding::warning(
                        Category::Flow,
                        self.path(),
                        format!(
                            "Marked {label} but has {other} vendor keywords, 0 affiliate keywords"
                        ),
                    ));
                }
            }
            Some(Flow::VendorOnly) => {
                let (own, other) = (vendor_hits(), affiliate_hits());
                if other > threshold && own == 0 {
                    findings.push(Finding::warning(
                        Category::Flow,
                        self.path(),
                        format!(
                            "Marked {label} but has {other} affiliate keywords, 0 vendor keywords"
                        ),
                    ));
                }
            }
            Some(Flow::Shared) => {
                let path = self.path().to_lowercase();
                let affiliate_route = self
                    .config
                    .affiliate_routes
                    .iter()
                    .any(|r| path.contains(r.as_str()));
                if affiliate_route && !path.contains(&self.config.vendor_route) {
                    findings.push(Finding::warning(
                        Category::Flow,
                        self.path(),
                        "Path contains affiliate-specific route but marked SHARED",
                    ));
                }
            }
            Some(Flow::MemberOnly) | None => {}
        }
    }

    /// Every metadata field must be present
    pub fn metadata_complete(&self, findings: &mut Findings) {
        for field in META_FIELDS {
            if self.section.field(field).is_none() {
                findings.push(Finding::error(
                    Category::Meta,
                    self.path(),
                    format!("Missing META field: {field}"),
                ));
            }
        }
    }

    /// Declared state count against the listed entries
    pub fn state(&self, findings: &mut Findings) {
        let actual = count_state_declarations(&self.code);
        let listed = self.section.field("State").map_or(0, count_listed_entries);

        if actual > 0 && listed == 0 {
            findings.push(Finding::error(
                Category::State,
                self.path(),
                format!("META: State says [none] but code has {actual} state variables"),
            ));
        } else if listed > 0 && actual == 0 {
            findings.push(Finding::error(
                Category::State,
                self.path(),
                format!("META: State lists {listed} vars but code has no useState/useReducer"),
            ));
        } else if actual.abs_diff(listed) > self.config.state_tolerance {
            findings.push(Finding::warning(
                Category::State,
                self.path(),
                format!(
                    "State count mismatch: META={listed}, code={actual} (diff={})",
                    actual.abs_diff(listed)
                ),
            ));
        }
    }

    /// Literal-URL fetch calls with no outbound calls listed
    pub fn outbound_calls(&self, findings: &mut Findings) {
        let fetches = count_url_fetches(&self.code);
        if fetches > 0 && self.section.field_is_empty("APIs") {
            findings.push(Finding::error(
                Category::Api,
                self.path(),
                format!("META: APIs says [none] but code has {fetches} fetch calls with URLs"),
            ));
        }
    }

    /// Consumed contexts with no contexts listed
    pub fn contexts(&self, findings: &mut Findings) {
        let used = contexts_used(&self.code, &self.config.context_accessors);
        if !used.is_empty() && self.section.field_is_empty("Context") {
            findings.push(Finding::error(
                Category::Context,
                self.path(),
                format!("META: Context says [none] but code uses: {}", used.join(", ")),
            ));
        }
    }

    /// Parameter-shaped code with no parameters listed
    pub fn props(&self, findings: &mut Findings) {
        if has_props(&self.code) && self.section.field_is_empty("Props") {
            findings.push(Finding::warning(
                Category::Props,
                self.path(),
                "Code has props but META: Props says [none]",
            ));
        }
    }

    /// Vague inline type hints, quoted with the declaration they annotate
    pub fn type_hints(&self, findings: &mut Findings) -> usize {
        let mut vague = 0;
        for (ty, next) in self.section.type_hints() {
            if !self.config.vague_types.iter().any(|v| v == ty) {
                continue;
            }
            let context: String = next.chars().take(self.config.type_context_width).collect();
            let message = match ty {
                "Array" => format!("Generic \"Array\" (no element type): {context}"),
                "Object" => format!("Generic \"Object\" (no structure): {context}"),
                other => format!("Vague type \"{other}\": {context}"),
            };
            findings.push(Finding::warning(Category::Type, self.path(), message));
            vague += 1;
        }
        vague
    }

    /// Dependency-tree items that never appear in the code
    pub fn dependency_tree(&self, findings: &mut Findings) {
        let items = self.section.tree_items();
        let phantom: Vec<&str> = items
            .iter()
            .map(String::as_str)
            .filter(|item| !contains_word(&self.code, item))
            .collect();

        let too_many = phantom.len() as f64 > items.len() as f64 * self.config.phantom_ratio;
        if !phantom.is_empty() && too_many {
            findings.push(Finding::warning(
                Category::Deps,
                self.path(),
                format!(
                    "{}/{} tree items not found in code: {}",
                    phantom.len(),
                    items.len(),
                    phantom.iter().take(5).copied().collect::<Vec<_>>().join(", ")
                ),
            ));
        }
    }
}

/// One error per path that occurs more than once, in first-seen order
#[must_use]
pub fn duplicate_paths(paths: &[String]) -> Vec<Finding> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for path in paths {
        match counts.iter_mut().find(|(p, _)| *p == path.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((path.as_str(), 1)),
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(path, count)| {
            Finding::error(Category::Duplicate, path, format!("File appears {count} times"))
        })
        .collect()
}

/// Paths missing from the annotated output (errors) and paths it added (warnings)
#[must_use]
pub fn compare_paths(original: &[String], annotated: &[String]) -> (Vec<Finding>, Vec<Finding>) {
    let mut missing: Vec<Finding> = Vec::new();
    for path in original {
        if !annotated.contains(path) && !missing.iter().any(|f| &f.path == path) {
            missing.push(Finding::error(
                Category::Missing,
                path,
                "In original but missing from annotated output",
            ));
        }
    }

    let mut extra: Vec<Finding> = Vec::new();
    for path in annotated {
        if !original.contains(path) && !extra.iter().any(|f| &f.path == path) {
            extra.push(Finding::warning(
                Category::Extra,
                path,
                "In annotated output but not in original",
            ));
        }
    }

    (missing, extra)
}
