use sectionmeta_analyzer::file_name;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a finding is about. Variants are declared alphabetically so the derived
/// ordering matches report grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Api,
    Context,
    Deps,
    Duplicate,
    Extra,
    Flow,
    Meta,
    Missing,
    Props,
    State,
    Type,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "API",
            Self::Context => "CONTEXT",
            Self::Deps => "DEPS",
            Self::Duplicate => "DUPLICATE",
            Self::Extra => "EXTRA",
            Self::Flow => "FLOW",
            Self::Meta => "META",
            Self::Missing => "MISSING",
            Self::Props => "PROPS",
            Self::State => "STATE",
            Self::Type => "TYPE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One divergence between embedded metadata and what the text shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: Category,
    pub severity: Severity,
    /// Section path the finding refers to
    pub path: String,
    pub message: String,
}

impl Finding {
    #[must_use]
    pub fn error(category: Category, path: &str, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Error,
            path: path.to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(category: Category, path: &str, message: impl Into<String>) -> Self {
        Self {
            category,
            severity: Severity::Warning,
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// File name component of the path
    #[must_use]
    pub fn file(&self) -> &str {
        file_name(&self.path)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Append-only findings list for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Findings(Vec<Finding>);

impl Findings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.0.push(finding);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.0.iter()
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.0.iter().filter(move |f| f.severity == severity)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    #[must_use]
    pub fn count_in(&self, severity: Severity, category: Category) -> usize {
        self.with_severity(severity)
            .filter(|f| f.category == category)
            .count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Findings of one severity grouped by category, categories in alphabetical order
    #[must_use]
    pub fn grouped(&self, severity: Severity) -> Vec<(Category, Vec<&Finding>)> {
        let mut groups: Vec<(Category, Vec<&Finding>)> = Vec::new();
        for finding in self.with_severity(severity) {
            match groups.iter_mut().find(|(c, _)| *c == finding.category) {
                Some((_, items)) => items.push(finding),
                None => groups.push((finding.category, vec![finding])),
            }
        }
        groups.sort_by_key(|(category, _)| *category);
        groups
    }
}

impl Extend<Finding> for Findings {
    fn extend<I: IntoIterator<Item = Finding>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_sort_alphabetically() {
        let mut all = vec![Category::Type, Category::Api, Category::Missing, Category::Deps];
        all.sort();
        let names: Vec<_> = all.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["API", "DEPS", "MISSING", "TYPE"]);
    }

    #[test]
    fn grouping_keeps_insertion_order_within_category() {
        let mut findings = Findings::new();
        findings.push(Finding::error(Category::State, "a/one.tsx", "first"));
        findings.push(Finding::error(Category::Api, "b.tsx", "api"));
        findings.push(Finding::warning(Category::State, "c.tsx", "warn"));
        findings.push(Finding::error(Category::State, "d.tsx", "second"));

        let groups = findings.grouped(Severity::Error);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Category::Api);
        let messages: Vec<_> = groups[1].1.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(findings.count(Severity::Warning), 1);
        assert_eq!(findings.count_in(Severity::Error, Category::State), 2);
        assert_eq!(findings.iter().next().unwrap().file(), "one.tsx");
    }
}
