use crate::finding::{Category, Findings, Severity};
use crate::score::Verdict;
use sectionmeta_analyzer::Distribution;
use serde::Serialize;
use std::fmt::Write;

const RULE_WIDTH: usize = 70;
const SUBRULE_WIDTH: usize = 40;

/// Section counts against the pre-annotation archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathComparison {
    pub original: usize,
    pub annotated: usize,
    pub missing: usize,
    pub extra: usize,
}

/// Outcome of validating one annotated archive
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub title: String,
    pub sections: usize,
    pub total_checks: usize,
    pub errors: usize,
    pub warnings: usize,
    pub type_issues: usize,
    pub duplicates: usize,
    pub accuracy: f64,
    pub verdict: Verdict,
    pub comparison: Option<PathComparison>,
    pub flows: Distribution,
    pub roles: Distribution,
    pub frameworks: Distribution,
    pub findings: Findings,
}

/// Entries of SUGGESTED CORRECTIONS, in print order
const CORRECTIONS: [(Severity, Category, &str, &str, &str); 7] = [
    (
        Severity::Error,
        Category::State,
        "STATE METADATA",
        "sections have State mismatches.",
        "Re-run state extraction with improved patterns.",
    ),
    (
        Severity::Error,
        Category::Api,
        "API METADATA",
        "sections have undetected API calls.",
        "Improve fetch detection for variable-based URLs.",
    ),
    (
        Severity::Error,
        Category::Context,
        "CONTEXT METADATA",
        "sections have undetected context usage.",
        "Expand context hook pattern matching.",
    ),
    (
        Severity::Warning,
        Category::Flow,
        "FLOW LABELS",
        "sections may be mislabeled.",
        "Review path-based flow assignment logic.",
    ),
    (
        Severity::Warning,
        Category::Type,
        "TYPE ANNOTATIONS",
        "annotations lack specificity.",
        "Infer element types from usage context.",
    ),
    (
        Severity::Warning,
        Category::State,
        "STATE COUNTS",
        "sections have count discrepancies.",
        "Check for multi-line or conditional useState patterns.",
    ),
    (
        Severity::Warning,
        Category::Props,
        "PROPS",
        "sections have undetected props.",
        "Improve destructured props detection.",
    ),
];

impl ValidationReport {
    /// Plain-text report
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(RULE_WIDTH);
        let subrule = "-".repeat(SUBRULE_WIDTH);

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "VALIDATION REPORT: {}", self.title);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);

        let _ = writeln!(out, "SUMMARY");
        let _ = writeln!(out, "{subrule}");
        let _ = writeln!(out, "Total file sections:     {}", self.sections);
        let _ = writeln!(out, "Total checks performed:  {}", self.total_checks);
        let _ = writeln!(out, "Errors found:            {}", self.errors);
        let _ = writeln!(out, "Warnings found:          {}", self.warnings);
        let _ = writeln!(out, "Type annotation issues:  {}", self.type_issues);
        let _ = writeln!(out, "Duplicate sections:      {}", self.duplicates);
        let _ = writeln!(out, "Accuracy score:          {:.1}%", self.accuracy);
        let _ = writeln!(out);
        if let Some(cmp) = &self.comparison {
            let _ = writeln!(out, "  Original sections: {}", cmp.original);
            let _ = writeln!(out, "  Annotated sections: {}", cmp.annotated);
            let _ = writeln!(out, "  Missing: {}, Extra: {}", cmp.missing, cmp.extra);
            let _ = writeln!(out);
        }

        for (title, dist) in [
            ("FLOW DISTRIBUTION", &self.flows),
            ("FILE TYPE DISTRIBUTION", &self.roles),
            ("FRAMEWORK DISTRIBUTION", &self.frameworks),
        ] {
            let _ = writeln!(out, "{title}");
            let _ = writeln!(out, "{subrule}");
            for (label, count) in dist.sorted() {
                let _ = writeln!(out, "  {label}: {count}");
            }
            let _ = writeln!(out);
        }

        self.render_findings(&mut out, Severity::Error);
        self.render_findings(&mut out, Severity::Warning);

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "SUGGESTED CORRECTIONS");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);
        let mut number = 0;
        for (severity, category, heading, problem, action) in CORRECTIONS {
            let count = self.findings.count_in(severity, category);
            if count == 0 {
                continue;
            }
            number += 1;
            let _ = writeln!(out, "{number}. {heading}: {count} {problem}");
            let _ = writeln!(out, "   Action: {action}");
            let _ = writeln!(out);
        }
        if number == 0 {
            let _ = writeln!(out, "No corrections needed.");
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "FINAL VERDICT");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);
        let _ = writeln!(out, "ACCURACY: {:.1}% - {}", self.accuracy, self.verdict);
        let _ = writeln!(out, "{}", self.verdict.advice());

        out
    }

    fn render_findings(&self, out: &mut String, severity: Severity) {
        let groups = self.findings.grouped(severity);
        let (heading, noun, empty) = match severity {
            Severity::Error => ("ERRORS (Must Fix)", "errors", "NO ERRORS FOUND"),
            Severity::Warning => ("WARNINGS (Review Recommended)", "warnings", "NO WARNINGS FOUND"),
        };

        if groups.is_empty() {
            let _ = writeln!(out, "{empty}");
            let _ = writeln!(out);
            return;
        }

        let rule = "=".repeat(RULE_WIDTH);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "{heading}");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);

        for (category, items) in groups {
            let _ = writeln!(out, "[{category}] ({} {noun})", items.len());
            let _ = writeln!(out, "{}", "-".repeat(SUBRULE_WIDTH));
            for finding in items {
                let _ = writeln!(out, "  File: {}", finding.file());
                if severity == Severity::Error {
                    let _ = writeln!(out, "  Path: {}", finding.path);
                }
                let _ = writeln!(out, "  Issue: {}", finding.message);
                let _ = writeln!(out);
            }
        }
    }
}
