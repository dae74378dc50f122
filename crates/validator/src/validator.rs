use crate::checks::{compare_paths, duplicate_paths, SectionChecks};
use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::finding::{Findings, Severity};
use crate::parse::{marker_paths, parse_annotated, AnnotatedSection};
use crate::report::{PathComparison, ValidationReport};
use crate::score::{accuracy, Verdict};
use sectionmeta_analyzer::Distribution;

const UNLABELED: &str = "UNKNOWN";

/// Re-checks an annotated archive against its own code
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `annotated`, optionally comparing its paths with the pre-annotation archive
    #[must_use]
    pub fn validate(&self, annotated: &str, original: Option<&str>, title: &str) -> ValidationReport {
        let sections = parse_annotated(annotated);
        let paths = marker_paths(annotated);
        log::info!("Validating {} sections of {title}", sections.len());

        let mut findings = Findings::new();

        let duplicates = duplicate_paths(&paths);
        let duplicate_count = duplicates.len();
        findings.extend(duplicates);

        let comparison = original.map(|text| {
            let original_paths = marker_paths(text);
            let (missing, extra) = compare_paths(&original_paths, &paths);
            let comparison = PathComparison {
                original: original_paths.len(),
                annotated: paths.len(),
                missing: missing.len(),
                extra: extra.len(),
            };
            findings.extend(missing);
            findings.extend(extra);
            comparison
        });

        let mut type_issues = 0;
        for (i, section) in sections.iter().enumerate() {
            type_issues += SectionChecks::new(section, &self.config).run(&mut findings);
            if (i + 1) % 20 == 0 {
                log::debug!("Checked {}/{} sections", i + 1, sections.len());
            }
        }

        let total_checks = sections.len() * self.config.checks_per_section;
        let errors = findings.count(Severity::Error);
        let warnings = findings.count(Severity::Warning);
        let score = accuracy(total_checks, errors, warnings);
        let verdict = Verdict::from_accuracy(score, &self.config.tiers);
        log::info!("Found {errors} errors and {warnings} warnings, accuracy {score:.1}%");

        ValidationReport {
            title: title.to_string(),
            sections: sections.len(),
            total_checks,
            errors,
            warnings,
            type_issues,
            duplicates: duplicate_count,
            accuracy: score,
            verdict,
            comparison,
            flows: label_distribution(&sections, |s| s.flow_label()),
            roles: label_distribution(&sections, |s| s.field("Type")),
            frameworks: label_distribution(&sections, |s| s.field("Framework")),
            findings,
        }
    }
}

fn label_distribution<'a>(
    sections: &'a [AnnotatedSection],
    label: impl Fn(&'a AnnotatedSection) -> Option<&'a str>,
) -> Distribution {
    sections
        .iter()
        .map(|section| label(section).unwrap_or(UNLABELED))
        .collect()
}
