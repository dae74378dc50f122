//! # Section Metadata Validator
//!
//! Independent re-check of an annotated archive: every metadata claim is compared
//! against evidence found in the section's own code.
//!
//! ## Features
//!
//! - **Per-section checks** - flow, metadata completeness, state, outbound calls,
//!   contexts, parameters, inline type hints and dependency tree
//! - **Structural checks** - duplicate sections, and missing or extra sections when
//!   the pre-annotation archive is supplied
//! - **Scoring** - accuracy percentage with verdict tiers
//! - **Report** - plain-text report or serializable findings
//!
//! ## Architecture
//!
//! ```text
//! annotated text
//!     │
//!     ├──> Parser
//!     │      ├─ Split on boundary markers
//!     │      └─ Separate FLOW/META/tree lines from code
//!     │
//!     ├──> Detectors (own matchers, not the analyzer's)
//!     │      └─ State, fetch, context and props evidence
//!     │
//!     ├──> Checks
//!     │      ├─ Eight checks per section
//!     │      └─ Duplicate / missing / extra paths
//!     │
//!     └──> Report
//!            ├─ Accuracy and verdict
//!            └─ Distributions and grouped findings
//! ```
//!
//! ## Example
//!
//! ```
//! use sectionmeta_validator::{Validator, ValidatorConfig};
//!
//! let validator = Validator::new(ValidatorConfig::default()).unwrap();
//! let report = validator.validate("// FILE: a.ts\n// FILE: a.ts\n", None, "demo");
//! assert_eq!(report.duplicates, 1);
//! assert!(report.render().contains("[DUPLICATE]"));
//! ```

mod checks;
mod config;
mod detect;
mod error;
mod finding;
mod parse;
mod report;
mod score;
mod validator;

pub use checks::{compare_paths, duplicate_paths, SectionChecks};
pub use config::{ContextAccessor, ValidatorConfig, VerdictTiers};
pub use error::{Result, ValidatorError};
pub use finding::{Category, Finding, Findings, Severity};
pub use parse::{marker_paths, parse_annotated, AnnotatedSection};
pub use report::{PathComparison, ValidationReport};
pub use score::{accuracy, Verdict};
pub use validator::Validator;
