//! # Section Metadata Analyzer
//!
//! Lexical analysis of concatenated source archives: every `// FILE: <path>`
//! section gets a structured metadata summary and is rewritten with that summary
//! embedded as comment lines.
//!
//! ## Philosophy
//!
//! The analyzer is a best-effort pattern classifier, not a compiler front end:
//! - Every classifier is a total, first-match-wins rule table
//! - Every extractor is an independent matcher returning a typed list
//! - Nothing fails on unmatched input; empty results are valid results
//!
//! ## Architecture
//!
//! ```text
//! Archive text
//!     │
//!     ├──> Section Splitter → FileSection[]
//!     │
//!     ├──> Classifiers (role, flow, framework)
//!     │
//!     ├──> Fact Extractors
//!     │    ├─> state, props, contexts
//!     │    ├─> outbound calls
//!     │    └─> imports + per-symbol import map ──> Dependency Tree
//!     │
//!     └──> Annotator
//!          ├─> FLOW / META / DEPENDENCY TREE header
//!          └─> body with inline TYPE hints
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sectionmeta_analyzer::{Analyzer, AnalyzerConfig};
//!
//! let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
//!
//! let archive = "\
//! // FILE: components/Counter.tsx
//! export default function Counter() {
//!   const [count, setCount] = useState(0);
//!   return <button onClick={() => setCount(count + 1)}>{count}</button>;
//! }
//! ";
//!
//! let enhanced = analyzer.enhance(archive);
//! assert_eq!(enhanced.sections[0].metadata.state[0].ty, "number");
//! assert!(enhanced.render().contains("// TYPE: number"));
//! ```

mod analyzer;
mod annotate;
mod classify;
mod config;
mod deps_tree;
mod error;
pub mod extract;
pub mod format;
mod language;
mod marks;
mod rules;
mod section;
mod stats;
mod types;

pub use analyzer::{AnalyzedSection, Analyzer, Enhanced};
pub use annotate::{annotate_body, metadata_lines, render_section};
pub use classify::{Classifier, FlowSignals};
pub use config::{AnalyzerConfig, FlowConfig};
pub use deps_tree::DependencyTree;
pub use error::{AnalyzerError, Result};
pub use language::{strip_source_suffix, SourceKind};
pub use marks::{mark_archive, marks_for_line, Mark, MarkSet};
pub use rules::{Rule, RuleTable};
pub use section::{section_paths, split_archive};
pub use stats::{Distribution, EnhanceStats};
pub use types::{
    file_name, Endpoint, FileSection, Flow, Framework, HttpVerb, Metadata, Role, StateKind,
    StateVar,
};
