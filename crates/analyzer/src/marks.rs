//! Coarse structural `// MARK: -` comments inside each section body.

use crate::format::{is_file_marker, is_separator, MARK_PREFIX};
use once_cell::sync::Lazy;
use regex::Regex;

static CONSTANT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:export\s+)?const\s+[A-Z_]{2,}").unwrap());

static DEFAULT_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^export\s+default\s+function\s+\w+").unwrap());

static CAPITALIZED_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:export\s+)?function\s+[A-Z]\w*").unwrap());

static CAPITALIZED_CONST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:export\s+)?const\s+[A-Z]\w*").unwrap());

static HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:const\s+)?(?:handle[A-Z]|on[A-Z])\w*\s*=").unwrap());

static DATA_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:const\s+)?(?:fetch|load|get|post|create|update|delete|save|submit)\w+\s*=\s*(?:async\s*)?\(",
    )
    .unwrap()
});

static RENDER_RETURN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^return\s*(?:\(?\s*$|\(<)").unwrap());

/// Structural marker kinds, in the order they are checked on each line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Mark {
    Imports = 1 << 0,
    Types = 1 << 1,
    Constants = 1 << 2,
    Component = 1 << 3,
    State = 1 << 4,
    Effects = 1 << 5,
    Handlers = 1 << 6,
    Api = 1 << 7,
    Render = 1 << 8,
    Exports = 1 << 9,
}

impl Mark {
    pub const ALL: [Mark; 10] = [
        Mark::Imports,
        Mark::Types,
        Mark::Constants,
        Mark::Component,
        Mark::State,
        Mark::Effects,
        Mark::Handlers,
        Mark::Api,
        Mark::Render,
        Mark::Exports,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Mark::Imports => "Imports & Dependencies",
            Mark::Types => "Types & Interfaces",
            Mark::Constants => "Constants & Configuration",
            Mark::Component => "Component Definition",
            Mark::State => "State Management",
            Mark::Effects => "Hooks & Effects",
            Mark::Handlers => "Event Handlers",
            Mark::Api => "API Calls & Data Fetching",
            Mark::Render => "Main Render",
            Mark::Exports => "Exports",
        }
    }

    /// Markers that only make sense inside a component body
    const fn needs_component(self) -> bool {
        matches!(
            self,
            Mark::State | Mark::Effects | Mark::Handlers | Mark::Api | Mark::Render
        )
    }

    fn matches(self, line: &str, seen: MarkSet) -> bool {
        match self {
            Mark::Imports => {
                line.starts_with("import ")
                    || line.starts_with("from ")
                    || (line.starts_with("const ") && line.contains("require("))
                    || line.starts_with("'use client'")
                    || line.starts_with("\"use client\"")
            }
            Mark::Types => ["interface ", "type ", "export interface", "export type ", "enum "]
                .iter()
                .any(|prefix| line.starts_with(prefix)),
            Mark::Constants => {
                !seen.contains(Mark::Component)
                    && CONSTANT.is_match(line)
                    && !line.contains("useState")
            }
            Mark::Component => {
                DEFAULT_FUNCTION.is_match(line)
                    || CAPITALIZED_FUNCTION.is_match(line)
                    || (CAPITALIZED_CONST.is_match(line)
                        && (line.contains("=>") || line.contains(": React") || line.contains("FC")))
            }
            Mark::State => line.contains("useState(") || line.contains("useReducer("),
            Mark::Effects => line.starts_with("useEffect(") || line.starts_with("useEffect ("),
            Mark::Handlers => HANDLER.is_match(line),
            Mark::Api => DATA_FUNCTION.is_match(line),
            Mark::Render => RENDER_RETURN.is_match(line),
            Mark::Exports => {
                line == "export default"
                    || (line.starts_with("export default ") && !line.contains("function"))
                    || line.starts_with("module.exports")
            }
        }
    }
}

/// Markers already emitted in the current section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkSet(u16);

impl MarkSet {
    #[must_use]
    pub const fn contains(self, mark: Mark) -> bool {
        self.0 & mark as u16 != 0
    }

    pub fn insert(&mut self, mark: Mark) {
        self.0 |= mark as u16;
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Markers to emit before `line`, recording them in `seen`
pub fn marks_for_line(line: &str, seen: &mut MarkSet) -> Vec<Mark> {
    let trimmed = line.trim();
    if trimmed.is_empty()
        || trimmed.starts_with("//")
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
    {
        return Vec::new();
    }

    let mut emitted = Vec::new();
    for mark in Mark::ALL {
        if seen.contains(mark) || (mark.needs_component() && !seen.contains(Mark::Component)) {
            continue;
        }
        if mark.matches(trimmed, *seen) {
            seen.insert(mark);
            emitted.push(mark);
        }
    }
    emitted
}

/// Insert structural markers into every section of an archive.
///
/// Boundary markers, separators and any preamble pass through unchanged. Each
/// section starts with an empty [`MarkSet`].
#[must_use]
pub fn mark_archive(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut seen: Option<MarkSet> = None;
    let mut sections = 0usize;

    for line in text.lines() {
        if is_file_marker(line) {
            seen = Some(MarkSet::default());
            sections += 1;
        } else if !is_separator(line) {
            if let Some(seen) = seen.as_mut() {
                for mark in marks_for_line(line, seen) {
                    if mark != Mark::Imports {
                        out.push(String::new());
                    }
                    out.push(format!("{MARK_PREFIX} {}", mark.title()));
                }
            }
        }
        out.push(line.to_string());
    }

    log::info!("Marked {sections} sections");
    let mut marked = out.join("\n");
    if text.ends_with('\n') {
        marked.push('\n');
    }
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn component_gated_markers() {
        let mut seen = MarkSet::default();
        assert!(marks_for_line("  const [a, setA] = useState(0);", &mut seen).is_empty());
        assert_eq!(
            marks_for_line("export default function Page() {", &mut seen),
            vec![Mark::Component]
        );
        assert_eq!(
            marks_for_line("  const [a, setA] = useState(0);", &mut seen),
            vec![Mark::State]
        );
        assert!(marks_for_line("  const [b, setB] = useState(1);", &mut seen).is_empty());
    }

    #[test]
    fn comments_and_blanks_are_never_classified() {
        let mut seen = MarkSet::default();
        assert!(marks_for_line("// import x from 'y'", &mut seen).is_empty());
        assert!(marks_for_line("   ", &mut seen).is_empty());
        assert!(seen.is_empty());
    }

    #[test]
    fn constants_only_before_component() {
        let mut seen = MarkSet::default();
        seen.insert(Mark::Component);
        assert!(marks_for_line("const API_URL = 'x';", &mut seen).is_empty());
    }

    #[test]
    fn mark_sets_are_per_section() {
        let text = "\
// =====
// FILE: a.tsx
// =====
import React from 'react';
export default function A() {
  return (
    <div />
  );
}
// =====
// FILE: b.ts
// =====
import { x } from 'y';
";
        let expected = "\
// =====
// FILE: a.tsx
// =====
// MARK: - Imports & Dependencies
import React from 'react';

// MARK: - Component Definition
export default function A() {

// MARK: - Main Render
  return (
    <div />
  );
}
// =====
// FILE: b.ts
// =====
// MARK: - Imports & Dependencies
import { x } from 'y';
";
        assert_eq!(mark_archive(text), expected);
    }
}
