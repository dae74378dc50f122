//! Re-parse of an annotated archive into metadata and code.

use sectionmeta_analyzer::format::{
    is_separator, marker_path, FLOW_PREFIX, META_PREFIX, TREE_BRANCH, TREE_HEADER, TREE_LAST,
    TYPE_PREFIX,
};

/// One section of an annotated archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedSection {
    pub path: String,
    /// FLOW, META and dependency-tree lines, trimmed
    pub meta_lines: Vec<String>,
    /// Everything else after the boundary block, verbatim
    pub body_lines: Vec<String>,
}

impl AnnotatedSection {
    /// Value of the `// FLOW:` line
    #[must_use]
    pub fn flow_label(&self) -> Option<&str> {
        self.meta_lines
            .iter()
            .find_map(|line| line.strip_prefix(FLOW_PREFIX))
            .map(str::trim)
    }

    /// Value of a `// META: <field>:` line
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.meta_lines.iter().find_map(|line| {
            line.strip_prefix(META_PREFIX)?
                .trim_start()
                .strip_prefix(name)?
                .strip_prefix(':')
                .map(str::trim)
        })
    }

    /// Whether a list field is absent or `[none]`
    #[must_use]
    pub fn field_is_empty(&self, name: &str) -> bool {
        self.field(name)
            .map_or(true, |v| v == sectionmeta_analyzer::format::NONE || v == "[]")
    }

    /// Items listed on the dependency-tree connector lines
    #[must_use]
    pub fn tree_items(&self) -> Vec<String> {
        self.meta_lines
            .iter()
            .filter_map(|line| {
                let rest = line.strip_prefix("//")?.trim_start();
                let rest = rest
                    .strip_prefix(TREE_BRANCH.trim_end())
                    .or_else(|| rest.strip_prefix(TREE_LAST.trim_end()))?;
                let (_, items) = rest.split_once(':')?;
                Some(items)
            })
            .flat_map(|items| items.split(','))
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Body text joined with newlines
    #[must_use]
    pub fn code(&self) -> String {
        self.body_lines.join("\n")
    }

    /// Every inline type hint with the line that follows it
    pub fn type_hints(&self) -> impl Iterator<Item = (&str, &str)> {
        self.body_lines.iter().enumerate().filter_map(|(i, line)| {
            let ty = line.trim().strip_prefix(TYPE_PREFIX)?.trim();
            let next = self.body_lines.get(i + 1).map_or("", |l| l.trim());
            Some((ty, next))
        })
    }
}

/// Split annotated text on boundary markers, separating metadata from code.
///
/// Separators directly after a marker are dropped. The dependency tree block
/// runs from its header to the first line that is not a comment.
#[must_use]
pub fn parse_annotated(text: &str) -> Vec<AnnotatedSection> {
    let mut sections = Vec::new();
    let mut current: Option<AnnotatedSection> = None;
    let mut in_header = false;
    let mut in_tree = false;

    for line in text.lines() {
        if let Some(path) = marker_path(line) {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(AnnotatedSection {
                path: path.to_string(),
                ..AnnotatedSection::default()
            });
            in_header = true;
            in_tree = false;
            continue;
        }

        let Some(section) = current.as_mut() else {
            continue;
        };
        let trimmed = line.trim();

        if in_header && is_separator(line) {
            continue;
        }
        in_header = false;

        if in_tree {
            if trimmed.starts_with("//") {
                section.meta_lines.push(trimmed.to_string());
                continue;
            }
            in_tree = false;
        }

        if trimmed.starts_with(FLOW_PREFIX) || trimmed.starts_with(META_PREFIX) {
            section.meta_lines.push(trimmed.to_string());
        } else if trimmed == TREE_HEADER {
            section.meta_lines.push(trimmed.to_string());
            in_tree = true;
        } else {
            section.body_lines.push(line.to_string());
        }
    }

    if let Some(done) = current {
        sections.push(done);
    }
    sections
}

/// Paths of every boundary marker, duplicates included
#[must_use]
pub fn marker_paths(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(marker_path)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ANNOTATED: &str = "
// =================================================
// FILE: app/page.tsx
// =================================================
// FLOW: SHARED

// META: Type: Page Component
// META: State: [count:number]
// META: APIs: [none]

// DEPENDENCY TREE:
// Home
// ├── uses: Card, Modal
// └── libs: Link

// TYPE: number
const [count, setCount] = useState(0);
";

    #[test]
    fn separates_metadata_from_code() {
        let sections = parse_annotated(ANNOTATED);
        assert_eq!(sections.len(), 1);
        let section = &sections[0];
        assert_eq!(section.path, "app/page.tsx");
        assert_eq!(section.flow_label(), Some("SHARED"));
        assert_eq!(section.field("Type"), Some("Page Component"));
        assert_eq!(section.field("State"), Some("[count:number]"));
        assert_eq!(section.field("Props"), None);
        assert!(section.field_is_empty("APIs"));
        assert!(section.field_is_empty("Props"));
        assert_eq!(section.tree_items(), vec!["Card", "Modal", "Link"]);
        assert!(!section.code().contains("DEPENDENCY TREE"));
        assert!(!section.code().contains("// Home"));
    }

    #[test]
    fn type_hints_carry_next_line() {
        let sections = parse_annotated(ANNOTATED);
        let hints: Vec<_> = sections[0].type_hints().collect();
        assert_eq!(hints, vec![("number", "const [count, setCount] = useState(0);")]);
    }

    #[test]
    fn marker_paths_keep_duplicates() {
        let text = "// FILE: a.ts\n// FILE: b.ts\n// FILE: a.ts\n";
        assert_eq!(marker_paths(text), vec!["a.ts", "b.ts", "a.ts"]);
        assert_eq!(parse_annotated(text).len(), 3);
    }
}
