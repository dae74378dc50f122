//! Line shapes of the archive format, shared by the annotator and its readers.

/// Boundary marker prefix: `// FILE: <path>`
pub const FILE_MARKER: &str = "// FILE:";

/// Decorative separator prefix
pub const SEPARATOR_PREFIX: &str = "// ====";

/// Separator emitted around boundary markers
pub const SEPARATOR_LINE: &str = "// =================================================";

pub const FLOW_PREFIX: &str = "// FLOW:";
pub const META_PREFIX: &str = "// META:";
pub const TREE_HEADER: &str = "// DEPENDENCY TREE:";
pub const TYPE_PREFIX: &str = "// TYPE:";
pub const MARK_PREFIX: &str = "// MARK: -";

pub const TREE_BRANCH: &str = "├── ";
pub const TREE_LAST: &str = "└── ";

/// Rendered value of an empty list field
pub const NONE: &str = "[none]";

/// Metadata field names in rendering order
pub const META_FIELDS: [&str; 8] = [
    "Type",
    "Flow",
    "Framework",
    "State",
    "Props",
    "Context",
    "APIs",
    "Dependencies",
];

/// Type hints considered too vague to be useful
pub const VAGUE_TYPES: [&str; 4] = ["unknown", "nullable", "Array", "Object"];

/// Whether a trimmed line is a boundary marker
#[must_use]
pub fn is_file_marker(line: &str) -> bool {
    line.trim().starts_with(FILE_MARKER)
}

/// Path carried by a boundary marker line
#[must_use]
pub fn marker_path(line: &str) -> Option<&str> {
    line.trim().strip_prefix(FILE_MARKER).map(str::trim)
}

/// Whether a trimmed line is a decorative separator
#[must_use]
pub fn is_separator(line: &str) -> bool {
    line.trim().starts_with(SEPARATOR_PREFIX)
}

/// Render a list field as `[a, b]`, or `[none]` when empty
#[must_use]
pub fn render_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect();
    if parts.is_empty() {
        NONE.to_string()
    } else {
        format!("[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_path() {
        assert_eq!(marker_path("  // FILE: app/page.tsx  "), Some("app/page.tsx"));
        assert_eq!(marker_path("// META: Type: Hook"), None);
        assert!(is_file_marker("// FILE: x"));
        assert!(is_separator("// ==========="));
        assert!(!is_separator("// == not quite"));
    }

    #[test]
    fn test_render_list() {
        assert_eq!(render_list(Vec::<String>::new()), "[none]");
        assert_eq!(render_list(["a", "b"]), "[a, b]");
    }
}
