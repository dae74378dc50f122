/// Source flavour of an archived file, detected from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
    Unknown,
}

/// Suffixes stripped from local module names, longest first
pub const SOURCE_SUFFIXES: [&str; 4] = [".tsx", ".jsx", ".ts", ".js"];

impl SourceKind {
    /// Detect source kind from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "ts" | "mts" | "cts" => SourceKind::TypeScript,
            "tsx" => SourceKind::Tsx,
            "js" | "mjs" | "cjs" => SourceKind::JavaScript,
            "jsx" => SourceKind::Jsx,
            _ => SourceKind::Unknown,
        }
    }

    /// Detect source kind from an archive path
    pub fn from_path(path: &str) -> Self {
        let name = crate::types::file_name(path);
        name.rsplit_once('.')
            .map(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(SourceKind::Unknown)
    }

    /// Whether files of this kind may contain JSX markup
    pub fn allows_markup(self) -> bool {
        matches!(self, SourceKind::Tsx | SourceKind::Jsx)
    }

    /// Whether this is a plain TypeScript module
    pub fn is_plain_typescript(self) -> bool {
        self == SourceKind::TypeScript
    }

    /// Whether the packer should include files of this kind
    pub fn is_source(self) -> bool {
        self != SourceKind::Unknown
    }
}

/// Strip the first matching known source suffix from a module name
pub fn strip_source_suffix(name: &str) -> &str {
    SOURCE_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .unwrap_or(name)
}
