use anyhow::Result;
use ignore::WalkBuilder;
use sectionmeta_analyzer::format::{FILE_MARKER, SEPARATOR_LINE};
use sectionmeta_analyzer::SourceKind;
use std::fs;
use std::path::{Path, PathBuf};

/// Directories never packed, wherever they appear
const SKIPPED_DIRS: [&str; 5] = ["node_modules", ".next", "dist", ".git", "build"];

/// Source files under `root` (.gitignore aware), as sorted relative paths
pub fn collect_sources(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .require_git(false);
    builder.filter_entry(|entry| {
        let name = entry.file_name().to_string_lossy();
        !(entry.depth() > 0 && SKIPPED_DIRS.contains(&name.as_ref()))
    });

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|t| t.is_file()) {
                    continue;
                }
                let Ok(relative) = entry.path().strip_prefix(root) else {
                    continue;
                };
                if SourceKind::from_path(&relative.to_string_lossy()).is_source() {
                    files.push(relative.to_path_buf());
                }
            }
            Err(e) => log::warn!("Failed to read entry: {e}"),
        }
    }

    files.sort();
    log::info!("Found {} source files under {}", files.len(), root.display());
    Ok(files)
}

/// Concatenate every source file under `root` into one archive
pub fn pack_directory(root: &Path) -> Result<String> {
    let mut archive = String::new();
    for relative in collect_sources(root)? {
        let full = root.join(&relative);
        let content = match fs::read_to_string(&full) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Skipping unreadable file {}: {e}", full.display());
                continue;
            }
        };

        let path = relative.to_string_lossy().replace('\\', "/");
        archive.push_str(SEPARATOR_LINE);
        archive.push('\n');
        archive.push_str(&format!("{FILE_MARKER} {path}\n"));
        archive.push_str(SEPARATOR_LINE);
        archive.push('\n');
        archive.push_str(&content);
        if !content.ends_with('\n') {
            archive.push('\n');
        }
        archive.push('\n');
    }
    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn packs_sorted_sources_and_skips_build_output() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src/components")).unwrap();
        fs::create_dir_all(root.join("node_modules/react")).unwrap();
        fs::create_dir_all(root.join(".next")).unwrap();
        fs::write(root.join("src/components/Card.tsx"), "export const Card = 1;").unwrap();
        fs::write(root.join("src/app.ts"), "export const app = 1;\n").unwrap();
        fs::write(root.join("README.md"), "# readme").unwrap();
        fs::write(root.join("node_modules/react/index.js"), "x").unwrap();
        fs::write(root.join(".next/chunk.js"), "x").unwrap();

        let archive = pack_directory(root).unwrap();
        assert_eq!(
            sectionmeta_analyzer::section_paths(&archive),
            vec!["src/app.ts", "src/components/Card.tsx"]
        );
        assert!(archive.contains("export const Card = 1;\n"));
        assert!(!archive.contains("readme"));
    }

    #[test]
    fn rejects_missing_directory() {
        assert!(pack_directory(Path::new("/nonexistent/project")).is_err());
    }
}
