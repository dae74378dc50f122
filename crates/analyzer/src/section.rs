use crate::format::{is_file_marker, is_separator, marker_path};
use crate::types::FileSection;

/// Split a concatenated archive into ordered file sections.
///
/// Text before the first boundary marker is preamble and is dropped. Separator
/// lines directly above or below a marker belong to that section's header, never
/// to a body. Repeated paths are kept as separate sections; duplicates are a
/// validation concern, not a split-time failure.
#[must_use]
pub fn split_archive(text: &str) -> Vec<FileSection> {
    let lines: Vec<&str> = text.lines().collect();
    let mut sections: Vec<FileSection> = Vec::new();
    let mut current: Option<FileSection> = None;
    let mut pending: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if is_file_marker(line) {
            if let Some(done) = current.take() {
                sections.push(done);
            }

            let path = marker_path(line).unwrap_or_default().to_string();
            let mut header: Vec<String> = pending.drain(..).map(str::to_string).collect();
            header.push(line.to_string());

            i += 1;
            while i < lines.len() && is_separator(lines[i]) {
                header.push(lines[i].to_string());
                i += 1;
            }

            current = Some(FileSection::new(path, header, Vec::new()));
            continue;
        }

        if is_separator(line) {
            pending.push(line);
        } else {
            flush_pending(&mut current, &mut pending);
            if let Some(section) = current.as_mut() {
                section.body.push(line.to_string());
            }
        }
        i += 1;
    }

    flush_pending(&mut current, &mut pending);
    if let Some(done) = current {
        sections.push(done);
    }

    log::debug!("Split archive into {} sections", sections.len());
    sections
}

/// Paths of every boundary marker, in order, duplicates included
#[must_use]
pub fn section_paths(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(marker_path)
        .map(str::to_string)
        .collect()
}

fn flush_pending(current: &mut Option<FileSection>, pending: &mut Vec<&str>) {
    if pending.is_empty() {
        return;
    }
    match current.as_mut() {
        Some(section) => section
            .body
            .extend(pending.drain(..).map(str::to_string)),
        None => pending.clear(),
    }
}
