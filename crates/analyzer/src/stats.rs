use serde::{Deserialize, Serialize};

/// Label counter that remembers first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    entries: Vec<(String, usize)>,
}

impl Distribution {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: impl AsRef<str>) {
        let label = label.as_ref();
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((label.to_string(), 1)),
        }
    }

    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0, |(_, count)| *count)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by descending count, ties in first-seen order
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self
            .entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

impl<S: AsRef<str>> FromIterator<S> for Distribution {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dist = Self::new();
        for label in iter {
            dist.add(label);
        }
        dist
    }
}

/// Totals gathered while enhancing an archive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceStats {
    pub sections: usize,
    pub roles: Distribution,
    pub flows: Distribution,
    pub frameworks: Distribution,
    pub state_vars: usize,
    pub props: usize,
    pub endpoints: usize,
    pub contexts: usize,
}

impl EnhanceStats {
    /// Human-readable summary block
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Sections processed: {}\n", self.sections));

        for (title, dist) in [
            ("File Types", &self.roles),
            ("Flow Distribution", &self.flows),
            ("Frameworks", &self.frameworks),
        ] {
            out.push_str(&format!("\n{title}:\n"));
            for (label, count) in dist.sorted() {
                out.push_str(&format!("  {label}: {count}\n"));
            }
        }

        out.push('\n');
        out.push_str(&format!("Total state variables found: {}\n", self.state_vars));
        out.push_str(&format!("Total props extracted: {}\n", self.props));
        out.push_str(&format!("Total API endpoints found: {}\n", self.endpoints));
        out.push_str(&format!("Total context providers found: {}\n", self.contexts));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sorted_by_count_then_first_seen() {
        let dist: Distribution = ["b", "a", "c", "a", "c"].into_iter().collect();
        assert_eq!(dist.sorted(), vec![("a", 2), ("c", 2), ("b", 1)]);
        assert_eq!(dist.count("c"), 2);
        assert_eq!(dist.count("z"), 0);
        assert_eq!(dist.total(), 5);
    }

    #[test]
    fn render_lists_every_distribution() {
        let stats = EnhanceStats {
            sections: 2,
            roles: ["Hook", "Hook"].into_iter().collect(),
            flows: ["SHARED", "SHARED"].into_iter().collect(),
            frameworks: ["TypeScript", "TypeScript"].into_iter().collect(),
            state_vars: 3,
            ..EnhanceStats::default()
        };
        let text = stats.render();
        assert!(text.starts_with("Sections processed: 2\n"));
        assert!(text.contains("File Types:\n  Hook: 2\n"));
        assert!(text.contains("Total state variables found: 3"));
    }
}
