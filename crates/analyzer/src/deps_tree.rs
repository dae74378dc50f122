use crate::config::AnalyzerConfig;
use crate::extract::ImportBinding;
use crate::format::{TREE_BRANCH, TREE_LAST};
use crate::language::strip_source_suffix;
use crate::types::file_name;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PRIMARY_DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:export\s+(?:default\s+)?)?(?:function|const)\s+([A-Z]\w*)").unwrap()
});

static HOOK_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(use[A-Z]\w*)\s*\(").unwrap());

/// Compact categorized summary of what a file depends on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyTree {
    /// Display name of the file's primary definition
    pub name: String,
    pub hooks: Vec<String>,
    /// Child components
    pub uses: Vec<String>,
    pub services: Vec<String>,
    pub libs: Vec<String>,
}

impl DependencyTree {
    /// Bucket the import bindings of one section and scan its body for hook calls
    #[must_use]
    pub fn build(path: &str, code: &str, bindings: &[ImportBinding], config: &AnalyzerConfig) -> Self {
        let name = PRIMARY_DEFINITION
            .captures(code)
            .and_then(|caps| caps.get(1))
            .map_or_else(
                || strip_source_suffix(file_name(path)).to_string(),
                |m| m.as_str().to_string(),
            );

        let mut tree = Self {
            name,
            ..Self::default()
        };
        let mut libs = Vec::new();

        for binding in bindings {
            let name = binding.name.clone();
            if !binding.is_local() {
                libs.push(name);
            } else if is_hook_name(&name) {
                tree.hooks.push(name);
            } else if name.starts_with(|c: char| c.is_uppercase()) {
                tree.uses.push(name);
            } else {
                tree.services.push(name);
            }
        }

        for caps in HOOK_CALL.captures_iter(code) {
            let Some(hook) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let builtin = config.builtin_hooks.iter().any(|b| b == hook);
            if !builtin && !tree.hooks.iter().any(|h| h == hook) {
                tree.hooks.push(hook.to_string());
            }
        }

        libs.truncate(config.max_tree_libs);
        tree.libs = libs;
        for bucket in [&mut tree.hooks, &mut tree.uses, &mut tree.services, &mut tree.libs] {
            bucket.sort();
            bucket.dedup();
        }

        tree
    }

    /// Populated buckets in rendering order
    pub fn buckets(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        [
            ("hooks", self.hooks.as_slice()),
            ("uses", self.uses.as_slice()),
            ("services", self.services.as_slice()),
            ("libs", self.libs.as_slice()),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
    }

    /// Every listed dependency name
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.buckets()
            .flat_map(|(_, items)| items.iter().map(String::as_str))
    }

    /// Comment lines: the display name, then one connector line per populated bucket
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        let buckets: Vec<_> = self.buckets().collect();
        let mut lines = Vec::with_capacity(buckets.len() + 1);
        lines.push(format!("// {}", self.name));

        for (i, (label, items)) in buckets.iter().enumerate() {
            let connector = if i + 1 == buckets.len() {
                TREE_LAST
            } else {
                TREE_BRANCH
            };
            lines.push(format!("// {connector}{label}: {}", items.join(", ")));
        }

        lines
    }
}

/// `useX...` with a capitalized segment after the prefix
fn is_hook_name(name: &str) -> bool {
    name.strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::import_map;
    use pretty_assertions::assert_eq;

    fn build(path: &str, code: &str) -> DependencyTree {
        let config = AnalyzerConfig::default();
        let bindings = import_map(code, &config.ignored_default_imports);
        DependencyTree::build(path, code, &bindings, &config)
    }

    #[test]
    fn buckets_by_naming_convention() {
        let code = "\
import { useState } from 'react';
import Link from 'next/link';
import { useWallet } from '../hooks/useWallet';
import Modal from './Modal';
import { formatAmount } from '../lib/format';
export default function Checkout() {
  const [open, setOpen] = useState(false);
  const { balance } = useBalance();
  const wallet = useWallet();
}
";
        let tree = build("app/checkout/page.tsx", code);
        assert_eq!(tree.name, "Checkout");
        assert_eq!(tree.hooks, vec!["useBalance", "useWallet"]);
        assert_eq!(tree.uses, vec!["Modal"]);
        assert_eq!(tree.services, vec!["formatAmount"]);
        assert_eq!(tree.libs, vec!["Link", "useState"]);
    }

    #[test]
    fn renders_last_bucket_distinctly() {
        let code = "import Modal from './Modal';\nimport { z } from 'zod';";
        assert_eq!(
            build("components/Form.tsx", code).render_lines(),
            vec![
                "// Form".to_string(),
                "// ├── uses: Modal".to_string(),
                "// └── libs: z".to_string(),
            ]
        );
    }

    #[test]
    fn empty_tree_is_name_only() {
        let tree = build("lib/helpers.ts", "export const add = (a, b) => a + b;");
        assert_eq!(tree.render_lines(), vec!["// helpers".to_string()]);
        assert_eq!(tree.items().count(), 0);
    }

    #[test]
    fn libs_are_capped() {
        let code: String = (0..12)
            .map(|i| format!("import {{ lib{i} }} from 'pkg{i}';\n"))
            .collect();
        assert_eq!(build("a.ts", &code).libs.len(), 8);
    }
}
