use super::push_unique;
use crate::language::strip_source_suffix;
use crate::types::file_name;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static STATIC_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"import\s+(?:type\s+)?(?:\{[^}]*\}|\w+|\*\s+as\s+\w+)(?:\s*,\s*(?:\{[^}]*\}|\w+|\*\s+as\s+\w+))*\s+from\s+['"]([^'"]+)['"]"#,
    )
    .unwrap()
});

static DYNAMIC_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import\s*\(\s*['"]([^'"]+)['"]"#).unwrap());

static REQUIRE_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\brequire\s*\(\s*['"]([^'"]+)['"]"#).unwrap());

static BOUND_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import\s+(?:(\w+)\s*,\s*)?(?:\{([^}]*)\}|(\w+))\s+from\s+['"]([^'"]+)['"]"#)
        .unwrap()
});

/// One imported name and the specifier it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportBinding {
    pub name: String,
    pub source: String,
}

impl ImportBinding {
    /// Whether the specifier is relative to the importing file
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.source.starts_with('.')
    }
}

/// Module identifier recorded for an import specifier.
///
/// Packages keep their top segment (two for scoped packages); relative imports
/// keep their final segment with the source suffix stripped.
#[must_use]
pub fn module_id(source: &str) -> Option<String> {
    let id = if source.starts_with('.') {
        strip_source_suffix(file_name(source)).to_string()
    } else if source.starts_with('@') {
        source.splitn(3, '/').take(2).collect::<Vec<_>>().join("/")
    } else {
        source.split('/').next().unwrap_or_default().to_string()
    };
    Some(id).filter(|id| !id.is_empty() && id != "." && id != "..")
}

/// Imported modules: static imports, then dynamic imports, then `require` calls
#[must_use]
pub fn extract_imports(code: &str) -> Vec<String> {
    let mut imports = Vec::new();
    for re in [&*STATIC_IMPORT, &*DYNAMIC_IMPORT, &*REQUIRE_CALL] {
        for caps in re.captures_iter(code) {
            if let Some(id) = caps.get(1).and_then(|m| module_id(m.as_str())) {
                push_unique(&mut imports, id);
            }
        }
    }
    imports
}

/// Per-symbol import bindings in first-seen order.
///
/// Named bindings use their alias when one is given; default bindings listed in
/// `ignored_defaults` are skipped. Namespace and type-only imports bind nothing.
#[must_use]
pub fn import_map(code: &str, ignored_defaults: &[String]) -> Vec<ImportBinding> {
    let mut bindings: Vec<ImportBinding> = Vec::new();
    let mut bind = |name: &str, source: &str| {
        if name.is_empty() {
            return;
        }
        match bindings.iter_mut().find(|b| b.name == name) {
            Some(existing) => existing.source = source.to_string(),
            None => bindings.push(ImportBinding {
                name: name.to_string(),
                source: source.to_string(),
            }),
        }
    };

    for caps in BOUND_IMPORT.captures_iter(code) {
        let Some(source) = caps.get(4).map(|m| m.as_str()) else {
            continue;
        };
        let ignored = |name: &str| ignored_defaults.iter().any(|i| i == name);

        for default in [caps.get(1), caps.get(3)].into_iter().flatten() {
            if !ignored(default.as_str()) {
                bind(default.as_str(), source);
            }
        }

        if let Some(braced) = caps.get(2) {
            for item in braced.as_str().split(',') {
                let item = item.trim();
                if item.starts_with("type ") {
                    continue;
                }
                let name = item.rsplit(" as ").next().unwrap_or(item).trim();
                bind(name, source);
            }
        }
    }

    bindings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CODE: &str = r#"
'use client'
import React, { useState } from 'react';
import { motion } from "framer-motion";
import type { Metadata } from 'next';
import * as Sentry from '@sentry/nextjs';
import Button from '../components/Button.tsx';
import { formatDate as fmt, parseDate } from './utils/date';
import { useWallet } from '../hooks/useWallet';
const QRCode = require('qrcode/lib/server');
const Chart = dynamic(() => import('./Chart'));
"#;

    #[test]
    fn test_module_ids() {
        assert_eq!(module_id("react-dom/client").as_deref(), Some("react-dom"));
        assert_eq!(module_id("@sentry/nextjs/server").as_deref(), Some("@sentry/nextjs"));
        assert_eq!(module_id("../components/Button.tsx").as_deref(), Some("Button"));
        assert_eq!(module_id("./"), None);
    }

    #[test]
    fn test_extract_imports() {
        assert_eq!(
            extract_imports(CODE),
            vec![
                "react",
                "framer-motion",
                "next",
                "@sentry/nextjs",
                "Button",
                "date",
                "useWallet",
                "Chart",
                "qrcode",
            ]
        );
    }

    #[test]
    fn test_import_map() {
        let ignored = vec!["React".to_string(), "type".to_string()];
        let names: Vec<(String, String)> = import_map(CODE, &ignored)
            .into_iter()
            .map(|b| (b.name, b.source))
            .collect();
        assert_eq!(
            names,
            vec![
                ("useState".to_string(), "react".to_string()),
                ("motion".to_string(), "framer-motion".to_string()),
                ("Button".to_string(), "../components/Button.tsx".to_string()),
                ("fmt".to_string(), "./utils/date".to_string()),
                ("parseDate".to_string(), "./utils/date".to_string()),
                ("useWallet".to_string(), "../hooks/useWallet".to_string()),
            ]
        );
    }

    #[test]
    fn test_binding_locality() {
        let binding = ImportBinding {
            name: "Button".into(),
            source: "./Button".into(),
        };
        assert!(binding.is_local());
    }
}
