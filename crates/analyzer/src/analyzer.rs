use crate::annotate::render_section;
use crate::classify::Classifier;
use crate::config::AnalyzerConfig;
use crate::deps_tree::DependencyTree;
use crate::error::Result;
use crate::extract::Extractor;
use crate::section::split_archive;
use crate::stats::EnhanceStats;
use crate::types::{FileSection, Metadata};
use serde::Serialize;

/// One section together with everything derived from it
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedSection {
    pub section: FileSection,
    pub metadata: Metadata,
    pub tree: DependencyTree,
}

impl AnalyzedSection {
    /// Annotated lines for this section
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        render_section(&self.section.path, &self.metadata, &self.tree, &self.section.body)
    }
}

/// Result of enhancing a whole archive
#[derive(Debug, Clone, Serialize)]
pub struct Enhanced {
    pub sections: Vec<AnalyzedSection>,
    pub stats: EnhanceStats,
}

impl Enhanced {
    /// Annotated archive text
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            for line in section.render_lines() {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }

    /// Paths of the analyzed sections, in order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.section.path.as_str())
    }
}

/// Classification and extraction engine
#[derive(Debug, Clone)]
pub struct Analyzer {
    classifier: Classifier,
    extractor: Extractor,
}

impl Analyzer {
    /// Create an analyzer, validating the configuration
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let extractor = Extractor::new(&config);
        let classifier = Classifier::new(config)?;
        Ok(Self {
            classifier,
            extractor,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        self.classifier.config()
    }

    /// Classify and extract facts for one section
    #[must_use]
    pub fn analyze(&self, section: FileSection) -> AnalyzedSection {
        let code = section.code();
        let path = section.path.as_str();

        let role = self.classifier.role(path, &code);
        let flow = self.classifier.flow(path, &code);
        let framework = self.classifier.framework(path, &code);
        let facts = self.extractor.extract(&code);
        log::debug!("{path}: {role} / {flow} / {framework}");

        let tree = DependencyTree::build(path, &code, &facts.bindings, self.config());
        let metadata = Metadata {
            role,
            flow,
            framework,
            state: facts.state,
            props: facts.props,
            contexts: facts.contexts,
            endpoints: facts.endpoints,
            imports: facts.imports,
        };

        AnalyzedSection {
            section,
            metadata,
            tree,
        }
    }

    /// Split an archive and analyze every section
    #[must_use]
    pub fn enhance(&self, text: &str) -> Enhanced {
        let sections = split_archive(text);
        let total = sections.len();
        log::info!("Analyzing {total} file sections");

        let mut stats = EnhanceStats {
            sections: total,
            ..EnhanceStats::default()
        };
        let mut analyzed = Vec::with_capacity(total);

        for (i, section) in sections.into_iter().enumerate() {
            let result = self.analyze(section);
            let meta = &result.metadata;
            stats.roles.add(meta.role.as_str());
            stats.flows.add(meta.flow.as_str());
            stats.frameworks.add(meta.framework.as_str());
            stats.state_vars += meta.state.len();
            stats.props += meta.props.len();
            stats.endpoints += meta.endpoints.len();
            stats.contexts += meta.contexts.len();
            analyzed.push(result);

            if (i + 1) % 20 == 0 {
                log::debug!("Processed {}/{total} sections", i + 1);
            }
        }

        Enhanced {
            sections: analyzed,
            stats,
        }
    }
}
