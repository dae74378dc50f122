use anyhow::{Context, Result};
use sectionmeta_analyzer::AnalyzerConfig;
use sectionmeta_validator::ValidatorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings file with optional `[analyzer]` and `[validator]` tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub analyzer: AnalyzerConfig,
    pub validator: ValidatorConfig,
}

impl PipelineConfig {
    /// Load from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_tables_take_defaults() {
        let config: PipelineConfig = toml::from_str("").unwrap();
        assert_eq!(config.validator.checks_per_section, 8);
        assert_eq!(config.analyzer.max_tree_libs, 8);
    }

    #[test]
    fn partial_table_overrides_one_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[validator]\nstate_tolerance = 5\n").unwrap();

        let config = PipelineConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.validator.state_tolerance, 5);
        assert_eq!(config.validator.flow_keyword_threshold, 2);
    }

    #[test]
    fn unreadable_config_is_an_error() {
        let err = PipelineConfig::load(Some(Path::new("/nonexistent/sectionmeta.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
