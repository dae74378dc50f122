use crate::error::{Result, ValidatorError};
use sectionmeta_analyzer::extract::CONTEXT_ACCESSORS;
use sectionmeta_analyzer::format::VAGUE_TYPES;
use serde::{Deserialize, Serialize};

/// Thresholds and keyword lists used by the per-section checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Checks counted per section when scoring
    pub checks_per_section: usize,

    /// State count difference tolerated before a warning
    pub state_tolerance: usize,

    /// Other-domain keyword hits needed before a flow label is questioned
    pub flow_keyword_threshold: usize,

    /// Share of dependency-tree items that may be missing from the body
    pub phantom_ratio: f64,

    /// Type hints reported as too vague
    pub vague_types: Vec<String>,

    /// Characters of the declaration line quoted with a vague type
    pub type_context_width: usize,

    /// Lowercase keywords counted as affiliate evidence
    pub affiliate_keywords: Vec<String>,

    /// Lowercase keywords counted as vendor evidence
    pub vendor_keywords: Vec<String>,

    /// Path fragments of affiliate-only routes
    pub affiliate_routes: Vec<String>,

    /// Path fragment that makes an affiliate route legitimately shared
    pub vendor_route: String,

    /// Accessor calls and the context each implies
    pub context_accessors: Vec<ContextAccessor>,

    pub tiers: VerdictTiers,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            checks_per_section: 8,
            state_tolerance: 2,
            flow_keyword_threshold: 2,
            phantom_ratio: 0.4,
            vague_types: strings(&VAGUE_TYPES),
            type_context_width: 70,
            affiliate_keywords: strings(&[
                "affiliate",
                "referral",
                "commission",
                "referral-link",
                "refer-earn",
                "affiliate-dashboard",
                "affiliatecount",
                "affiliate_count",
                "referral_code",
            ]),
            vendor_keywords: strings(&[
                "vendor dashboard",
                "pos terminal",
                "point-of-sale",
                "inventory manage",
                "barcode scan",
                "staff-management",
            ]),
            affiliate_routes: strings(&["/affiliate-dashboard", "/affiliate/"]),
            vendor_route: "/vendor".to_string(),
            context_accessors: CONTEXT_ACCESSORS
                .iter()
                .map(|(accessor, context)| ContextAccessor::new(accessor, context))
                .collect(),
            tiers: VerdictTiers::default(),
        }
    }
}

impl ValidatorConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.checks_per_section == 0 {
            return Err(ValidatorError::invalid_config(
                "checks_per_section must be > 0",
            ));
        }

        if !(self.phantom_ratio > 0.0 && self.phantom_ratio <= 1.0) {
            return Err(ValidatorError::invalid_config(
                "phantom_ratio must be in (0, 1]",
            ));
        }

        if let Some(bad) = self
            .context_accessors
            .iter()
            .find(|a| !is_identifier(&a.accessor))
        {
            return Err(ValidatorError::invalid_config(format!(
                "context accessor '{}' is not an identifier",
                bad.accessor
            )));
        }

        self.tiers.validate()
    }
}

/// A convenience accessor call and the context it reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextAccessor {
    pub accessor: String,
    pub context: String,
}

impl ContextAccessor {
    #[must_use]
    pub fn new(accessor: &str, context: &str) -> Self {
        Self {
            accessor: accessor.to_string(),
            context: context.to_string(),
        }
    }
}

/// Minimum accuracy for each verdict tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictTiers {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for VerdictTiers {
    fn default() -> Self {
        Self {
            excellent: 95.0,
            good: 85.0,
            fair: 70.0,
        }
    }
}

impl VerdictTiers {
    /// Tiers must descend within 0..=100
    pub fn validate(&self) -> Result<()> {
        let ordered = 100.0 >= self.excellent
            && self.excellent >= self.good
            && self.good >= self.fair
            && self.fair >= 0.0;
        if ordered {
            Ok(())
        } else {
            Err(ValidatorError::invalid_config(
                "verdict tiers must satisfy 100 >= excellent >= good >= fair >= 0",
            ))
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
