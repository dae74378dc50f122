use crate::config::VerdictTiers;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate accuracy in `[0, 100]`.
///
/// Each error costs one check and each warning half of one. With no checks at all
/// the score is 100 when nothing was found and 0 otherwise.
#[must_use]
pub fn accuracy(total_checks: usize, errors: usize, warnings: usize) -> f64 {
    let deductions = errors as f64 + warnings as f64 * 0.5;
    if total_checks == 0 {
        return if deductions == 0.0 { 100.0 } else { 0.0 };
    }
    ((1.0 - deductions / total_checks as f64) * 100.0).clamp(0.0, 100.0)
}

/// Verdict tier for an accuracy score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl Verdict {
    #[must_use]
    pub fn from_accuracy(accuracy: f64, tiers: &VerdictTiers) -> Self {
        if accuracy >= tiers.excellent {
            Self::Excellent
        } else if accuracy >= tiers.good {
            Self::Good
        } else if accuracy >= tiers.fair {
            Self::Fair
        } else {
            Self::NeedsImprovement
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
            Self::NeedsImprovement => "NEEDS IMPROVEMENT",
        }
    }

    /// One-line advice printed under the verdict
    #[must_use]
    pub const fn advice(self) -> &'static str {
        match self {
            Self::Excellent => "Metadata is highly accurate and suitable as a conversion reference.",
            Self::Good => "Metadata is mostly accurate. Address errors before relying on it.",
            Self::Fair => "Significant corrections needed before relying on this reference.",
            Self::NeedsImprovement => "Major corrections required.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_formula() {
        assert_eq!(accuracy(80, 0, 0), 100.0);
        assert_eq!(accuracy(32, 2, 4), 87.5);
        assert_eq!(accuracy(8, 2, 0), 75.0);
    }

    #[test]
    fn accuracy_is_clamped() {
        for (checks, errors, warnings) in [(8, 100, 0), (8, 0, 1000), (1, 5, 5), (16, 16, 0)] {
            let score = accuracy(checks, errors, warnings);
            assert!((0.0..=100.0).contains(&score), "{score}");
        }
        assert_eq!(accuracy(8, 100, 0), 0.0);
    }

    #[test]
    fn empty_archive_score() {
        assert_eq!(accuracy(0, 0, 0), 100.0);
        assert_eq!(accuracy(0, 1, 0), 0.0);
    }

    #[test]
    fn verdict_tiers() {
        let tiers = VerdictTiers::default();
        assert_eq!(Verdict::from_accuracy(100.0, &tiers), Verdict::Excellent);
        assert_eq!(Verdict::from_accuracy(95.0, &tiers), Verdict::Excellent);
        assert_eq!(Verdict::from_accuracy(94.9, &tiers), Verdict::Good);
        assert_eq!(Verdict::from_accuracy(70.0, &tiers), Verdict::Fair);
        assert_eq!(Verdict::from_accuracy(12.5, &tiers), Verdict::NeedsImprovement);
    }
}
