//! Recommendation tiers derived from a predicted yield

use serde::{Deserialize, Serialize};

/// Yield thresholds (hg/ha) separating the recommendation tiers.
///
/// Comparisons are strict: a yield equal to a threshold falls into the lower tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RecommendationThresholds {
    pub excellent: f64,
    pub good: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            excellent: 40000.0,
            good: 20000.0,
        }
    }
}

/// Qualitative bucket for a predicted yield
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    /// Above the excellent threshold
    Excellent,
    /// Above the good threshold, up to and including the excellent threshold
    Good,
    /// At or below the good threshold
    BelowAverage,
}

impl RecommendationTier {
    pub fn classify(predicted_yield: f64, thresholds: &RecommendationThresholds) -> Self {
        if predicted_yield > thresholds.excellent {
            RecommendationTier::Excellent
        } else if predicted_yield > thresholds.good {
            RecommendationTier::Good
        } else {
            RecommendationTier::BelowAverage
        }
    }

    /// Single-letter band code (A, B, C)
    pub fn code(&self) -> char {
        match self {
            RecommendationTier::Excellent => 'A',
            RecommendationTier::Good => 'B',
            RecommendationTier::BelowAverage => 'C',
        }
    }

    /// Advice shown to the farmer
    pub fn message(&self) -> &'static str {
        match self {
            RecommendationTier::Excellent => {
                "Excellent yield expected! Continue current practices and consider premium crop varieties."
            }
            RecommendationTier::Good => {
                "Good yield. Consider optimizing fertilizer and irrigation for even better results."
            }
            RecommendationTier::BelowAverage => {
                "Yield is below average. Review soil health, crop rotation, and input levels."
            }
        }
    }
}

impl std::fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationTier::Excellent => write!(f, "Excellent"),
            RecommendationTier::Good => write!(f, "Good"),
            RecommendationTier::BelowAverage => write!(f, "Below average"),
        }
    }
}

/// Classify with the default thresholds
pub fn classify_yield(predicted_yield: f64) -> RecommendationTier {
    RecommendationTier::classify(predicted_yield, &RecommendationThresholds::default())
}
