//! Risk verdict produced by the classifier.

use serde::{Deserialize, Serialize};

/// Binary heart-disease risk classification.
///
/// A verdict is derived from a single profile and carries no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskVerdict {
    /// Predicted class 1
    AtRisk,
    /// Predicted class 0
    NotAtRisk,
}

impl RiskVerdict {
    #[must_use]
    pub fn is_at_risk(self) -> bool {
        matches!(self, Self::AtRisk)
    }

    /// Result sentence shown to the user.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::AtRisk => "You may be at risk for heart disease",
            Self::NotAtRisk => "You are likely not at risk for heart disease",
        }
    }

    /// Colour used for the result line (RGB).
    #[must_use]
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Self::AtRisk => (255, 0, 0),
            Self::NotAtRisk => (0, 128, 0),
        }
    }
}

impl From<bool> for RiskVerdict {
    fn from(at_risk: bool) -> Self {
        if at_risk {
            Self::AtRisk
        } else {
            Self::NotAtRisk
        }
    }
}

impl From<RiskVerdict> for bool {
    fn from(verdict: RiskVerdict) -> Self {
        verdict.is_at_risk()
    }
}

impl std::fmt::Display for RiskVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AtRisk => write!(f, "AT RISK"),
            Self::NotAtRisk => write!(f, "NOT AT RISK"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_bool_conversions() {
        assert_eq!(RiskVerdict::from(true), RiskVerdict::AtRisk);
        assert!(bool::from(RiskVerdict::AtRisk));
        assert!(!RiskVerdict::from(false).is_at_risk());
    }

    #[test]
    fn test_verdict_colors_differ() {
        assert_ne!(RiskVerdict::AtRisk.color(), RiskVerdict::NotAtRisk.color());
        assert_eq!(RiskVerdict::AtRisk.color(), (255, 0, 0));
    }

    #[test]
    fn test_verdict_serializes_snake_case() {
        let json = serde_json::to_string(&RiskVerdict::NotAtRisk).expect("serialize");
        assert_eq!(json, "\"not_at_risk\"");
    }
}
