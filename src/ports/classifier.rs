//! Classifier port: Trait for heart-disease risk prediction.
//!
//! This trait abstracts the trained model from the application logic.

use crate::domain::{HealthProfile, RiskVerdict, FEATURE_COUNT};

/// Errors raised at the classifier boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    #[error("Invalid classifier input: {0}")]
    InvalidInput(String),

    #[error("Training failed: {0}")]
    Training(String),
}

/// Check that a feature row has the expected arity and finite values.
///
/// # Errors
/// Returns `ClassifierError::InvalidInput` describing the first problem found.
pub fn check_row(features: &[f64]) -> Result<(), ClassifierError> {
    if features.len() != FEATURE_COUNT {
        return Err(ClassifierError::InvalidInput(format!(
            "Expected {FEATURE_COUNT} features, got {}",
            features.len()
        )));
    }
    if let Some(idx) = features.iter().position(|v| !v.is_finite()) {
        return Err(ClassifierError::InvalidInput(format!(
            "Feature {} ({}) is not finite",
            idx,
            crate::domain::FEATURE_NAMES[idx]
        )));
    }
    Ok(())
}

/// Trait for risk classifiers.
///
/// Implementations must be immutable after construction so a single
/// instance can be shared read-only across callers.
pub trait RiskClassifier: Send + Sync {
    /// Predict a verdict for one feature row.
    ///
    /// Column order: age, sex, systolic_bp, cholesterol, chest_pain_type.
    ///
    /// # Errors
    /// Returns `ClassifierError::InvalidInput` for rows of the wrong arity or
    /// with non-finite values.
    fn predict(&self, features: &[f64]) -> Result<RiskVerdict, ClassifierError>;

    /// Predict a verdict for a validated profile.
    ///
    /// # Errors
    /// Only fails if the implementation rejects a well-formed row.
    fn predict_profile(&self, profile: &HealthProfile) -> Result<RiskVerdict, ClassifierError> {
        self.predict(&profile.features())
    }
}
