//! # Heartwise
//!
//! Heart-disease risk screening with diet guidance.
//!
//! This crate provides:
//! - A seeded random-forest risk classifier trained on a synthetic corpus
//! - A rule-based diet recommendation engine
//! - A downloadable PDF report
//!
//! The classifier is illustrative only and is not a validated clinical model.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core screening types and rules (profile, verdict, recommendations)
//! - `ports`: Trait definitions for classification and report rendering
//! - `adapters`: Concrete implementations (random forest, PDF writer, log sanitizer)
//! - `application`: The assessment pipeline
//! - `config`: Environment-driven runtime settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::{Assessment, AssessmentRequest, AssessmentService, ReportOutcome};
pub use domain::{HealthProfile, RecommendationSet, RiskVerdict};

/// Result type for Heartwise operations
pub type Result<T> = std::result::Result<T, HeartwiseError>;

/// Main error type for Heartwise
#[derive(Debug, thiserror::Error)]
pub enum HeartwiseError {
    #[error("{0}")]
    InvalidInput(#[from] domain::ValidationError),

    #[error("Classification failed: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_names_field() {
        let err: HeartwiseError = domain::ValidationError::new("age", "0 out of range [1, 120]").into();
        assert_eq!(err.to_string(), "Invalid age: 0 out of range [1, 120]");
    }
}
