//! Domain layer: Core screening types and rules.
//!
//! Everything here is pure: no I/O, no randomness, no global state.

pub mod guidance;
mod profile;
mod recommendation;
mod report;
mod verdict;

pub use guidance::{general_guidance, GuidanceSection};
pub use profile::{
    ChestPainType, HealthProfile, ProfileInput, Sex, ValidationError, FEATURE_COUNT,
    FEATURE_NAMES,
};
pub use recommendation::{
    derive_recommendations, Category, RecommendationSet, Section, AGE_THRESHOLD,
    CHOLESTEROL_THRESHOLD, SYSTOLIC_BP_THRESHOLD,
};
pub use report::ReportRecord;
pub use verdict::RiskVerdict;
