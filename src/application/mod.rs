//! Application layer: Use cases and services.
//!
//! Orchestrates the domain rules with the classifier and renderer ports.

mod assessment;

pub use assessment::{
    Assessment, AssessmentRequest, AssessmentService, RenderedReport, ReportOutcome,
};
