//! Adapters layer: Concrete implementations of ports.
//!
//! - `forest`: random-forest `RiskClassifier`
//! - `pdf`: PDF `ReportRenderer`
//! - `sanitize`: PII filtering for logs

pub mod forest;
pub mod pdf;
pub mod sanitize;
