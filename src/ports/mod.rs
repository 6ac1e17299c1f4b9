//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and its collaborators (the trained model and the
//! document renderer).

mod classifier;
mod report;

pub use classifier::{check_row, ClassifierError, RiskClassifier};
pub use report::{ReportError, ReportRenderer, DEFAULT_REPORT_FILE_NAME};
