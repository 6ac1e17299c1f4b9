//! Report port: Trait for rendering a downloadable document.
//!
//! The layout engine is a black box to the application: it receives a
//! [`ReportRecord`] and returns bytes, or a [`ReportError`].

use crate::domain::ReportRecord;

/// Default download file name for rendered reports.
pub const DEFAULT_REPORT_FILE_NAME: &str = "heart_health_report.pdf";

/// Document rendering failure.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report encoding failed: {0}")]
    Encoding(String),

    #[error("Report layout failed: {0}")]
    Layout(String),

    #[error("Report IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for document renderers.
pub trait ReportRenderer: Send + Sync {
    /// Render the record to a document byte stream.
    ///
    /// # Errors
    /// Returns a `ReportError` if the document cannot be produced.
    fn render(&self, record: &ReportRecord) -> Result<Vec<u8>, ReportError>;

    /// File name to offer when the document is downloaded or saved.
    fn file_name(&self) -> &str {
        DEFAULT_REPORT_FILE_NAME
    }

    /// MIME type of the rendered bytes.
    fn media_type(&self) -> &str {
        "application/pdf"
    }
}
