//! Assessment service: Runs one screening request end to end.
//!
//! Pipeline: validate -> classify -> recommend -> render.
//!
//! Validation happens before anything else, so an invalid request computes
//! nothing. Rendering is the last stage and its failure is captured in
//! [`ReportOutcome::Unavailable`]; the verdict and recommendations are
//! returned regardless.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{
    derive_recommendations, HealthProfile, ProfileInput, RecommendationSet, ReportRecord,
    RiskVerdict, ValidationError,
};
use crate::ports::{ReportRenderer, RiskClassifier};
use crate::HeartwiseError;

/// A screening request: who, plus the raw health profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub name: String,
    #[serde(flatten)]
    pub profile: ProfileInput,
}

impl AssessmentRequest {
    /// Parse a request body.
    ///
    /// # Errors
    /// Returns `HeartwiseError::Serialization` for malformed JSON or missing
    /// fields. Field values are checked later, by `AssessmentService::assess`.
    pub fn from_json(raw: &str) -> Result<Self, HeartwiseError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// A successfully rendered document.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedReport {
    pub file_name: String,
    pub media_type: String,
    pub size_bytes: usize,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl RenderedReport {
    /// Write the document into `dir` under its file name, creating `dir` if
    /// needed. Returns the written path.
    ///
    /// # Errors
    /// Returns `HeartwiseError::Io` if the directory or file cannot be written.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, HeartwiseError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Result of the rendering stage.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome {
    Ready(RenderedReport),
    Unavailable { reason: String },
}

impl ReportOutcome {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The rendered document, if any.
    #[must_use]
    pub fn report(&self) -> Option<&RenderedReport> {
        match self {
            Self::Ready(report) => Some(report),
            Self::Unavailable { .. } => None,
        }
    }

    /// User-facing notice for an unavailable report.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable { reason } => {
                Some(format!("The PDF report could not be generated: {reason}"))
            }
        }
    }
}

/// Everything produced for one request.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub name: String,
    pub profile: HealthProfile,
    pub verdict: RiskVerdict,
    pub message: &'static str,
    pub recommendations: RecommendationSet,
    pub report: ReportOutcome,
}

impl Assessment {
    /// Pretty-printed JSON for display. Report bytes are omitted.
    ///
    /// # Errors
    /// Returns `HeartwiseError::Serialization` if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String, HeartwiseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Orchestrates a classifier and a renderer.
pub struct AssessmentService<C, R>
where
    C: RiskClassifier,
    R: ReportRenderer,
{
    classifier: Arc<C>,
    renderer: Arc<R>,
}

impl<C, R> AssessmentService<C, R>
where
    C: RiskClassifier,
    R: ReportRenderer,
{
    /// Create a new assessment service.
    pub fn new(classifier: Arc<C>, renderer: Arc<R>) -> Self {
        Self {
            classifier,
            renderer,
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// # Errors
    /// Returns `HeartwiseError::InvalidInput` for a blank name or an invalid
    /// profile, and `HeartwiseError::Classifier` if prediction fails. Report
    /// failures are never returned as errors.
    pub fn assess(&self, request: AssessmentRequest) -> Result<Assessment, HeartwiseError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("name", "must not be empty").into());
        }
        let profile = HealthProfile::try_from(request.profile)?;

        let verdict = self.classifier.predict_profile(&profile)?;
        let recommendations = derive_recommendations(verdict, &profile);
        tracing::info!(
            verdict = %verdict,
            categories = recommendations.len(),
            "Assessment complete"
        );

        let record = ReportRecord::new(name, &profile, verdict, recommendations.clone());
        let report = self.render(&record);

        Ok(Assessment {
            name: name.to_string(),
            profile,
            verdict,
            message: verdict.message(),
            recommendations,
            report,
        })
    }

    fn render(&self, record: &ReportRecord) -> ReportOutcome {
        match self.renderer.render(record) {
            Ok(bytes) => {
                tracing::debug!("Rendered report: {} bytes", bytes.len());
                ReportOutcome::Ready(RenderedReport {
                    file_name: self.renderer.file_name().to_string(),
                    media_type: self.renderer.media_type().to_string(),
                    size_bytes: bytes.len(),
                    bytes,
                })
            }
            Err(e) => {
                tracing::warn!("Report rendering failed: {}", e);
                ReportOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}
