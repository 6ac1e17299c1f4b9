//! Runtime configuration loaded from the environment.
//!
//! Every override is best-effort: unset, empty or unparsable variables keep
//! the default. The classifier seed is not configurable here.

use std::path::PathBuf;

use crate::adapters::pdf::PdfLayout;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// stderr, keeping stdout free for results
    #[default]
    Auto,
    Stderr,
    File,
}

impl LogMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "stderr" => Some(Self::Stderr),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    /// Whether logs should be written to `AppConfig::log_file`.
    #[must_use]
    pub fn uses_file(self) -> bool {
        self == Self::File
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_mode: LogMode,

    /// Log file path, used when `log_mode` is `File`
    pub log_file: PathBuf,

    /// Directory the PDF report is saved into
    pub report_dir: PathBuf,

    /// Page cap passed to the PDF layout
    pub pdf_max_pages: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("heartwise.log"),
            report_dir: PathBuf::from("."),
            pdf_max_pages: PdfLayout::default().max_pages,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `HEARTWISE_*` environment variables.
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(mode) = lookup("HEARTWISE_LOG_MODE").as_deref().and_then(LogMode::parse) {
            cfg.log_mode = mode;
        }

        if let Some(v) = lookup("HEARTWISE_LOG_FILE") {
            if !v.trim().is_empty() {
                cfg.log_file = PathBuf::from(v.trim());
            }
        }

        if let Some(v) = lookup("HEARTWISE_REPORT_DIR") {
            if !v.trim().is_empty() {
                cfg.report_dir = PathBuf::from(v.trim());
            }
        }

        if let Some(v) = lookup("HEARTWISE_PDF_MAX_PAGES") {
            if let Ok(n) = v.trim().parse::<usize>() {
                if n > 0 {
                    cfg.pdf_max_pages = n;
                }
            }
        }

        cfg
    }

    /// PDF layout with this configuration's page cap.
    #[must_use]
    pub fn pdf_layout(&self) -> PdfLayout {
        PdfLayout {
            max_pages: self.pdf_max_pages,
            ..PdfLayout::default()
        }
    }
}
