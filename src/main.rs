//! Heartwise: heart-disease risk screening with diet guidance.
//!
//! # Usage
//!
//! ```bash
//! heartwise --name <name> --age <years> --sex <Male|Female> --bp <mm Hg> \
//!     --cholesterol <mg/dl> --chest-pain <0-3> [--out <path>] [--no-report] [--json]
//! heartwise --input <request.json> [--out <path>] [--no-report] [--json]
//! heartwise --guide
//! ```
//!
//! Exit codes: 0 on success (even when the PDF could not be produced),
//! 1 on internal failure, 2 on invalid arguments or input.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heartwise::adapters::forest::{ForestConfig, RandomForest};
use heartwise::adapters::pdf::PdfReportRenderer;
use heartwise::adapters::sanitize::SanitizingMakeWriter;
use heartwise::application::{Assessment, AssessmentRequest, AssessmentService, RenderedReport};
use heartwise::config::AppConfig;
use heartwise::domain::guidance::{general_guidance, CHECKUP_REMINDER};
use heartwise::domain::ProfileInput;
use heartwise::HeartwiseError;

const USAGE: &str = "Usage: heartwise --name <name> --age <years> --sex <Male|Female> --bp <mm Hg> --cholesterol <mg/dl> --chest-pain <0-3> [--out <path>] [--no-report] [--json]
       heartwise --input <request.json> [--out <path>] [--no-report] [--json]
       heartwise --guide";

#[derive(Debug, Default)]
struct CliArgs {
    name: Option<String>,
    age: Option<i64>,
    sex: Option<String>,
    bp: Option<i64>,
    cholesterol: Option<i64>,
    chest_pain: Option<i64>,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    no_report: bool,
    json: bool,
    guide: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> std::result::Result<CliArgs, String> {
    fn value(flag: &str, next: Option<String>) -> std::result::Result<String, String> {
        next.filter(|v| !v.is_empty())
            .ok_or_else(|| format!("{flag} requires a value"))
    }

    fn number(flag: &str, next: Option<String>) -> std::result::Result<i64, String> {
        let raw = value(flag, next)?;
        raw.trim()
            .parse::<i64>()
            .map_err(|_| format!("{flag} expects a whole number, got {raw:?}"))
    }

    let mut cli = CliArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--name" => cli.name = Some(value("--name", args.next())?),
            "--age" => cli.age = Some(number("--age", args.next())?),
            "--sex" => cli.sex = Some(value("--sex", args.next())?),
            "--bp" => cli.bp = Some(number("--bp", args.next())?),
            "--cholesterol" => cli.cholesterol = Some(number("--cholesterol", args.next())?),
            "--chest-pain" => cli.chest_pain = Some(number("--chest-pain", args.next())?),
            "--input" => cli.input = Some(PathBuf::from(value("--input", args.next())?)),
            "--out" => cli.out = Some(PathBuf::from(value("--out", args.next())?)),
            "--no-report" => cli.no_report = true,
            "--json" => cli.json = true,
            "--guide" => cli.guide = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(cli)
}

impl CliArgs {
    fn request(&self) -> Result<std::result::Result<AssessmentRequest, String>> {
        if let Some(path) = &self.input {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            return Ok(AssessmentRequest::from_json(&raw)
                .map_err(|e| format!("invalid request in {}: {e}", path.display())));
        }

        let missing = |flag: &str| format!("missing {flag}");
        let build = || -> std::result::Result<AssessmentRequest, String> {
            Ok(AssessmentRequest {
                name: self.name.clone().ok_or_else(|| missing("--name"))?,
                profile: ProfileInput {
                    age: self.age.ok_or_else(|| missing("--age"))?,
                    sex: self.sex.clone().ok_or_else(|| missing("--sex"))?,
                    systolic_bp: self.bp.ok_or_else(|| missing("--bp"))?,
                    cholesterol: self.cholesterol.ok_or_else(|| missing("--cholesterol"))?,
                    chest_pain_type: self.chest_pain.ok_or_else(|| missing("--chest-pain"))?,
                },
            })
        };
        Ok(build())
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

fn init_logging(config: &AppConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    // stdout carries results only; logs go to stderr unless a file is requested.
    let (writer, guard) = if config.log_mode.uses_file() {
        tracing_appender::non_blocking(open_log_file(&config.log_file)?)
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    Ok(guard)
}

fn print_guide() {
    for section in general_guidance() {
        println!("{}", section.title);
        for item in section.items {
            println!("  - {item}");
        }
        println!();
    }
    println!("{CHECKUP_REMINDER}");
}

fn print_assessment(assessment: &Assessment) {
    println!("Heart Health Assessment for {}", assessment.name);
    println!("Result: {} ({})", assessment.verdict, assessment.message);
    println!();
    println!("Personalized Diet Recommendations");
    for section in assessment.recommendations.sections() {
        println!("{}:", section.category);
        for item in &section.items {
            println!("  - {item}");
        }
    }
    println!();
}

fn save_report(
    report: &RenderedReport,
    out: Option<&Path>,
    config: &AppConfig,
) -> heartwise::Result<PathBuf> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &report.bytes)?;
            Ok(path.to_path_buf())
        }
        None => report.save_to(&config.report_dir),
    }
}

fn run() -> Result<ExitCode> {
    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return Ok(ExitCode::from(2));
        }
    };

    let config = AppConfig::from_env_or_default();
    let _guard = init_logging(&config)?;

    if cli.guide {
        print_guide();
        return Ok(ExitCode::SUCCESS);
    }

    let request = match cli.request()? {
        Ok(request) => request,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return Ok(ExitCode::from(2));
        }
    };

    tracing::info!("Starting Heartwise...");
    let classifier = Arc::new(RandomForest::train(ForestConfig::default())?);
    let renderer = Arc::new(PdfReportRenderer::with_layout(config.pdf_layout()));
    let service = AssessmentService::new(classifier, renderer);

    let assessment = match service.assess(request) {
        Ok(assessment) => assessment,
        Err(HeartwiseError::InvalidInput(e)) => {
            eprintln!("{e}");
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    if cli.json {
        println!("{}", assessment.to_json_pretty()?);
    } else {
        print_assessment(&assessment);
    }

    if let Some(notice) = assessment.report.notice() {
        eprintln!("{notice}");
    } else if let Some(report) = assessment.report.report().filter(|_| !cli.no_report) {
        match save_report(report, cli.out.as_deref(), &config) {
            Ok(path) => eprintln!("Report saved to {}", path.display()),
            Err(e) => {
                tracing::warn!("Saving report failed: {}", e);
                eprintln!("The PDF report could not be saved: {e}");
            }
        }
    }

    tracing::info!("Heartwise finished.");
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| (*s).to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_full_flag_set() {
        let cli = parse_args(args(&[
            "--name", "Sam", "--age", "60", "--sex", "Male", "--bp", "150",
            "--cholesterol", "260", "--chest-pain", "3", "--json",
        ]))
        .expect("parse");
        assert!(cli.json);
        let request = cli.request().expect("io").expect("request");
        assert_eq!(request.name, "Sam");
        assert_eq!(request.profile.chest_pain_type, 3);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(parse_args(args(&["--age", "sixty"])).is_err());
        assert!(parse_args(args(&["--name"])).is_err());
        assert!(parse_args(args(&["--verbose"])).is_err());
    }

    #[test]
    fn test_missing_field_reported() {
        let cli = parse_args(args(&["--name", "Sam", "--age", "60"])).expect("parse");
        let err = cli.request().expect("io").expect_err("incomplete");
        assert_eq!(err, "missing --sex");
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logs").join("heartwise.log");
        open_log_file(&path).expect("open");
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_reports_directory_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("logs");
        std::fs::write(&blocker, b"x").expect("write");

        let err = open_log_file(&blocker.join("heartwise.log")).expect_err("parent is a file");
        assert!(err.to_string().starts_with("creating log directory"));
    }

    #[test]
    fn test_request_from_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("request.json");
        std::fs::write(
            &path,
            r#"{"name":"Ada","age":45,"sex":"Female","systolic_bp":125,"cholesterol":180,"chest_pain_type":1}"#,
        )
        .expect("write");

        let cli = parse_args(args(&["--input", path.to_str().expect("utf8 path")])).expect("parse");
        let request = cli.request().expect("io").expect("request");
        assert_eq!(request.profile.sex, "Female");
    }
}
