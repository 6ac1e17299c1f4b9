//! Log sanitization for patient identifiers.
//!
//! Screening requests carry a patient name and, in free text, possibly an
//! e-mail address or phone number. This module redacts those from formatted
//! log lines:
//! - structured `name=` / `patient=` fields
//! - e-mail addresses
//! - phone numbers
//! - SSN-like tokens
//!
//! Call sites should still avoid logging names at all. The writer wrapper is
//! a second line for anything that slips through.
//!
//! Input is capped (see `HEARTWISE_SANITIZE_MAX_BYTES`) so a huge log line
//! cannot make sanitization expensive.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// Default per-call sanitization cap (16 KiB).
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Patterns {
    set: RegexSet,
    rules: Vec<Rule>,
}

fn max_sanitize_bytes() -> usize {
    std::env::var("HEARTWISE_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        let table: [(&str, &str); 5] = [
            // tracing fields: name="Jane Doe", patient=Jane
            (
                r#"\b(name|patient|patient_name)=("[^"]*"|\S+)"#,
                "${1}=[REDACTED-NAME]",
            ),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (r"\b\d{3}-\d{2}-\d{4}\b", "[REDACTED-SSN]"),
            (
                r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s][0-9]{3}[-.\s][0-9]{4}\b",
                "[REDACTED-PHONE]",
            ),
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
                "[REDACTED-UUID]",
            ),
        ];

        let set = RegexSet::new(table.iter().map(|(p, _)| *p)).expect("valid regex set");
        let rules = table
            .iter()
            .map(|&(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("valid regex"),
                replacement,
            })
            .collect();
        Patterns { set, rules }
    })
}

/// Redact patient identifiers from `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let rule = &patterns.rules[idx];
        result = rule.regex.replace_all(&result, rule.replacement).into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Whether `input` contains anything `sanitize` would redact.
#[must_use]
pub fn contains_pii(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, max_sanitize_bytes());
    patterns().set.is_match(prefix)
}

/// `MakeWriter` wrapper that sanitizes each formatted log line before it
/// reaches the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let line = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&line).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A line with no newline in sight is flushed once it passes the cap.
        if self.buffer.len() > max_sanitize_bytes().saturating_mul(2) {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_sanitize_quoted_name_field() {
        let out = sanitize(r#"INFO assessment: name="Jane Doe" verdict=at_risk"#);
        assert!(out.contains("name=[REDACTED-NAME]"));
        assert!(!out.contains("Jane"));
        assert!(out.contains("verdict=at_risk"));
    }

    #[test]
    fn test_sanitize_bare_patient_field() {
        let out = sanitize("patient=Bob age=60");
        assert_eq!(out, "patient=[REDACTED-NAME] age=60");
    }

    #[test]
    fn test_sanitize_email_and_phone() {
        let out = sanitize("contact jane@example.org or 555-123-4567");
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(out.contains("[REDACTED-PHONE]"));
    }

    #[test]
    fn test_sanitize_ssn() {
        assert_eq!(sanitize("id 123-45-6789"), "id [REDACTED-SSN]");
    }

    #[test]
    fn test_clinical_values_untouched() {
        let line = "Forest vote: 87/100 at risk, bp=150 cholesterol=260";
        assert_eq!(sanitize(line), line);
        assert!(!contains_pii(line));
        assert!(contains_pii("name=Alice"));
    }

    #[test]
    fn test_truncates_large_inputs() {
        let out = sanitize_with_limit("héllo world", 2);
        assert!(out.ends_with("[TRUNCATED]"));
        assert!(out.starts_with('h'));
    }

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_sanitizes_split_writes() {
        let sink = Sink::default();
        let mut writer = SanitizingWriter::new(sink.clone());
        writer.write_all(b"report for name=\"Ja").expect("write");
        writer.write_all(b"ne Doe\" ready\n").expect("write");
        writer.flush().expect("flush");

        let written = String::from_utf8(sink.0.lock().expect("lock").clone()).expect("utf8");
        assert_eq!(written, "report for name=[REDACTED-NAME] ready\n");
    }
}
