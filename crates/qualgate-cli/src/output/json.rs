//! JSON output adapter.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use clap::ValueEnum;
use qualgate_core::{QualityReport, ReportOutput};
use serde::Serialize;
use tracing::debug;

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array, written on flush
    Json,
}

/// One output record: the report plus when it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    #[serde(flatten)]
    report: QualityReport,
    timestamp: String,
}

impl ReportRecord {
    /// Stamps a report with the current UTC time.
    #[must_use]
    pub fn now(report: QualityReport) -> Self {
        Self {
            report,
            timestamp: iso_timestamp(),
        }
    }
}

/// JSON / JSON Lines output adapter.
///
/// In [`OutputFormat::Json`] mode records are buffered and written as a
/// single array on [`flush`](ReportOutput::flush).
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    format: OutputFormat,
    pretty: bool,
    pending: Mutex<Vec<ReportRecord>>,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout(format: OutputFormat, pretty: bool) -> Self {
        Self::new(Box::new(io::stdout()), format, pretty)
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
            pretty,
            pending: Mutex::new(Vec::new()),
        }
    }

    fn writer(&self) -> Result<MutexGuard<'_, Box<dyn Write + Send>>> {
        self.writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))
    }

    /// Writes a batch of records as a JSON array.
    #[allow(clippy::significant_drop_tightening)]
    fn write_array(&self, records: &[ReportRecord]) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(records)?
        } else {
            serde_json::to_string(records)?
        };
        let mut writer = self.writer()?;
        writeln!(writer, "{json}").context("Failed to write report array")?;
        Ok(())
    }
}

impl ReportOutput for JsonOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, report: &QualityReport) -> Result<()> {
        let record = ReportRecord::now(report.clone());
        match self.format {
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(&record)?;
                let mut writer = self.writer()?;
                writeln!(writer, "{json}").context("Failed to write report")?;
            }
            OutputFormat::Json => {
                self.pending
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
                    .push(record);
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if self.format == OutputFormat::Json {
            let records = std::mem::take(
                &mut *self
                    .pending
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?,
            );
            self.write_array(&records)?;
        }
        self.writer()?.flush().context("Failed to flush output")?;
        Ok(())
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use qualgate_core::QualityEngine;
    use qualgate_test_support::SyntheticImageBuilder;
    use std::sync::Arc;

    /// Writer that shares its buffer with the test.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn report() -> QualityReport {
        QualityEngine::from_image(SyntheticImageBuilder::uniform_gray(8, 8, 128))
            .classify_quality()
            .without_details()
    }

    #[test]
    fn test_jsonl_writes_one_line_per_report() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), OutputFormat::Jsonl, false);
        output.write(&report()).unwrap();
        output.write(&report()).unwrap();
        output.flush().unwrap();

        let text = buf.text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["image_path"], "synthetic://uniform_gray");
        assert_eq!(value["total_tests"], 5);
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
        assert!(value.get("checks").is_none());
    }

    #[test]
    fn test_json_buffers_until_flush() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), OutputFormat::Json, false);
        output.write(&report()).unwrap();
        assert!(buf.text().is_empty());

        output.flush().unwrap();
        let value: serde_json::Value = serde_json::from_str(&buf.text()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_json_empty_batch_is_empty_array() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), OutputFormat::Json, true);
        output.flush().unwrap();
        assert_eq!(buf.text().trim(), "[]");
    }
}
