//! JSONL audit trail writer.
//!
//! Each completed deliberation is serialized as a single JSON line and
//! appended to the audit file via a buffered writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use triage_application::{AuditRecord, AuditSink};

/// Audit sink that appends one JSON object per deliberation.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record
/// and on `Drop`; a sink that cannot write logs a warning and drops the
/// record, never the run.
pub struct JsonlAuditSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAuditSink {
    /// Open (or create) the audit file at the given path in append mode.
    ///
    /// Creates parent directories if they don't exist. Returns `None` if
    /// the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create audit directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open audit file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the audit file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for JsonlAuditSink {
    fn record(&self, record: &AuditRecord) {
        let Ok(line) = serde_json::to_string(record) else {
            warn!("Could not serialize audit record");
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // Flush per record for crash safety - JSONL is append-only
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlAuditSink {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use triage_domain::{
        CaseInput, Decision, DeliberationState, Metrics, Opinion, Role, TriageLevel,
    };

    fn sample_record() -> AuditRecord {
        let case = CaseInput::new("headache", "30", "");
        let mut state = DeliberationState::new();
        state.record_opinion(
            Opinion::new(Role::Symptom, TriageLevel::SelfCare)
                .with_risk_score(10)
                .with_confidence(85),
        );
        let metrics = Metrics::aggregate(&state.round1, &state.round2);
        let decision = Decision::synthesize(metrics);
        AuditRecord::new(case, state, decision)
    }

    #[test]
    fn test_sink_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let sink = JsonlAuditSink::new(&path).unwrap();

        sink.record(&sample_record());
        sink.record(&sample_record());
        drop(sink);

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();

        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        for line in &lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("timestamp").is_some());
            assert_eq!(value["case"]["symptoms"], "headache");
            assert!(value["decision"].get("final_decision").is_some());
        }
    }

    #[test]
    fn test_sink_appends_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        {
            let sink = JsonlAuditSink::new(&path).unwrap();
            sink.record(&sample_record());
        }
        {
            let sink = JsonlAuditSink::new(&path).unwrap();
            sink.record(&sample_record());
        }

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content.trim().lines().count(), 2);
    }
}
