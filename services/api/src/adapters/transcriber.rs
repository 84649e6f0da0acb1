//! services/api/src/adapters/transcriber.rs
//!
//! Subprocess adapter for the external transcription model. It implements
//! the `TranscriptionService` port by invoking the configured interpreter
//! and script with `(audio_path, date, language, mime_type)` and parsing
//! stdout as an observation record.
//!
//! Every failure mode (spawn error, non-zero exit, empty or malformed
//! output, timeout) becomes `PortError::Transcription`; the intake pipeline
//! absorbs those into the fallback record.

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

use zoo_records_core::domain::ObservationRecord;
use zoo_records_core::ports::{PortError, PortResult, TranscriptionService};

/// An adapter that runs the transcription model as a bounded subprocess.
pub struct CommandTranscriber {
    program: String,
    script: PathBuf,
    timeout: Duration,
}

impl CommandTranscriber {
    pub fn new(program: String, script: PathBuf, timeout: Duration) -> Self {
        Self {
            program,
            script,
            timeout,
        }
    }
}

#[async_trait]
impl TranscriptionService for CommandTranscriber {
    async fn transcribe(
        &self,
        audio: &[u8],
        date: &str,
        language: &str,
        mime_type: &str,
    ) -> PortResult<ObservationRecord> {
        // The model script reads the audio from a path, so stage the bytes
        // in a temp file that lives until the subprocess finishes.
        let mut audio_file = NamedTempFile::new()
            .map_err(|e| PortError::Transcription(format!("temp file: {e}")))?;
        audio_file
            .write_all(audio)
            .map_err(|e| PortError::Transcription(format!("temp file write: {e}")))?;

        let mut command = Command::new(&self.program);
        command
            .arg(&self.script)
            .arg(audio_file.path())
            .arg(date)
            .arg(language)
            .arg(mime_type)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(program = %self.program, script = %self.script.display(), "invoking transcription model");

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                PortError::Transcription(format!(
                    "model timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| PortError::Transcription(format!("failed to run model: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PortError::Transcription(format!(
                "model exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let payload = stdout.trim();
        if payload.is_empty() {
            return Err(PortError::Transcription("model produced no output".to_string()));
        }

        serde_json::from_str(payload)
            .map_err(|e| PortError::Transcription(format!("malformed model output: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // `sh <script>` stands in for the python interpreter + model script; the
    // adapter only cares about exit status and stdout shape.
    fn fake_model(dir: &TempDir, body: &str, timeout: Duration) -> CommandTranscriber {
        let script = dir.path().join("model.sh");
        std::fs::write(&script, body).unwrap();
        CommandTranscriber::new("sh".to_string(), script, timeout)
    }

    #[tokio::test]
    async fn parses_well_formed_model_output() {
        let dir = TempDir::new().unwrap();
        let body = concat!(
            "echo '{\"date_or_day\": \"2024-01-15\", ",
            "\"animal_observed_on_time\": true, ",
            "\"clean_drinking_water_provided\": true, ",
            "\"enclosure_cleaned_properly\": true, ",
            "\"normal_behaviour_status\": true, ",
            "\"feed_and_supplements_available\": true, ",
            "\"feed_given_as_prescribed\": true, ",
            "\"incharge_signature\": \"Keeper One\"}'\n",
        );
        let transcriber = fake_model(&dir, body, Duration::from_secs(5));
        let record = transcriber
            .transcribe(b"audio", "2024-01-15", "hi", "audio/wav")
            .await
            .unwrap();
        assert_eq!(record.date_or_day, "2024-01-15");
        assert_eq!(record.incharge_signature, "Keeper One");
    }

    #[tokio::test]
    async fn nonzero_exit_is_a_transcription_error() {
        let dir = TempDir::new().unwrap();
        let transcriber = fake_model(&dir, "exit 3\n", Duration::from_secs(5));
        let err = transcriber
            .transcribe(b"audio", "2024-01-15", "hi", "audio/wav")
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Transcription(_)));
    }

    #[tokio::test]
    async fn malformed_output_is_a_transcription_error() {
        let dir = TempDir::new().unwrap();
        let transcriber = fake_model(&dir, "echo not-json\n", Duration::from_secs(5));
        let err = transcriber
            .transcribe(b"audio", "2024-01-15", "hi", "audio/wav")
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Transcription(_)));
    }

    #[tokio::test]
    async fn hung_model_is_cut_off_by_the_timeout() {
        let dir = TempDir::new().unwrap();
        let transcriber = fake_model(&dir, "sleep 30\n", Duration::from_millis(200));
        let err = transcriber
            .transcribe(b"audio", "2024-01-15", "hi", "audio/wav")
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Transcription(_)));
        assert!(err.to_string().contains("timed out"));
    }
}
