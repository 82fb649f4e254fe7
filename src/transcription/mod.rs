//! Transcription of recorded voice queries through a job-based speech API.
//!
//! Audio is uploaded as a remote job, the job is polled at a fixed cadence
//! until it finishes, and the plain-text transcript is fetched once.

pub mod api;
pub mod audio;
pub mod client;
pub mod config;
pub mod error;
pub mod job;

use std::path::Path;

pub use audio::AudioSource;
pub use client::TranscriptionJobClient;
pub use config::{ClientConfig, Credential, OperatingPoint, PollPolicy, TranscriptionOptions};
pub use error::TranscriptionError;
pub use job::{JobId, JobStatus};

/// Transcribes the audio file at `audio_path`.
///
/// Reads the file, runs it through a fresh client built from `config` and
/// returns the transcript. The file itself is left untouched; removing it is
/// up to the caller.
///
/// # Errors
/// - If the file cannot be read
/// - Any error raised by [`TranscriptionJobClient::transcribe`]
pub async fn transcribe_file(
    audio_path: &Path,
    config: &ClientConfig,
) -> Result<String, TranscriptionError> {
    if config.credential.is_blank() {
        return Err(TranscriptionError::Configuration(
            "API credential is missing".to_string(),
        ));
    }

    let audio = AudioSource::from_path(audio_path).await?;
    let client = TranscriptionJobClient::new(config.clone())?;
    client.transcribe(&audio).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transcribe_file_checks_credential_first() {
        let missing = Path::new("/nonexistent/genrx-voice/query.webm");
        let err = transcribe_file(missing, &ClientConfig::new(Credential::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, TranscriptionError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_transcribe_file_reports_unreadable_audio() {
        let missing = Path::new("/nonexistent/genrx-voice/query.webm");
        let err = transcribe_file(missing, &ClientConfig::new(Credential::new("key")))
            .await
            .unwrap_err();
        assert!(matches!(err, TranscriptionError::AudioUnreadable { .. }));
    }
}
