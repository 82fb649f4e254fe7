//! Transcribe an audio file through the remote job API.
//!
//! Plays the relay role for the transcription client: resolves the credential
//! and settings, runs the job, and turns the outcome into output or a
//! readable error. Ctrl-C cancels the running job.

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::config;
use crate::transcription::{
    AudioSource, OperatingPoint, TranscriptionError, TranscriptionJobClient,
};

/// Handles transcription of an audio file.
///
/// # Arguments
/// * `file` - Path to the audio file to transcribe
/// * `output_file` - Optional file path to write output to instead of stdout
/// * `language` - Overrides the configured language code
/// * `operating_point` - Overrides the configured quality tier
pub async fn handle_transcribe(
    file: PathBuf,
    output_file: Option<String>,
    language: Option<String>,
    operating_point: Option<OperatingPoint>,
) -> Result<(), anyhow::Error> {
    tracing::info!("=== genrx-voice Transcribe Command ===");

    if !file.exists() {
        return Err(anyhow::anyhow!("Audio file not found: {}", file.display()));
    }

    let settings = config::GenrxConfig::load().map_err(|err| {
        tracing::error!("Failed to load configuration: {err}");
        anyhow::anyhow!("Configuration error: {err}")
    })?;

    let credential = config::get_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured. Set {} in the environment or in a .env file",
            config::API_KEY_ENV
        )
    })?;

    let mut client_config = settings.speechmatics.client_config(credential)?;
    if let Some(language) = language {
        client_config.options.language = language;
    }
    if let Some(operating_point) = operating_point {
        client_config.options.operating_point = operating_point;
    }

    tracing::info!(
        "Transcribing {} (language={}, operating_point={})",
        file.display(),
        client_config.options.language,
        client_config.options.operating_point
    );

    let audio = AudioSource::from_path(&file).await?;
    if audio.is_empty() {
        return Err(anyhow::anyhow!("Audio file is empty: {}", file.display()));
    }
    let client = TranscriptionJobClient::new(client_config)?;

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupt received, cancelling transcription");
                cancel.cancel();
            }
        })
    };

    let result = client.transcribe_with_cancel(&audio, &cancel).await;
    ctrl_c.abort();

    let text = result.map_err(|e| {
        tracing::error!("Transcription failed: {e}");
        anyhow::anyhow!(describe_error(&e))
    })?;

    let trimmed_text = text.trim();
    tracing::debug!("Transcription completed: {} chars", trimmed_text.len());

    if let Some(file_path) = output_file {
        std::fs::write(&file_path, trimmed_text)
            .map_err(|e| anyhow::anyhow!("Failed to write to file '{file_path}': {e}"))?;
        tracing::debug!("Transcribed text written to file: {file_path}");
    } else {
        println!("{trimmed_text}");
    }

    Ok(())
}

/// Turns a transcription failure into a message for the user.
///
/// HTTP failures with a well-known status get a plain explanation; everything
/// else uses the error's own message.
pub fn describe_error(err: &TranscriptionError) -> String {
    let hint = match err.upstream_status() {
        Some(401) => Some(format!(
            "The API key is invalid or expired. Check {}.",
            config::API_KEY_ENV
        )),
        Some(403) => {
            Some("The API key is not allowed to use this service. Check your account.".to_string())
        }
        Some(429) => Some("Rate limit reached. Please wait and try again.".to_string()),
        Some(500..=599) => {
            Some("The transcription service is having issues. Please try again later.".to_string())
        }
        _ => None,
    };

    match (err, hint) {
        (TranscriptionError::Cancelled { .. }, _) => "Transcription cancelled".to_string(),
        (_, Some(hint)) => format!("Transcription failed: {hint} ({err})"),
        (_, None) => format!("Transcription failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::{JobId, JobStatus};

    #[test]
    fn test_unauthorized_upload_gets_key_hint() {
        let err = TranscriptionError::UploadFailed {
            status: Some(401),
            body: None,
            message: "Speechmatics API error (status 401)".to_string(),
        };
        let message = describe_error(&err);
        assert!(message.contains("invalid or expired"));
        assert!(message.contains(config::API_KEY_ENV));
    }

    #[test]
    fn test_server_errors_get_retry_hint() {
        let err = TranscriptionError::PollFailed {
            job_id: JobId::new("j"),
            status: Some(503),
            message: "unavailable".to_string(),
        };
        assert!(describe_error(&err).contains("try again later"));
    }

    #[test]
    fn test_job_failure_uses_error_text() {
        let err = TranscriptionError::JobFailed {
            job_id: JobId::new("j"),
            status: JobStatus::Rejected,
        };
        assert_eq!(
            describe_error(&err),
            "Transcription failed: Job j failed with status: rejected"
        );
    }
}
