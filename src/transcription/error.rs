//! Error kinds raised by the transcription job client.
//!
//! Every variant is fatal for the current `transcribe` call; nothing is retried
//! internally. Callers decide how to present the failure.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::job::{JobId, JobStatus};

/// Failure of a single transcription run.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// The client was configured without a usable credential.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The audio file could not be read into memory.
    #[error("Failed to read audio file {}: {source}", .path.display())]
    AudioUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Job creation failed, either in transport or with a non-success reply.
    #[error("Upload failed: {message}")]
    UploadFailed {
        status: Option<u16>,
        body: Option<String>,
        message: String,
    },

    /// A status query for the job failed.
    #[error("Status query for job {job_id} failed: {message}")]
    PollFailed {
        job_id: JobId,
        status: Option<u16>,
        message: String,
    },

    /// The remote job ended in a failure state.
    #[error("Job {job_id} failed with status: {status}")]
    JobFailed { job_id: JobId, status: JobStatus },

    /// The job finished but its transcript could not be retrieved.
    #[error("Fetching transcript for job {job_id} failed: {message}")]
    TranscriptFetchFailed {
        job_id: JobId,
        status: Option<u16>,
        message: String,
    },

    /// Polling hit its attempt or wall-clock ceiling before a terminal status.
    #[error(
        "Job {job_id} did not finish after {attempts} status checks ({} seconds)",
        .elapsed.as_secs()
    )]
    PollTimeout {
        job_id: JobId,
        attempts: u32,
        elapsed: Duration,
    },

    /// The caller cancelled the run.
    #[error("Transcription cancelled")]
    Cancelled { job_id: Option<JobId> },
}

impl TranscriptionError {
    /// HTTP status returned by the remote service, if the failure carried one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UploadFailed { status, .. }
            | Self::PollFailed { status, .. }
            | Self::TranscriptFetchFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Identifier of the remote job, once one has been assigned.
    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            Self::PollFailed { job_id, .. }
            | Self::JobFailed { job_id, .. }
            | Self::TranscriptFetchFailed { job_id, .. }
            | Self::PollTimeout { job_id, .. } => Some(job_id),
            Self::Cancelled { job_id } => job_id.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_only_for_http_failures() {
        let upload = TranscriptionError::UploadFailed {
            status: Some(401),
            body: Some("unauthorized".to_string()),
            message: "rejected".to_string(),
        };
        assert_eq!(upload.upstream_status(), Some(401));

        let failed = TranscriptionError::JobFailed {
            job_id: JobId::new("abc"),
            status: JobStatus::Rejected,
        };
        assert_eq!(failed.upstream_status(), None);
        assert_eq!(failed.job_id().map(JobId::as_str), Some("abc"));
    }

    #[test]
    fn test_job_failed_message_names_status() {
        let err = TranscriptionError::JobFailed {
            job_id: JobId::new("j1"),
            status: JobStatus::Expired,
        };
        assert_eq!(err.to_string(), "Job j1 failed with status: expired");
    }
}
