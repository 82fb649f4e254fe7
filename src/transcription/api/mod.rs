//! Remote job API used by the transcription client.
//!
//! The client drives a job through three calls: create, poll status, fetch
//! transcript. `JobApi` describes those calls so the polling logic does not
//! depend on a particular HTTP stack. `SpeechmaticsApi` is the production
//! implementation.

mod shared;
mod speechmatics;

use async_trait::async_trait;

use super::audio::AudioSource;
use super::config::{Credential, TranscriptionOptions};
use super::error::TranscriptionError;
use super::job::{JobId, JobStatus};

pub use speechmatics::SpeechmaticsApi;

/// Remote calls needed to run one transcription job.
///
/// Implementations report failures with the matching `TranscriptionError`
/// variant: `UploadFailed` from `create_job`, `PollFailed` from `job_status`
/// and `TranscriptFetchFailed` from `transcript`.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Uploads the audio and creates a job, returning its identifier.
    async fn create_job(
        &self,
        credential: &Credential,
        audio: &AudioSource,
        options: &TranscriptionOptions,
    ) -> Result<JobId, TranscriptionError>;

    /// Queries the current status of a job once.
    async fn job_status(
        &self,
        credential: &Credential,
        job_id: &JobId,
    ) -> Result<JobStatus, TranscriptionError>;

    /// Fetches the finished transcript as plain text.
    async fn transcript(
        &self,
        credential: &Credential,
        job_id: &JobId,
    ) -> Result<String, TranscriptionError>;
}
