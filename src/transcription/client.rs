//! Job submission and polling client.
//!
//! One `transcribe` call uploads the audio, waits for the remote job to reach
//! a terminal status and then fetches the transcript. All job state lives in
//! the call itself; the client can be shared between concurrent calls.

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::api::{JobApi, SpeechmaticsApi};
use super::audio::AudioSource;
use super::config::ClientConfig;
use super::error::TranscriptionError;
use super::job::{JobId, PollPhase};

/// Drives audio files through the remote job lifecycle.
#[derive(Debug)]
pub struct TranscriptionJobClient<A = SpeechmaticsApi> {
    api: A,
    config: ClientConfig,
}

impl TranscriptionJobClient<SpeechmaticsApi> {
    /// Creates a client talking to the HTTP service named in `config`.
    ///
    /// # Errors
    /// - If the HTTP client cannot be constructed
    pub fn new(config: ClientConfig) -> Result<Self, TranscriptionError> {
        let api = SpeechmaticsApi::new(&config)?;
        Ok(Self::with_api(config, api))
    }
}

impl<A: JobApi> TranscriptionJobClient<A> {
    pub fn with_api(config: ClientConfig, api: A) -> Self {
        Self { api, config }
    }

    /// Transcribes `audio` and returns the plain-text transcript.
    ///
    /// # Errors
    /// - `Configuration` if the credential is blank or the poll policy cannot
    ///   make progress (no request is sent)
    /// - `UploadFailed` if the job cannot be created
    /// - `PollFailed` if a status query fails
    /// - `JobFailed` if the job ends as `rejected` or `expired`
    /// - `PollTimeout` if the polling bounds are exhausted
    /// - `TranscriptFetchFailed` if the finished transcript cannot be retrieved
    pub async fn transcribe(&self, audio: &AudioSource) -> Result<String, TranscriptionError> {
        self.transcribe_with_cancel(audio, &CancellationToken::new())
            .await
    }

    /// Same as [`transcribe`](Self::transcribe), aborting with `Cancelled` as
    /// soon as `cancel` fires.
    pub async fn transcribe_with_cancel(
        &self,
        audio: &AudioSource,
        cancel: &CancellationToken,
    ) -> Result<String, TranscriptionError> {
        if self.config.credential.is_blank() {
            return Err(TranscriptionError::Configuration(
                "API credential is missing".to_string(),
            ));
        }

        self.config.poll.validate()?;

        let credential = &self.config.credential;

        tracing::debug!(
            "Submitting {} ({} bytes) for transcription",
            audio.file_name(),
            audio.len()
        );

        let job_id = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(TranscriptionError::Cancelled { job_id: None });
            }
            created = self.api.create_job(credential, audio, &self.config.options) => created?,
        };

        tracing::info!("Job created with id: {job_id}");

        self.wait_for_completion(&job_id, cancel).await?;

        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(TranscriptionError::Cancelled { job_id: Some(job_id.clone()) });
            }
            fetched = self.api.transcript(credential, &job_id) => fetched?,
        };

        tracing::debug!("Transcript for job {job_id} received: {} chars", text.len());
        Ok(text)
    }

    /// Polls the job until it reaches a terminal status.
    ///
    /// Returns `Ok` only for `done`. Each iteration waits the configured
    /// interval, then issues exactly one status query.
    async fn wait_for_completion(
        &self,
        job_id: &JobId,
        cancel: &CancellationToken,
    ) -> Result<(), TranscriptionError> {
        let policy = &self.config.poll;
        let started = Instant::now();
        let mut phase = PollPhase::Submitted;
        let mut attempts: u32 = 0;

        loop {
            if let Some(max_attempts) = policy.max_attempts {
                if attempts >= max_attempts {
                    return Err(TranscriptionError::PollTimeout {
                        job_id: job_id.clone(),
                        attempts,
                        elapsed: started.elapsed(),
                    });
                }
            }

            if let Some(max_duration) = policy.max_duration {
                if started.elapsed() + policy.interval > max_duration {
                    return Err(TranscriptionError::PollTimeout {
                        job_id: job_id.clone(),
                        attempts,
                        elapsed: started.elapsed(),
                    });
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(TranscriptionError::Cancelled { job_id: Some(job_id.clone()) });
                }
                _ = tokio::time::sleep(policy.interval) => {}
            }

            attempts += 1;
            let status = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(TranscriptionError::Cancelled { job_id: Some(job_id.clone()) });
                }
                polled = self.api.job_status(&self.config.credential, job_id) => polled?,
            };

            tracing::debug!("Job {job_id} status: {status} (check {attempts})");

            phase = phase.observe(status);
            match &phase {
                PollPhase::Done => return Ok(()),
                PollPhase::Failed(status) => {
                    tracing::warn!("Job {job_id} ended with status {status}");
                    return Err(TranscriptionError::JobFailed {
                        job_id: job_id.clone(),
                        status: status.clone(),
                    });
                }
                PollPhase::Submitted | PollPhase::Running => {}
            }
        }
    }
}
