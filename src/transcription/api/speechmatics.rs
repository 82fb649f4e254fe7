//! Speechmatics batch API implementation.
//!
//! Jobs are created by a multipart `POST /jobs` carrying the audio as
//! `data_file` and the job configuration as a JSON string in `config`. Status is
//! read from `GET /jobs/{id}` and the finished transcript from
//! `GET /jobs/{id}/transcript?format=txt`. All calls use bearer authentication.

use async_trait::async_trait;
use serde::Deserialize;

use super::shared::{describe_status, describe_transport_error, error_body};
use super::JobApi;
use crate::transcription::audio::AudioSource;
use crate::transcription::config::{ClientConfig, Credential, TranscriptionOptions};
use crate::transcription::error::TranscriptionError;
use crate::transcription::job::{JobId, JobStatus};

const PROVIDER_NAME: &str = "Speechmatics";

/// Response from the job creation endpoint
#[derive(Debug, Deserialize)]
struct CreateJobResponse {
    id: String,
}

/// Response from the job status endpoint
#[derive(Debug, Deserialize)]
struct JobStatusResponse {
    job: JobDetails,
}

#[derive(Debug, Deserialize)]
struct JobDetails {
    #[serde(default = "missing_status")]
    status: JobStatus,
}

/// A job without a status field is treated as not finished yet.
fn missing_status() -> JobStatus {
    JobStatus::Other(String::new())
}

/// HTTP client for the batch transcription service.
#[derive(Debug, Clone)]
pub struct SpeechmaticsApi {
    client: reqwest::Client,
    base_url: String,
}

impl SpeechmaticsApi {
    /// Builds an API client with the timeouts from `config`.
    ///
    /// # Errors
    /// - If the underlying HTTP client cannot be constructed
    pub fn new(config: &ClientConfig) -> Result<Self, TranscriptionError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(10);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| {
                TranscriptionError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn jobs_url(&self) -> String {
        format!("{}/jobs", self.base_url)
    }

    fn job_url(&self, job_id: &JobId) -> String {
        format!("{}/jobs/{}", self.base_url, job_id)
    }

    fn transcript_url(&self, job_id: &JobId) -> String {
        format!("{}/jobs/{}/transcript", self.base_url, job_id)
    }
}

#[async_trait]
impl JobApi for SpeechmaticsApi {
    async fn create_job(
        &self,
        credential: &Credential,
        audio: &AudioSource,
        options: &TranscriptionOptions,
    ) -> Result<JobId, TranscriptionError> {
        let upload_failed = |status: Option<u16>, body: Option<String>, message: String| {
            TranscriptionError::UploadFailed {
                status,
                body,
                message,
            }
        };

        let config_json = serde_json::to_string(&options.job_config()).map_err(|e| {
            upload_failed(None, None, format!("Failed to encode job configuration: {e}"))
        })?;

        let file_part = reqwest::multipart::Part::bytes(audio.data().to_vec())
            .file_name(audio.file_name().to_string());

        let form = reqwest::multipart::Form::new()
            .part("data_file", file_part)
            .text("config", config_json.clone());

        tracing::debug!(
            "{PROVIDER_NAME} API Call:\n  URL: {}\n  Method: POST\n  Headers:\n    Authorization: Bearer <redacted>\n    Content-Type: multipart/form-data\n  File: {} ({} bytes)\n  Config: {}",
            self.jobs_url(),
            audio.file_name(),
            audio.len(),
            config_json
        );

        let response = self
            .client
            .post(self.jobs_url())
            .bearer_auth(credential.expose())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                upload_failed(
                    None,
                    None,
                    describe_transport_error(PROVIDER_NAME, "uploading audio", &e),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(upload_failed(
                Some(status.as_u16()),
                Some(body.clone()),
                describe_status(PROVIDER_NAME, status.as_u16(), &body),
            ));
        }

        let body = response.text().await.map_err(|e| {
            upload_failed(
                Some(status.as_u16()),
                None,
                format!("Failed to read {PROVIDER_NAME} job creation response: {e}"),
            )
        })?;

        let created: CreateJobResponse = serde_json::from_str(&body).map_err(|e| {
            upload_failed(
                Some(status.as_u16()),
                Some(body.clone()),
                format!("Failed to parse {PROVIDER_NAME} job creation response: {e}"),
            )
        })?;

        if created.id.trim().is_empty() {
            return Err(upload_failed(
                Some(status.as_u16()),
                Some(body),
                format!("{PROVIDER_NAME} returned an empty job id"),
            ));
        }

        Ok(JobId::new(created.id))
    }

    async fn job_status(
        &self,
        credential: &Credential,
        job_id: &JobId,
    ) -> Result<JobStatus, TranscriptionError> {
        let poll_failed = |status: Option<u16>, message: String| TranscriptionError::PollFailed {
            job_id: job_id.clone(),
            status,
            message,
        };

        let response = self
            .client
            .get(self.job_url(job_id))
            .bearer_auth(credential.expose())
            .send()
            .await
            .map_err(|e| {
                poll_failed(
                    None,
                    describe_transport_error(PROVIDER_NAME, "polling job status", &e),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(poll_failed(
                Some(status.as_u16()),
                describe_status(PROVIDER_NAME, status.as_u16(), &body),
            ));
        }

        let details: JobStatusResponse = response.json().await.map_err(|e| {
            poll_failed(
                Some(status.as_u16()),
                format!("Failed to parse {PROVIDER_NAME} job status response: {e}"),
            )
        })?;

        Ok(details.job.status)
    }

    async fn transcript(
        &self,
        credential: &Credential,
        job_id: &JobId,
    ) -> Result<String, TranscriptionError> {
        let fetch_failed =
            |status: Option<u16>, message: String| TranscriptionError::TranscriptFetchFailed {
                job_id: job_id.clone(),
                status,
                message,
            };

        let response = self
            .client
            .get(self.transcript_url(job_id))
            .query(&[("format", "txt")])
            .bearer_auth(credential.expose())
            .send()
            .await
            .map_err(|e| {
                fetch_failed(
                    None,
                    describe_transport_error(PROVIDER_NAME, "fetching the transcript", &e),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(fetch_failed(
                Some(status.as_u16()),
                describe_status(PROVIDER_NAME, status.as_u16(), &body),
            ));
        }

        response.text().await.map_err(|e| {
            fetch_failed(
                Some(status.as_u16()),
                format!("Failed to read {PROVIDER_NAME} transcript: {e}"),
            )
        })
    }
}
