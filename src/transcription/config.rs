//! Client configuration for the transcription job client.
//!
//! Holds the credential, service location, recognition options and polling
//! policy. Each client instance carries its own copy, so clients with different
//! cadences can coexist.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::TranscriptionError;

/// Default base URL of the batch transcription API.
pub const DEFAULT_BASE_URL: &str = "https://asr.api.speechmatics.com/v2";

/// Default recognition language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// API credential. Never printed in full.
#[derive(Clone, Default)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

/// Recognition quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingPoint {
    Standard,
    #[default]
    Enhanced,
}

impl OperatingPoint {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "standard" => Some(OperatingPoint::Standard),
            "enhanced" => Some(OperatingPoint::Enhanced),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            OperatingPoint::Standard => "standard",
            OperatingPoint::Enhanced => "enhanced",
        }
    }
}

impl fmt::Display for OperatingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Options sent with every job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionOptions {
    pub language: String,
    pub operating_point: OperatingPoint,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            operating_point: OperatingPoint::default(),
        }
    }
}

/// Inner `transcription_config` object of the job request.
#[derive(Debug, Serialize)]
pub struct TranscriptionConfigRequest<'a> {
    pub language: &'a str,
    pub operating_point: OperatingPoint,
}

/// JSON document sent in the `config` part of the job upload.
#[derive(Debug, Serialize)]
pub struct JobConfigRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub transcription_config: TranscriptionConfigRequest<'a>,
}

impl TranscriptionOptions {
    /// Builds the job configuration document for these options.
    pub fn job_config(&self) -> JobConfigRequest<'_> {
        JobConfigRequest {
            kind: "transcription",
            transcription_config: TranscriptionConfigRequest {
                language: &self.language,
                operating_point: self.operating_point,
            },
        }
    }
}

/// Cadence and bounds of the status polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Fixed delay before each status query.
    pub interval: Duration,
    /// Maximum number of status queries, `None` for no limit.
    pub max_attempts: Option<u32>,
    /// Wall-clock ceiling measured from the start of polling, `None` for no limit.
    pub max_duration: Option<Duration>,
}

impl PollPolicy {
    /// Checks that the policy can make progress.
    ///
    /// The interval must be non-zero, and a wall-clock ceiling must leave room
    /// for at least one status check.
    ///
    /// # Errors
    /// - `Configuration` if the interval is zero or longer than `max_duration`
    pub fn validate(&self) -> Result<(), TranscriptionError> {
        if self.interval.is_zero() {
            return Err(TranscriptionError::Configuration(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if let Some(max_duration) = self.max_duration {
            if self.interval > max_duration {
                return Err(TranscriptionError::Configuration(format!(
                    "poll interval ({} ms) exceeds the polling time limit ({} ms)",
                    self.interval.as_millis(),
                    max_duration.as_millis()
                )));
            }
        }
        Ok(())
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: Some(600),
            max_duration: Some(Duration::from_secs(15 * 60)),
        }
    }
}

/// Everything one client instance needs to run jobs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credential: Credential,
    pub base_url: String,
    pub options: TranscriptionOptions,
    pub poll: PollPolicy,
    /// Timeout applied to each individual HTTP request, `None` for no timeout.
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with default service settings.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            base_url: DEFAULT_BASE_URL.to_string(),
            options: TranscriptionOptions::default(),
            poll: PollPolicy::default(),
            request_timeout: Some(Duration::from_secs(60)),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_config_document_shape() {
        let options = TranscriptionOptions::default();
        let value = serde_json::to_value(options.job_config()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "transcription",
                "transcription_config": {
                    "language": "en",
                    "operating_point": "enhanced"
                }
            })
        );
    }

    #[test]
    fn test_job_config_carries_custom_options() {
        let options = TranscriptionOptions {
            language: "hi".to_string(),
            operating_point: OperatingPoint::Standard,
        };
        let value = serde_json::to_value(options.job_config()).unwrap();
        assert_eq!(value["transcription_config"]["language"], "hi");
        assert_eq!(value["transcription_config"]["operating_point"], "standard");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("sk-secret");
        let printed = format!("{:?}", credential);
        assert!(!printed.contains("sk-secret"));
        assert!(Credential::new("   ").is_blank());
    }

    #[test]
    fn test_default_poll_policy_is_valid() {
        assert!(PollPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let policy = PollPolicy {
            interval: Duration::ZERO,
            max_attempts: None,
            max_duration: None,
        };
        assert!(matches!(
            policy.validate(),
            Err(TranscriptionError::Configuration(_))
        ));
    }

    #[test]
    fn test_interval_longer_than_ceiling_is_rejected() {
        let policy = PollPolicy {
            interval: Duration::from_secs(10),
            max_attempts: None,
            max_duration: Some(Duration::from_secs(5)),
        };
        assert!(matches!(
            policy.validate(),
            Err(TranscriptionError::Configuration(_))
        ));

        let policy = PollPolicy {
            max_duration: Some(Duration::from_secs(10)),
            ..policy
        };
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_operating_point_ids() {
        assert_eq!(OperatingPoint::from_id("standard"), Some(OperatingPoint::Standard));
        assert_eq!(OperatingPoint::from_id("turbo"), None);
        assert_eq!(OperatingPoint::Enhanced.to_string(), "enhanced");
    }
}
