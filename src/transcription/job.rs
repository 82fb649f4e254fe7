//! Remote job identity, status values and the polling state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque job identifier assigned by the transcription service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Job status as reported by the service.
///
/// Values the client does not know are kept verbatim in `Other` and treated
/// as still in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Done,
    Rejected,
    Expired,
    Other(String),
}

impl JobStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "running" => JobStatus::Running,
            "done" => JobStatus::Done,
            "rejected" => JobStatus::Rejected,
            "expired" => JobStatus::Expired,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Running => "running",
            JobStatus::Done => "done",
            JobStatus::Rejected => "rejected",
            JobStatus::Expired => "expired",
            JobStatus::Other(value) => value,
        }
    }

    /// Returns true once the service will not move the job any further.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Done | JobStatus::Rejected | JobStatus::Expired
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(JobStatus::parse(&value))
    }
}

/// Where a job stands from the client's point of view.
///
/// `Submitted` holds until the first status observation. `Done` and `Failed`
/// are terminal: `observe` leaves them unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollPhase {
    Submitted,
    Running,
    Done,
    Failed(JobStatus),
}

impl PollPhase {
    /// Applies one observed status and returns the next phase.
    pub fn observe(self, status: JobStatus) -> PollPhase {
        if self.is_terminal() {
            return self;
        }
        if !status.is_terminal() {
            return PollPhase::Running;
        }
        match status {
            JobStatus::Done => PollPhase::Done,
            failed => PollPhase::Failed(failed),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PollPhase::Done | PollPhase::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_known_values() {
        assert_eq!(JobStatus::parse("running"), JobStatus::Running);
        assert_eq!(JobStatus::parse("done"), JobStatus::Done);
        assert_eq!(JobStatus::parse("rejected"), JobStatus::Rejected);
        assert_eq!(JobStatus::parse("expired"), JobStatus::Expired);
    }

    #[test]
    fn test_unknown_status_is_not_terminal() {
        let status = JobStatus::parse("queued");
        assert_eq!(status, JobStatus::Other("queued".to_string()));
        assert_eq!(status.as_str(), "queued");
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_status_deserializes_from_json_string() {
        let status: JobStatus = serde_json::from_str("\"expired\"").unwrap();
        assert_eq!(status, JobStatus::Expired);
    }

    #[test]
    fn test_phase_transitions() {
        let phase = PollPhase::Submitted.observe(JobStatus::Running);
        assert_eq!(phase, PollPhase::Running);

        let phase = phase.observe(JobStatus::Other("transcribing".into()));
        assert_eq!(phase, PollPhase::Running);

        assert_eq!(phase.clone().observe(JobStatus::Done), PollPhase::Done);
        assert_eq!(
            phase.observe(JobStatus::Rejected),
            PollPhase::Failed(JobStatus::Rejected)
        );
    }

    #[test]
    fn test_terminal_phase_ignores_later_observations() {
        let failed = PollPhase::Failed(JobStatus::Expired);
        assert_eq!(
            failed.clone().observe(JobStatus::Done),
            PollPhase::Failed(JobStatus::Expired)
        );
        assert_eq!(PollPhase::Done.observe(JobStatus::Running), PollPhase::Done);
    }
}
