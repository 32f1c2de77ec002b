//! Per-endpoint task lifecycle: `Idle → Pending → {Succeeded, Failed}`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifies one of the classification services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointId {
    Closed,
    Open,
}

impl EndpointId {
    pub const ALL: [EndpointId; 2] = [EndpointId::Closed, EndpointId::Open];

    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointId::Closed => "closed",
            EndpointId::Open => "open",
        }
    }

    /// Route the service exposes for this endpoint.
    pub fn default_path(&self) -> &'static str {
        match self {
            EndpointId::Closed => "/predict",
            EndpointId::Open => "/predict_mod",
        }
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result returned by a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why an endpoint call did not produce a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FailureReason {
    /// Connection, DNS or timeout failure
    #[error("transport error")]
    TransportError,

    /// Error status or unusable response body
    #[error("server error")]
    ServerError,

    /// The service rejected the uploaded file
    #[error("invalid input")]
    InvalidInput,
}

/// Parsed response of one endpoint call.
pub type ClassifyOutcome = std::result::Result<Label, FailureReason>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Idle,
    Pending,
    Succeeded(Label),
    Failed(FailureReason),
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Succeeded(_) | TaskStatus::Failed(_))
    }
}

/// Lifecycle of one endpoint's request within a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTask {
    endpoint: EndpointId,
    status: TaskStatus,
}

impl ClassificationTask {
    pub fn idle(endpoint: EndpointId) -> Self {
        Self {
            endpoint,
            status: TaskStatus::Idle,
        }
    }

    pub fn pending(endpoint: EndpointId) -> Self {
        Self {
            endpoint,
            status: TaskStatus::Pending,
        }
    }

    pub fn endpoint(&self) -> EndpointId {
        self.endpoint
    }

    pub fn status(&self) -> &TaskStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    pub fn label(&self) -> Option<&Label> {
        match &self.status {
            TaskStatus::Succeeded(label) => Some(label),
            _ => None,
        }
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self.status {
            TaskStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Move a pending task to its terminal state. Returns `false` and leaves
    /// the task untouched if it is not pending.
    pub fn resolve(&mut self, outcome: ClassifyOutcome) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = match outcome {
            Ok(label) => TaskStatus::Succeeded(label),
            Err(reason) => TaskStatus::Failed(reason),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_resolves_to_success() {
        let mut task = ClassificationTask::pending(EndpointId::Closed);
        assert!(task.resolve(Ok(Label::new("Dog Bark"))));
        assert_eq!(task.label().map(Label::as_str), Some("Dog Bark"));
        assert_eq!(task.failure_reason(), None);
        assert!(task.status().is_terminal());
    }

    #[test]
    fn pending_resolves_to_failure() {
        let mut task = ClassificationTask::pending(EndpointId::Open);
        assert!(task.resolve(Err(FailureReason::ServerError)));
        assert_eq!(task.failure_reason(), Some(FailureReason::ServerError));
        assert!(task.label().is_none());
    }

    #[test]
    fn idle_and_terminal_tasks_ignore_resolution() {
        let mut idle = ClassificationTask::idle(EndpointId::Closed);
        assert!(!idle.resolve(Ok(Label::new("x"))));
        assert_eq!(idle.status(), &TaskStatus::Idle);

        let mut done = ClassificationTask::pending(EndpointId::Closed);
        done.resolve(Ok(Label::new("first")));
        assert!(!done.resolve(Err(FailureReason::TransportError)));
        assert_eq!(done.label().map(Label::as_str), Some("first"));
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(EndpointId::Closed.default_path(), "/predict");
        assert_eq!(EndpointId::Open.default_path(), "/predict_mod");
        assert_eq!(EndpointId::Open.to_string(), "open");
    }
}
