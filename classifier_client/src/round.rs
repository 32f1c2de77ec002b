use crate::task::{ClassificationTask, ClassifyOutcome, EndpointId};
use std::fmt;

/// Monotonically increasing identifier of a submission round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundId(pub u64);

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The tasks created by one submit, one per endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRound {
    id: RoundId,
    tasks: Vec<ClassificationTask>,
}

impl SubmissionRound {
    /// A round with every given endpoint pending. Duplicate endpoints are
    /// collapsed so there is exactly one task per endpoint.
    pub fn pending(id: RoundId, endpoints: impl IntoIterator<Item = EndpointId>) -> Self {
        let mut tasks: Vec<ClassificationTask> = Vec::new();
        for endpoint in endpoints {
            if tasks.iter().all(|t| t.endpoint() != endpoint) {
                tasks.push(ClassificationTask::pending(endpoint));
            }
        }
        Self { id, tasks }
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn task(&self, endpoint: EndpointId) -> Option<&ClassificationTask> {
        self.tasks.iter().find(|t| t.endpoint() == endpoint)
    }

    pub fn tasks(&self) -> &[ClassificationTask] {
        &self.tasks
    }

    /// True once no task is pending.
    pub fn is_settled(&self) -> bool {
        self.tasks.iter().all(|t| !t.is_pending())
    }

    /// Apply one endpoint's outcome. Only that endpoint's task changes.
    pub fn resolve(&mut self, endpoint: EndpointId, outcome: ClassifyOutcome) -> bool {
        self.tasks
            .iter_mut()
            .find(|t| t.endpoint() == endpoint)
            .map(|t| t.resolve(outcome))
            .unwrap_or(false)
    }
}
