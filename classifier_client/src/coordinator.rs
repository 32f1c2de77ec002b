//! Classification request coordinator
//!
//! Owns the file selection and the current [`SubmissionRound`]. Every submit
//! opens a new round with a fresh [`RoundId`] and spawns one task per
//! endpoint. A task's outcome is applied only while its round is still the
//! current one; outcomes of superseded rounds are dropped.

use crate::config::ClientConfig;
use crate::endpoint::ClassifierEndpoint;
use crate::round::{RoundId, SubmissionRound};
use crate::selection::FileSelection;
use crate::task::{ClassificationTask, ClassifyOutcome, EndpointId};
use crate::{Error, FileMeta, Result, SelectedFile};
use futures::future::join_all;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct CoordinatorState {
    selection: FileSelection,
    round: Option<SubmissionRound>,
    last_round: u64,
}

struct Shared {
    state: Mutex<CoordinatorState>,
    changes: watch::Sender<u64>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self) {
        self.changes.send_modify(|version| *version += 1);
    }

    fn apply(&self, round_id: RoundId, endpoint: EndpointId, outcome: ClassifyOutcome) {
        let applied = {
            let mut state = self.lock();
            match state.round.as_mut() {
                Some(round) if round.id() == round_id => round.resolve(endpoint, outcome.clone()),
                _ => false,
            }
        };

        if applied {
            match &outcome {
                Ok(label) => info!("Round {} {}: {}", round_id, endpoint, label),
                Err(reason) => warn!("Round {} {} failed: {}", round_id, endpoint, reason),
            }
            self.notify();
        } else {
            debug!("Dropping {} result of superseded round {}", endpoint, round_id);
        }
    }
}

/// Everything a presenter needs to render the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub file_meta: Option<FileMeta>,
    pub closed: Option<ClassificationTask>,
    pub open: Option<ClassificationTask>,
}

/// Handle to the tasks spawned by one submit.
#[must_use = "dropping the handle detaches the round's tasks"]
pub struct RoundHandle {
    id: RoundId,
    tasks: Vec<JoinHandle<()>>,
}

impl RoundHandle {
    pub fn id(&self) -> RoundId {
        self.id
    }

    /// Wait until every endpoint call of this round has finished, whether or
    /// not its result was still applied.
    pub async fn settled(self) -> RoundId {
        for result in join_all(self.tasks).await {
            if let Err(e) = result {
                warn!("Round {} task did not complete: {}", self.id, e);
            }
        }
        self.id
    }
}

pub struct Coordinator {
    endpoints: Vec<(EndpointId, Arc<dyn ClassifierEndpoint>)>,
    shared: Arc<Shared>,
}

impl Coordinator {
    pub fn new(endpoints: Vec<(EndpointId, Arc<dyn ClassifierEndpoint>)>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            endpoints,
            shared: Arc::new(Shared {
                state: Mutex::new(CoordinatorState::default()),
                changes,
            }),
        }
    }

    /// Coordinator talking HTTP to the endpoints described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(config.endpoints()?))
    }

    /// Hold `file`, discarding any round started for a previous file.
    pub fn select_file(&self, file: SelectedFile) {
        {
            let mut state = self.shared.lock();
            info!("Selected {} ({}, {} bytes)", file.name, file.mime_type, file.len());
            state.selection.select(file);
            state.round = None;
        }
        self.shared.notify();
    }

    /// Drop the held file and any round started for it.
    pub fn clear_file(&self) {
        {
            let mut state = self.shared.lock();
            state.selection.clear();
            state.round = None;
        }
        self.shared.notify();
    }

    pub fn current_file(&self) -> Option<Arc<SelectedFile>> {
        self.shared.lock().selection.current().cloned()
    }

    /// Start a new round for the held file.
    ///
    /// Every task of the new round is `Pending` by the time this returns. The
    /// endpoint calls run on the Tokio runtime; this never waits for them.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn submit(&self) -> Result<RoundHandle> {
        let (round_id, file) = {
            let mut state = self.shared.lock();
            let file = state
                .selection
                .current()
                .cloned()
                .ok_or(Error::NoFileSelected)?;
            state.last_round += 1;
            let round_id = RoundId(state.last_round);
            state.round = Some(SubmissionRound::pending(
                round_id,
                self.endpoints.iter().map(|(id, _)| *id),
            ));
            (round_id, file)
        };
        self.shared.notify();
        info!("Round {} submitting {} to {} endpoints", round_id, file.name, self.endpoints.len());

        let tasks = self
            .endpoints
            .iter()
            .map(|(endpoint_id, endpoint)| {
                let endpoint_id = *endpoint_id;
                let endpoint = Arc::clone(endpoint);
                let shared = Arc::clone(&self.shared);
                let file = Arc::clone(&file);
                tokio::spawn(async move {
                    let outcome = endpoint.classify(&file).await;
                    shared.apply(round_id, endpoint_id, outcome);
                })
            })
            .collect();

        Ok(RoundHandle { id: round_id, tasks })
    }

    pub fn current_round(&self) -> Option<SubmissionRound> {
        self.shared.lock().round.clone()
    }

    /// State of one endpoint's task; `Idle` when no round exists.
    pub fn task(&self, endpoint: EndpointId) -> ClassificationTask {
        self.shared
            .lock()
            .round
            .as_ref()
            .and_then(|r| r.task(endpoint).cloned())
            .unwrap_or_else(|| ClassificationTask::idle(endpoint))
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.shared.lock();
        let task = |endpoint: EndpointId| state.round.as_ref().and_then(|r| r.task(endpoint).cloned());
        Snapshot {
            file_meta: state.selection.current().map(|f| f.meta()),
            closed: task(EndpointId::Closed),
            open: task(EndpointId::Open),
        }
    }

    /// Receiver that is marked changed after every visible state transition.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.shared.changes.subscribe()
    }
}
