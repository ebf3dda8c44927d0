//! Results of a full refresh run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{LifecycleState, UnitId};

/// How one unit settled during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitOutcome {
    pub unit: UnitId,
    pub state: LifecycleState,
}

/// Summary of a completed full refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Units in visit order.
    pub outcomes: Vec<UnitOutcome>,
}

impl RunReport {
    pub fn done_count(&self) -> usize {
        self.count(LifecycleState::Done)
    }

    pub fn error_count(&self) -> usize {
        self.count(LifecycleState::Error)
    }

    /// Units that ended the run in error.
    pub fn failed_units(&self) -> Vec<&UnitId> {
        self.outcomes
            .iter()
            .filter(|o| o.state == LifecycleState::Error)
            .map(|o| &o.unit)
            .collect()
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    fn count(&self, state: LifecycleState) -> usize {
        self.outcomes.iter().filter(|o| o.state == state).count()
    }
}

/// Result of asking for a full refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "report", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The run executed to the end.
    Completed(RunReport),
    /// Another run held the lock; nothing was changed.
    AlreadyRunning,
}

impl RunOutcome {
    pub fn report(&self) -> Option<&RunReport> {
        match self {
            RunOutcome::Completed(report) => Some(report),
            RunOutcome::AlreadyRunning => None,
        }
    }
}
