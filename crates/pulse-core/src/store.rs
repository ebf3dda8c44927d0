//! Status store: per-unit lifecycle state and last successful result.
//!
//! Pure state container shared between the orchestrator (the only writer) and
//! presentation. Units that were never written read as `idle` with no result.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::types::{InsightResult, LifecycleState, UnitId, UnitKind};

/// Current status of one unit of work.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnitStatus {
    pub state: LifecycleState,
    /// Last successful result. Kept when a later fetch fails.
    pub result: Option<InsightResult>,
    /// When the state last changed.
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    units: HashMap<UnitId, UnitStatus>,
    last_refresh: Option<DateTime<Utc>>,
}

/// Session-wide status store
#[derive(Debug, Default)]
pub struct StatusStore {
    inner: RwLock<StoreInner>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifecycle state of a unit (`idle` if never written).
    pub async fn get_state(&self, unit: &UnitId) -> LifecycleState {
        let inner = self.inner.read().await;
        inner.units.get(unit).map(|s| s.state).unwrap_or_default()
    }

    /// Last successful result of a unit, if any.
    pub async fn get_result(&self, unit: &UnitId) -> Option<InsightResult> {
        let inner = self.inner.read().await;
        inner.units.get(unit).and_then(|s| s.result.clone())
    }

    /// Full status of a unit.
    pub async fn get(&self, unit: &UnitId) -> UnitStatus {
        let inner = self.inner.read().await;
        inner.units.get(unit).cloned().unwrap_or_default()
    }

    pub async fn set_state(&self, unit: &UnitId, state: LifecycleState) {
        let mut inner = self.inner.write().await;
        let entry = inner.units.entry(unit.clone()).or_default();
        entry.state = state;
        entry.updated_at = Some(Utc::now());
    }

    /// Replace the stored result wholesale.
    pub async fn set_result(&self, unit: &UnitId, result: InsightResult) {
        let mut inner = self.inner.write().await;
        inner.units.entry(unit.clone()).or_default().result = Some(result);
    }

    /// Store a result and mark the unit done under one write.
    pub async fn record_success(&self, unit: &UnitId, result: InsightResult) {
        let mut inner = self.inner.write().await;
        let entry = inner.units.entry(unit.clone()).or_default();
        entry.result = Some(result);
        entry.state = LifecycleState::Done;
        entry.updated_at = Some(Utc::now());
    }

    /// When the most recent full refresh completed.
    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.last_refresh
    }

    pub(crate) async fn set_last_refresh(&self, at: DateTime<Utc>) {
        self.inner.write().await.last_refresh = Some(at);
    }

    /// Consistent copy of the given units, in the given order.
    pub async fn snapshot(&self, units: &[UnitId]) -> StoreSnapshot {
        let inner = self.inner.read().await;
        StoreSnapshot {
            units: units
                .iter()
                .map(|unit| UnitEntry {
                    unit: unit.clone(),
                    kind: unit.kind(),
                    status: inner.units.get(unit).cloned().unwrap_or_default(),
                })
                .collect(),
            last_refresh: inner.last_refresh,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapshots
// ─────────────────────────────────────────────────────────────────────────────

/// One unit in a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct UnitEntry {
    pub unit: UnitId,
    pub kind: UnitKind,
    #[serde(flatten)]
    pub status: UnitStatus,
}

/// Point-in-time copy of the store for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    pub units: Vec<UnitEntry>,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl StoreSnapshot {
    pub fn get(&self, unit: &UnitId) -> Option<&UnitStatus> {
        self.units.iter().find(|e| &e.unit == unit).map(|e| &e.status)
    }

    pub fn any_loading(&self) -> bool {
        self.units
            .iter()
            .any(|e| e.status.state == LifecycleState::Loading)
    }

    /// Aggregate lifecycle counts.
    pub fn health(&self) -> DashboardHealth {
        let mut health = DashboardHealth::default();
        for entry in &self.units {
            match entry.status.state {
                LifecycleState::Idle => health.idle += 1,
                LifecycleState::Loading => health.loading += 1,
                LifecycleState::Done => health.done += 1,
                LifecycleState::Error => health.error += 1,
            }
        }
        health.level = if health.error == 0 {
            HealthLevel::Healthy
        } else if health.done == 0 {
            HealthLevel::Failing
        } else {
            HealthLevel::Degraded
        };
        health
    }
}

/// Overall dashboard condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    /// No unit in error.
    #[default]
    Healthy,
    /// Some units in error, some done.
    Degraded,
    /// Units in error and none done.
    Failing,
}

impl HealthLevel {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLevel::Healthy => "healthy",
            HealthLevel::Degraded => "degraded",
            HealthLevel::Failing => "failing",
        }
    }
}

/// Lifecycle counts across a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardHealth {
    pub idle: usize,
    pub loading: usize,
    pub done: usize,
    pub error: usize,
    pub level: HealthLevel,
}
