//! Fetch orchestrator: briefing and region refreshes, and the serial full run.

use chrono::Utc;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::report::{RunOutcome, RunReport, UnitOutcome};
use crate::client::{InsightError, InsightSource};
use crate::error::{Error, Result};
use crate::prompt;
use crate::region::{Region, RegionCatalog};
use crate::store::{StatusStore, StoreSnapshot};
use crate::types::{BriefingInsight, InsightResult, LifecycleState, RegionInsight, UnitId};

/// Default pause between consecutive region fetches in a full run
pub const DEFAULT_REGION_DELAY: Duration = Duration::from_millis(1500);

/// Orchestrator settings
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Pause after each region fetch before the next one starts.
    pub region_delay: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            region_delay: DEFAULT_REGION_DELAY,
        }
    }
}

/// Holds the full-run flag; clears it on drop, including when the run future
/// is dropped mid-flight.
struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Sequences insight fetches and records their lifecycle in the status store.
///
/// Single-unit refreshes (`refresh_briefing`, `refresh_region`) do not take
/// the full-run lock. They may be issued while a full run is active; callers
/// that want to avoid overlapping a run check `is_running()` first.
pub struct FetchOrchestrator {
    source: Arc<dyn InsightSource>,
    store: Arc<StatusStore>,
    catalog: RegionCatalog,
    config: OrchestratorConfig,
    running: AtomicBool,
}

impl FetchOrchestrator {
    /// Create a new orchestrator
    pub fn new(
        source: Arc<dyn InsightSource>,
        store: Arc<StatusStore>,
        catalog: RegionCatalog,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            source,
            store,
            catalog,
            config,
            running: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &Arc<StatusStore> {
        &self.store
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// Whether a full run currently holds the lock.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Snapshot of every unit this orchestrator knows, briefing first.
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot(&self.catalog.units()).await
    }

    /// Refresh the global briefing. Resolves to `done` or `error`.
    pub async fn refresh_briefing(&self) -> LifecycleState {
        let prompt = prompt::briefing_prompt(&self.catalog);
        self.refresh_unit(UnitId::Briefing, &prompt, |payload| {
            BriefingInsight::from_payload(payload)
                .map(InsightResult::Briefing)
                .ok_or(InsightError::Validation("summary"))
        })
        .await
    }

    /// Refresh one region by code. Unknown codes are rejected without touching
    /// the store.
    pub async fn refresh_region(&self, code: &str) -> Result<LifecycleState> {
        let region = *self
            .catalog
            .get(code)
            .ok_or_else(|| Error::UnknownRegion(code.to_string()))?;
        Ok(self.refresh_known_region(&region).await)
    }

    /// Run the briefing and then every region, one at a time.
    ///
    /// Returns `AlreadyRunning` without changing anything if another full run
    /// holds the lock. Individual failures do not stop the sequence.
    pub async fn refresh_all(&self) -> RunOutcome {
        let Some(_guard) = RunGuard::acquire(&self.running) else {
            info!("Full refresh already in progress, skipping");
            return RunOutcome::AlreadyRunning;
        };

        let started_at = Utc::now();
        info!(regions = self.catalog.len(), "Starting full refresh");

        let mut outcomes = Vec::with_capacity(self.catalog.len() + 1);
        outcomes.push(UnitOutcome {
            unit: UnitId::Briefing,
            state: self.refresh_briefing().await,
        });

        let mut regions = self.catalog.iter().peekable();
        while let Some(region) = regions.next() {
            outcomes.push(UnitOutcome {
                unit: region.unit_id(),
                state: self.refresh_known_region(region).await,
            });

            if regions.peek().is_some() && !self.config.region_delay.is_zero() {
                debug!(delay = ?self.config.region_delay, "Pausing before next region");
                tokio::time::sleep(self.config.region_delay).await;
            }
        }

        let finished_at = Utc::now();
        self.store.set_last_refresh(finished_at).await;

        let report = RunReport {
            started_at,
            finished_at,
            outcomes,
        };
        info!(
            done = report.done_count(),
            failed = report.error_count(),
            elapsed_ms = report.duration().num_milliseconds(),
            "Full refresh complete"
        );

        RunOutcome::Completed(report)
    }

    async fn refresh_known_region(&self, region: &Region) -> LifecycleState {
        let prompt = prompt::region_prompt(region);
        self.refresh_unit(region.unit_id(), &prompt, |payload| {
            RegionInsight::from_payload(payload)
                .map(InsightResult::Region)
                .ok_or(InsightError::Validation("remark"))
        })
        .await
    }

    /// loading → fetch → done/error. A failure leaves the stored result alone.
    async fn refresh_unit<F>(&self, unit: UnitId, prompt: &str, decode: F) -> LifecycleState
    where
        F: FnOnce(&Value) -> std::result::Result<InsightResult, InsightError>,
    {
        self.store.set_state(&unit, LifecycleState::Loading).await;
        debug!(unit = %unit, "Fetching insight");

        let outcome = self
            .source
            .fetch_insight(prompt)
            .await
            .and_then(|payload| decode(&payload));

        match outcome {
            Ok(result) => {
                self.store.record_success(&unit, result).await;
                info!(unit = %unit, "Insight updated");
                LifecycleState::Done
            }
            Err(e) => {
                self.store.set_state(&unit, LifecycleState::Error).await;
                warn!(unit = %unit, error = %e, "Insight refresh failed");
                LifecycleState::Error
            }
        }
    }
}
