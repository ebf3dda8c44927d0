//! Refresh commands: full run, briefing only, single region.

use anyhow::Result;
use tracing::info;

use super::{build_orchestrator, dashboard};
use crate::config::Config;
use crate::error::PulseError;

/// Refresh the briefing and every region, then show the dashboard.
pub async fn all(json: bool, config: &Config) -> Result<()> {
    let orchestrator = build_orchestrator(config)?;

    let outcome = orchestrator.refresh_all().await;
    let snapshot = orchestrator.snapshot().await;

    dashboard::print(&snapshot, orchestrator.catalog(), Some(&outcome), json)
}

/// Refresh only the global briefing.
pub async fn briefing(json: bool, config: &Config) -> Result<()> {
    let orchestrator = build_orchestrator(config)?;

    let state = orchestrator.refresh_briefing().await;
    info!(state = %state, "Briefing refresh settled");

    let snapshot = orchestrator.snapshot().await;
    dashboard::print(&snapshot, orchestrator.catalog(), None, json)
}

/// Refresh (or retry) a single region.
pub async fn region(code: &str, json: bool, config: &Config) -> Result<()> {
    let orchestrator = build_orchestrator(config)?;

    let state = orchestrator
        .refresh_region(code)
        .await
        .map_err(PulseError::from)?;
    info!(region = %code, state = %state, "Region refresh settled");

    let snapshot = orchestrator.snapshot().await;
    dashboard::print(&snapshot, orchestrator.catalog(), None, json)
}
