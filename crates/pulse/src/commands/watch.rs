//! Watch mode: refresh on an interval until interrupted.
//!
//! One orchestrator lives for the whole session, so a region that fails on a
//! later pass keeps showing its earlier result.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use pulse_core::{FetchOrchestrator, RunOutcome, StoreSnapshot};
use tracing::info;

use super::{build_orchestrator, dashboard};
use crate::config::Config;

pub async fn execute(interval: Option<u64>, config: &Config) -> Result<()> {
    let interval = config.watch_interval(interval)?;
    let orchestrator = build_orchestrator(config)?;

    println!(
        "{} every {}s (Ctrl+C to stop)",
        "Watching".cyan().bold(),
        interval.as_secs()
    );
    info!(interval_secs = interval.as_secs(), "Watch mode started");

    let passes = watch(&orchestrator, interval, tokio::signal::ctrl_c(), |snapshot, outcome| {
        dashboard::print(snapshot, orchestrator.catalog(), Some(outcome), false)
    })
    .await?;

    info!(passes, "Watch mode stopped");
    println!("{}", "Stopped.".dimmed());
    Ok(())
}

/// Run full refreshes every `interval` until `shutdown` resolves.
///
/// Shutdown is observed during a refresh as well as between refreshes; an
/// interrupted run is dropped and its guard releases the run lock. Returns the
/// number of completed passes.
pub async fn watch<S, R>(
    orchestrator: &FetchOrchestrator,
    interval: Duration,
    shutdown: S,
    mut render: R,
) -> Result<usize>
where
    S: Future,
    R: FnMut(&StoreSnapshot, &RunOutcome) -> Result<()>,
{
    tokio::pin!(shutdown);
    let mut passes = 0;

    loop {
        let outcome = tokio::select! {
            _ = &mut shutdown => break,
            outcome = orchestrator.refresh_all() => outcome,
        };
        passes += 1;

        let snapshot = orchestrator.snapshot().await;
        render(&snapshot, &outcome)?;

        tokio::select! {
            _ = &mut shutdown => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    Ok(passes)
}
