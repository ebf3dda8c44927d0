//! Terminal and JSON rendering of the dashboard.
//!
//! Rendering reads only from a store snapshot. Errored units keep showing
//! their last successful result, dimmed, next to a retry hint.

use chrono::Local;
use colored::Colorize;
use pulse_core::store::{DashboardHealth, HealthLevel, UnitStatus};
use pulse_core::types::Sentiment;
use pulse_core::{LifecycleState, Region, RegionCatalog, RunOutcome, StoreSnapshot, UnitId};
use serde::Serialize;

/// Machine-readable dashboard for `--json`.
#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub timestamp: String,
    pub health: DashboardHealth,
    /// False while any unit is loading.
    pub refresh_available: bool,
    #[serde(flatten)]
    pub snapshot: &'a StoreSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<&'a RunOutcome>,
}

impl<'a> DashboardView<'a> {
    pub fn new(snapshot: &'a StoreSnapshot, run: Option<&'a RunOutcome>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            health: snapshot.health(),
            refresh_available: !snapshot.any_loading(),
            snapshot,
            run,
        }
    }
}

/// Print the dashboard, as JSON or for the terminal.
pub fn print(
    snapshot: &StoreSnapshot,
    catalog: &RegionCatalog,
    run: Option<&RunOutcome>,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let view = DashboardView::new(snapshot, run);
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        if let Some(outcome) = run {
            println!("{}", render_run(outcome));
        }
        print!("{}", render_dashboard(snapshot, catalog));
    }
    Ok(())
}

/// One-line summary of a full run.
pub fn render_run(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::AlreadyRunning => {
            format!("{} a refresh is already in progress", "⚠".yellow())
        }
        RunOutcome::Completed(report) => {
            let secs = report.duration().num_milliseconds() as f64 / 1000.0;
            if report.error_count() == 0 {
                format!(
                    "{} refreshed {} units in {:.1}s",
                    "✓".green(),
                    report.done_count(),
                    secs
                )
            } else {
                format!(
                    "{} refreshed {} units in {:.1}s, {} failed",
                    "⚠".yellow(),
                    report.done_count(),
                    secs,
                    report.error_count()
                )
            }
        }
    }
}

/// Render the full dashboard as text.
pub fn render_dashboard(snapshot: &StoreSnapshot, catalog: &RegionCatalog) -> String {
    let mut lines = Vec::new();
    let health = snapshot.health();

    lines.push(String::new());
    lines.push(format!("{}", "Market Pulse".cyan().bold()));
    lines.push("─".repeat(50));

    let refreshed = match snapshot.last_refresh {
        Some(at) => at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "never".to_string(),
    };
    lines.push(format!("  Last refresh: {}", refreshed));
    lines.push(format!(
        "  Health:       {} ({} done, {} failed, {} pending)",
        health_label(health.level),
        health.done,
        health.error,
        health.idle + health.loading
    ));
    if snapshot.any_loading() {
        lines.push(format!("  Refresh:      {}", "in progress…".yellow()));
    } else {
        lines.push("  Refresh:      `pulse refresh`".to_string());
    }

    // Briefing
    lines.push(String::new());
    lines.push(format!("  {}", "Global Briefing:".cyan().bold()));
    let briefing = snapshot.get(&UnitId::Briefing).cloned().unwrap_or_default();
    lines.extend(briefing_lines(&briefing));

    // Regions
    lines.push(String::new());
    lines.push(format!("  {} ({})", "Regions:".cyan().bold(), catalog.len()));
    for region in catalog.iter() {
        let status = snapshot.get(&region.unit_id()).cloned().unwrap_or_default();
        lines.extend(region_lines(region, &status));
    }

    lines.push(String::new());
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn briefing_lines(status: &UnitStatus) -> Vec<String> {
    let summary = status
        .result
        .as_ref()
        .and_then(|r| r.as_briefing())
        .map(|b| b.summary.as_str());

    match (status.state, summary) {
        (LifecycleState::Idle, _) => vec![format!("    {}", "not fetched yet".dimmed())],
        (LifecycleState::Loading, _) => vec![format!("    {}", "loading…".yellow())],
        (LifecycleState::Done, Some(text)) => vec![format!("    {}", text)],
        (LifecycleState::Done, None) => vec![format!("    {}", "no summary".dimmed())],
        (LifecycleState::Error, stale) => {
            let mut lines = vec![format!(
                "    {} {}",
                "✗".red(),
                "failed · retry with `pulse briefing`".red()
            )];
            if let Some(text) = stale {
                lines.push(format!("    {}", text.dimmed()));
            }
            lines
        }
    }
}

fn region_lines(region: &Region, status: &UnitStatus) -> Vec<String> {
    let insight = status.result.as_ref().and_then(|r| r.as_region());
    let title = format!("{} ({})", region.name, region.currency);

    let mut lines = Vec::new();
    match status.state {
        LifecycleState::Idle => {
            lines.push(format!("    {} {} {}", "○".dimmed(), title, "not fetched".dimmed()));
        }
        LifecycleState::Loading => {
            lines.push(format!("    {} {} {}", "◌".yellow(), title, "loading…".yellow()));
        }
        LifecycleState::Done => {
            let figures = insight.map(figures_line).unwrap_or_default();
            lines.push(format!("    {} {} {}", "●".green(), title.bold(), figures));
            if let Some(insight) = insight {
                lines.push(format!("      {}", insight.remark));
            }
        }
        LifecycleState::Error => {
            lines.push(format!(
                "    {} {} {}",
                "✗".red(),
                title.bold(),
                format!("failed · retry with `pulse region {}`", region.code).red()
            ));
            if let Some(insight) = insight {
                lines.push(format!("      {}", insight.remark.dimmed()));
            }
        }
    }
    lines
}

fn figures_line(insight: &pulse_core::types::RegionInsight) -> String {
    let mut parts = Vec::new();
    if let Some(sentiment) = insight.sentiment {
        parts.push(sentiment_label(sentiment));
    }
    if let Some(size) = &insight.market_size {
        parts.push(format!("size {}", size));
    }
    if let Some(growth) = &insight.growth {
        parts.push(format!("growth {}", growth));
    }
    parts.join("  ")
}

fn sentiment_label(sentiment: Sentiment) -> String {
    match sentiment {
        Sentiment::Positive => sentiment.as_str().green().to_string(),
        Sentiment::Neutral => sentiment.as_str().normal().to_string(),
        Sentiment::Negative => sentiment.as_str().red().to_string(),
    }
}

fn health_label(level: HealthLevel) -> String {
    match level {
        HealthLevel::Healthy => level.as_str().green().bold().to_string(),
        HealthLevel::Degraded => level.as_str().yellow().bold().to_string(),
        HealthLevel::Failing => level.as_str().red().bold().to_string(),
    }
}
