//! pulse-core - Core library for Market Pulse
//!
//! This crate provides the insight-orchestration core behind the dashboard:
//!
//! - **client**: Insight client for the remote market-insight service
//! - **orchestrator**: Serial briefing + region refreshes with a run lock
//! - **store**: Per-unit lifecycle state and last successful results
//! - **region**: Region catalog and visit order
//! - **prompt**: Prompt and system-instruction builders

pub mod client;
pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod region;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use client::{ClientConfig, InsightClient, InsightError, InsightSource};
pub use error::{Error, Result};
pub use orchestrator::{FetchOrchestrator, OrchestratorConfig, RunOutcome, RunReport};
pub use region::{Region, RegionCatalog};
pub use store::{StatusStore, StoreSnapshot};
pub use types::{InsightResult, LifecycleState, UnitId};
