//! Command implementations for pulse CLI.
//!
//! Each submodule implements the logic for one command.

pub mod dashboard;
pub mod refresh;
pub mod regions;
pub mod watch;

use std::sync::Arc;

use pulse_core::{FetchOrchestrator, InsightClient, StatusStore};

use crate::config::Config;
use crate::error::PulseResult;

/// Wire an orchestrator to the configured insight service.
pub fn build_orchestrator(config: &Config) -> PulseResult<FetchOrchestrator> {
    let client = InsightClient::new(config.client_config())?;
    let store = Arc::new(StatusStore::new());

    Ok(FetchOrchestrator::new(
        Arc::new(client),
        store,
        config.catalog()?,
        config.orchestrator_config(),
    ))
}
