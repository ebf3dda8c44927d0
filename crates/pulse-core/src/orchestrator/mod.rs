//! Insight orchestration: sequencing fetches and tracking their lifecycle.
//!
//! A full run refreshes the global briefing and then each region in catalog
//! order, strictly one fetch at a time, pausing between regions so the remote
//! service never sees a burst.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      FetchOrchestrator                          │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐ │
//! │  │ Briefing        │  │ Region 1..N     │  │ Last refresh    │ │
//! │  │ (summary)       │→→│ (delay between) │→→│ timestamp       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘ │
//! │           │                    │                    │          │
//! │           └────────────────────┴────────────────────┘          │
//! │                          │                                      │
//! │                     StatusStore                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! Every unit moves `idle → loading → done | error`, and back to `loading` on
//! the next refresh. A failed refresh never clears a previously stored result.

mod fetch;
mod report;

pub use fetch::*;
pub use report::*;
