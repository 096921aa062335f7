//! Core types for the dayplan ecosystem.
//!
//! This crate provides everything below the presentation layer:
//! - `Event` and the `Schedule` store (add/delete/edit/search/range)
//! - pluggable search normalization (`search`)
//! - local JSON persistence (`storage`) and remote reconciliation (`sync`)
//! - tabular export (`export`) and app configuration (`config`)

pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod remote;
pub mod schedule;
pub mod search;
pub mod storage;
pub mod sync;

// Re-export the types nearly every caller needs
pub use error::{PlanError, PlanResult};
pub use event::{Event, EventKey};
pub use schedule::{DayMap, Schedule};
