//! Shared test fixtures and utilities for docdelta.

mod delta;
mod fixtures;
mod logging;

pub use delta::ShoutName;
pub use fixtures::{EMPTY_HISTORY_JSON, SCENARIO_HISTORY_JSON, scenario_history};
pub use logging::init_tracing;
