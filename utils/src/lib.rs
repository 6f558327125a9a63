//! Shared utilities for the Gavel workspace.

pub mod logging;
pub mod units;

pub use logging::{init_logging, LogFormat};
pub use units::{format_units, parse_units, UnitsError};
