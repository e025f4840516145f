//! # resbundle common
//!
//! Logging setup and shared test helpers for the resbundle workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use logging::{init_logging, LogFormat, LoggingConfig};
