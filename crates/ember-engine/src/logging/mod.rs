//! Logging utilities.
//!
//! Centralizes logger initialization. Every subsystem logs through the `log`
//! facade; `env_logger` is only installed here.

mod init;

pub use init::{init_logging, LoggingConfig};
