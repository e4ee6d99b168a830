//! Common infrastructure
//!
//! Logging setup shared by hosts embedding the engine.

pub mod logger;

pub use logger::{cleanup_old_logs, init_logger, init_logger_with_file};
