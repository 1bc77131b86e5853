pub mod config;

pub use config::{init_logging, log_shutdown_info, log_startup_info, LogFormat, LoggingConfig};
