//! Shared error model and configuration for ticketdoc.
//!
//! This crate is the foundation depended on by all other ticketdoc crates.
//! It provides:
//! - [`TicketDocError`], the unified error type
//! - Configuration ([`AppConfig`], [`TrackerConfig`], config loading)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ConverterConfig, DedupConfig, TrackerConfig, TrackerCredentials, config_dir,
    config_file_path, init_config, load_config, load_config_from, tracker_credentials,
};
pub use error::{Result, TicketDocError};
