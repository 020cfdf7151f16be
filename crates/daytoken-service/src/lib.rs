//! DayToken Service - Periodic driver and host-side plumbing
//!
//! This crate provides:
//! - The tokio ticker that drives the lifecycle engine's countdown
//! - JSON configuration with platform default paths
//! - The status history feed loader

pub mod config;
pub mod error;
pub mod history;
pub mod ticker;

pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
pub use history::{load_from_file, sample_feed};
pub use ticker::TokenTicker;
