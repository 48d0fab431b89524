//! emus Core - device model, usage history and ranking
//!
//! Shared by the platform crates and the selection controller.

pub mod config;
pub mod device;
pub mod error;
pub mod ranking;

pub use config::{FileHistoryStore, HistoryStore, MemoryHistoryStore, UsageHistory};
pub use device::{Device, LaunchRequest, Platform, IOS_SIMULATOR_ID};
pub use error::{EmusError, Result};
pub use ranking::rank;

/// emus version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "emus";
