//! emus - emulator picker
//!
//! Finds Android Virtual Devices and the iOS Simulator, lists them in one
//! menu ordered by when each was last opened, and starts the one you pick.
//!
//! ## Architecture
//!
//! emus is organized into specialized crates:
//!
//! - `emus-core`: device model, usage history store, ranking
//! - `emus-android-toolchain`: Android SDK and emulator binary discovery
//! - `emus-emulator-bridge`: AVD listing, emulator launch, iOS Simulator
//!
//! This crate wires them into the interactive launch flow.

#![warn(clippy::all)]

pub mod backend;
pub mod cli;
pub mod commands;
pub mod prompt;

// Re-export main components for library usage
pub use emus_android_toolchain as toolchain;
pub use emus_core as core;
pub use emus_emulator_bridge as emulator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::backend::{DeviceBackend, SystemBackend};
    pub use crate::cli::{Cli, LaunchFlags, Scope};
    pub use crate::commands::{LaunchCommand, Outcome};
    pub use crate::prompt::{FirstChoicePrompt, MenuEntry, Prompt, TerminalPrompt};
    pub use emus_core::{Device, FileHistoryStore, HistoryStore, LaunchRequest, Platform};
}
