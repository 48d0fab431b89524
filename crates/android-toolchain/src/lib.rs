//! Android Toolchain Discovery
//!
//! Resolves the Android SDK root and the emulator binary inside it from
//! `ANDROID_HOME`, `ANDROID_SDK_ROOT`, or the platform's default install
//! directory, in that order.

pub mod detector;
pub mod env;

pub use detector::{find_emulator_in_sdk, CandidateSource, SdkCandidate, ToolchainDetector};
pub use env::{EnvSnapshot, HostOs};
