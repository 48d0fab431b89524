//! Emulator Bridge
//!
//! Enumerates and launches Android Virtual Devices and the iOS Simulator.

pub mod avd;
pub mod emulator;
pub mod simulator;

pub use avd::{list_android_devices, parse_avd_list, AvdManager};
pub use emulator::{EmulatorLauncher, EmulatorOptions, StartupOption};
pub use simulator::{list_ios_devices, SimulatorLauncher};
