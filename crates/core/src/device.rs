//! Device Types
//!
//! Represents launchable virtual devices across platforms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Id of the single iOS device emus knows about: the Simulator app itself.
pub const IOS_SIMULATOR_ID: &str = "iOS_Simulator";

/// Device platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Android Virtual Device run by the SDK emulator
    Android,
    /// Apple's iOS Simulator
    Ios,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => f.write_str("Android"),
            Platform::Ios => f.write_str("iOS"),
        }
    }
}

/// A launchable device. Identity is `(platform, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    id: String,
    platform: Platform,
    display_name: String,
}

impl Device {
    /// Android device named after its AVD.
    ///
    /// Returns `None` for a blank AVD name.
    pub fn android(avd_name: &str) -> Option<Self> {
        let id = avd_name.trim();
        if id.is_empty() {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            platform: Platform::Android,
            display_name: id.to_string(),
        })
    }

    /// The iOS Simulator sentinel.
    pub fn ios_simulator() -> Self {
        Self {
            id: IOS_SIMULATOR_ID.to_string(),
            platform: Platform::Ios,
            display_name: "iOS Simulator".to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Label shown in the selection menu
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_android(&self) -> bool {
        self.platform == Platform::Android
    }
}

/// A device together with the emulator flags it should start with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub device: Device,
    /// Extra emulator arguments, in order. Always empty for iOS.
    pub startup_flags: Vec<String>,
}

impl LaunchRequest {
    pub fn new(device: Device) -> Self {
        Self {
            device,
            startup_flags: Vec::new(),
        }
    }

    pub fn with_flags(device: Device, startup_flags: Vec<String>) -> Self {
        let startup_flags = if device.is_android() {
            startup_flags
        } else {
            Vec::new()
        };
        Self {
            device,
            startup_flags,
        }
    }
}
