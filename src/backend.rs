//! Device backend capability
//!
//! The launch flow talks to platforms only through [`DeviceBackend`], so the
//! real SDK tooling can be swapped for scripted doubles.

use async_trait::async_trait;
use emus_android_toolchain::{HostOs, ToolchainDetector};
use emus_core::{Device, LaunchRequest, Platform, Result};
use emus_emulator_bridge::{list_android_devices, list_ios_devices, EmulatorLauncher, SimulatorLauncher};

/// Enumerates and launches devices for every platform
#[async_trait]
pub trait DeviceBackend: Send + Sync {
    async fn android_devices(&self) -> Result<Vec<Device>>;

    async fn ios_devices(&self) -> Result<Vec<Device>>;

    /// Start the requested device. Returns once the launch command was accepted.
    async fn launch(&self, request: &LaunchRequest) -> Result<()>;
}

/// Backend over the installed Android SDK and Xcode tooling
#[derive(Debug, Clone)]
pub struct SystemBackend {
    detector: ToolchainDetector,
    host: HostOs,
}

impl SystemBackend {
    pub fn new() -> Self {
        Self::with_detector(ToolchainDetector::new(), HostOs::current())
    }

    pub fn with_detector(detector: ToolchainDetector, host: HostOs) -> Self {
        Self { detector, host }
    }
}

impl Default for SystemBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceBackend for SystemBackend {
    async fn android_devices(&self) -> Result<Vec<Device>> {
        list_android_devices(&self.detector).await
    }

    async fn ios_devices(&self) -> Result<Vec<Device>> {
        list_ios_devices(self.host)
    }

    async fn launch(&self, request: &LaunchRequest) -> Result<()> {
        match request.device.platform() {
            Platform::Android => {
                EmulatorLauncher::from_detector(&self.detector)?
                    .launch(request)
                    .await
            }
            Platform::Ios => SimulatorLauncher::new(self.host).launch().await,
        }
    }
}
