//! iOS Simulator
//!
//! emus treats the Simulator app as a single device; the app itself decides
//! which simulated device boots.

use emus_android_toolchain::HostOs;
use emus_core::{Device, EmusError, Result, IOS_SIMULATOR_ID};
use tokio::process::Command;
use tracing::{debug, info};

/// Bundle passed to `open -a`
pub const SIMULATOR_APP: &str = "Simulator.app";

const UNSUPPORTED: &str = "The iOS Simulator is only available on macOS";

/// List iOS devices available on `host`.
pub fn list_ios_devices(host: HostOs) -> Result<Vec<Device>> {
    if host != HostOs::MacOs {
        return Err(EmusError::UnsupportedPlatform(UNSUPPORTED.to_string()));
    }
    Ok(vec![Device::ios_simulator()])
}

/// Opens the Simulator app
#[derive(Debug, Clone)]
pub struct SimulatorLauncher {
    host: HostOs,
}

impl SimulatorLauncher {
    pub fn new(host: HostOs) -> Self {
        Self { host }
    }

    /// Run `open -a Simulator.app`. `open` hands off to LaunchServices and
    /// returns immediately, so its exit status is the launch result.
    pub async fn launch(&self) -> Result<()> {
        if self.host != HostOs::MacOs {
            return Err(EmusError::UnsupportedPlatform(UNSUPPORTED.to_string()));
        }

        info!("Opening {}", SIMULATOR_APP);

        let output = Command::new("open")
            .arg("-a")
            .arg(SIMULATOR_APP)
            .output()
            .await
            .map_err(|e| launch_failed(e.to_string()))?;

        debug!("open exited with {}", output.status);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(launch_failed(stderr.trim().to_string()));
        }

        Ok(())
    }
}

fn launch_failed(reason: String) -> EmusError {
    EmusError::LaunchFailed {
        device: IOS_SIMULATOR_ID.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_off_macos() {
        for host in [HostOs::Windows, HostOs::OtherUnix] {
            match list_ios_devices(host) {
                Err(EmusError::UnsupportedPlatform(msg)) => assert_eq!(msg, UNSUPPORTED),
                other => panic!("expected UnsupportedPlatform, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_single_sentinel_on_macos() {
        let devices = list_ios_devices(HostOs::MacOs).unwrap();
        assert_eq!(devices, vec![Device::ios_simulator()]);
        assert_eq!(devices[0].id(), IOS_SIMULATOR_ID);
    }

    #[tokio::test]
    async fn test_launch_refused_off_macos() {
        let launcher = SimulatorLauncher::new(HostOs::OtherUnix);
        assert!(matches!(
            launcher.launch().await,
            Err(EmusError::UnsupportedPlatform(_))
        ));
    }
}
