//! AVD (Android Virtual Device) listing
//!
//! Asks the emulator binary which AVDs exist.

use std::path::{Path, PathBuf};

use emus_android_toolchain::ToolchainDetector;
use emus_core::{Device, EmusError, Result};
use tokio::process::Command;
use tracing::{debug, info};

/// Prefixes of diagnostic lines newer emulator builds print on stdout
const DIAGNOSTIC_PREFIXES: &[&str] = &["INFO", "WARNING", "ERROR"];

/// Lists AVDs through a resolved emulator binary
#[derive(Debug, Clone)]
pub struct AvdManager {
    emulator: PathBuf,
}

impl AvdManager {
    pub fn new(emulator: impl Into<PathBuf>) -> Self {
        Self {
            emulator: emulator.into(),
        }
    }

    /// Resolve the emulator binary with `detector` first.
    ///
    /// SDK lookup failures are returned unchanged.
    pub fn from_detector(detector: &ToolchainDetector) -> Result<Self> {
        Ok(Self::new(detector.locate_emulator_binary()?))
    }

    pub fn emulator_path(&self) -> &Path {
        &self.emulator
    }

    /// List all available AVDs. No AVDs is an empty list, not an error.
    pub async fn list_avds(&self) -> Result<Vec<Device>> {
        debug!("Running {:?} -list-avds", self.emulator);

        let output = Command::new(&self.emulator)
            .arg("-list-avds")
            .output()
            .await
            .map_err(|e| {
                EmusError::EmulatorInvocation(format!(
                    "Failed to run {}: {}",
                    self.emulator.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            return Err(EmusError::EmulatorInvocation(if stderr.is_empty() {
                format!("{} -list-avds exited with {}", self.emulator.display(), output.status)
            } else {
                stderr.to_string()
            }));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let avds = parse_avd_list(&stdout);
        info!("Found {} AVD(s)", avds.len());
        Ok(avds)
    }
}

/// Parse `emulator -list-avds` output into devices.
pub fn parse_avd_list(stdout: &str) -> Vec<Device> {
    stdout
        .lines()
        .filter(|line| !is_diagnostic(line))
        .filter_map(Device::android)
        .collect()
}

fn is_diagnostic(line: &str) -> bool {
    DIAGNOSTIC_PREFIXES.iter().any(|prefix| {
        line.strip_prefix(prefix)
            .map(|rest| rest.trim_start().starts_with('|'))
            .unwrap_or(false)
    })
}

/// List Android devices, locating the emulator with `detector`.
pub async fn list_android_devices(detector: &ToolchainDetector) -> Result<Vec<Device>> {
    AvdManager::from_detector(detector)?.list_avds().await
}
