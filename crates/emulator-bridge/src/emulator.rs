//! Emulator Launcher
//!
//! Starts an AVD in a detached emulator process. emus exits right after the
//! spawn succeeds; the emulator keeps running on its own.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use emus_android_toolchain::ToolchainDetector;
use emus_core::{EmusError, LaunchRequest, Result};
use tokio::process::Command;
use tracing::{debug, info};

/// Emulator launch options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmulatorOptions {
    /// Wipe user data on launch
    pub wipe_data: bool,
    /// Neither load nor save a quickboot snapshot
    pub no_snapshot: bool,
    /// Cold boot, but save a snapshot on exit
    pub no_snapshot_load: bool,
    /// Quickboot from the snapshot, but don't save on exit
    pub no_snapshot_save: bool,
    /// Additional arguments
    pub extra_args: Vec<String>,
}

impl EmulatorOptions {
    /// Convert to command line arguments
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.wipe_data {
            args.push("-wipe-data".to_string());
        }

        if self.no_snapshot {
            args.push("-no-snapshot".to_string());
        }

        if self.no_snapshot_load {
            args.push("-no-snapshot-load".to_string());
        }

        if self.no_snapshot_save {
            args.push("-no-snapshot-save".to_string());
        }

        args.extend(self.extra_args.iter().cloned());

        args
    }
}

/// Entries of the Android startup options menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupOption {
    Start,
    WipeData,
    NoSnapshot,
    NoSnapshotLoad,
    NoSnapshotSave,
}

impl StartupOption {
    /// Menu order
    pub const ALL: [StartupOption; 5] = [
        StartupOption::Start,
        StartupOption::WipeData,
        StartupOption::NoSnapshot,
        StartupOption::NoSnapshotLoad,
        StartupOption::NoSnapshotSave,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StartupOption::Start => "Start",
            StartupOption::WipeData => "Wipe Data",
            StartupOption::NoSnapshot => "No Snapshot",
            StartupOption::NoSnapshotLoad => "No Snapshot Load",
            StartupOption::NoSnapshotSave => "No Snapshot Save",
        }
    }

    pub fn options(&self) -> EmulatorOptions {
        let mut options = EmulatorOptions::default();
        match self {
            StartupOption::Start => {}
            StartupOption::WipeData => options.wipe_data = true,
            StartupOption::NoSnapshot => options.no_snapshot = true,
            StartupOption::NoSnapshotLoad => options.no_snapshot_load = true,
            StartupOption::NoSnapshotSave => options.no_snapshot_save = true,
        }
        options
    }

    /// Emulator flags for this entry; at most one
    pub fn flags(&self) -> Vec<String> {
        self.options().to_args()
    }
}

impl fmt::Display for StartupOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Emulator launcher
#[derive(Debug, Clone)]
pub struct EmulatorLauncher {
    emulator: PathBuf,
}

impl EmulatorLauncher {
    pub fn new(emulator: impl Into<PathBuf>) -> Self {
        Self {
            emulator: emulator.into(),
        }
    }

    pub fn from_detector(detector: &ToolchainDetector) -> Result<Self> {
        Ok(Self::new(detector.locate_emulator_binary()?))
    }

    pub fn emulator_path(&self) -> &Path {
        &self.emulator
    }

    /// Full argument list for starting `avd_name`
    pub fn launch_args(avd_name: &str, startup_flags: &[String]) -> Vec<String> {
        let mut args = vec!["-avd".to_string(), avd_name.to_string()];
        args.extend(startup_flags.iter().cloned());
        args
    }

    /// Spawn the emulator and return once the process has started.
    ///
    /// The child gets null stdio and its own process group, and its handle is
    /// dropped without waiting.
    pub async fn launch(&self, request: &LaunchRequest) -> Result<()> {
        let avd_name = request.device.id();
        let args = Self::launch_args(avd_name, &request.startup_flags);

        info!("Launching emulator {}", avd_name);
        debug!("Emulator args: {:?}", args);

        let mut cmd = std::process::Command::new(&self.emulator);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut cmd);

        Command::from(cmd).spawn().map_err(|e| EmusError::LaunchFailed {
            device: avd_name.to_string(),
            reason: format!("{}: {}", self.emulator.display(), e),
        })?;

        Ok(())
    }
}

#[cfg(unix)]
fn detach(cmd: &mut std::process::Command) {
    use std::os::unix::process::CommandExt;

    // Keep terminal signals aimed at emus away from the emulator
    cmd.process_group(0);
}

#[cfg(windows)]
fn detach(cmd: &mut std::process::Command) {
    use std::os::windows::process::CommandExt;

    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut std::process::Command) {}
