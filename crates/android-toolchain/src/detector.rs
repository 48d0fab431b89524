//! Emulator Binary Detection
//!
//! Finds the Android emulator binary. SDK roots come from an ordered list of
//! strategies; the first strategy that yields a root decides the outcome, and
//! that root is then probed for the two known emulator layouts.

use std::path::{Path, PathBuf};

use emus_core::error::{EmusError, Result};
use tracing::{debug, info};

use crate::env::{EnvSnapshot, HostOs, ANDROID_HOME, ANDROID_SDK_ROOT};

/// Emulator locations relative to an SDK root, in probe order
pub const EMULATOR_LAYOUTS: &[&[&str]] = &[&["emulator", "emulator"], &["tools", "emulator"]];

/// Where an SDK root candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Named environment variable
    EnvVar(&'static str),
    /// Platform default install directory
    DefaultInstall,
}

/// A possible SDK root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkCandidate {
    pub root: PathBuf,
    pub source: CandidateSource,
}

/// A resolution strategy: environment in, maybe an SDK root out.
pub type SdkStrategy = fn(&EnvSnapshot, HostOs) -> Option<SdkCandidate>;

/// Resolution strategies, highest precedence first
pub const SDK_STRATEGIES: &[SdkStrategy] = &[from_android_home, from_sdk_root, from_default_install];

fn from_android_home(env: &EnvSnapshot, _host: HostOs) -> Option<SdkCandidate> {
    env.android_home.clone().map(|root| SdkCandidate {
        root,
        source: CandidateSource::EnvVar(ANDROID_HOME),
    })
}

fn from_sdk_root(env: &EnvSnapshot, _host: HostOs) -> Option<SdkCandidate> {
    env.android_sdk_root.clone().map(|root| SdkCandidate {
        root,
        source: CandidateSource::EnvVar(ANDROID_SDK_ROOT),
    })
}

/// Where Android Studio installs the SDK by default.
fn from_default_install(env: &EnvSnapshot, host: HostOs) -> Option<SdkCandidate> {
    let root = match host {
        HostOs::Windows => env
            .user_profile
            .as_ref()?
            .join("AppData")
            .join("Local")
            .join("Android")
            .join("Sdk"),
        HostOs::MacOs => env.home.as_ref()?.join("Library").join("Android").join("sdk"),
        HostOs::OtherUnix => env.home.as_ref()?.join("Android").join("Sdk"),
    };

    Some(SdkCandidate {
        root,
        source: CandidateSource::DefaultInstall,
    })
}

/// Locates the emulator binary for a given environment
#[derive(Debug, Clone)]
pub struct ToolchainDetector {
    env: EnvSnapshot,
    host: HostOs,
}

impl ToolchainDetector {
    /// Detector over the live process environment
    pub fn new() -> Self {
        Self::with_env(EnvSnapshot::capture(), HostOs::current())
    }

    pub fn with_env(env: EnvSnapshot, host: HostOs) -> Self {
        Self { env, host }
    }

    /// First SDK root candidate in precedence order, if any strategy yields one
    pub fn sdk_candidate(&self) -> Option<SdkCandidate> {
        SDK_STRATEGIES
            .iter()
            .find_map(|strategy| strategy(&self.env, self.host))
    }

    /// Resolve the emulator binary.
    ///
    /// Only the highest-precedence candidate is probed: a set but broken
    /// `ANDROID_HOME` fails instead of falling through to `ANDROID_SDK_ROOT`.
    pub fn locate_emulator_binary(&self) -> Result<PathBuf> {
        let Some(candidate) = self.sdk_candidate() else {
            return Err(generic_not_found());
        };

        debug!("Probing SDK root {:?} ({:?})", candidate.root, candidate.source);

        match find_emulator_in_sdk(&candidate.root, self.host) {
            Some(path) => {
                info!("Found Android emulator at {:?}", path);
                Ok(path)
            }
            None => Err(match candidate.source {
                CandidateSource::EnvVar(var) => EmusError::SdkNotFound(format!(
                    "Couldn't find the Android Emulator in: '{}'. \
                     Make sure your ${} environment variable is pointed to the correct SDK installation directory.",
                    candidate.root.display(),
                    var
                )),
                CandidateSource::DefaultInstall => generic_not_found(),
            }),
        }
    }
}

impl Default for ToolchainDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Probe an SDK root for the emulator binary, first existing layout wins.
pub fn find_emulator_in_sdk(sdk_root: &Path, host: HostOs) -> Option<PathBuf> {
    EMULATOR_LAYOUTS.iter().find_map(|layout| {
        let (file, dirs) = layout.split_last()?;
        let path = dirs
            .iter()
            .fold(sdk_root.to_path_buf(), |path, dir| path.join(dir))
            .join(format!("{}{}", file, host.exe_suffix()));

        debug!("Checking {:?}", path);
        path.is_file().then_some(path)
    })
}

fn generic_not_found() -> EmusError {
    EmusError::SdkNotFound(format!(
        "Unable to locate the Android SDK, please set the ${} or ${} environment variable.",
        ANDROID_HOME, ANDROID_SDK_ROOT
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sdk_with(layout: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let (file, dirs) = layout.split_last().unwrap();
        let parent = dirs.iter().fold(dir.path().to_path_buf(), |p, d| p.join(d));
        fs::create_dir_all(&parent).unwrap();
        fs::write(parent.join(file), b"").unwrap();
        dir
    }

    fn unix(env: EnvSnapshot) -> ToolchainDetector {
        ToolchainDetector::with_env(env, HostOs::OtherUnix)
    }

    #[test]
    fn test_android_home_wins_over_sdk_root() {
        let home_sdk = sdk_with(&["emulator", "emulator"]);
        let other_sdk = sdk_with(&["emulator", "emulator"]);

        let detector = unix(EnvSnapshot {
            android_home: Some(home_sdk.path().to_path_buf()),
            android_sdk_root: Some(other_sdk.path().to_path_buf()),
            ..Default::default()
        });

        assert_eq!(
            detector.locate_emulator_binary().unwrap(),
            home_sdk.path().join("emulator").join("emulator")
        );
    }

    #[test]
    fn test_tools_layout_fallback() {
        let sdk = sdk_with(&["tools", "emulator"]);
        let detector = unix(EnvSnapshot {
            android_sdk_root: Some(sdk.path().to_path_buf()),
            ..Default::default()
        });

        assert_eq!(
            detector.locate_emulator_binary().unwrap(),
            sdk.path().join("tools").join("emulator")
        );
    }

    #[test]
    fn test_broken_android_home_names_variable() {
        let empty = tempfile::tempdir().unwrap();
        let valid = sdk_with(&["emulator", "emulator"]);

        let detector = unix(EnvSnapshot {
            android_home: Some(empty.path().to_path_buf()),
            android_sdk_root: Some(valid.path().to_path_buf()),
            ..Default::default()
        });

        match detector.locate_emulator_binary() {
            Err(EmusError::SdkNotFound(msg)) => {
                assert!(msg.contains("$ANDROID_HOME"), "{}", msg);
                assert!(!msg.contains("$ANDROID_SDK_ROOT"), "{}", msg);
            }
            other => panic!("expected SdkNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_broken_sdk_root_names_variable() {
        let empty = tempfile::tempdir().unwrap();
        let detector = unix(EnvSnapshot {
            android_sdk_root: Some(empty.path().to_path_buf()),
            ..Default::default()
        });

        match detector.locate_emulator_binary() {
            Err(EmusError::SdkNotFound(msg)) => assert!(msg.contains("$ANDROID_SDK_ROOT")),
            other => panic!("expected SdkNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_nothing_set_and_no_default() {
        let home = tempfile::tempdir().unwrap();
        let detector = unix(EnvSnapshot {
            home: Some(home.path().to_path_buf()),
            ..Default::default()
        });

        match detector.locate_emulator_binary() {
            Err(EmusError::SdkNotFound(msg)) => {
                assert!(msg.contains("$ANDROID_HOME or $ANDROID_SDK_ROOT"))
            }
            other => panic!("expected SdkNotFound, got {:?}", other),
        }

        assert!(matches!(
            unix(EnvSnapshot::default()).locate_emulator_binary(),
            Err(EmusError::SdkNotFound(_))
        ));
    }

    #[test]
    fn test_default_install_guess() {
        let home = tempfile::tempdir().unwrap();
        let emulator_dir = home.path().join("Android").join("Sdk").join("emulator");
        fs::create_dir_all(&emulator_dir).unwrap();
        fs::write(emulator_dir.join("emulator"), b"").unwrap();

        let detector = unix(EnvSnapshot {
            home: Some(home.path().to_path_buf()),
            ..Default::default()
        });

        assert_eq!(
            detector.locate_emulator_binary().unwrap(),
            emulator_dir.join("emulator")
        );
    }

    #[test]
    fn test_default_roots_per_host() {
        let env = EnvSnapshot {
            home: Some(PathBuf::from("/Users/dev")),
            user_profile: Some(PathBuf::from("C:/Users/dev")),
            ..Default::default()
        };

        let mac = from_default_install(&env, HostOs::MacOs).unwrap();
        assert_eq!(mac.root, PathBuf::from("/Users/dev/Library/Android/sdk"));

        let win = from_default_install(&env, HostOs::Windows).unwrap();
        assert_eq!(
            win.root,
            PathBuf::from("C:/Users/dev").join("AppData").join("Local").join("Android").join("Sdk")
        );

        assert!(from_default_install(&EnvSnapshot::default(), HostOs::Windows).is_none());
    }

    #[test]
    fn test_windows_probes_exe() {
        let sdk = sdk_with(&["emulator", "emulator.exe"]);
        assert_eq!(
            find_emulator_in_sdk(sdk.path(), HostOs::Windows),
            Some(sdk.path().join("emulator").join("emulator.exe"))
        );
        assert_eq!(find_emulator_in_sdk(sdk.path(), HostOs::OtherUnix), None);
    }
}
