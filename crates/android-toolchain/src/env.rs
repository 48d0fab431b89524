//! Environment Snapshot
//!
//! Captures the environment variables SDK discovery depends on, once, so the
//! resolution strategies can be pure functions over a plain value.

use std::ffi::OsString;
use std::path::PathBuf;

/// Primary SDK root variable; checked first
pub const ANDROID_HOME: &str = "ANDROID_HOME";
/// Legacy SDK root variable
pub const ANDROID_SDK_ROOT: &str = "ANDROID_SDK_ROOT";

/// Operating system family of the host running emus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    /// Linux and the BSDs
    OtherUnix,
}

impl HostOs {
    pub fn current() -> Self {
        if cfg!(windows) {
            HostOs::Windows
        } else if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else {
            HostOs::OtherUnix
        }
    }

    /// Suffix of executables on this host
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            HostOs::Windows => ".exe",
            _ => "",
        }
    }
}

/// Environment variables relevant to SDK discovery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    /// ANDROID_HOME
    pub android_home: Option<PathBuf>,
    /// ANDROID_SDK_ROOT
    pub android_sdk_root: Option<PathBuf>,
    /// HOME
    pub home: Option<PathBuf>,
    /// USERPROFILE
    pub user_profile: Option<PathBuf>,
}

impl EnvSnapshot {
    /// Read the current process environment
    pub fn capture() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build a snapshot from any variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let get = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        Self {
            android_home: get(ANDROID_HOME),
            android_sdk_root: get(ANDROID_SDK_ROOT),
            home: get("HOME"),
            user_profile: get("USERPROFILE"),
        }
    }
}
