//! Device selection and launch
//!
//! The flow runs once per invocation:
//! collect devices from both platforms, narrow them to the requested scope,
//! rank, prompt, optionally ask for Android startup options, record usage and
//! launch.

use emus_core::config::timestamp_now;
use emus_core::{rank, Device, EmusError, HistoryStore, LaunchRequest, Platform, Result, UsageHistory};
use emus_emulator_bridge::StartupOption;
use tracing::{debug, info, warn};

use crate::backend::DeviceBackend;
use crate::cli::{LaunchFlags, Scope};
use crate::prompt::{MenuEntry, Prompt};

/// Top-level menu question
pub const DEVICE_PROMPT: &str = "Select the device you want to start:";

/// Startup options menu question
pub const STARTUP_PROMPT: &str = "Select how to start the emulator:";

/// Label of the entry that leaves without launching
pub const EXIT_LABEL: &str = "Exit";

/// Value behind a menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick<T> {
    Item(T),
    Exit,
}

/// How an invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The launch command was accepted
    Launched(LaunchRequest),
    /// The user chose Exit or cancelled
    Exited,
}

/// Per-platform enumeration results, each kept whether it failed or not
#[derive(Debug)]
pub struct CollectedDevices {
    pub android: Result<Vec<Device>>,
    pub ios: Result<Vec<Device>>,
}

impl CollectedDevices {
    /// Query both platforms concurrently and wait for both to settle.
    pub async fn collect<B: DeviceBackend + ?Sized>(backend: &B) -> Self {
        let (android, ios) = futures::join!(backend.android_devices(), backend.ios_devices());

        if let Err(ref e) = android {
            debug!("Android enumeration failed: {}", e);
        }
        if let Err(ref e) = ios {
            debug!("iOS enumeration failed: {}", e);
        }

        Self { android, ios }
    }

    /// Devices inside `scope`, or the message explaining why there are none.
    ///
    /// An empty scope is the only condition that ends the flow early.
    pub fn in_scope(self, scope: Scope) -> Result<Vec<Device>> {
        let android = usable(self.android, Platform::Android);
        let ios = usable(self.ios, Platform::Ios);

        match scope {
            Scope::Android => android.map_err(EmusError::NoDevicesFound),
            Scope::Ios => ios.map_err(EmusError::NoDevicesFound),
            Scope::All => match (ios, android) {
                (Err(ios_msg), Err(android_msg)) => Err(EmusError::NoDevicesFound(format!(
                    "{}\n{}",
                    android_msg, ios_msg
                ))),
                (ios, android) => Ok(ios
                    .unwrap_or_default()
                    .into_iter()
                    .chain(android.unwrap_or_default())
                    .collect()),
            },
        }
    }
}

fn usable(result: Result<Vec<Device>>, platform: Platform) -> std::result::Result<Vec<Device>, String> {
    match result {
        Ok(devices) if !devices.is_empty() => Ok(devices),
        Ok(_) => Err(none_found(platform).to_string()),
        Err(e) => Err(e.user_message()),
    }
}

fn none_found(platform: Platform) -> &'static str {
    match platform {
        Platform::Android => "Couldn't find any Android Emulators",
        Platform::Ios => "Couldn't find any iOS Simulators",
    }
}

/// Ranked device menu followed by a separator and Exit
pub fn device_menu(devices: Vec<Device>) -> Vec<MenuEntry<Pick<Device>>> {
    devices
        .into_iter()
        .map(|device| MenuEntry::choice(device.display_name().to_string(), Pick::Item(device)))
        .chain(exit_entries())
        .collect()
}

/// The fixed Android startup options menu
pub fn startup_menu() -> Vec<MenuEntry<Pick<StartupOption>>> {
    StartupOption::ALL
        .into_iter()
        .map(|option| MenuEntry::choice(option.label(), Pick::Item(option)))
        .chain(exit_entries())
        .collect()
}

fn exit_entries<T>() -> [MenuEntry<Pick<T>>; 2] {
    [MenuEntry::Separator, MenuEntry::choice(EXIT_LABEL, Pick::Exit)]
}

/// Pick a device and start it
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchCommand {
    pub flags: LaunchFlags,
}

impl LaunchCommand {
    pub fn new(flags: LaunchFlags) -> Self {
        Self { flags }
    }

    /// Execute the launch flow
    pub async fn execute<B, H, P>(&self, backend: &B, history: &H, prompt: &P) -> Result<Outcome>
    where
        B: DeviceBackend + ?Sized,
        H: HistoryStore + ?Sized,
        P: Prompt,
    {
        let devices = CollectedDevices::collect(backend)
            .await
            .in_scope(self.flags.scope)?;
        info!("{} device(s) in scope {:?}", devices.len(), self.flags.scope);

        let snapshot = match history.load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Usage history unavailable, ranking without it: {}", e);
                UsageHistory::default()
            }
        };
        let menu = device_menu(rank(devices, &snapshot));

        let device = match prompt.select(DEVICE_PROMPT, &menu)? {
            Some(Pick::Item(device)) => device,
            Some(Pick::Exit) | None => {
                info!("Exit selected");
                return Ok(Outcome::Exited);
            }
        };
        debug!("Selected {} ({})", device.id(), device.platform());

        let startup_flags = if device.is_android() && self.flags.show_startup_options {
            match prompt.select(STARTUP_PROMPT, &startup_menu())? {
                Some(Pick::Item(option)) => option.flags(),
                Some(Pick::Exit) | None => {
                    info!("Exit selected from startup options");
                    return Ok(Outcome::Exited);
                }
            }
        } else {
            Vec::new()
        };

        let request = LaunchRequest::with_flags(device, startup_flags);

        // History is an ordering hint; failing to save it must not block the launch
        if let Err(e) = history
            .record_opened(request.device.id(), &timestamp_now())
            .await
        {
            warn!("Could not record usage of {}: {}", request.device.id(), e);
        }

        backend
            .launch(&request)
            .await
            .map_err(|e| as_launch_error(e, &request.device))?;

        info!("Launched {}", request.device.id());
        Ok(Outcome::Launched(request))
    }
}

fn as_launch_error(error: EmusError, device: &Device) -> EmusError {
    if error.is_fatal() {
        error
    } else {
        EmusError::LaunchFailed {
            device: device.id().to_string(),
            reason: error.user_message(),
        }
    }
}
