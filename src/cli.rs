//! Command-line surface

use clap::Parser;
use emus_core::Platform;

const EXAMPLES: &str = "\
Examples:
  $ emus
  $ emus -a
  $ emus -i
  $ emus -a -s";

/// Pick an Android emulator or the iOS Simulator and start it
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "emus", version, about, after_help = EXAMPLES)]
pub struct Cli {
    /// Only list Android emulators
    #[arg(short, long)]
    pub android: bool,

    /// Only list the iOS Simulator
    #[arg(short, long)]
    pub ios: bool,

    /// Ask for Android startup options (wipe data, snapshot control)
    #[arg(short = 's', long)]
    pub show_startup_options: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Start the top-ranked device without prompting
    #[arg(long)]
    pub no_interactive: bool,
}

impl Cli {
    pub fn scope(&self) -> Scope {
        match (self.android, self.ios) {
            (true, false) => Scope::Android,
            (false, true) => Scope::Ios,
            _ => Scope::All,
        }
    }

    pub fn launch_flags(&self) -> LaunchFlags {
        LaunchFlags {
            scope: self.scope(),
            show_startup_options: self.show_startup_options,
        }
    }
}

/// Platforms an invocation considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    Android,
    Ios,
    #[default]
    All,
}

impl Scope {
    pub fn includes(&self, platform: Platform) -> bool {
        match self {
            Scope::Android => platform == Platform::Android,
            Scope::Ios => platform == Platform::Ios,
            Scope::All => true,
        }
    }
}

/// What the launch flow needs from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaunchFlags {
    pub scope: Scope,
    pub show_startup_options: bool,
}
