//! Command-line flags and their environment fallbacks.
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::api;
use crate::app::{ScreenKind, Settings};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StartScreen {
    Listing,
    Add,
}

impl From<StartScreen> for ScreenKind {
    fn from(s: StartScreen) -> Self {
        match s {
            StartScreen::Listing => ScreenKind::Listing,
            StartScreen::Add => ScreenKind::AddUser,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "user-dashboard", version, about = "Browse users and try the add-user form")]
pub struct Cli {
    /// Endpoint returning the JSON user collection.
    #[arg(long, env = "USER_DASHBOARD_ENDPOINT", default_value = api::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[arg(long, env = "USER_DASHBOARD_TIMEOUT_SECS", default_value_t = api::DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Screen shown at startup.
    #[arg(long, value_enum, default_value_t = StartScreen::Listing)]
    pub screen: StartScreen,

    /// Theme file; created with defaults when missing.
    #[arg(long, default_value = "theme.conf")]
    pub theme: String,

    /// Keybindings file; created with defaults when missing.
    #[arg(long, default_value = "keybinds.conf")]
    pub keybinds: String,

    /// Log file. The terminal belongs to the UI, so logs go here.
    #[arg(long, env = "USER_DASHBOARD_LOG", default_value = "user-dashboard.log")]
    pub log_file: String,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            start_screen: self.screen.into(),
        }
    }
}
