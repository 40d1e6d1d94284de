//! Application state types and entry glue.
//!
//! Defines the screens, the theme and the settings the binary hands over, plus
//! the event loop entry point (re-exported as `run`).
//!
pub mod keymap;
pub mod listing;
pub mod update;
pub mod wizard;

use std::time::Duration;

use ratatui::style::Color;

use crate::api::{self, HttpUserSource};
use crate::error::Result;

pub use keymap::{KeyAction, Keymap};
pub use listing::{ListingState, Presentation};
pub use wizard::{Field, FieldErrors, FormRecord, Step, Wizard};

/// Which screen to open first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ScreenKind {
    #[default]
    Listing,
    AddUser,
}

/// The mounted screen. Each variant owns its state exclusively.
pub enum Screen {
    Listing(ListingState),
    AddUser(Wizard),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Listing(_) => ScreenKind::Listing,
            Screen::AddUser(_) => ScreenKind::AddUser,
        }
    }
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
            success: Color::Rgb(0xa6, 0xe3, 0xa1),      // green
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            let Some(color) = Self::parse_color(val) else {
                tracing::debug!(key, val, "ignoring unparsable theme color");
                continue;
            };
            match key {
                "text" => theme.text = color,
                "muted" => theme.muted = color,
                "title" => theme.title = color,
                "border" => theme.border = color,
                "header_bg" => theme.header_bg = color,
                "header_fg" => theme.header_fg = color,
                "status_bg" => theme.status_bg = color,
                "status_fg" => theme.status_fg = color,
                "highlight_fg" => theme.highlight_fg = color,
                "highlight_bg" => theme.highlight_bg = color,
                "error" => theme.error = color,
                "success" => theme.success = color,
                _ => {}
            }
        }
        theme
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# user-dashboard theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // named colors are not produced by `parse`; write them as reset
                _ => "reset".to_string(),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("error", self.error);
        kv("success", self.success);

        std::fs::write(path, buf)
    }

    /// Load `path`, or write the default theme there if it does not exist yet.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default theme");
        }
        t
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

/// Settings resolved by the binary from flags and environment.
#[derive(Clone, Debug)]
pub struct Settings {
    pub endpoint: String,
    pub timeout: Duration,
    pub start_screen: ScreenKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: api::DEFAULT_ENDPOINT.to_string(),
            timeout: api::DEFAULT_TIMEOUT,
            start_screen: ScreenKind::Listing,
        }
    }
}

pub struct AppState {
    pub screen: Screen,
    pub theme: Theme,
    pub keymap: Keymap,
    pub settings: Settings,
    pub should_quit: bool,
}

impl AppState {
    /// Build the app and activate the configured start screen.
    pub fn new(settings: Settings, theme: Theme, keymap: Keymap) -> Result<Self> {
        let screen = match settings.start_screen {
            ScreenKind::Listing => Screen::Listing(activate_listing(&settings)?),
            ScreenKind::AddUser => Screen::AddUser(Wizard::new()),
        };
        Ok(Self::with_screen(screen, settings, theme, keymap))
    }

    /// Build the app around an already constructed screen.
    pub fn with_screen(screen: Screen, settings: Settings, theme: Theme, keymap: Keymap) -> Self {
        Self {
            screen,
            theme,
            keymap,
            settings,
            should_quit: false,
        }
    }

    /// Mount the listing with fresh state and a new fetch.
    pub fn open_listing(&mut self) -> Result<()> {
        tracing::info!(endpoint = %self.settings.endpoint, "opening listing");
        self.screen = Screen::Listing(activate_listing(&self.settings)?);
        Ok(())
    }

    /// Mount an empty wizard.
    pub fn open_add_user(&mut self) {
        tracing::info!("opening add-user wizard");
        self.screen = Screen::AddUser(Wizard::new());
    }
}

fn activate_listing(settings: &Settings) -> Result<ListingState> {
    let source = HttpUserSource::new(settings.endpoint.clone(), settings.timeout)?;
    Ok(ListingState::activate(source))
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
