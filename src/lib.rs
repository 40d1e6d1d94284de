//! Library crate for user-dashboard.
//!
//! This crate exposes the building blocks of the TUI:
//! - Remote user source and background fetch (`api`)
//! - Screen state, keymap, theme and update loop (`app`)
//! - Command-line flags (`cli`)
//! - Error and result types (`error`)
//! - Name/city search over fetched users (`search`)
//! - UI rendering (`ui`)
//!
//! It is used by the `user-dashboard` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod cli;
pub mod error;
pub mod search;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
