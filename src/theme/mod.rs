//! Tri-state theme toggle.
//!
//! - [`ThemeController`]: resolves the stored preference against the OS
//!   color scheme and keeps the page in sync
//! - [`traits`]: the store, signal and surface seams the controller drives
//! - [`memory`]: in-memory collaborators for non-browser hosts and tests
//! - [`Shortcut`]/[`KeyPress`]: keyboard shortcut matching
//! - [`subscription`]: which OS change-subscription API to use
//! - `web` (wasm32 only): browser adapters and the event wiring

mod controller;
pub mod memory;
mod shortcut;
pub mod subscription;
pub mod traits;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::ThemeController;
pub use shortcut::{KeyPress, Shortcut};
pub use traits::{ColorSchemeSignal, PreferenceStore, ThemeSurface};
