//! Folio FX - presentation scripts for a personal site, in Rust/WebAssembly
//!
//! This library provides:
//! - A tri-state (system/dark/light) theme toggle persisted in localStorage
//!   and kept in sync with the OS color scheme
//! - Cursor-tracked glass hover highlights
//! - A scrollspy for the section navigation and tag rail
//! - An animated node-and-link canvas background
//!
//! State machines, geometry and the simulation are target-independent and
//! tested natively; DOM wiring only compiles for `wasm32`.

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

pub mod config;
pub mod effects;
pub mod error;
pub mod logging;
pub mod theme;

// Browser-only modules
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod site;

pub use config::Config;
pub use error::{FxError, Result, StoreError};
pub use folio_theme::{ColorMode, ThemePreference};
pub use theme::ThemeController;

#[cfg(target_arch = "wasm32")]
pub use site::{shutdown, start};
