//! Theme types shared by the folio site scripts.
//!
//! This crate defines the small domain model behind the theme toggle:
//! - [`preference`] - the persisted tri-state choice (system/dark/light)
//! - [`mode`] - the concrete rendered mode (dark/light) and its resolution
//!
//! It has no browser dependencies so the state machine can be tested natively.

pub mod mode;
pub mod preference;

// Re-export commonly used types at crate root
pub use mode::ColorMode;
pub use preference::{ParsePreferenceError, ThemePreference};
