//! Collaborator seams for [`ThemeController`](super::ThemeController).
//!
//! All methods take `&self`: the page is single-threaded and implementations
//! use interior mutability (or wrap browser handles that already do).

use folio_theme::{ColorMode, ThemePreference};

use crate::error::StoreError;

/// Persistent key-value store holding the stored preference.
pub trait PreferenceStore {
    /// Raw stored value, `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// OS-level color scheme query.
pub trait ColorSchemeSignal {
    /// Whether the platform currently reports a dark preference.
    ///
    /// Platforms that cannot answer report `false`.
    fn prefers_dark(&self) -> bool;
}

/// Presentation layer the resolved mode is rendered onto.
pub trait ThemeSurface {
    /// Render `mode`. `preference` is passed along so toggle controls can
    /// describe the next step of the cycle.
    fn apply(&self, preference: ThemePreference, mode: ColorMode);
}
