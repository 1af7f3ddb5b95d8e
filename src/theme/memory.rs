//! In-memory collaborators.
//!
//! Used when the scripts run outside a browser and throughout the tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use folio_theme::{ColorMode, ThemePreference};

use super::traits::{ColorSchemeSignal, PreferenceStore, ThemeSurface};
use crate::error::StoreError;

/// HashMap-backed store that counts writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    failing: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value (which need not be valid).
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Make every subsequent operation fail with [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Number of successful `set` calls.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Peek at a value without going through the trait.
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.failing.get() {
            return Err(StoreError::Unavailable);
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing.get() {
            return Err(StoreError::Unavailable);
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Color scheme signal flipped by hand.
///
/// Flipping it does not notify anyone, which is exactly the situation the
/// drift poll exists for.
#[derive(Debug, Default)]
pub struct ManualSignal {
    dark: Cell<bool>,
}

impl ManualSignal {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            dark: Cell::new(mode.is_dark()),
        }
    }

    pub fn set(&self, mode: ColorMode) {
        self.dark.set(mode.is_dark());
    }
}

impl ColorSchemeSignal for ManualSignal {
    fn prefers_dark(&self) -> bool {
        self.dark.get()
    }
}

/// Surface that records every application.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    applied: RefCell<Vec<(ThemePreference, ColorMode)>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current `data-theme` value, if anything was applied yet.
    pub fn attribute(&self) -> Option<&'static str> {
        self.applied.borrow().last().map(|(_, mode)| mode.as_str())
    }

    pub fn last(&self) -> Option<(ThemePreference, ColorMode)> {
        self.applied.borrow().last().copied()
    }

    pub fn apply_count(&self) -> usize {
        self.applied.borrow().len()
    }
}

impl ThemeSurface for RecordingSurface {
    fn apply(&self, preference: ThemePreference, mode: ColorMode) {
        self.applied.borrow_mut().push((preference, mode));
    }
}
