//! ThemeController - resolves and applies the display mode
//!
//! Owns access to the stored preference, computes the effective mode and
//! renders it, reconciling against several independent change sources:
//! - OS color scheme change events
//! - the document becoming visible again
//! - a periodic drift poll (some mobile browsers drop change events)
//! - explicit toggles from controls or the keyboard shortcut
//!
//! Every trigger funnels into [`ThemeController::reconcile`] or
//! [`ThemeController::toggle`]. Reconciling is idempotent, so duplicate
//! triggers for one underlying change only cost a redundant attribute write.

use std::cell::Cell;

use folio_theme::{ColorMode, ThemePreference};
use tracing::{debug, info, warn};

use super::shortcut::{KeyPress, Shortcut};
use super::traits::{ColorSchemeSignal, PreferenceStore, ThemeSurface};
use crate::config::ThemeConfig;
use crate::error::StoreError;

pub struct ThemeController<S, O, P> {
    store: S,
    signal: O,
    surface: P,
    storage_key: String,
    shortcut: Shortcut,
    /// Preference used while the store is failing; mirrors the store otherwise
    fallback: Cell<ThemePreference>,
    /// Set on the first store failure; the rest of the session stays in memory
    degraded: Cell<bool>,
    /// Last OS color scheme seen, for drift detection only
    last_os: Cell<ColorMode>,
}

impl<S, O, P> ThemeController<S, O, P>
where
    S: PreferenceStore,
    O: ColorSchemeSignal,
    P: ThemeSurface,
{
    pub fn new(store: S, signal: O, surface: P, config: &ThemeConfig) -> Self {
        let last_os = ColorMode::from_prefers_dark(signal.prefers_dark());
        Self {
            store,
            signal,
            surface,
            storage_key: config.storage_key.clone(),
            shortcut: Shortcut::new(config.shortcut),
            fallback: Cell::new(ThemePreference::System),
            degraded: Cell::new(false),
            last_os: Cell::new(last_os),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn signal(&self) -> &O {
        &self.signal
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    /// Read (and if necessary normalize) the stored preference, then render.
    ///
    /// Never fails: an unusable store leaves the session on the in-memory
    /// `system` default.
    pub fn initialize(&self) -> ColorMode {
        let preference = self.preference();
        self.last_os.set(self.os_mode());
        let mode = self.apply_theme(preference);
        info!(
            "Theme initialized: preference={}, mode={}",
            preference, mode
        );
        mode
    }

    /// Current stored preference.
    ///
    /// Values outside `system`/`dark`/`light` (including a missing key) are
    /// rewritten to `system` as they are read.
    pub fn preference(&self) -> ThemePreference {
        if self.degraded.get() {
            return self.fallback.get();
        }

        match self.store.get(&self.storage_key) {
            Ok(raw) => {
                let (preference, normalized) = ThemePreference::normalize(raw.as_deref());
                if normalized {
                    debug!(
                        "Normalizing stored theme preference {:?} to {}",
                        raw, preference
                    );
                    self.write_preference(preference);
                } else {
                    self.fallback.set(preference);
                }
                preference
            }
            Err(e) => {
                self.degrade(&e);
                self.fallback.get()
            }
        }
    }

    /// Render `preference` against the current OS color scheme.
    ///
    /// Does not touch the store.
    pub fn apply_theme(&self, preference: ThemePreference) -> ColorMode {
        let mode = preference.resolve(self.os_mode());
        self.surface.apply(preference, mode);
        mode
    }

    /// Advance system -> dark -> light -> system, persist and render.
    ///
    /// The step is taken from the stored preference (re-read here), never
    /// from what is currently rendered.
    pub fn toggle(&self) -> ThemePreference {
        let current = self.preference();
        let next = current.next();
        self.write_preference(next);
        let mode = self.apply_theme(next);
        info!("Theme preference {} -> {} (mode={})", current, next, mode);
        next
    }

    /// Re-render from the OS color scheme if the preference is `system`.
    ///
    /// Returns the applied mode, or `None` when a pinned preference made
    /// this a no-op.
    #[doc(alias = "check_and_apply_system_theme")]
    pub fn reconcile(&self) -> Option<ColorMode> {
        let os = self.os_mode();
        self.last_os.set(os);

        let preference = self.preference();
        if preference != ThemePreference::System {
            return None;
        }

        let mode = preference.resolve(os);
        self.surface.apply(preference, mode);
        debug!("Reconciled system theme: mode={}", mode);
        Some(mode)
    }

    /// Compare the OS color scheme with the last observed value and
    /// reconcile on drift. Returns whether drift was detected.
    pub fn poll_drift(&self) -> bool {
        let os = self.os_mode();
        let last = self.last_os.get();
        if os == last {
            return false;
        }

        debug!("OS color scheme drifted {} -> {}", last, os);
        self.reconcile();
        true
    }

    /// Toggle if `press` is the theme shortcut. Returns whether it was.
    pub fn handle_key(&self, press: &KeyPress) -> bool {
        if !self.shortcut.matches(press) {
            return false;
        }
        self.toggle();
        true
    }

    fn os_mode(&self) -> ColorMode {
        ColorMode::from_prefers_dark(self.signal.prefers_dark())
    }

    fn write_preference(&self, preference: ThemePreference) {
        self.fallback.set(preference);
        if self.degraded.get() {
            return;
        }
        if let Err(e) = self.store.set(&self.storage_key, preference.as_str()) {
            self.degrade(&e);
        }
    }

    fn degrade(&self, err: &StoreError) {
        if !self.degraded.replace(true) {
            warn!(
                "Theme preference store failed ({}); keeping the preference in memory for this session",
                err
            );
        }
    }
}
