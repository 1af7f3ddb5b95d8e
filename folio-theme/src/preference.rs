//! The persisted tri-state theme preference.

use crate::mode::ColorMode;
use serde::{Deserialize, Serialize};

/// The user's stored theme choice.
///
/// `System` defers to the OS-level color scheme; the other two pin the
/// rendered mode regardless of what the platform reports.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    System,
    Dark,
    Light,
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 3] = [Self::System, Self::Dark, Self::Light];

    /// Canonical stored string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Next state of the toggle cycle: system -> dark -> light -> system.
    ///
    /// Driven by the stored value only. A `System` preference always moves to
    /// `Dark`, even when the OS currently resolves it to dark.
    pub fn next(self) -> Self {
        match self {
            Self::System => Self::Dark,
            Self::Dark => Self::Light,
            Self::Light => Self::System,
        }
    }

    /// Resolve to the mode that should be rendered.
    pub fn resolve(self, os: ColorMode) -> ColorMode {
        match self {
            Self::System => os,
            Self::Dark => ColorMode::Dark,
            Self::Light => ColorMode::Light,
        }
    }

    /// Parse a raw stored value, reporting whether it had to be normalized.
    ///
    /// Returns `(preference, false)` for the three canonical strings and
    /// `(System, true)` for anything else, including a missing value.
    pub fn normalize(raw: Option<&str>) -> (Self, bool) {
        match raw.map(str::parse::<Self>) {
            Some(Ok(pref)) => (pref, false),
            _ => (Self::System, true),
        }
    }

    /// Glyph shown on the toggle control while this preference is active.
    ///
    /// Describes where the next click leads, not the current state.
    pub fn toggle_glyph(self) -> &'static str {
        match self.next() {
            Self::System => "\u{1F5A5}\u{FE0F}",
            Self::Dark => "\u{1F319}",
            Self::Light => "\u{2600}\u{FE0F}",
        }
    }

    /// Label shown next to [`toggle_glyph`](Self::toggle_glyph).
    pub fn toggle_label(self) -> &'static str {
        match self.next() {
            Self::System => "System",
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for stored values outside `{"system", "dark", "light"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePreferenceError {
    pub value: String,
}

impl std::fmt::Display for ParsePreferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid theme preference '{}'", self.value)
    }
}

impl std::error::Error for ParsePreferenceError {}

impl std::str::FromStr for ThemePreference {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Self::System),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(ParsePreferenceError {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_visits_every_state() {
        let mut pref = ThemePreference::System;
        let mut seen = Vec::new();
        for _ in 0..3 {
            pref = pref.next();
            seen.push(pref);
        }
        assert_eq!(
            seen,
            vec![
                ThemePreference::Dark,
                ThemePreference::Light,
                ThemePreference::System
            ]
        );
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            ThemePreference::System.resolve(ColorMode::Dark),
            ColorMode::Dark
        );
        assert_eq!(
            ThemePreference::System.resolve(ColorMode::Light),
            ColorMode::Light
        );
        assert_eq!(
            ThemePreference::Light.resolve(ColorMode::Dark),
            ColorMode::Light
        );
        assert_eq!(
            ThemePreference::Dark.resolve(ColorMode::Light),
            ColorMode::Dark
        );
    }

    #[test]
    fn test_normalize_accepts_canonical_values() {
        for pref in ThemePreference::ALL {
            assert_eq!(ThemePreference::normalize(Some(pref.as_str())), (pref, false));
        }
    }

    #[test]
    fn test_normalize_rejects_everything_else() {
        for raw in [None, Some(""), Some("Dark"), Some(" light"), Some("auto"), Some("{}")] {
            assert_eq!(
                ThemePreference::normalize(raw),
                (ThemePreference::System, true),
                "raw value {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_error_message() {
        let err = "sepia".parse::<ThemePreference>().unwrap_err();
        assert!(err.to_string().contains("sepia"));
    }

    #[test]
    fn test_toggle_label_points_at_next_state() {
        assert_eq!(ThemePreference::System.toggle_label(), "Dark");
        assert_eq!(ThemePreference::Dark.toggle_label(), "Light");
        assert_eq!(ThemePreference::Light.toggle_label(), "System");
    }

    #[test]
    fn test_serde_roundtrip_uses_stored_strings() {
        let json = serde_json::to_string(&ThemePreference::System).unwrap();
        assert_eq!(json, "\"system\"");
        let pref: ThemePreference = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(pref, ThemePreference::Light);
    }
}
