//! Concrete color modes.
//!
//! A `ColorMode` is what actually gets rendered: the value written to the
//! `data-theme` attribute, and also the shape of the OS-level preference.

use serde::{Deserialize, Serialize};

/// Rendered color mode.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Dark,
    /// Also the answer when the platform cannot report a preference
    #[default]
    Light,
}

impl ColorMode {
    /// Map a "prefers dark" query result to a mode.
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Attribute value consumed by the stylesheet.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Read a mode back from a `data-theme` attribute.
    ///
    /// Anything other than `"dark"` renders as light, matching the stylesheet.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_prefers_dark() {
        assert_eq!(ColorMode::from_prefers_dark(true), ColorMode::Dark);
        assert_eq!(ColorMode::from_prefers_dark(false), ColorMode::Light);
    }

    #[test]
    fn test_from_attribute_defaults_to_light() {
        assert_eq!(ColorMode::from_attribute(Some("dark")), ColorMode::Dark);
        assert_eq!(ColorMode::from_attribute(Some("light")), ColorMode::Light);
        assert_eq!(ColorMode::from_attribute(Some("DARK")), ColorMode::Light);
        assert_eq!(ColorMode::from_attribute(None), ColorMode::Light);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&ColorMode::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
        assert_eq!(ColorMode::Light.to_string(), "light");
    }
}
