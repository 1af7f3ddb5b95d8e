//! Configuration management
//!
//! Every field has a default so the scripts work on a page that embeds no
//! configuration at all. A page can override any subset by embedding JSON:
//!
//! ```html
//! <script type="application/json" id="folio-fx-config">
//!   { "theme": { "poll_interval_ms": 5000 }, "log_filter": "folio_fx=debug" }
//! </script>
//! ```

use serde::Deserialize;

use crate::error::Result;

/// Id of the `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "folio-fx-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub glass: GlassConfig,

    #[serde(default)]
    pub scrollspy: ScrollspyConfig,

    #[serde(default)]
    pub neural: NeuralConfig,

    /// `EnvFilter` directive string
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "folio_fx=info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            glass: GlassConfig::default(),
            scrollspy: ScrollspyConfig::default(),
            neural: NeuralConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Parse an embedded JSON override document.
    ///
    /// Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}

/// Element that receives the `data-theme` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeTarget {
    #[default]
    Body,
    /// The `<html>` element
    Root,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// localStorage key holding the stored preference
    pub storage_key: String,
    /// Drift poll period; a workaround for platforms that drop change events
    pub poll_interval_ms: u32,
    /// Single-character shortcut, matched case-insensitively
    pub shortcut: char,
    pub toggle_ids: Vec<String>,
    pub emoji_id: String,
    pub label_id: String,
    pub target: ThemeTarget,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            poll_interval_ms: 2000,
            shortcut: 't',
            toggle_ids: vec!["theme-toggle".to_string(), "theme-toggle-mobile".to_string()],
            emoji_id: "theme-emoji".to_string(),
            label_id: "theme-label".to_string(),
            target: ThemeTarget::Body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlassConfig {
    pub selector: String,
}

impl Default for GlassConfig {
    fn default() -> Self {
        Self {
            selector: ".glass, .pfp".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollspyConfig {
    pub section_selector: String,
    pub link_selector: String,
    pub pills_host_id: String,
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for ScrollspyConfig {
    fn default() -> Self {
        Self {
            section_selector: ".section".to_string(),
            link_selector: ".navlink".to_string(),
            pills_host_id: "dynamic-pills".to_string(),
            threshold: 0.25,
            root_margin: "0px 0px -60% 0px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NeuralConfig {
    pub canvas_id: String,
    /// Node count on viewports wider than `narrow_breakpoint`
    pub node_count: usize,
    pub narrow_node_count: usize,
    pub narrow_breakpoint: f64,
    /// Pairs closer than this (px) are connected
    pub link_distance: f64,
    /// Per-axis velocity range is `(-max_speed / 2, max_speed / 2)`
    pub max_speed: f64,
    pub pulse_speed: f64,
    pub node_radius: f64,
    pub connection_width: f64,
    pub opacity: f64,
}

impl Default for NeuralConfig {
    fn default() -> Self {
        Self {
            canvas_id: "neural-canvas".to_string(),
            node_count: 500,
            narrow_node_count: 55,
            narrow_breakpoint: 768.0,
            link_distance: 150.0,
            max_speed: 0.5,
            pulse_speed: 0.01,
            node_radius: 3.0,
            connection_width: 1.2,
            opacity: 0.4,
        }
    }
}

impl NeuralConfig {
    /// Node count for a viewport of the given width.
    pub fn node_count_for(&self, viewport_width: f64) -> usize {
        if viewport_width > self.narrow_breakpoint {
            self.node_count
        } else {
            self.narrow_node_count
        }
    }
}

/// Load overrides from the page, falling back to defaults.
///
/// A missing element is normal; malformed JSON is logged and ignored so a
/// typo in the page never disables the scripts.
#[cfg(target_arch = "wasm32")]
pub fn load_config(document: &web_sys::Document) -> Config {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return Config::default();
    };

    Config::from_json(&raw).unwrap_or_else(|e| {
        tracing::warn!("Ignoring embedded configuration: {}", e);
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme.storage_key, "theme");
        assert_eq!(config.theme.poll_interval_ms, 2000);
        assert_eq!(config.theme.shortcut, 't');
        assert_eq!(config.theme.target, ThemeTarget::Body);
        assert_eq!(config.glass.selector, ".glass, .pfp");
        assert_eq!(config.scrollspy.threshold, 0.25);
        assert_eq!(config.neural.link_distance, 150.0);
        assert_eq!(config.log_filter, "folio_fx=info");
    }

    #[test]
    fn test_blank_json_is_default() {
        assert_eq!(Config::from_json("  \n").unwrap(), Config::default());
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = Config::from_json(
            r#"{"theme": {"poll_interval_ms": 5000, "target": "root"}, "neural": {"node_count": 120}}"#,
        )
        .unwrap();

        assert_eq!(config.theme.poll_interval_ms, 5000);
        assert_eq!(config.theme.target, ThemeTarget::Root);
        assert_eq!(config.theme.storage_key, "theme");
        assert_eq!(config.neural.node_count, 120);
        assert_eq!(config.neural.narrow_node_count, 55);
        assert_eq!(config.scrollspy, ScrollspyConfig::default());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Config::from_json("{\"theme\": ").is_err());
        assert!(Config::from_json(r#"{"theme": {"target": "sidebar"}}"#).is_err());
    }

    #[test]
    fn test_node_count_for_viewport() {
        let neural = NeuralConfig::default();
        assert_eq!(neural.node_count_for(1280.0), 500);
        assert_eq!(neural.node_count_for(768.0), 55);
        assert_eq!(neural.node_count_for(390.0), 55);
    }
}
