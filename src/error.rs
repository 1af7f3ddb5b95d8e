//! Error types shared by the theme controller and the page effects.
//!
//! Nothing here is fatal to the page: callers log these and fall back to
//! defaults rather than propagating them to JavaScript.

use thiserror::Error;

/// Failures of the persistent preference store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No store exists (storage disabled, private mode, non-browser host)
    #[error("preference store unavailable")]
    Unavailable,
    /// The store exists but rejected the operation (quota, security error)
    #[error("preference store access failed: {0}")]
    Access(String),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum FxError {
    /// A required DOM object was missing
    #[error("missing DOM object: {0}")]
    Dom(&'static str),

    /// A browser API threw
    #[error("javascript error: {0}")]
    Js(String),

    /// Embedded configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FxError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FxError::Js(describe_js(&value))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for StoreError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        StoreError::Access(describe_js(&value))
    }
}

/// Best-effort string rendering of a thrown JS value.
#[cfg(target_arch = "wasm32")]
pub(crate) fn describe_js(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::Unavailable.to_string(),
            "preference store unavailable"
        );
        let err = StoreError::Access("QuotaExceededError".to_string());
        assert!(err.to_string().contains("QuotaExceededError"));
    }

    #[test]
    fn test_fx_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FxError = json_err.into();
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn test_dom_error_names_object() {
        assert_eq!(
            FxError::Dom("document").to_string(),
            "missing DOM object: document"
        );
    }
}
