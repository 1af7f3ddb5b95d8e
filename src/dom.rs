//! DOM lookups shared by the page effects.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::error::{FxError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(FxError::Dom("window"))
}

pub fn document(window: &Window) -> Result<Document> {
    window.document().ok_or(FxError::Dom("document"))
}

/// `querySelectorAll`, collected as elements.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Evaluate a media query; unsupported queries count as not matching.
pub fn media_matches(window: &Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|list| list.matches())
        .unwrap_or(false)
}
