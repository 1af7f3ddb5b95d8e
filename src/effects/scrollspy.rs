//! Scrollspy for the top navigation and the tag rail.
//!
//! When a section scrolls into view, the matching nav link gets `active` and
//! the pill host is refilled with the section's `data-tags`.

/// Split a `data-tags` value into trimmed, non-empty tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether a nav link `href` points at the section `id`.
pub fn link_targets(href: Option<&str>, id: &str) -> bool {
    match href.and_then(|h| h.strip_prefix('#')) {
        Some(anchor) => !id.is_empty() && anchor == id,
        None => false,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::Scrollspy;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{
        Document, Element, IntersectionObserver, IntersectionObserverEntry,
        IntersectionObserverInit,
    };

    use super::{link_targets, parse_tags};
    use crate::config::ScrollspyConfig;
    use crate::dom::query_all;
    use crate::error::Result;

    type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

    /// Intersection observer over the page sections; disconnects on drop.
    pub struct Scrollspy {
        observer: IntersectionObserver,
        _callback: ObserverCallback,
    }

    impl Scrollspy {
        /// Returns `None` when the page has no sections to observe.
        pub fn install(document: &Document, config: &ScrollspyConfig) -> Result<Option<Self>> {
            let sections = query_all(document, &config.section_selector)?;
            if sections.is_empty() {
                return Ok(None);
            }
            let links = query_all(document, &config.link_selector)?;
            let pills_host = document.get_element_by_id(&config.pills_host_id);

            let doc = document.clone();
            let callback: ObserverCallback = Closure::wrap(Box::new(
                move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let entry: IntersectionObserverEntry = entry.unchecked_into();
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let section = entry.target();
                        set_active(&links, &section.id());
                        if let Some(host) = &pills_host {
                            set_pills(&doc, host, &section);
                        }
                    }
                },
            )
                as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

            let init = IntersectionObserverInit::new();
            init.set_root_margin(&config.root_margin);
            init.set_threshold(&JsValue::from_f64(config.threshold));
            let observer =
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

            for section in &sections {
                observer.observe(section);
            }
            tracing::debug!("Scrollspy observing {} sections", sections.len());

            Ok(Some(Self {
                observer,
                _callback: callback,
            }))
        }
    }

    impl Drop for Scrollspy {
        fn drop(&mut self) {
            self.observer.disconnect();
        }
    }

    fn set_active(links: &[Element], id: &str) {
        for link in links {
            let active = link_targets(link.get_attribute("href").as_deref(), id);
            let _ = link.class_list().toggle_with_force("active", active);
        }
    }

    /// Untagged sections keep whatever pills are already shown.
    fn set_pills(document: &Document, host: &Element, section: &Element) {
        let tags = parse_tags(&section.get_attribute("data-tags").unwrap_or_default());
        if tags.is_empty() {
            return;
        }

        host.set_text_content(None);
        for tag in tags {
            let Ok(pill) = document.create_element("span") else {
                continue;
            };
            pill.set_class_name("pill");
            pill.set_text_content(Some(&tag));
            let _ = host.append_child(&pill);
        }
    }
}
