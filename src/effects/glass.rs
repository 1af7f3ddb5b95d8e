//! Cursor-tracked glass highlight.
//!
//! Elements matching the configured selector get `--x` / `--y` custom
//! properties holding the pointer position as percentages of their box; the
//! stylesheet positions a radial highlight from them.

/// Bounding box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position relative to `rect`, in percent.
///
/// Degenerate boxes report the center instead of dividing by zero.
pub fn pointer_percent(rect: &BoxRect, client_x: f64, client_y: f64) -> (f64, f64) {
    (
        axis_percent(client_x - rect.left, rect.width),
        axis_percent(client_y - rect.top, rect.height),
    )
}

fn axis_percent(offset: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        offset / extent * 100.0
    } else {
        50.0
    }
}

pub fn css_percent(value: f64) -> String {
    format!("{}%", value)
}

#[cfg(target_arch = "wasm32")]
pub use web::GlassEffect;

#[cfg(target_arch = "wasm32")]
mod web {
    use gloo_events::EventListener;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlElement, MouseEvent};

    use super::{css_percent, pointer_percent, BoxRect};
    use crate::config::GlassConfig;
    use crate::dom::query_all;
    use crate::error::Result;

    pub struct GlassEffect {
        _listeners: Vec<EventListener>,
    }

    impl GlassEffect {
        pub fn install(document: &Document, config: &GlassConfig) -> Result<Self> {
            let mut listeners = Vec::new();

            for element in query_all(document, &config.selector)? {
                let Ok(element) = element.dyn_into::<HtmlElement>() else {
                    continue;
                };

                let el = element.clone();
                listeners.push(EventListener::new(&element, "mousemove", move |event| {
                    let Some(event) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    let rect = el.get_bounding_client_rect();
                    let (x, y) = pointer_percent(
                        &BoxRect {
                            left: rect.left(),
                            top: rect.top(),
                            width: rect.width(),
                            height: rect.height(),
                        },
                        f64::from(event.client_x()),
                        f64::from(event.client_y()),
                    );
                    let style = el.style();
                    let _ = style.set_property("--x", &css_percent(x));
                    let _ = style.set_property("--y", &css_percent(y));
                }));

                let el = element.clone();
                listeners.push(EventListener::new(&element, "mouseleave", move |_| {
                    let style = el.style();
                    let _ = style.remove_property("--x");
                    let _ = style.remove_property("--y");
                }));
            }

            tracing::debug!("Glass effect bound to {} elements", listeners.len() / 2);
            Ok(Self {
                _listeners: listeners,
            })
        }
    }
}
