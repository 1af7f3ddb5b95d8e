//! Browser adapters and event wiring for the theme controller.

use std::rc::Rc;

use folio_theme::{ColorMode, ThemePreference};
use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use tracing::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlElement, KeyboardEvent, MediaQueryList, Storage,
    VisibilityState, Window,
};

use super::controller::ThemeController;
use super::shortcut::KeyPress;
use super::subscription::{subscription_style, SubscriptionStyle};
use super::traits::{ColorSchemeSignal, PreferenceStore, ThemeSurface};
use crate::config::{ThemeConfig, ThemeTarget};
use crate::error::{FxError, Result, StoreError};

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// `window.localStorage`, which may be missing or throw (privacy modes).
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn from_window(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> std::result::Result<&Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        Ok(self.storage()?.get_item(key)?)
    }

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        Ok(self.storage()?.set_item(key, value)?)
    }
}

/// `matchMedia("(prefers-color-scheme: dark)")`.
pub struct MediaSignal {
    query: Option<MediaQueryList>,
}

impl MediaSignal {
    pub fn from_window(window: &Window) -> Self {
        Self {
            query: window.match_media(DARK_SCHEME_QUERY).ok().flatten(),
        }
    }

    pub fn query(&self) -> Option<&MediaQueryList> {
        self.query.as_ref()
    }
}

impl ColorSchemeSignal for MediaSignal {
    fn prefers_dark(&self) -> bool {
        self.query.as_ref().map(|q| q.matches()).unwrap_or(false)
    }
}

/// Writes `data-theme` and refreshes the optional toggle glyph and label.
pub struct DocumentSurface {
    target: Element,
    emoji: Option<Element>,
    label: Option<Element>,
}

impl DocumentSurface {
    pub fn new(document: &Document, config: &ThemeConfig) -> Result<Self> {
        Ok(Self {
            target: theme_target(document, config.target)?,
            emoji: document.get_element_by_id(&config.emoji_id),
            label: document.get_element_by_id(&config.label_id),
        })
    }
}

impl ThemeSurface for DocumentSurface {
    fn apply(&self, preference: ThemePreference, mode: ColorMode) {
        if let Err(e) = self.target.set_attribute("data-theme", mode.as_str()) {
            debug!("Failed to set data-theme: {:?}", e);
        }
        // Both or neither, so the control never shows half a description
        if let (Some(emoji), Some(label)) = (&self.emoji, &self.label) {
            emoji.set_text_content(Some(preference.toggle_glyph()));
            label.set_text_content(Some(preference.toggle_label()));
        }
    }
}

/// Element that carries `data-theme` for the given target setting.
pub fn theme_target(document: &Document, target: ThemeTarget) -> Result<Element> {
    match target {
        ThemeTarget::Body => document
            .body()
            .map(Element::from)
            .ok_or(FxError::Dom("body")),
        ThemeTarget::Root => document
            .document_element()
            .ok_or(FxError::Dom("documentElement")),
    }
}

/// Change subscription on a media query list.
///
/// Uses whichever subscription API the browser exposes; returns `None`
/// from [`subscribe`](Self::subscribe) when neither exists.
pub enum MediaSubscription {
    EventListener(EventListener),
    Legacy {
        query: MediaQueryList,
        callback: Closure<dyn FnMut(Event)>,
    },
}

impl MediaSubscription {
    pub fn subscribe<F>(query: &MediaQueryList, mut on_change: F) -> Option<Self>
    where
        F: FnMut() + 'static,
    {
        let style = subscription_style(
            has_method(query, "addEventListener"),
            has_method(query, "addListener"),
        )?;

        match style {
            SubscriptionStyle::EventListener => Some(Self::EventListener(EventListener::new(
                query,
                "change",
                move |_| on_change(),
            ))),
            SubscriptionStyle::Legacy => {
                let callback =
                    Closure::wrap(Box::new(move |_: Event| on_change()) as Box<dyn FnMut(Event)>);
                #[allow(deprecated)]
                query
                    .add_listener_with_opt_callback(Some(callback.as_ref().unchecked_ref()))
                    .ok()?;
                Some(Self::Legacy {
                    query: query.clone(),
                    callback,
                })
            }
        }
    }
}

impl Drop for MediaSubscription {
    fn drop(&mut self) {
        // The gloo listener removes itself
        if let Self::Legacy { query, callback } = self {
            #[allow(deprecated)]
            let _ = query.remove_listener_with_opt_callback(Some(callback.as_ref().unchecked_ref()));
        }
    }
}

fn has_method(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .map(|value| value.is_function())
        .unwrap_or(false)
}

fn key_press(event: &KeyboardEvent) -> KeyPress {
    let in_editable = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        .map(|el| {
            el.is_content_editable()
                || matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
        })
        .unwrap_or(false);

    KeyPress {
        key: event.key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
        in_editable,
    }
}

/// A controller wired to the page.
///
/// Only the subscriptions are held; each closure keeps its own handle on
/// the controller. Dropping the binding cancels the poll timer and removes
/// all listeners.
pub struct ThemeBinding {
    _media: Option<MediaSubscription>,
    _listeners: Vec<EventListener>,
    _poll: Option<Interval>,
}

impl ThemeBinding {
    pub fn install(window: &Window, document: &Document, config: &ThemeConfig) -> Result<Self> {
        let surface = DocumentSurface::new(document, config)?;
        let controller = Rc::new(ThemeController::new(
            LocalStore::from_window(window),
            MediaSignal::from_window(window),
            surface,
            config,
        ));
        controller.initialize();

        let media = controller.signal().query().and_then(|query| {
            let c = Rc::clone(&controller);
            MediaSubscription::subscribe(query, move || {
                c.reconcile();
            })
        });
        if media.is_none() {
            info!("No color scheme change events available; relying on the drift poll");
        }

        let mut listeners = Vec::new();

        let c = Rc::clone(&controller);
        let doc = document.clone();
        listeners.push(EventListener::new(document, "visibilitychange", move |_| {
            if doc.visibility_state() == VisibilityState::Visible {
                c.reconcile();
            }
        }));

        let c = Rc::clone(&controller);
        listeners.push(EventListener::new(document, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                c.handle_key(&key_press(event));
            }
        }));

        for id in &config.toggle_ids {
            let Some(control) = document.get_element_by_id(id) else {
                continue;
            };
            let c = Rc::clone(&controller);
            listeners.push(EventListener::new(&control, "click", move |_| {
                c.toggle();
            }));
        }

        let poll = (config.poll_interval_ms > 0).then(|| {
            let c = Rc::clone(&controller);
            Interval::new(config.poll_interval_ms, move || {
                c.poll_drift();
            })
        });

        debug!(
            "Theme binding installed: {} listeners, poll={}ms",
            listeners.len(),
            config.poll_interval_ms
        );

        Ok(Self {
            _media: media,
            _listeners: listeners,
            _poll: poll,
        })
    }
}
