//! Page entry point: builds every effect once the DOM is ready and keeps
//! them alive until the page is hidden.

// #[wasm_bindgen] expands to unsafe ABI glue
#![allow(unsafe_code)]

use std::cell::RefCell;

use anyhow::{Context, Result};
use gloo_events::EventListener;
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::config::{load_config, Config};
use crate::dom;
use crate::effects::glass::GlassEffect;
use crate::effects::neural::NeuralBackground;
use crate::effects::scrollspy::Scrollspy;
use crate::logging;
use crate::theme::web::{theme_target, ThemeBinding};

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

/// Everything installed on the page. Dropping it tears all of it down.
struct Site {
    _theme: Option<ThemeBinding>,
    _glass: Option<GlassEffect>,
    _scrollspy: Option<Scrollspy>,
    _neural: Option<NeuralBackground>,
}

impl Site {
    /// Parts that fail are logged and left out; the rest still run.
    fn build(window: &Window, document: &Document, config: &Config) -> Self {
        let theme = ThemeBinding::install(window, document, &config.theme)
            .context("theme toggle");

        let glass = GlassEffect::install(document, &config.glass).context("glass effect");

        let scrollspy = Scrollspy::install(document, &config.scrollspy).context("scrollspy");

        // Install after the theme so the first frame already has a data-theme
        let neural = theme_target(document, config.theme.target)
            .and_then(|target| NeuralBackground::install(window, document, target, &config.neural))
            .context("neural background");

        Self {
            _theme: report(theme),
            _glass: report(glass),
            _scrollspy: report(scrollspy).flatten(),
            _neural: report(neural).flatten(),
        }
    }
}

fn report<T>(result: Result<T>) -> Option<T> {
    match result {
        Ok(part) => Some(part),
        Err(e) => {
            error!("Failed to install {:#}", e);
            None
        }
    }
}

fn mount() {
    let built = dom::window().and_then(|window| {
        let document = dom::document(&window)?;
        let config = load_config(&document);
        logging::init(&config.log_filter);
        Ok(Site::build(&window, &document, &config))
    });

    match built {
        Ok(site) => {
            // Replaced value (if any) is dropped outside the borrow
            let previous = SITE.with(|slot| slot.borrow_mut().replace(site));
            drop(previous);
            info!("Site scripts mounted");
        }
        Err(e) => error!("Failed to mount site scripts: {}", e),
    }
}

/// Tear down every listener, timer and animation frame.
#[wasm_bindgen]
pub fn shutdown() {
    let site = SITE.with(|slot| slot.borrow_mut().take());
    if site.is_some() {
        drop(site);
        info!("Site scripts torn down");
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    let Ok(window) = dom::window() else {
        return;
    };
    let Ok(document) = dom::document(&window) else {
        return;
    };

    // pagehide/pageshow outlive any single Site, so they are never removed
    EventListener::new(&window, "pagehide", |_| shutdown()).forget();
    EventListener::new(&window, "pageshow", |_| {
        if SITE.with(|slot| slot.borrow().is_none()) {
            mount();
        }
    })
    .forget();

    // readyState is a plain string in web-sys
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| mount()).forget();
    } else {
        mount();
    }
}
