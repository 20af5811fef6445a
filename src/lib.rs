use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement, Window};

pub mod animation;
pub mod backdrop;
pub mod config;
pub mod error;
pub mod host;
pub mod math;
pub mod particles;
pub mod render;
pub mod scroll;

pub use backdrop::{Backdrop, MountTarget};
pub use config::BackdropConfig;
pub use error::ConfigError;

use host::web::{DocumentClassTheme, ElementBackdrop, ScrollRegions, WindowEvents, WindowScheduler};
use host::Host;
use render::Canvas2dSurface;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (hot reload) keeps the existing logger
    console_log::init_with_level(log::Level::Info).ok();
}

/// Animated portfolio background exposed to JavaScript
#[wasm_bindgen]
pub struct PortfolioBackdrop {
    canvas: HtmlCanvasElement,
    element: HtmlElement,
    config: BackdropConfig,
    /// Created on first mount, once a window is known to exist
    backdrop: Option<Backdrop>,
}

#[wasm_bindgen]
impl PortfolioBackdrop {
    /// Backdrop with the stock orbs, palette and section colors
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, backdrop: HtmlElement) -> PortfolioBackdrop {
        Self {
            canvas,
            element: backdrop,
            config: BackdropConfig::default(),
            backdrop: None,
        }
    }

    /// Backdrop configured from a YAML document
    #[wasm_bindgen]
    pub fn with_config(
        canvas: HtmlCanvasElement,
        backdrop: HtmlElement,
        yaml: &str,
    ) -> Result<PortfolioBackdrop, JsValue> {
        let config = BackdropConfig::from_yaml(yaml).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            canvas,
            element: backdrop,
            config,
            backdrop: None,
        })
    }

    /// Start animating. Returns false if already mounted or if the canvas
    /// has no 2D context.
    #[wasm_bindgen]
    pub fn mount(&mut self) -> bool {
        if self.backdrop.is_none() {
            let Some(window) = web_sys::window() else {
                log::warn!("no window, backdrop disabled");
                return false;
            };
            let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
            self.backdrop = Some(Backdrop::new(self.config.clone(), browser_host(window)).with_seed(seed));
        }

        let target = Canvas2dSurface::new(self.canvas.clone()).map(|surface| {
            surface.apply_presentation_style();
            MountTarget {
                surface: Box::new(surface),
                backdrop: Box::new(ElementBackdrop::new(self.element.clone())),
            }
        });

        match self.backdrop.as_mut() {
            Some(backdrop) => backdrop.mount(target),
            None => false,
        }
    }

    /// Stop animating and remove every listener. Safe to call repeatedly.
    #[wasm_bindgen]
    pub fn unmount(&mut self) -> bool {
        self.backdrop.as_mut().map(Backdrop::unmount).unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn is_mounted(&self) -> bool {
        self.backdrop.as_ref().map(Backdrop::is_mounted).unwrap_or(false)
    }

    /// Orbs currently floating (0 when unmounted)
    #[wasm_bindgen]
    pub fn orb_count(&self) -> usize {
        self.backdrop.as_ref().map(|b| b.orbs().len()).unwrap_or(0)
    }
}

fn browser_host(window: Window) -> Host {
    Host {
        scheduler: Rc::new(WindowScheduler::new(window.clone())),
        theme: Rc::new(DocumentClassTheme::new(window.clone())),
        events: Rc::new(WindowEvents::new(window.clone())),
        regions: Rc::new(ScrollRegions::new(window)),
    }
}
