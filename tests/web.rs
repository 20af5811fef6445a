//! Browser tests, run with `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use portfolio_backdrop::host::web::ScrollRegions;
use portfolio_backdrop::host::{RegionCallbacks, RegionNotifier};
use portfolio_backdrop::PortfolioBackdrop;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn elements() -> (HtmlCanvasElement, HtmlElement) {
    let document = web_sys::window().unwrap().document().unwrap();
    let body = document.body().unwrap();

    let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();
    let backdrop: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    body.append_child(&backdrop).unwrap();
    body.append_child(&canvas).unwrap();
    (canvas, backdrop)
}

#[wasm_bindgen_test]
fn mount_and_unmount_in_browser() {
    let (canvas, element) = elements();
    let mut backdrop = PortfolioBackdrop::new(canvas.clone(), element.clone());

    assert!(backdrop.mount());
    assert!(!backdrop.mount());
    assert_eq!(backdrop.orb_count(), 6);
    assert_eq!(canvas.style().get_property_value("pointer-events").unwrap(), "none");
    assert!(!element.style().get_property_value("background-color").unwrap().is_empty());

    assert!(backdrop.unmount());
    assert!(!backdrop.unmount());
    assert!(!backdrop.is_mounted());
    assert_eq!(backdrop.orb_count(), 0);
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    let (canvas, element) = elements();
    let result = PortfolioBackdrop::with_config(canvas, element, "orbs:\n  radius: { min: 10, max: 5 }\n");
    assert!(result.is_err());
}

fn place(element: &HtmlElement, top: &str, height: &str) {
    let style = element.style();
    style.set_property("position", "fixed").unwrap();
    style.set_property("top", top).unwrap();
    style.set_property("height", height).unwrap();
}

#[wasm_bindgen_test]
fn resize_rechecks_regions() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let section: HtmlElement = document.create_element("section").unwrap().dyn_into().unwrap();
    section.set_id("resize-region");
    place(&section, "100000px", "100px");
    document.body().unwrap().append_child(&section).unwrap();

    let enters = Rc::new(Cell::new(0));
    let e = enters.clone();
    let regions = ScrollRegions::new(window.clone());
    let id = regions
        .observe(
            "#resize-region",
            RegionCallbacks {
                on_enter: Box::new(move || e.set(e.get() + 1)),
                on_enter_back: Box::new(|| {}),
            },
        )
        .unwrap();
    assert_eq!(enters.get(), 0);

    // the viewport center now falls inside the section without any scrolling
    place(&section, "0px", "100000px");
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    assert_eq!(enters.get(), 1);

    regions.dispose(id);
    section.remove();
}
