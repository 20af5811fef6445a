//! Browser implementations of the host capabilities

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, MouseEvent, Window};

use super::{
    BackdropSink, EventHandler, EventSource, FrameCallback, FrameId, FrameScheduler, HostEvent,
    HostEventKind, ListenerId, ObserverId, RegionCallbacks, RegionNotifier, ThemeSource,
};
use crate::math::{Rgba, Viewport};
use crate::render::Theme;
use crate::scroll::{RegionPhase, RegionTracker};

fn window_viewport(window: &Window) -> Viewport {
    let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

/// `requestAnimationFrame` / `cancelAnimationFrame`
pub struct WindowScheduler {
    window: Window,
}

impl WindowScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for WindowScheduler {
    fn request(&self, callback: FrameCallback) -> Option<FrameId> {
        let js = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        match self.window.request_animation_frame(js.unchecked_ref()) {
            Ok(id) => Some(FrameId(id)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&self, id: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(id.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

/// Dark mode is a `dark` class on the document element
pub struct DocumentClassTheme {
    window: Window,
}

impl DocumentClassTheme {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl ThemeSource for DocumentClassTheme {
    fn current(&self) -> Option<Theme> {
        let root = self.window.document()?.document_element()?;
        Some(if root.class_list().contains("dark") {
            Theme::Dark
        } else {
            Theme::Light
        })
    }
}

struct WindowListener {
    id: ListenerId,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Window `mousemove` and `resize` listeners
pub struct WindowEvents {
    window: Window,
    listeners: RefCell<Vec<WindowListener>>,
    next_id: Cell<u32>,
}

impl WindowEvents {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }
}

impl EventSource for WindowEvents {
    fn viewport(&self) -> Viewport {
        window_viewport(&self.window)
    }

    fn listen(&self, kind: HostEventKind, mut handler: EventHandler) -> Option<ListenerId> {
        let (event, closure): (&'static str, Closure<dyn FnMut(Event)>) = match kind {
            HostEventKind::PointerMove => (
                "mousemove",
                Closure::wrap(Box::new(move |e: Event| {
                    if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
                        handler(HostEvent::PointerMove {
                            x: mouse.client_x() as f64,
                            y: mouse.client_y() as f64,
                        });
                    }
                }) as Box<dyn FnMut(Event)>),
            ),
            HostEventKind::Resize => {
                let window = self.window.clone();
                (
                    "resize",
                    Closure::wrap(Box::new(move |_: Event| {
                        handler(HostEvent::Resize(window_viewport(&window)));
                    }) as Box<dyn FnMut(Event)>),
                )
            }
        };

        if let Err(e) = self
            .window
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to add {} listener: {:?}", event, e);
            return None;
        }

        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(WindowListener { id, event, closure });
        Some(id)
    }

    fn unlisten(&self, id: ListenerId) {
        let mut listeners = self.listeners.borrow_mut();
        let Some(index) = listeners.iter().position(|l| l.id == id) else {
            return;
        };
        let listener = listeners.remove(index);
        if let Err(e) = self.window.remove_event_listener_with_callback(
            listener.event,
            listener.closure.as_ref().unchecked_ref(),
        ) {
            log::warn!("failed to remove {} listener: {:?}", listener.event, e);
        }
    }
}

impl Drop for WindowEvents {
    fn drop(&mut self) {
        let ids: Vec<ListenerId> = self.listeners.borrow().iter().map(|l| l.id).collect();
        for id in ids {
            self.unlisten(id);
        }
    }
}

/// Scrolling and resizing both move the viewport center across regions
const SAMPLE_EVENTS: [&str; 2] = ["scroll", "resize"];

struct RegionEntry {
    id: ObserverId,
    element: Element,
    tracker: RegionTracker,
    callbacks: RegionCallbacks,
}

#[derive(Default)]
struct Regions {
    entries: Vec<RegionEntry>,
    next_id: u32,
}

/// Region crossings from element bounds against the viewport center.
///
/// A region starts when its top edge reaches the middle of the viewport
/// and ends when its bottom edge does. One shared listener on `scroll` and
/// `resize` samples every region; it is attached with the first observer
/// and removed with the last.
pub struct ScrollRegions {
    window: Window,
    regions: Rc<RefCell<Regions>>,
    listener: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl ScrollRegions {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            regions: Rc::new(RefCell::new(Regions::default())),
            listener: RefCell::new(None),
        }
    }

    fn attach(&self) {
        if self.listener.borrow().is_some() {
            return;
        }

        let regions = Rc::downgrade(&self.regions);
        let window = self.window.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Some(regions) = regions.upgrade() {
                let center = window_viewport(&window).center().y;
                for entry in regions.borrow_mut().entries.iter_mut() {
                    sample(entry, center);
                }
            }
        }) as Box<dyn FnMut()>);

        for event in SAMPLE_EVENTS {
            if let Err(e) = self
                .window
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                log::warn!("failed to add {} listener: {:?}", event, e);
            }
        }
        *self.listener.borrow_mut() = Some(closure);
    }

    fn detach(&self) {
        if let Some(closure) = self.listener.borrow_mut().take() {
            for event in SAMPLE_EVENTS {
                if let Err(e) = self
                    .window
                    .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
                {
                    log::warn!("failed to remove {} listener: {:?}", event, e);
                }
            }
        }
    }
}

fn sample(entry: &mut RegionEntry, center: f64) {
    let rect = entry.element.get_bounding_client_rect();
    let phase = RegionPhase::classify(center, rect.top(), rect.bottom());
    if let Some(crossing) = entry.tracker.update(phase) {
        entry.callbacks.dispatch(crossing);
    }
}

impl RegionNotifier for ScrollRegions {
    fn observe(&self, selector: &str, callbacks: RegionCallbacks) -> Option<ObserverId> {
        let document = self.window.document()?;
        let element = match document.query_selector(selector) {
            Ok(Some(element)) => element,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("invalid region selector {}: {:?}", selector, e);
                return None;
            }
        };

        let mut entry = RegionEntry {
            id: ObserverId(0),
            element,
            tracker: RegionTracker::new(),
            callbacks,
        };
        sample(&mut entry, window_viewport(&self.window).center().y);

        let id = {
            let mut regions = self.regions.borrow_mut();
            regions.next_id += 1;
            entry.id = ObserverId(regions.next_id);
            let id = entry.id;
            regions.entries.push(entry);
            id
        };

        self.attach();
        Some(id)
    }

    fn dispose(&self, id: ObserverId) {
        let empty = {
            let mut regions = self.regions.borrow_mut();
            regions.entries.retain(|e| e.id != id);
            regions.entries.is_empty()
        };
        if empty {
            self.detach();
        }
    }
}

impl Drop for ScrollRegions {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Writes the backdrop color into an element's `background-color`
pub struct ElementBackdrop {
    element: HtmlElement,
}

impl ElementBackdrop {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl BackdropSink for ElementBackdrop {
    fn apply(&mut self, color: Rgba) {
        if let Err(e) = self.element.style().set_property("background-color", &color.to_css()) {
            log::warn!("failed to set backdrop color: {:?}", e);
        }
    }
}
