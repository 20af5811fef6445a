//! Capabilities the backdrop borrows from whatever is hosting it
//!
//! The browser provides them through `web`; `manual` provides headless
//! versions driven by hand, which is how the lifecycle is tested natively.

mod frame_loop;
pub mod manual;
pub mod web;

use std::cell::RefCell;
use std::rc::Rc;

pub use frame_loop::FrameLoop;

use crate::math::{Rgba, Viewport};
use crate::render::Theme;
use crate::scroll::Crossing;

/// Handle of a pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub i32);

/// Handle of a registered event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

/// Handle of a registered region observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u32);

/// Callback run on the next display refresh with a timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Per-frame scheduling primitive (`requestAnimationFrame` in the browser)
pub trait FrameScheduler {
    /// Queue `callback` for the next frame. `None` if the host refused.
    fn request(&self, callback: FrameCallback) -> Option<FrameId>;

    /// Drop a queued callback. Unknown or already-run ids are ignored.
    fn cancel(&self, id: FrameId);
}

/// Read-only view of the externally owned light/dark flag
pub trait ThemeSource {
    /// `None` when the theme cannot be determined
    fn current(&self) -> Option<Theme>;

    /// Current theme, falling back to light
    fn resolve(&self) -> Theme {
        self.current().unwrap_or(Theme::Light)
    }
}

/// Events the backdrop listens to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    PointerMove { x: f64, y: f64 },
    Resize(Viewport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    PointerMove,
    Resize,
}

impl HostEvent {
    pub fn kind(&self) -> HostEventKind {
        match self {
            HostEvent::PointerMove { .. } => HostEventKind::PointerMove,
            HostEvent::Resize(_) => HostEventKind::Resize,
        }
    }
}

pub type EventHandler = Box<dyn FnMut(HostEvent)>;

/// Pointer and resize notifications plus viewport queries
pub trait EventSource {
    fn viewport(&self) -> Viewport;

    fn listen(&self, kind: HostEventKind, handler: EventHandler) -> Option<ListenerId>;

    /// Remove a listener. Unknown ids are ignored.
    fn unlisten(&self, id: ListenerId);
}

/// The two callbacks fired when the viewport enters a region
pub struct RegionCallbacks {
    /// Entered while scrolling forward (start boundary crossed)
    pub on_enter: Box<dyn FnMut()>,
    /// Re-entered while scrolling back (end boundary crossed)
    pub on_enter_back: Box<dyn FnMut()>,
}

impl RegionCallbacks {
    /// Run the callback matching `crossing`. Leaving a region fires nothing.
    pub fn dispatch(&mut self, crossing: Crossing) -> bool {
        if !crossing.activates() {
            return false;
        }
        if crossing == Crossing::Enter {
            (self.on_enter)();
        } else {
            (self.on_enter_back)();
        }
        true
    }
}

/// Region crossing notifications keyed by a selector
pub trait RegionNotifier {
    /// `None` when nothing on the page matches `selector`; that region never fires.
    fn observe(&self, selector: &str, callbacks: RegionCallbacks) -> Option<ObserverId>;

    /// Stop observing. Unknown ids are ignored.
    fn dispose(&self, id: ObserverId);
}

/// Where the backdrop color ends up (the background element's style)
pub trait BackdropSink {
    fn apply(&mut self, color: Rgba);
}

impl<B: BackdropSink + ?Sized> BackdropSink for Rc<RefCell<B>> {
    fn apply(&mut self, color: Rgba) {
        self.borrow_mut().apply(color);
    }
}

/// Everything the backdrop needs from its host, bundled
#[derive(Clone)]
pub struct Host {
    pub scheduler: Rc<dyn FrameScheduler>,
    pub theme: Rc<dyn ThemeSource>,
    pub events: Rc<dyn EventSource>,
    pub regions: Rc<dyn RegionNotifier>,
}
