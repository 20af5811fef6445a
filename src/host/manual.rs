//! Hand-driven host for headless use
//!
//! Frames run only when `run_frame` is called, events only fire when
//! `emit` is called, and scrolling is a number moved with `scroll_to`
//! against regions declared up front with explicit start/end offsets.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{
    BackdropSink, EventHandler, EventSource, FrameCallback, FrameId, FrameScheduler, HostEvent,
    HostEventKind, ListenerId, ObserverId, RegionCallbacks, RegionNotifier, ThemeSource,
};
use crate::math::{Rgba, Viewport};
use crate::render::Theme;
use crate::scroll::{Crossing, RegionPhase, RegionTracker};

/// Frame scheduler that runs queued callbacks on demand
pub struct ManualScheduler {
    queue: RefCell<Vec<(FrameId, FrameCallback)>>,
    next_id: Cell<i32>,
    cancelled: Cell<usize>,
    honor_cancel: bool,
    refuse: Cell<bool>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            queue: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            cancelled: Cell::new(0),
            honor_cancel: true,
            refuse: Cell::new(false),
        }
    }

    /// Keep cancelled callbacks queued, like a host that races cancellation
    pub fn ignoring_cancel(mut self) -> Self {
        self.honor_cancel = false;
        self
    }

    /// Make `request` fail, like a host without frame scheduling
    pub fn set_refuse(&self, refuse: bool) {
        self.refuse.set(refuse);
    }

    /// Run every callback queued before this call. Returns how many ran.
    pub fn run_frame(&self, timestamp: f64) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let ran = batch.len();
        for (_, callback) in batch {
            callback(timestamp);
        }
        ran
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Number of `cancel` calls received
    pub fn cancelled_count(&self) -> usize {
        self.cancelled.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&self, callback: FrameCallback) -> Option<FrameId> {
        if self.refuse.get() {
            return None;
        }
        let id = FrameId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.queue.borrow_mut().push((id, callback));
        Some(id)
    }

    fn cancel(&self, id: FrameId) {
        self.cancelled.set(self.cancelled.get() + 1);
        if self.honor_cancel {
            self.queue.borrow_mut().retain(|(queued, _)| *queued != id);
        }
    }
}

/// Theme flag that can be flipped at any time
#[derive(Debug, Default)]
pub struct SwitchableTheme {
    theme: Cell<Option<Theme>>,
}

impl SwitchableTheme {
    pub fn new(theme: Option<Theme>) -> Self {
        Self { theme: Cell::new(theme) }
    }

    pub fn set(&self, theme: Option<Theme>) {
        self.theme.set(theme);
    }
}

impl ThemeSource for SwitchableTheme {
    fn current(&self) -> Option<Theme> {
        self.theme.get()
    }
}

/// Event source fed by `emit`
pub struct ManualEvents {
    viewport: Cell<Viewport>,
    listeners: RefCell<Vec<(ListenerId, HostEventKind, EventHandler)>>,
    next_id: Cell<u32>,
    removed: Cell<usize>,
}

impl ManualEvents {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Cell::new(viewport),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            removed: Cell::new(0),
        }
    }

    /// Deliver `event` to every listener of its kind. A resize also
    /// updates the reported viewport first.
    pub fn emit(&self, event: HostEvent) {
        if let HostEvent::Resize(viewport) = event {
            self.viewport.set(viewport);
        }

        let mut listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for (_, kind, handler) in listeners.iter_mut() {
            if *kind == event.kind() {
                handler(event);
            }
        }

        let mut current = self.listeners.borrow_mut();
        listeners.append(&mut current);
        *current = listeners;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listener_count_of(&self, kind: HostEventKind) -> usize {
        self.listeners.borrow().iter().filter(|(_, k, _)| *k == kind).count()
    }

    /// Listeners actually removed so far
    pub fn removed_count(&self) -> usize {
        self.removed.get()
    }
}

impl EventSource for ManualEvents {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn listen(&self, kind: HostEventKind, handler: EventHandler) -> Option<ListenerId> {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, kind, handler));
        Some(id)
    }

    fn unlisten(&self, id: ListenerId) {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener, _, _)| *listener != id);
        self.removed.set(self.removed.get() + before - listeners.len());
    }
}

struct ScriptedObserver {
    id: ObserverId,
    start: f64,
    end: f64,
    tracker: RegionTracker,
    callbacks: RegionCallbacks,
}

/// Region notifier over a simulated scroll offset
pub struct ScriptedRegions {
    bounds: HashMap<String, (f64, f64)>,
    position: Cell<f64>,
    observers: RefCell<Vec<ScriptedObserver>>,
    next_id: Cell<u32>,
    disposed: Cell<usize>,
}

impl Default for ScriptedRegions {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRegions {
    pub fn new() -> Self {
        Self {
            bounds: HashMap::new(),
            position: Cell::new(0.0),
            observers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            disposed: Cell::new(0),
        }
    }

    /// Declare a page region spanning scroll offsets `[start, end)`
    pub fn with_region(mut self, selector: &str, start: f64, end: f64) -> Self {
        self.bounds.insert(selector.to_string(), (start, end));
        self
    }

    /// Move the scroll offset and notify observers in registration order.
    /// Returns the crossings that fired a callback.
    pub fn scroll_to(&self, position: f64) -> Vec<(ObserverId, Crossing)> {
        self.position.set(position);
        let mut fired = Vec::new();

        for observer in self.observers.borrow_mut().iter_mut() {
            let phase = RegionPhase::classify(position, observer.start, observer.end);
            if let Some(crossing) = observer.tracker.update(phase) {
                if observer.callbacks.dispatch(crossing) {
                    fired.push((observer.id, crossing));
                }
            }
        }

        fired
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Observers actually disposed so far
    pub fn disposed_count(&self) -> usize {
        self.disposed.get()
    }
}

impl RegionNotifier for ScriptedRegions {
    fn observe(&self, selector: &str, mut callbacks: RegionCallbacks) -> Option<ObserverId> {
        let &(start, end) = self.bounds.get(selector)?;
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let mut tracker = RegionTracker::new();
        let phase = RegionPhase::classify(self.position.get(), start, end);
        if let Some(crossing) = tracker.update(phase) {
            callbacks.dispatch(crossing);
        }

        self.observers.borrow_mut().push(ScriptedObserver {
            id,
            start,
            end,
            tracker,
            callbacks,
        });
        Some(id)
    }

    fn dispose(&self, id: ObserverId) {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|o| o.id != id);
        self.disposed.set(self.disposed.get() + before - observers.len());
    }
}

/// Backdrop sink that remembers every applied color
#[derive(Debug, Default)]
pub struct RecordingBackdrop {
    pub applied: Vec<Rgba>,
}

impl RecordingBackdrop {
    pub fn last(&self) -> Option<Rgba> {
        self.applied.last().copied()
    }
}

impl BackdropSink for RecordingBackdrop {
    fn apply(&mut self, color: Rgba) {
        self.applied.push(color);
    }
}
