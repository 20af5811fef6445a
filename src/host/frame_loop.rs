//! Cancellable per-frame loop
//!
//! Runs a step once per display refresh until stopped. A single running
//! flag guards against double starts, and every queued callback carries
//! the generation it was scheduled under so a frame queued before `stop`
//! can never run a step afterwards.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{FrameId, FrameScheduler};

type Step = Box<dyn FnMut(f64)>;

#[derive(Default)]
struct LoopState {
    running: bool,
    generation: u64,
    pending: Option<FrameId>,
    step: Option<Step>,
}

/// Repeating frame task on top of a [`FrameScheduler`]
pub struct FrameLoop {
    scheduler: Rc<dyn FrameScheduler>,
    state: Rc<RefCell<LoopState>>,
}

impl FrameLoop {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            state: Rc::new(RefCell::new(LoopState::default())),
        }
    }

    /// Begin running `step` every frame. Returns false if already running
    /// or if the host refused the first frame request.
    pub fn start(&self, step: impl FnMut(f64) + 'static) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.running {
                return false;
            }
            state.running = true;
            state.generation += 1;
            state.step = Some(Box::new(step));
        }

        schedule_next(Rc::downgrade(&self.scheduler), Rc::downgrade(&self.state))
    }

    /// Stop the loop and cancel the queued frame. Returns false if it was
    /// not running.
    pub fn stop(&self) -> bool {
        let pending = {
            let mut state = self.state.borrow_mut();
            if !state.running {
                return false;
            }
            state.running = false;
            state.step = None;
            state.pending.take()
        };

        if let Some(id) = pending {
            self.scheduler.cancel(id);
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule_next(scheduler: Weak<dyn FrameScheduler>, state: Weak<RefCell<LoopState>>) -> bool {
    let (Some(host), Some(shared)) = (scheduler.upgrade(), state.upgrade()) else {
        return false;
    };
    let generation = shared.borrow().generation;

    let callback = Box::new(move |timestamp: f64| {
        let Some(shared) = state.upgrade() else {
            return;
        };

        let mut step = {
            let mut s = shared.borrow_mut();
            if !s.running || s.generation != generation {
                return;
            }
            s.pending = None;
            match s.step.take() {
                Some(step) => step,
                None => return,
            }
        };

        step(timestamp);

        {
            let mut s = shared.borrow_mut();
            // stopped (or restarted) from inside the step
            if !s.running || s.generation != generation {
                return;
            }
            s.step = Some(step);
        }

        schedule_next(scheduler, state);
    });

    match host.request(callback) {
        Some(id) => {
            shared.borrow_mut().pending = Some(id);
            true
        }
        None => {
            log::warn!("frame request refused, stopping render loop");
            let mut s = shared.borrow_mut();
            s.running = false;
            s.step = None;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::manual::ManualScheduler;
    use std::cell::Cell;

    fn counting_loop(scheduler: &Rc<ManualScheduler>) -> (FrameLoop, Rc<Cell<u32>>) {
        let frame_loop = FrameLoop::new(scheduler.clone());
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        assert!(frame_loop.start(move |_| c.set(c.get() + 1)));
        (frame_loop, count)
    }

    #[test]
    fn test_runs_once_per_frame() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (frame_loop, count) = counting_loop(&scheduler);

        assert_eq!(scheduler.pending_count(), 1);
        scheduler.run_frame(16.0);
        scheduler.run_frame(32.0);
        scheduler.run_frame(48.0);

        assert_eq!(count.get(), 3);
        assert!(frame_loop.is_running());
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn test_double_start_is_rejected() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (frame_loop, count) = counting_loop(&scheduler);

        assert!(!frame_loop.start(|_| panic!("second step must never run")));
        assert_eq!(scheduler.pending_count(), 1);

        scheduler.run_frame(16.0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_stop_cancels_pending_frame() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (frame_loop, count) = counting_loop(&scheduler);

        assert!(frame_loop.stop());
        assert!(!frame_loop.is_running());
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.cancelled_count(), 1);

        scheduler.run_frame(16.0);
        assert_eq!(count.get(), 0);
        assert!(!frame_loop.stop());
        assert_eq!(scheduler.cancelled_count(), 1);
    }

    #[test]
    fn test_stale_frame_after_restart_is_ignored() {
        let scheduler = Rc::new(ManualScheduler::new().ignoring_cancel());
        let (frame_loop, count) = counting_loop(&scheduler);

        frame_loop.stop();
        let restarted = Rc::new(Cell::new(0));
        let r = restarted.clone();
        assert!(frame_loop.start(move |_| r.set(r.get() + 1)));

        // both the stale and the fresh request are still queued
        assert_eq!(scheduler.pending_count(), 2);
        scheduler.run_frame(16.0);

        assert_eq!(count.get(), 0);
        assert_eq!(restarted.get(), 1);
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn test_stop_from_inside_step() {
        let scheduler = Rc::new(ManualScheduler::new());
        let frame_loop = Rc::new(FrameLoop::new(scheduler.clone()));
        let weak = Rc::downgrade(&frame_loop);

        frame_loop.start(move |_| {
            if let Some(l) = weak.upgrade() {
                l.stop();
            }
        });
        scheduler.run_frame(16.0);

        assert!(!frame_loop.is_running());
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_refused_request_leaves_loop_stopped() {
        let scheduler = Rc::new(ManualScheduler::new());
        scheduler.set_refuse(true);
        let frame_loop = FrameLoop::new(scheduler.clone());

        assert!(!frame_loop.start(|_| {}));
        assert!(!frame_loop.is_running());
    }

    #[test]
    fn test_drop_cancels() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (frame_loop, _count) = counting_loop(&scheduler);
        drop(frame_loop);
        assert_eq!(scheduler.pending_count(), 0);
    }
}
