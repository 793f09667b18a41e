//! Frame scheduling and wall-clock time.

use std::cell::{Cell, RefCell};

/// Opaque token for a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

pub type FrameCallback = Box<dyn FnOnce()>;

/// Invokes callbacks once before the next repaint.
pub trait FrameScheduler {
    /// Queue `callback`, or return `None` if the request could not be made.
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle>;

    /// Drop a pending request. Unknown or already fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Milliseconds from an arbitrary, monotonic origin.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Scheduler driven by hand; fires queued callbacks on [`run_frame`].
///
/// [`run_frame`]: ManualScheduler::run_frame
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<i32>,
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    fired: RefCell<Vec<FrameHandle>>,
    cancelled: RefCell<Vec<FrameHandle>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every callback pending right now. Requests made while firing
    /// are queued for the next call. Returns how many callbacks ran.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let count = due.len();
        for (handle, callback) in due {
            self.fired.borrow_mut().push(handle);
            callback();
        }
        count
    }

    pub fn run_frames(&self, n: usize) {
        for _ in 0..n {
            self.run_frame();
        }
    }

    pub fn pending(&self) -> Vec<FrameHandle> {
        self.pending.borrow().iter().map(|(h, _)| *h).collect()
    }

    pub fn fired(&self) -> Vec<FrameHandle> {
        self.fired.borrow().clone()
    }

    pub fn cancelled(&self) -> Vec<FrameHandle> {
        self.cancelled.borrow().clone()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = FrameHandle(id);
        self.pending.borrow_mut().push((handle, callback));
        Some(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|(h, _)| *h != handle);
        if pending.len() != before {
            self.cancelled.borrow_mut().push(handle);
        }
    }
}

#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_run_frame_defers_new_requests() {
        let scheduler = Rc::new(ManualScheduler::new());
        let hits = Rc::new(Cell::new(0));

        let s = scheduler.clone();
        let h = hits.clone();
        scheduler.request_frame(Box::new(move || {
            h.set(h.get() + 1);
            let h = h.clone();
            s.request_frame(Box::new(move || h.set(h.get() + 1)));
        }));

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(scheduler.pending().len(), 1);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(hits.get(), 2);
        assert_eq!(scheduler.fired(), vec![FrameHandle(1), FrameHandle(2)]);
    }

    #[test]
    fn test_cancel_frame() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let handle = scheduler.request_frame(Box::new(move || h.set(1))).unwrap();
        scheduler.cancel_frame(handle);
        scheduler.cancel_frame(FrameHandle(99));

        assert_eq!(scheduler.run_frame(), 0);
        assert_eq!(hits.get(), 0);
        assert_eq!(scheduler.cancelled(), vec![handle]);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(10.0);
        clock.advance(5.5);
        assert_eq!(clock.now(), 15.5);
        clock.set(0.0);
        assert_eq!(clock.now(), 0.0);
    }
}
