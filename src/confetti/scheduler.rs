//! Display-refresh-aligned frame scheduling
//!
//! On the web this is `requestAnimationFrame`; headless runs pump frames by
//! hand through [`ManualScheduler`].

use std::cell::{Cell, RefCell};

/// Callback run on the next frame, receiving the frame timestamp (ms)
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Handle of a pending frame callback, used only for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub i32);

pub trait FrameScheduler {
    /// Run `callback` once before the next repaint. `None` if the request
    /// was refused, in which case the callback is dropped unrun.
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle>;

    /// Cancel a pending callback. Unknown or already-run handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Scheduler whose frames only advance when [`ManualScheduler::run_frame`] is called
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    next_handle: Cell<i32>,
    frames_run: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Frames run so far
    pub fn frames_run(&self) -> u64 {
        self.frames_run.get()
    }

    /// Run every callback queued before this call. Callbacks requested while
    /// running land in the following frame, like `requestAnimationFrame`.
    /// Returns the number of callbacks run.
    pub fn run_frame(&self, time: f64) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let count = due.len();
        for (_, callback) in due {
            callback(time);
        }
        self.frames_run.set(self.frames_run.get() + 1);
        count
    }

    /// Pump frames at a fixed interval until nothing is pending or
    /// `max_frames` have run. Returns the number of frames run.
    pub fn run_until_idle(&self, frame_ms: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.pending() > 0 && frames < max_frames {
            let time = self.frames_run.get() as f64 * frame_ms;
            self.run_frame(time);
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let id = self.next_handle.get() + 1;
        self.next_handle.set(id);
        let handle = FrameHandle(id);
        self.pending.borrow_mut().push((handle, callback));
        Some(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_callbacks_run_once() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        scheduler.request_frame(Box::new(move |_| h.set(h.get() + 1)));
        assert_eq!(scheduler.run_frame(16.0), 1);
        assert_eq!(scheduler.run_frame(32.0), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_cancel_frame() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let handle = scheduler
            .request_frame(Box::new(move |_| h.set(h.get() + 1)))
            .unwrap();
        scheduler.cancel_frame(handle);
        // Cancelling twice is harmless
        scheduler.cancel_frame(handle);
        assert_eq!(scheduler.pending(), 0);
        scheduler.run_frame(16.0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_handles_are_unique() {
        let scheduler = ManualScheduler::new();
        let a = scheduler.request_frame(Box::new(|_| {}));
        let b = scheduler.request_frame(Box::new(|_| {}));
        assert_ne!(a, b);
    }

    #[test]
    fn test_timestamp_passed_through() {
        let scheduler = ManualScheduler::new();
        let seen = Rc::new(Cell::new(0.0));
        let s = seen.clone();
        scheduler.request_frame(Box::new(move |t| s.set(t)));
        scheduler.run_frame(123.5);
        assert_eq!(seen.get(), 123.5);
    }
}
