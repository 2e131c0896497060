//! Confetti engine: owns the surface and schedules burst loops
//!
//! Every trigger spawns its own [`Burst`] and runs it as an independent
//! frame loop. The engine remembers the pending frame of each live burst so
//! teardown can cancel all of them.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::burst::{Burst, StepOutcome};
use super::scheduler::{FrameHandle, FrameScheduler};
use super::surface::Surface;
use crate::config::ConfettiConfig;

/// Identifier of one burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BurstId(pub u64);

/// Source of the logical viewport width used by the spawn policy
pub trait Viewport {
    fn inner_width(&self) -> f64;
}

/// Fixed-width viewport
impl Viewport for f64 {
    fn inner_width(&self) -> f64 {
        *self
    }
}

struct EngineState {
    rng: Pcg32,
    next_id: u64,
    /// Pending frame per live burst
    live: BTreeMap<BurstId, FrameHandle>,
    total_bursts: u64,
}

struct Inner<S, F> {
    surface: RefCell<S>,
    scheduler: F,
    viewport: Box<dyn Viewport>,
    config: ConfettiConfig,
    state: RefCell<EngineState>,
}

/// Cloneable handle to the confetti engine
pub struct ConfettiEngine<S, F> {
    inner: Rc<Inner<S, F>>,
}

impl<S, F> Clone for ConfettiEngine<S, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S, F> ConfettiEngine<S, F>
where
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    pub fn new(
        surface: S,
        scheduler: F,
        viewport: impl Viewport + 'static,
        config: ConfettiConfig,
        seed: u64,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                surface: RefCell::new(surface),
                scheduler,
                viewport: Box::new(viewport),
                config,
                state: RefCell::new(EngineState {
                    rng: Pcg32::seed_from_u64(seed),
                    next_id: 1,
                    live: BTreeMap::new(),
                    total_bursts: 0,
                }),
            }),
        }
    }

    /// Spawn a new burst, draw its first frame and schedule the rest.
    ///
    /// Bursts already in flight keep running on their own loops.
    pub fn trigger(&self) -> BurstId {
        let inner = &self.inner;
        let (surface_width, _) = inner.surface.borrow().size();
        let viewport_width = inner.viewport.inner_width();

        let (id, burst) = {
            let mut state = inner.state.borrow_mut();
            let id = BurstId(state.next_id);
            state.next_id += 1;
            state.total_bursts += 1;
            let burst = Burst::spawn(&mut state.rng, &inner.config, viewport_width, surface_width);
            (id, burst)
        };

        log::debug!(
            "Burst {} spawned {} particles (viewport {}, surface width {})",
            id.0,
            burst.len(),
            viewport_width,
            surface_width
        );

        Inner::run_frame(inner, id, burst);
        id
    }

    /// Cancel one burst's pending frame. Returns false if it already finished.
    pub fn cancel(&self, id: BurstId) -> bool {
        let handle = self.inner.state.borrow_mut().live.remove(&id);
        match handle {
            Some(handle) => {
                self.inner.scheduler.cancel_frame(handle);
                log::debug!("Burst {} cancelled", id.0);
                true
            }
            None => false,
        }
    }

    /// Cancel every pending frame (page teardown)
    pub fn cancel_all(&self) {
        let live = std::mem::take(&mut self.inner.state.borrow_mut().live);
        if !live.is_empty() {
            log::info!("Cancelling {} confetti burst(s)", live.len());
        }
        for handle in live.into_values() {
            self.inner.scheduler.cancel_frame(handle);
        }
    }

    /// Bursts with a frame still pending
    pub fn active_bursts(&self) -> usize {
        self.inner.state.borrow().live.len()
    }

    /// Bursts triggered since construction
    pub fn total_bursts(&self) -> u64 {
        self.inner.state.borrow().total_bursts
    }

    pub fn scheduler(&self) -> &F {
        &self.inner.scheduler
    }

    pub fn surface(&self) -> Ref<'_, S> {
        self.inner.surface.borrow()
    }

    /// Mutate the surface, e.g. to resize it with the viewport
    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut *self.inner.surface.borrow_mut())
    }
}

impl<S, F> Inner<S, F>
where
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    fn run_frame(this: &Rc<Self>, id: BurstId, mut burst: Burst) {
        // The handle that brought us here has fired
        this.state.borrow_mut().live.remove(&id);

        // Each step clears the whole surface, so while bursts overlap only
        // the one stepped last in a frame stays visible
        let outcome = burst.step(&mut *this.surface.borrow_mut());
        match outcome {
            StepOutcome::Continue => {
                let weak: Weak<Self> = Rc::downgrade(this);
                let requested = this.scheduler.request_frame(Box::new(move |_time| {
                    // Engine dropped: let the burst go with it
                    if let Some(inner) = weak.upgrade() {
                        Inner::run_frame(&inner, id, burst);
                    }
                }));
                match requested {
                    Some(handle) => {
                        this.state.borrow_mut().live.insert(id, handle);
                    }
                    None => log::warn!("Burst {} dropped: no frame available", id.0),
                }
            }
            StepOutcome::Finished => {
                log::debug!("Burst {} finished after {} frames", id.0, burst.frames());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confetti::scheduler::{FrameCallback, ManualScheduler};
    use crate::confetti::surface::RecordingSurface;

    fn engine(width: f64, height: f64) -> ConfettiEngine<RecordingSurface, ManualScheduler> {
        ConfettiEngine::new(
            RecordingSurface::new(width, height),
            ManualScheduler::new(),
            width,
            ConfettiConfig::default(),
            1234,
        )
    }

    #[test]
    fn test_trigger_draws_first_frame_immediately() {
        let engine = engine(1024.0, 768.0);
        engine.trigger();
        assert_eq!(engine.surface().clear_count(), 1);
        assert_eq!(engine.surface().last_frame().len(), 100);
        assert_eq!(engine.scheduler().pending(), 1);
        assert_eq!(engine.active_bursts(), 1);
    }

    #[test]
    fn test_mobile_viewport_batch() {
        let engine = engine(375.0, 667.0);
        engine.trigger();
        assert_eq!(engine.surface().last_frame().len(), 50);
    }

    #[test]
    fn test_viewport_independent_of_surface() {
        let engine = ConfettiEngine::new(
            RecordingSurface::new(1200.0, 800.0),
            ManualScheduler::new(),
            600.0,
            ConfettiConfig::default(),
            9,
        );
        engine.trigger();
        assert_eq!(engine.surface().last_frame().len(), 50);
    }

    #[test]
    fn test_loop_terminates_and_stops_clearing() {
        let engine = engine(1024.0, 768.0);
        engine.trigger();

        let frames = engine.scheduler().run_until_idle(16.0, 1000);
        assert!(frames > 0 && frames < 1000);
        assert_eq!(engine.scheduler().pending(), 0);
        assert_eq!(engine.active_bursts(), 0);

        let clears = engine.surface().clear_count();
        assert_eq!(clears, frames + 1);

        // Nothing left to run: further frames never touch the surface
        for i in 0..10 {
            engine.scheduler().run_frame(1000.0 + i as f64 * 16.0);
        }
        assert_eq!(engine.surface().clear_count(), clears);
    }

    #[test]
    fn test_overlapping_bursts_run_independently() {
        let engine = engine(1024.0, 768.0);
        let first = engine.trigger();
        engine.scheduler().run_frame(16.0);
        let second = engine.trigger();
        assert_ne!(first, second);
        assert_eq!(engine.active_bursts(), 2);
        assert_eq!(engine.scheduler().pending(), 2);

        engine.scheduler().run_until_idle(16.0, 1000);
        assert_eq!(engine.active_bursts(), 0);
        assert_eq!(engine.total_bursts(), 2);
    }

    #[test]
    fn test_overlapping_bursts_share_one_surface() {
        let engine = engine(1024.0, 768.0);
        engine.trigger();
        engine.trigger();
        engine.scheduler().run_frame(16.0);

        // Two frames in, no particle has faded or fallen out yet
        assert_eq!(engine.active_bursts(), 2);
        assert_eq!(engine.surface().clear_count(), 4);
        // The later burst's clear wiped the earlier one's circles
        assert_eq!(engine.surface().last_frame().len(), 100);
    }

    #[test]
    fn test_refused_frame_does_not_leave_burst_live() {
        let engine = ConfettiEngine::new(
            RecordingSurface::new(1024.0, 768.0),
            RefusingScheduler,
            1024.0,
            ConfettiConfig::default(),
            5,
        );
        engine.trigger();
        assert_eq!(engine.surface().clear_count(), 1);
        assert_eq!(engine.active_bursts(), 0);
        assert_eq!(engine.total_bursts(), 1);
        // Nothing to cancel either
        engine.cancel_all();
        assert_eq!(engine.active_bursts(), 0);
    }

    #[test]
    fn test_cancel_all_leaves_nothing_pending() {
        let engine = engine(1024.0, 768.0);
        engine.trigger();
        engine.trigger();
        engine.trigger();
        assert_eq!(engine.scheduler().pending(), 3);

        engine.cancel_all();
        assert_eq!(engine.scheduler().pending(), 0);
        assert_eq!(engine.active_bursts(), 0);

        let clears = engine.surface().clear_count();
        engine.scheduler().run_frame(16.0);
        assert_eq!(engine.surface().clear_count(), clears);
    }

    #[test]
    fn test_cancel_single_burst() {
        let engine = engine(1024.0, 768.0);
        let a = engine.trigger();
        let b = engine.trigger();
        assert!(engine.cancel(a));
        assert!(!engine.cancel(a));
        assert_eq!(engine.active_bursts(), 1);
        assert_eq!(engine.scheduler().pending(), 1);

        engine.scheduler().run_until_idle(16.0, 1000);
        assert!(!engine.cancel(b));
    }

    #[test]
    fn test_dropped_engine_drops_pending_burst() {
        let scheduler = Rc::new(ManualScheduler::new());
        let engine = ConfettiEngine::new(
            RecordingSurface::new(800.0, 600.0),
            SharedScheduler(scheduler.clone()),
            800.0,
            ConfettiConfig::default(),
            1,
        );
        engine.trigger();
        drop(engine);
        assert_eq!(scheduler.pending(), 1);
        // The callback runs but finds no engine, so nothing is rescheduled
        scheduler.run_frame(16.0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_zero_sized_surface_terminates() {
        let engine = engine(0.0, 0.0);
        engine.trigger();
        let frames = engine.scheduler().run_until_idle(16.0, 1000);
        assert!(frames < 10);
        assert_eq!(engine.active_bursts(), 0);
    }

    #[test]
    fn test_same_seed_same_burst() {
        let a = engine(1024.0, 768.0);
        let b = engine(1024.0, 768.0);
        a.trigger();
        b.trigger();
        assert_eq!(a.surface().ops(), b.surface().ops());
    }

    /// Lets a test keep its own handle to the scheduler
    struct SharedScheduler(Rc<ManualScheduler>);

    impl FrameScheduler for SharedScheduler {
        fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
            self.0.request_frame(callback)
        }

        fn cancel_frame(&self, handle: FrameHandle) {
            self.0.cancel_frame(handle)
        }
    }

    /// Refuses every frame request
    struct RefusingScheduler;

    impl FrameScheduler for RefusingScheduler {
        fn request_frame(&self, _callback: FrameCallback) -> Option<FrameHandle> {
            None
        }

        fn cancel_frame(&self, _handle: FrameHandle) {}
    }
}
