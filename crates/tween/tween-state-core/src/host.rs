//! The host contract: what the engine needs from the component it animates,
//! plus an in-memory host used by [`Component`](crate::component::Component)
//! and the tests.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::TweenError;
use crate::queue::TweenState;
use crate::update::StateUpdate;

/// Services the engine consumes from its host component.
pub trait Host {
    type State: TweenState;

    /// Committed state, the one renders read.
    fn state(&self) -> &Self::State;

    /// State with not-yet-committed updates applied, if a batch is open.
    fn pending_state(&self) -> Option<&Self::State> {
        None
    }

    /// Pending state if any, else committed. Registrations read this so that
    /// several issued in one batch see each other.
    fn latest_state(&self) -> &Self::State {
        self.pending_state().unwrap_or_else(|| self.state())
    }

    /// Merge an update into state and schedule a re-render.
    fn commit(&mut self, update: StateUpdate<Self::State>) -> Result<(), TweenError>;

    /// False once the component is torn down.
    fn is_live(&self) -> bool;

    /// Arrange for exactly one call to
    /// [`TweenEngine::on_frame`](crate::engine::TweenEngine::on_frame)
    /// before the next repaint.
    fn schedule_frame(&mut self);

    /// Current time in milliseconds.
    fn now(&self) -> f64;
}

/// Shared liveness flag. Clones observe the same flag, so a callback can
/// hold one and tear the component down from inside a tick.
#[derive(Clone, Debug)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.0.get()
    }

    pub fn kill(&self) {
        self.0.set(false);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory host: committed state, an optional batch, a liveness flag, a
/// frame request counter and a render counter.
#[derive(Debug)]
pub struct ComponentHost<S, C = SystemClock> {
    committed: S,
    pending: Option<S>,
    liveness: Liveness,
    pending_frames: u32,
    frames_requested: u64,
    renders: u64,
    clock: C,
}

impl<S: TweenState, C: Clock> ComponentHost<S, C> {
    pub fn new(state: S, clock: C) -> Self {
        Self {
            committed: state,
            pending: None,
            liveness: Liveness::new(),
            pending_frames: 0,
            frames_requested: 0,
            renders: 0,
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    /// Tear the component down. Pending frames are dropped.
    pub fn unmount(&mut self) {
        debug!("component unmounted");
        self.liveness.kill();
        self.pending = None;
        self.pending_frames = 0;
    }

    /// Open a batch: commits land in a pending copy until
    /// [`end_batch`](Self::end_batch). Nested calls join the open batch.
    pub fn begin_batch(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.committed.clone());
        }
    }

    /// Commit the pending copy with a single render.
    pub fn end_batch(&mut self) {
        if let Some(state) = self.pending.take() {
            self.committed = state;
            self.renders += 1;
        }
    }

    pub fn in_batch(&self) -> bool {
        self.pending.is_some()
    }

    /// Host-side mutation outside the tween engine.
    pub fn set_state(&mut self, f: impl FnOnce(&mut S)) {
        match self.pending.as_mut() {
            Some(pending) => f(pending),
            None => {
                f(&mut self.committed);
                self.renders += 1;
            }
        }
    }

    /// Replace the state wholesale; its queue goes with it.
    pub fn replace_state(&mut self, state: S) {
        match self.pending.as_mut() {
            Some(pending) => *pending = state,
            None => {
                self.committed = state;
                self.renders += 1;
            }
        }
    }

    /// Hand out the frame callbacks requested so far and reset the count.
    pub fn take_frame_requests(&mut self) -> u32 {
        std::mem::take(&mut self.pending_frames)
    }

    /// Total frames ever requested.
    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }
}

impl<S: TweenState, C: Clock> Host for ComponentHost<S, C> {
    type State = S;

    fn state(&self) -> &S {
        &self.committed
    }

    fn pending_state(&self) -> Option<&S> {
        self.pending.as_ref()
    }

    fn commit(&mut self, update: StateUpdate<S>) -> Result<(), TweenError> {
        match self.pending.as_mut() {
            Some(pending) => update.apply(pending),
            None => {
                update.apply(&mut self.committed)?;
                self.renders += 1;
                Ok(())
            }
        }
    }

    fn is_live(&self) -> bool {
        self.liveness.is_live()
    }

    fn schedule_frame(&mut self) {
        if !self.is_live() {
            warn!("frame requested on an unmounted component");
            return;
        }
        self.pending_frames += 1;
        self.frames_requested += 1;
    }

    fn now(&self) -> f64 {
        self.clock.now()
    }
}
