//! Component: a host and its tween engine bundled as one attachable unit.

use crate::clock::{Clock, ManualClock, SystemClock};
use crate::config::EngineConfig;
use crate::driver::TickReport;
use crate::engine::{Registration, TweenEngine};
use crate::error::TweenError;
use crate::fields::Target;
use crate::host::{ComponentHost, Host, Liveness};
use crate::queue::TweenState;
use crate::request::TweenConfig;

#[derive(Debug)]
pub struct Component<S, C = SystemClock> {
    host: ComponentHost<S, C>,
    engine: TweenEngine,
}

impl<S: TweenState> Component<S, SystemClock> {
    /// Component on the wall clock with default engine settings.
    pub fn mount(state: S) -> Self {
        Self::new(state, SystemClock::new(), EngineConfig::default())
    }
}

impl<S: TweenState, C: Clock> Component<S, C> {
    pub fn new(state: S, clock: C, cfg: EngineConfig) -> Self {
        Self {
            host: ComponentHost::new(state, clock),
            engine: TweenEngine::new(cfg),
        }
    }

    /// Committed state.
    pub fn state(&self) -> &S {
        self.host.state()
    }

    pub fn host(&self) -> &ComponentHost<S, C> {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut ComponentHost<S, C> {
        &mut self.host
    }

    pub fn engine(&self) -> &TweenEngine {
        &self.engine
    }

    pub fn liveness(&self) -> Liveness {
        self.host.liveness()
    }

    pub fn unmount(&mut self) {
        self.host.unmount();
    }

    pub fn register_tween(
        &mut self,
        target: impl Into<Target<S>>,
        config: TweenConfig<S>,
    ) -> Result<Registration, TweenError> {
        self.engine.register_tween(&mut self.host, target, config)
    }

    pub fn sample_tween(&self, target: impl Into<Target<S>>) -> Result<f64, TweenError> {
        self.engine.sample_tween(&self.host, target)
    }

    /// Run `f` inside one batch: every commit it makes, tween registrations
    /// included, becomes visible in a single render at the end.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let opened = !self.host.in_batch();
        self.host.begin_batch();
        let out = f(self);
        if opened {
            self.host.end_batch();
        }
        out
    }

    /// Deliver the frame callbacks requested before this frame.
    pub fn frame(&mut self) -> Vec<TickReport> {
        let due = self.host.take_frame_requests();
        (0..due)
            .map(|_| self.engine.on_frame(&mut self.host))
            .collect()
    }
}

impl<S: TweenState> Component<S, ManualClock> {
    /// Move the manual clock forward and deliver one frame.
    pub fn advance(&mut self, dt: f64) -> Vec<TickReport> {
        self.host.clock().advance(dt);
        self.frame()
    }

    /// Step frames of `dt` until the frame loop stops or `max_frames` pass.
    /// Returns the number of frames delivered.
    pub fn run_until_idle(&mut self, dt: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames {
            if self.advance(dt).is_empty() {
                break;
            }
            frames += 1;
        }
        frames
    }
}
