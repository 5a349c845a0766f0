//! Engine: the public surface attached to a host component.
//!
//! Methods:
//! - register_tween (queue manager), sample_tween (sampler), on_frame (frame driver)

use log::{debug, warn};

use crate::config::EngineConfig;
use crate::driver::{DriverState, FrameDriver, TickOutcome, TickReport};
use crate::error::TweenError;
use crate::fields::{resolve, Target};
use crate::host::Host;
use crate::ids::{IdAllocator, TweenId};
use crate::queue::TweenState;
use crate::request::{TweenConfig, TweenRequest};
use crate::sampler::sample;
use crate::stacking;
use crate::update::StateUpdate;

/// Result of a registration that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    Queued(TweenId),
    /// Host already torn down; nothing was written.
    HostGone,
}

/// Tween engine for one host component.
///
/// Holds no animation data of its own: the queue lives in the host state.
/// What it does keep is the defaults, the id allocator and the frame driver
/// flag.
#[derive(Debug, Default)]
pub struct TweenEngine {
    cfg: EngineConfig,
    ids: IdAllocator,
    driver: FrameDriver,
}

impl TweenEngine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            driver: FrameDriver::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn driver_state(&self) -> DriverState {
        self.driver.state()
    }

    /// Queue a tween on `target` (a field name for the root container, or a
    /// `(locator, field)` pair).
    ///
    /// The field's resting value is set to the end value straight away, in
    /// the same commit that stores the new queue. Registering while the
    /// frame loop is idle arms it; while armed, no second chain is started.
    pub fn register_tween<H: Host>(
        &mut self,
        host: &mut H,
        target: impl Into<Target<H::State>>,
        config: TweenConfig<H::State>,
    ) -> Result<Registration, TweenError> {
        let target = target.into();
        if !host.is_live() {
            debug!("dropping tween on '{}': host is gone", target.field);
            return Ok(Registration::HostGone);
        }

        let now = host.now();
        let state = host.latest_state();
        let container = resolve(&target.locator, state)?;
        let (container_id, resting) = (container.id(), container.get(&target.field));

        let request = TweenRequest::normalize(
            self.ids.alloc_tween(),
            target,
            config,
            resting,
            container_id,
            now,
            &self.cfg,
        )?;
        let id = request.id;

        let current = state.tween_queue();
        let mut queue = stacking::apply(current, &request, container_id, state);
        let evicted = current.len() - queue.len();
        if evicted > 0 {
            debug!("tween {id} on '{}' evicted {evicted} request(s)", request.field);
        }

        let update = StateUpdate::new().write(
            request.locator.clone(),
            request.field.clone(),
            request.end_value,
        );
        queue.push(request);
        host.commit(update.queue(queue))?;

        // The queue may be non-empty here while idle (a restored snapshot).
        if self.driver.state() == DriverState::Idle {
            self.driver.start(host);
        }
        Ok(Registration::Queued(id))
    }

    /// Current interpolated value of `target`, read from committed state.
    pub fn sample_tween<H: Host>(
        &self,
        host: &H,
        target: impl Into<Target<H::State>>,
    ) -> Result<f64, TweenError> {
        let target = target.into();
        sample(&target.locator, &target.field, host.state(), host.now())
    }

    /// Frame callback: retire expired tweens, commit, re-arm.
    ///
    /// Tweens registered from `on_end` callbacks are queued after the commit
    /// of this same tick.
    pub fn on_frame<H: Host>(&mut self, host: &mut H) -> TickReport {
        let (mut report, deferred) = self.driver.tick(host);
        if report.outcome != TickOutcome::Committed {
            return report;
        }
        for (target, config) in deferred {
            let field = target.field.clone();
            match self.register_tween(host, target, config) {
                Ok(_) => {}
                Err(err) => {
                    warn!("tween on '{field}' registered from on_end rejected: {err}");
                    report.rejected.push(err);
                }
            }
        }
        report.active = host.latest_state().tween_queue().len();
        report
    }
}
