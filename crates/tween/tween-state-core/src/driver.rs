//! Frame driver: the per-frame retire/commit/re-arm cycle.
//!
//! State machine per host: `Idle -> Armed -> Idle`. `start` arms one frame
//! only from `Idle`; a tick either re-arms (queue still had work) or drops
//! back to `Idle` (empty queue or dead host). Registrations made while
//! armed never schedule a second frame chain.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{CallbackFailure, TweenError};
use crate::fields::Target;
use crate::host::Host;
use crate::ids::TweenId;
use crate::queue::TweenState;
use crate::request::TweenConfig;
use crate::update::StateUpdate;

/// Registrations requested from inside an `on_end` callback.
pub(crate) type Deferred<S> = Vec<(Target<S>, TweenConfig<S>)>;

/// Handed to `on_end` callbacks.
///
/// Tweens registered here are applied right after the tick commits its
/// pruned queue, so they land in the same frame and are never dropped.
pub struct EndContext<'a, S> {
    now: f64,
    tween: TweenId,
    deferred: &'a mut Deferred<S>,
}

impl<'a, S> EndContext<'a, S> {
    pub(crate) fn new(now: f64, tween: TweenId, deferred: &'a mut Deferred<S>) -> Self {
        Self {
            now,
            tween,
            deferred,
        }
    }

    /// Tick time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// The tween that just ended.
    pub fn tween(&self) -> TweenId {
        self.tween
    }

    pub fn register_tween(&mut self, target: impl Into<Target<S>>, config: TweenConfig<S>) {
        self.deferred.push((target.into(), config));
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    #[default]
    Idle,
    Armed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Not armed, or the queue was empty: nothing committed, nothing armed.
    #[default]
    Idle,
    /// Host torn down: nothing committed, loop stopped.
    HostGone,
    /// Pruned queue committed and the next frame armed.
    Committed,
}

/// What one frame did.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub now: f64,
    /// Expired requests, in queue order.
    pub retired: Vec<TweenId>,
    /// Requests left in the queue after this tick.
    pub active: usize,
    pub failures: Vec<CallbackFailure>,
    /// Registrations from `on_end` callbacks that were rejected.
    pub rejected: Vec<TweenError>,
}

#[derive(Debug, Default)]
pub struct FrameDriver {
    state: DriverState,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Arm the first frame of a new activation. Returns false when already
    /// armed or when the host is gone.
    pub fn start<H: Host>(&mut self, host: &mut H) -> bool {
        if self.state == DriverState::Armed {
            trace!("frame driver already armed");
            return false;
        }
        if !host.is_live() {
            debug!("not arming frame driver: host is gone");
            return false;
        }
        self.state = DriverState::Armed;
        host.schedule_frame();
        debug!("frame driver armed");
        true
    }

    /// One frame. Returns the report plus any registrations requested by
    /// `on_end` callbacks, which the caller applies against the host.
    pub(crate) fn tick<H: Host>(&mut self, host: &mut H) -> (TickReport, Deferred<H::State>) {
        let mut deferred = Deferred::new();
        let now = host.now();
        let mut report = TickReport {
            now,
            ..TickReport::default()
        };

        if self.state == DriverState::Idle {
            trace!("frame delivered to idle driver; ignoring");
            return (report, deferred);
        }
        if !host.is_live() {
            debug!("host gone before tick; stopping frame loop");
            self.state = DriverState::Idle;
            report.outcome = TickOutcome::HostGone;
            return (report, deferred);
        }

        let (still_active, expired) = {
            let queue = host.latest_state().tween_queue();
            if queue.is_empty() {
                debug!("tween queue drained; frame driver idle");
                self.state = DriverState::Idle;
                return (report, deferred);
            }
            queue.partition_at(now)
        };
        trace!(
            "tick at {now}: {} active, {} expired",
            still_active.len(),
            expired.len()
        );
        // Idle while callbacks run; re-armed after the commit.
        self.state = DriverState::Idle;

        for request in &expired {
            report.retired.push(request.id);
            let Some(on_end) = &request.on_end else {
                continue;
            };
            let mut cx = EndContext::new(now, request.id, &mut deferred);
            if let Some(Err(err)) = on_end.fire(&mut cx) {
                warn!("on_end for tween {} on '{}' failed: {err:#}", request.id, request.field);
                report.failures.push(CallbackFailure {
                    tween: request.id,
                    field: request.field.clone(),
                    message: format!("{err:#}"),
                });
            }
        }

        // An on_end may have torn the host down.
        if !host.is_live() {
            debug!("host gone during on_end; dropping tick");
            report.outcome = TickOutcome::HostGone;
            deferred.clear();
            return (report, deferred);
        }

        report.active = still_active.len();
        if let Err(err) = host.commit(StateUpdate::new().queue(still_active)) {
            // A queue-only update writes no fields, so this is a host bug.
            warn!("committing pruned tween queue failed: {err}");
            report.rejected.push(err);
        }
        report.outcome = TickOutcome::Committed;
        self.state = DriverState::Armed;
        host.schedule_frame();
        (report, deferred)
    }
}
