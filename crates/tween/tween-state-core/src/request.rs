//! Tween configuration as supplied by callers, and the normalized request
//! the engine stores in the queue.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tween_easing::Easing;

use crate::config::EngineConfig;
use crate::driver::EndContext;
use crate::error::TweenError;
use crate::fields::{Locator, Target};
use crate::ids::{ContainerId, TweenId};

/// How a new tween treats tweens already running on the same target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StackBehavior {
    /// Coexist; contributions sum.
    #[default]
    Additive,
    /// Evict every existing tween on the same target.
    Destructive,
}

type EndFn<S> = Box<dyn FnOnce(&mut EndContext<'_, S>) -> anyhow::Result<()>>;

/// Completion callback. Fires at most once no matter how many queue
/// snapshots share it.
///
/// Failures are reported by returning `Err`; they are logged and collected
/// in the tick report. A panic unwinds out of the frame and drops that
/// tick's commit.
pub struct OnEnd<S> {
    slot: Rc<RefCell<Option<EndFn<S>>>>,
}

impl<S> OnEnd<S> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut EndContext<'_, S>) -> anyhow::Result<()> + 'static,
    {
        Self {
            slot: Rc::new(RefCell::new(Some(Box::new(f)))),
        }
    }

    /// Run the callback if it has not run yet.
    pub(crate) fn fire(&self, cx: &mut EndContext<'_, S>) -> Option<anyhow::Result<()>> {
        // The slot borrow ends before the call so the callback may touch clones.
        let f = self.slot.borrow_mut().take();
        f.map(|f| f(cx))
    }

    pub fn is_spent(&self) -> bool {
        self.slot.borrow().is_none()
    }
}

impl<S> Clone for OnEnd<S> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<S> fmt::Debug for OnEnd<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnEnd")
            .field("spent", &self.is_spent())
            .finish()
    }
}

/// Options for one tween. Everything but `end_value` is optional and falls
/// back to the [`EngineConfig`] defaults (or, for `begin_value`, to the
/// field's resting value).
///
/// Deserializes from the camelCase option names (`endValue`, `beginValue`,
/// `stackBehavior`, ...); `on_end` can only be attached in code.
#[derive(Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TweenConfig<S> {
    pub easing: Option<Easing>,
    pub duration: Option<f64>,
    pub delay: Option<f64>,
    pub begin_value: Option<f64>,
    pub end_value: Option<f64>,
    #[serde(skip)]
    pub on_end: Option<OnEnd<S>>,
    pub stack_behavior: Option<StackBehavior>,
}

impl<S> TweenConfig<S> {
    /// Tween towards `end`.
    pub fn to(end: f64) -> Self {
        Self {
            end_value: Some(end),
            ..Self::default()
        }
    }

    pub fn from(mut self, begin: f64) -> Self {
        self.begin_value = Some(begin);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn duration(mut self, ms: f64) -> Self {
        self.duration = Some(ms);
        self
    }

    pub fn delay(mut self, ms: f64) -> Self {
        self.delay = Some(ms);
        self
    }

    pub fn stack(mut self, behavior: StackBehavior) -> Self {
        self.stack_behavior = Some(behavior);
        self
    }

    pub fn on_end<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut EndContext<'_, S>) -> anyhow::Result<()> + 'static,
    {
        self.on_end = Some(OnEnd::new(f));
        self
    }
}

impl<S> Default for TweenConfig<S> {
    fn default() -> Self {
        Self {
            easing: None,
            duration: None,
            delay: None,
            begin_value: None,
            end_value: None,
            on_end: None,
            stack_behavior: None,
        }
    }
}

impl<S> fmt::Debug for TweenConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenConfig")
            .field("easing", &self.easing)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("begin_value", &self.begin_value)
            .field("end_value", &self.end_value)
            .field("on_end", &self.on_end)
            .field("stack_behavior", &self.stack_behavior)
            .finish()
    }
}

/// A normalized tween as stored in the queue.
pub struct TweenRequest<S> {
    pub id: TweenId,
    pub locator: Locator<S>,
    pub field: String,
    pub easing: Easing,
    pub duration: f64,
    pub delay: f64,
    pub begin_value: f64,
    pub end_value: f64,
    pub on_end: Option<OnEnd<S>>,
    pub stack_behavior: StackBehavior,
    /// Registration time + delay; progress is measured from here.
    pub init_time: f64,
}

impl<S: 'static> TweenRequest<S> {
    /// Apply defaults and validate. `resting` is the field's present value
    /// (absent if the container has no such field yet).
    pub(crate) fn normalize(
        id: TweenId,
        target: Target<S>,
        config: TweenConfig<S>,
        resting: Option<f64>,
        container: ContainerId,
        now: f64,
        defaults: &EngineConfig,
    ) -> Result<Self, TweenError> {
        let Target { locator, field } = target;

        let end_value = config
            .end_value
            .ok_or_else(|| TweenError::MissingEndValue {
                field: field.clone(),
            })?;
        let begin_value = match config.begin_value.or(resting) {
            Some(v) => v,
            None => return Err(TweenError::UnknownField { field, container }),
        };
        for value in [begin_value, end_value] {
            if !value.is_finite() {
                return Err(TweenError::InvalidValue { field, value });
            }
        }

        let duration = config.duration.unwrap_or(defaults.default_duration);
        if !duration.is_finite() || duration < 0.0 {
            return Err(TweenError::InvalidDuration { field, duration });
        }
        let delay = config.delay.unwrap_or(defaults.default_delay);
        if !delay.is_finite() || delay < 0.0 {
            return Err(TweenError::InvalidDelay { field, delay });
        }

        Ok(Self {
            id,
            locator,
            field,
            easing: config.easing.unwrap_or(defaults.default_easing),
            duration,
            delay,
            begin_value,
            end_value,
            on_end: config.on_end,
            stack_behavior: config
                .stack_behavior
                .unwrap_or(defaults.default_stack_behavior),
            init_time: now + delay,
        })
    }

    /// Does this request animate `(container, field)` when evaluated against
    /// `state`? A locator that no longer resolves matches nothing.
    pub fn targets(&self, state: &S, container: ContainerId, field: &str) -> bool {
        self.field == field && self.locator.container_id(state) == Some(container)
    }
}

impl<S> TweenRequest<S> {
    /// Still running at `now`. Delayed requests count as active.
    #[inline]
    pub fn is_active_at(&self, now: f64) -> bool {
        now - self.init_time < self.duration
    }

    /// Elapsed time clamped into `[0, duration]`.
    #[inline]
    pub fn elapsed_at(&self, now: f64) -> f64 {
        (now - self.init_time).clamp(0.0, self.duration)
    }

    /// Fraction of the duration covered at `now`, in `[0, 1]`.
    pub fn progress_at(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return if now < self.init_time { 0.0 } else { 1.0 };
        }
        self.elapsed_at(now) / self.duration
    }

    /// Interpolated value of this request alone at `now`.
    pub fn value_at(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            // Zero-length tweens jump once their delay has passed.
            return if now < self.init_time {
                self.begin_value
            } else {
                self.end_value
            };
        }
        self.easing.apply(
            self.elapsed_at(now),
            self.begin_value,
            self.end_value,
            self.duration,
        )
    }

    /// Distance still to travel at `now`, measured from the end value. The
    /// resting field already holds `end_value`, so the visible value is the
    /// resting value plus the offsets of every request on the target.
    #[inline]
    pub fn offset_at(&self, now: f64) -> f64 {
        self.value_at(now) - self.end_value
    }
}

impl<S> Clone for TweenRequest<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            locator: self.locator.clone(),
            field: self.field.clone(),
            easing: self.easing,
            duration: self.duration,
            delay: self.delay,
            begin_value: self.begin_value,
            end_value: self.end_value,
            on_end: self.on_end.clone(),
            stack_behavior: self.stack_behavior,
            init_time: self.init_time,
        }
    }
}

impl<S> fmt::Debug for TweenRequest<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenRequest")
            .field("id", &self.id)
            .field("locator", &self.locator)
            .field("field", &self.field)
            .field("easing", &self.easing)
            .field("duration", &self.duration)
            .field("begin_value", &self.begin_value)
            .field("end_value", &self.end_value)
            .field("stack_behavior", &self.stack_behavior)
            .field("init_time", &self.init_time)
            .finish_non_exhaustive()
    }
}
