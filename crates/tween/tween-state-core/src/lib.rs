//! tween-state core (host-agnostic)
//!
//! Animates numeric fields of a component's state by interpolating between
//! a begin and an end value over time. Tweens are queued inside the host
//! state, combined per target by a stacking policy, sampled on demand, and
//! retired by a self re-arming frame loop.
//!
//! Layout:
//! - `fields`: containers, locators, targets
//! - `request` / `queue` / `stacking`: the tween queue
//! - `sampler`: visible value at a timestamp
//! - `driver`: per-frame retire/commit/re-arm
//! - `engine`: public surface; `host` / `component`: the host contract and
//!   an in-memory host

pub mod clock;
pub mod component;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod fields;
pub mod host;
pub mod ids;
pub mod queue;
pub mod request;
pub mod sampler;
pub mod stacking;
pub mod update;

// Re-exports for consumers
pub use clock::{Clock, ManualClock, SystemClock};
pub use component::Component;
pub use config::EngineConfig;
pub use driver::{DriverState, EndContext, FrameDriver, TickOutcome, TickReport};
pub use engine::{Registration, TweenEngine};
pub use error::{CallbackFailure, TweenError};
pub use fields::{resolve, FieldSet, Locator, Target};
pub use host::{ComponentHost, Host, Liveness};
pub use ids::{ContainerId, TweenId};
pub use queue::{TweenQueue, TweenState};
pub use request::{OnEnd, StackBehavior, TweenConfig, TweenRequest};
pub use sampler::sample;
pub use tween_easing::{Easing, EasingFn};
pub use update::StateUpdate;
