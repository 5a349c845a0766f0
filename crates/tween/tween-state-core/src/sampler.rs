//! Sampling: the visible value of a tweened field at a point in time.

use crate::error::TweenError;
use crate::fields::{resolve, Locator};
use crate::queue::TweenState;

/// Effective value of `field` at `now`.
///
/// The resting value already holds the latest end value; every request on
/// the same `(container, field)` adds the distance it still has to travel.
/// Before a delayed request starts it contributes its full begin offset,
/// and once finished it contributes nothing. Pure: reads `state` only.
pub fn sample<S: TweenState>(
    locator: &Locator<S>,
    field: &str,
    state: &S,
    now: f64,
) -> Result<f64, TweenError> {
    let container = resolve(locator, state)?;
    let resting = container
        .get(field)
        .ok_or_else(|| TweenError::UnknownField {
            field: field.to_string(),
            container: container.id(),
        })?;
    let offset: f64 = state
        .tween_queue()
        .for_target(state, container.id(), field)
        .map(|r| r.offset_at(now))
        .sum();
    Ok(resting + offset)
}
