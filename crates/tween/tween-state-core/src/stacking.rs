//! Stacking: how a new tween interacts with tweens already queued on the
//! same target.

use crate::ids::ContainerId;
use crate::queue::{TweenQueue, TweenState};
use crate::request::{StackBehavior, TweenRequest};

/// Queue to append `incoming` to.
///
/// `container` is the id `incoming`'s locator resolves to in `state`, the
/// state at the moment of registration. Existing requests are matched by
/// evaluating their own locators against that same state, so two requests
/// with equal field names on different containers never interfere.
pub fn apply<S: TweenState>(
    queue: &TweenQueue<S>,
    incoming: &TweenRequest<S>,
    container: ContainerId,
    state: &S,
) -> TweenQueue<S> {
    match incoming.stack_behavior {
        StackBehavior::Additive => queue.clone(),
        StackBehavior::Destructive => queue.without_target(state, container, &incoming.field),
    }
}
