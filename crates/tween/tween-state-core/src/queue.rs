//! The tween queue and the state contract that carries it.

use std::fmt;

use crate::fields::FieldSet;
use crate::ids::{ContainerId, TweenId};
use crate::request::TweenRequest;

/// Host state that can be tweened.
///
/// The queue lives inside the state so that a snapshot and its queue are
/// versioned together; replacing the state wholesale replaces the queue too.
/// The `tween_queue` accessors are the reserved slot for it: only the engine
/// writes through them.
pub trait TweenState: Clone + 'static {
    /// Top-level field set, addressed by [`Locator::root`](crate::fields::Locator::root).
    fn fields(&self) -> &FieldSet;
    fn fields_mut(&mut self) -> &mut FieldSet;

    fn tween_queue(&self) -> &TweenQueue<Self>;
    fn tween_queue_mut(&mut self) -> &mut TweenQueue<Self>;
}

/// Ordered active tweens. Insertion order is the summation order and the
/// `on_end` firing order.
pub struct TweenQueue<S> {
    items: Vec<TweenRequest<S>>,
}

impl<S> TweenQueue<S> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TweenRequest<S>> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<TweenId> {
        self.items.iter().map(|r| r.id).collect()
    }

    pub(crate) fn push(&mut self, request: TweenRequest<S>) {
        self.items.push(request);
    }
}

impl<S: TweenState> TweenQueue<S> {
    /// Requests that, evaluated against `state`, animate `(container, field)`.
    pub fn for_target<'q>(
        &'q self,
        state: &'q S,
        container: ContainerId,
        field: &'q str,
    ) -> impl Iterator<Item = &'q TweenRequest<S>> + 'q {
        self.items
            .iter()
            .filter(move |r| r.targets(state, container, field))
    }

    /// Copy without the requests that animate `(container, field)` in `state`.
    pub(crate) fn without_target(&self, state: &S, container: ContainerId, field: &str) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|r| !r.targets(state, container, field))
                .cloned()
                .collect(),
        }
    }

    /// Split into (still active, expired) against a single `now`.
    pub(crate) fn partition_at(&self, now: f64) -> (Self, Vec<TweenRequest<S>>) {
        let (active, expired): (Vec<_>, Vec<_>) =
            self.items.iter().cloned().partition(|r| r.is_active_at(now));
        (Self { items: active }, expired)
    }
}

impl<S> Default for TweenQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for TweenQueue<S> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<S> fmt::Debug for TweenQueue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<'q, S> IntoIterator for &'q TweenQueue<S> {
    type Item = &'q TweenRequest<S>;
    type IntoIter = std::slice::Iter<'q, TweenRequest<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
