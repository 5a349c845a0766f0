//! State updates: the command buffer a host merges into its state.

use std::fmt;

use crate::error::TweenError;
use crate::fields::{resolve_mut, Locator};
use crate::queue::{TweenQueue, TweenState};

struct FieldWrite<S> {
    locator: Locator<S>,
    field: String,
    value: f64,
}

/// A partial update: resting-value writes plus an optional queue
/// replacement, applied together as one commit.
pub struct StateUpdate<S> {
    writes: Vec<FieldWrite<S>>,
    queue: Option<TweenQueue<S>>,
}

impl<S: TweenState> StateUpdate<S> {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            queue: None,
        }
    }

    /// Set `field` in the container `locator` resolves to.
    pub fn write(mut self, locator: Locator<S>, field: impl Into<String>, value: f64) -> Self {
        self.writes.push(FieldWrite {
            locator,
            field: field.into(),
            value,
        });
        self
    }

    /// Replace the tween queue.
    pub fn queue(mut self, queue: TweenQueue<S>) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.queue.is_none()
    }

    /// Merge into `state`. Writes are resolved first; if any locator fails
    /// nothing is applied.
    pub fn apply(self, state: &mut S) -> Result<(), TweenError> {
        for w in &self.writes {
            if w.locator.locate(state).is_none() {
                return Err(TweenError::UnresolvedLocator {
                    locator: w.locator.label().to_string(),
                });
            }
        }
        for w in self.writes {
            resolve_mut(&w.locator, state)?.set(w.field, w.value);
        }
        if let Some(queue) = self.queue {
            *state.tween_queue_mut() = queue;
        }
        Ok(())
    }
}

impl<S: TweenState> Default for StateUpdate<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for StateUpdate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let writes: Vec<_> = self
            .writes
            .iter()
            .map(|w| (w.locator.label(), w.field.as_str(), w.value))
            .collect();
        f.debug_struct("StateUpdate")
            .field("writes", &writes)
            .field("queue", &self.queue.as_ref().map(TweenQueue::len))
            .finish()
    }
}
