//! Identifiers for containers and tween requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of a [`FieldSet`](crate::fields::FieldSet).
///
/// Identity survives cloning, so a container keeps its id across state
/// snapshots; only a freshly built container gets a new one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub Uuid);

impl ContainerId {
    #[inline]
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TweenId(pub u32);

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for TweenId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_tween: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_tween(&mut self) -> TweenId {
        let id = TweenId(self.next_tween);
        self.next_tween = self.next_tween.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_tween(), TweenId(0));
        assert_eq!(alloc.alloc_tween(), TweenId(1));
        assert_eq!(alloc.alloc_tween().to_string(), "#2");
    }

    #[test]
    fn fresh_container_ids_differ() {
        assert_ne!(ContainerId::fresh(), ContainerId::fresh());
    }
}
