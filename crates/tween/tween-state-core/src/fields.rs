//! Field resolution: containers of numeric fields and the locators that find
//! them inside a state tree.
//!
//! A [`Locator`] is a typed accessor pair (`&S -> &FieldSet` and its `&mut`
//! twin). Nothing is addressed by path strings, and nothing holds a
//! reference into a state snapshot across operations: every lookup runs
//! against the state at hand.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::TweenError;
use crate::ids::ContainerId;
use crate::queue::TweenState;

/// A container of numeric fields with a stable identity.
///
/// `Clone` keeps the id: the clone is the same logical container in a newer
/// snapshot. Use [`FieldSet::new`] or [`FieldSet::detached`] when a new
/// logical container is wanted (e.g. a freshly inserted list item).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSet {
    id: ContainerId,
    values: HashMap<String, f64>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self {
            id: ContainerId::fresh(),
            values: HashMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: f64) -> Self {
        self.values.insert(field.into(), value);
        self
    }

    #[inline]
    pub fn id(&self) -> ContainerId {
        self.id
    }

    #[inline]
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }

    #[inline]
    pub fn set(&mut self, field: impl Into<String>, value: f64) {
        self.values.insert(field.into(), value);
    }

    #[inline]
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<f64> {
        self.values.remove(field)
    }

    /// Same values under a fresh identity.
    pub fn detached(&self) -> Self {
        Self {
            id: ContainerId::fresh(),
            values: self.values.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut set = FieldSet::new();
        for (k, v) in iter {
            set.set(k, v);
        }
        set
    }
}

type GetFn<S> = dyn for<'s> Fn(&'s S) -> Option<&'s FieldSet>;
type GetMutFn<S> = dyn for<'s> Fn(&'s mut S) -> Option<&'s mut FieldSet>;

/// Where in a state tree a tweened field lives.
///
/// Cheap to clone; clones share the accessor closures.
pub struct Locator<S> {
    get: Rc<GetFn<S>>,
    get_mut: Rc<GetMutFn<S>>,
    label: Option<Cow<'static, str>>,
}

impl<S: 'static> Locator<S> {
    /// Build a locator from a read accessor and its mutable twin. Both must
    /// address the same container.
    ///
    /// ```ignore
    /// let second = Locator::new(
    ///     |s: &App| s.items.get(1),
    ///     |s: &mut App| s.items.get_mut(1),
    /// );
    /// ```
    pub fn new<G, M>(get: G, get_mut: M) -> Self
    where
        G: for<'s> Fn(&'s S) -> Option<&'s FieldSet> + 'static,
        M: for<'s> Fn(&'s mut S) -> Option<&'s mut FieldSet> + 'static,
    {
        Self {
            get: Rc::new(get),
            get_mut: Rc::new(get_mut),
            label: None,
        }
    }

    #[inline]
    pub fn locate<'s>(&self, state: &'s S) -> Option<&'s FieldSet> {
        (self.get)(state)
    }

    #[inline]
    pub fn locate_mut<'s>(&self, state: &'s mut S) -> Option<&'s mut FieldSet> {
        (self.get_mut)(state)
    }

    /// Identity of the container this locator resolves to in `state`.
    #[inline]
    pub fn container_id(&self, state: &S) -> Option<ContainerId> {
        self.locate(state).map(FieldSet::id)
    }
}

impl<S> Locator<S> {
    /// Attach a human readable name used in errors and logs.
    pub fn labeled(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("<anonymous>")
    }
}

fn root_fields<S: TweenState>(state: &S) -> Option<&FieldSet> {
    Some(state.fields())
}

fn root_fields_mut<S: TweenState>(state: &mut S) -> Option<&mut FieldSet> {
    Some(state.fields_mut())
}

impl<S: TweenState> Locator<S> {
    /// The state's top-level field set.
    pub fn root() -> Self {
        Locator::new(root_fields::<S>, root_fields_mut::<S>).labeled("root")
    }
}

impl<S> Clone for Locator<S> {
    fn clone(&self) -> Self {
        Self {
            get: Rc::clone(&self.get),
            get_mut: Rc::clone(&self.get_mut),
            label: self.label.clone(),
        }
    }
}

impl<S> fmt::Debug for Locator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Locator").field(&self.label())
            .finish()
    }
}

/// Resolve the container a locator addresses. A locator that finds nothing
/// is a configuration error.
pub fn resolve<'s, S: 'static>(
    locator: &Locator<S>,
    state: &'s S,
) -> Result<&'s FieldSet, TweenError> {
    locator
        .locate(state)
        .ok_or_else(|| TweenError::UnresolvedLocator {
            locator: locator.label().to_string(),
        })
}

pub fn resolve_mut<'s, S: 'static>(
    locator: &Locator<S>,
    state: &'s mut S,
) -> Result<&'s mut FieldSet, TweenError> {
    let label = locator.label().to_string();
    locator
        .locate_mut(state)
        .ok_or(TweenError::UnresolvedLocator { locator: label })
}

/// A (locator, field) pair: the address of one tweenable value.
///
/// Plain strings convert into a root-level target, and `(locator, field)`
/// tuples into a nested one, so both call shapes read naturally:
/// `engine.register_tween(host, "x", cfg)` and
/// `engine.register_tween(host, (items.clone(), "x"), cfg)`.
pub struct Target<S> {
    pub locator: Locator<S>,
    pub field: String,
}

impl<S: 'static> Target<S> {
    pub fn new(locator: Locator<S>, field: impl Into<String>) -> Self {
        Self {
            locator,
            field: field.into(),
        }
    }
}

impl<S: TweenState> Target<S> {
    pub fn root(field: impl Into<String>) -> Self {
        Self::new(Locator::root(), field)
    }
}

impl<S> Clone for Target<S> {
    fn clone(&self) -> Self {
        Self {
            locator: self.locator.clone(),
            field: self.field.clone(),
        }
    }
}

impl<S> fmt::Debug for Target<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("locator", &self.locator)
            .field("field", &self.field)
            .finish()
    }
}

impl<S: TweenState> From<&str> for Target<S> {
    fn from(field: &str) -> Self {
        Target::root(field)
    }
}

impl<S: TweenState> From<String> for Target<S> {
    fn from(field: String) -> Self {
        Target::root(field)
    }
}

impl<S: 'static> From<(Locator<S>, &str)> for Target<S> {
    fn from((locator, field): (Locator<S>, &str)) -> Self {
        Target::new(locator, field)
    }
}

impl<S: 'static> From<(&Locator<S>, &str)> for Target<S> {
    fn from((locator, field): (&Locator<S>, &str)) -> Self {
        Target::new(locator.clone(), field)
    }
}
