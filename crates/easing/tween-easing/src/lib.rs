//! tween-easing
//!
//! Named easing curves used by `tween-state`. Each curve has the signature
//! `(elapsed, begin, end, duration) -> value`; see [`functions`] for the
//! raw functions and [`Easing`] for the serializable, name-addressable set.

pub mod functions;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Raw easing signature: `(elapsed, begin, end, duration) -> value`.
pub type EasingFn = fn(f64, f64, f64, f64) -> f64;

/// A named easing curve, or a user supplied one.
///
/// Named variants serialize as their camelCase name (`"easeInOutQuad"`),
/// matching the names the tween-functions family has always used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    #[default]
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
    /// Caller supplied curve. Not serializable.
    #[serde(skip)]
    Custom(EasingFn),
}

/// Every named curve with its canonical name, in declaration order.
pub const NAMED: &[(&str, Easing)] = &[
    ("linear", Easing::Linear),
    ("easeInQuad", Easing::EaseInQuad),
    ("easeOutQuad", Easing::EaseOutQuad),
    ("easeInOutQuad", Easing::EaseInOutQuad),
    ("easeInCubic", Easing::EaseInCubic),
    ("easeOutCubic", Easing::EaseOutCubic),
    ("easeInOutCubic", Easing::EaseInOutCubic),
    ("easeInQuart", Easing::EaseInQuart),
    ("easeOutQuart", Easing::EaseOutQuart),
    ("easeInOutQuart", Easing::EaseInOutQuart),
    ("easeInQuint", Easing::EaseInQuint),
    ("easeOutQuint", Easing::EaseOutQuint),
    ("easeInOutQuint", Easing::EaseInOutQuint),
    ("easeInSine", Easing::EaseInSine),
    ("easeOutSine", Easing::EaseOutSine),
    ("easeInOutSine", Easing::EaseInOutSine),
    ("easeInExpo", Easing::EaseInExpo),
    ("easeOutExpo", Easing::EaseOutExpo),
    ("easeInOutExpo", Easing::EaseInOutExpo),
    ("easeInCirc", Easing::EaseInCirc),
    ("easeOutCirc", Easing::EaseOutCirc),
    ("easeInOutCirc", Easing::EaseInOutCirc),
    ("easeInElastic", Easing::EaseInElastic),
    ("easeOutElastic", Easing::EaseOutElastic),
    ("easeInOutElastic", Easing::EaseInOutElastic),
    ("easeInBack", Easing::EaseInBack),
    ("easeOutBack", Easing::EaseOutBack),
    ("easeInOutBack", Easing::EaseInOutBack),
    ("easeInBounce", Easing::EaseInBounce),
    ("easeOutBounce", Easing::EaseOutBounce),
    ("easeInOutBounce", Easing::EaseInOutBounce),
];

/// Returned when a name matches no entry in [`NAMED`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown easing: {name}")]
pub struct UnknownEasing {
    pub name: String,
}

impl Easing {
    /// Look up a named curve.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED
            .iter()
            .find_map(|(n, e)| if *n == name { Some(*e) } else { None })
    }

    /// Canonical name, or `None` for custom curves.
    pub fn name(&self) -> Option<&'static str> {
        NAMED
            .iter()
            .find_map(|(n, e)| if e == self { Some(*n) } else { None })
    }

    /// The raw function behind this curve.
    pub fn function(&self) -> EasingFn {
        use functions::*;
        match self {
            Easing::Linear => linear,
            Easing::EaseInQuad => ease_in_quad,
            Easing::EaseOutQuad => ease_out_quad,
            Easing::EaseInOutQuad => ease_in_out_quad,
            Easing::EaseInCubic => ease_in_cubic,
            Easing::EaseOutCubic => ease_out_cubic,
            Easing::EaseInOutCubic => ease_in_out_cubic,
            Easing::EaseInQuart => ease_in_quart,
            Easing::EaseOutQuart => ease_out_quart,
            Easing::EaseInOutQuart => ease_in_out_quart,
            Easing::EaseInQuint => ease_in_quint,
            Easing::EaseOutQuint => ease_out_quint,
            Easing::EaseInOutQuint => ease_in_out_quint,
            Easing::EaseInSine => ease_in_sine,
            Easing::EaseOutSine => ease_out_sine,
            Easing::EaseInOutSine => ease_in_out_sine,
            Easing::EaseInExpo => ease_in_expo,
            Easing::EaseOutExpo => ease_out_expo,
            Easing::EaseInOutExpo => ease_in_out_expo,
            Easing::EaseInCirc => ease_in_circ,
            Easing::EaseOutCirc => ease_out_circ,
            Easing::EaseInOutCirc => ease_in_out_circ,
            Easing::EaseInElastic => ease_in_elastic,
            Easing::EaseOutElastic => ease_out_elastic,
            Easing::EaseInOutElastic => ease_in_out_elastic,
            Easing::EaseInBack => ease_in_back,
            Easing::EaseOutBack => ease_out_back,
            Easing::EaseInOutBack => ease_in_out_back,
            Easing::EaseInBounce => ease_in_bounce,
            Easing::EaseOutBounce => ease_out_bounce,
            Easing::EaseInOutBounce => ease_in_out_bounce,
            Easing::Custom(f) => *f,
        }
    }

    /// Evaluate the curve at `elapsed` of `duration`.
    #[inline]
    pub fn apply(&self, elapsed: f64, begin: f64, end: f64, duration: f64) -> f64 {
        (self.function())(elapsed, begin, end, duration)
    }
}

impl From<EasingFn> for Easing {
    fn from(f: EasingFn) -> Self {
        Easing::Custom(f)
    }
}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::from_name(s).ok_or_else(|| UnknownEasing {
            name: s.to_string(),
        })
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("custom"))
    }
}
