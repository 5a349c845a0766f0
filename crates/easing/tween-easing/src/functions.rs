//! Easing curves in the classic Penner form.
//!
//! Every function maps `(elapsed, begin, end, duration)` to a value. At
//! `elapsed == 0` the result is `begin`, at `elapsed == duration` it is
//! `end`. Callers are expected to clamp `elapsed` into `[0, duration]` and
//! to keep `duration > 0`; a zero duration divides by zero.

use std::f64::consts::PI;

const BACK_OVERSHOOT: f64 = 1.70158;

#[inline]
pub fn linear(t: f64, b: f64, e: f64, d: f64) -> f64 {
    (e - b) * t / d + b
}

#[inline]
pub fn ease_in_quad(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let t = t / d;
    (e - b) * t * t + b
}

#[inline]
pub fn ease_out_quad(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let t = t / d;
    -(e - b) * t * (t - 2.0) + b
}

#[inline]
pub fn ease_in_out_quad(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let c = e - b;
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    let t = t - 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

#[inline]
pub fn ease_in_cubic(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let t = t / d;
    (e - b) * t * t * t + b
}

#[inline]
pub fn ease_out_cubic(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    (e - b) * (t * t * t + 1.0) + b
}

#[inline]
pub fn ease_in_out_cubic(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let c = e - b;
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t * t + b;
    }
    let t = t - 2.0;
    c / 2.0 * (t * t * t + 2.0) + b
}

#[inline]
pub fn ease_in_quart(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let t = t / d;
    (e - b) * t.powi(4) + b
}

#[inline]
pub fn ease_out_quart(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    -(e - b) * (t.powi(4) - 1.0) + b
}

#[inline]
pub fn ease_in_out_quart(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let c = e - b;
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t.powi(4) + b;
    }
    let t = t - 2.0;
    -c / 2.0 * (t.powi(4) - 2.0) + b
}

#[inline]
pub fn ease_in_quint(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let t = t / d;
    (e - b) * t.powi(5) + b
}

#[inline]
pub fn ease_out_quint(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    (e - b) * (t.powi(5) + 1.0) + b
}

#[inline]
pub fn ease_in_out_quint(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let c = e - b;
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t.powi(5) + b;
    }
    let t = t - 2.0;
    c / 2.0 * (t.powi(5) + 2.0) + b
}

#[inline]
pub fn ease_in_sine(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let c = e - b;
    -c * (t / d * (PI / 2.0)).cos() + c + b
}

#[inline]
pub fn ease_out_sine(t: f64, b: f64, e: f64, d: f64) -> f64 {
    (e - b) * (t / d * (PI / 2.0)).sin() + b
}

#[inline]
pub fn ease_in_out_sine(t: f64, b: f64, e: f64, d: f64) -> f64 {
    -(e - b) / 2.0 * ((PI * t / d).cos() - 1.0) + b
}

#[inline]
pub fn ease_in_expo(t: f64, b: f64, e: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    (e - b) * 2f64.powf(10.0 * (t / d - 1.0)) + b
}

#[inline]
pub fn ease_out_expo(t: f64, b: f64, e: f64, d: f64) -> f64 {
    if t == d {
        return e;
    }
    (e - b) * (-(2f64.powf(-10.0 * t / d)) + 1.0) + b
}

#[inline]
pub fn ease_in_out_expo(t: f64, b: f64, e: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    if t == d {
        return e;
    }
    let c = e - b;
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * 2f64.powf(10.0 * (t - 1.0)) + b;
    }
    c / 2.0 * (-(2f64.powf(-10.0 * (t - 1.0))) + 2.0) + b
}

#[inline]
pub fn ease_in_circ(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let t = t / d;
    -(e - b) * ((1.0 - t * t).sqrt() - 1.0) + b
}

#[inline]
pub fn ease_out_circ(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    (e - b) * (1.0 - t * t).sqrt() + b
}

#[inline]
pub fn ease_in_out_circ(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let c = e - b;
    let t = t / (d / 2.0);
    if t < 1.0 {
        return -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b;
    }
    let t = t - 2.0;
    c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
}

/// Amplitude and phase shift shared by the elastic curves.
#[inline]
fn elastic_shape(c: f64, period: f64) -> (f64, f64) {
    // Amplitude is pinned to the range, which fixes the phase at a quarter period.
    (c, period / 4.0)
}

#[inline]
pub fn ease_in_elastic(t: f64, b: f64, e: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    let c = e - b;
    let t = t / d;
    if t == 1.0 {
        return e;
    }
    let p = d * 0.3;
    let (a, s) = elastic_shape(c, p);
    let t = t - 1.0;
    -(a * 2f64.powf(10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin()) + b
}

#[inline]
pub fn ease_out_elastic(t: f64, b: f64, e: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    let c = e - b;
    let t = t / d;
    if t == 1.0 {
        return e;
    }
    let p = d * 0.3;
    let (a, s) = elastic_shape(c, p);
    a * 2f64.powf(-10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin() + c + b
}

#[inline]
pub fn ease_in_out_elastic(t: f64, b: f64, e: f64, d: f64) -> f64 {
    if t == 0.0 {
        return b;
    }
    let c = e - b;
    let t = t / (d / 2.0);
    if t == 2.0 {
        return e;
    }
    let p = d * (0.3 * 1.5);
    let (a, s) = elastic_shape(c, p);
    let t = t - 1.0;
    let wave = ((t * d - s) * (2.0 * PI) / p).sin();
    if t < 0.0 {
        return -0.5 * (a * 2f64.powf(10.0 * t) * wave) + b;
    }
    a * 2f64.powf(-10.0 * t) * wave * 0.5 + c + b
}

#[inline]
pub fn ease_in_back(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let s = BACK_OVERSHOOT;
    let t = t / d;
    (e - b) * t * t * ((s + 1.0) * t - s) + b
}

#[inline]
pub fn ease_out_back(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let s = BACK_OVERSHOOT;
    let t = t / d - 1.0;
    (e - b) * (t * t * ((s + 1.0) * t + s) + 1.0) + b
}

#[inline]
pub fn ease_in_out_back(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let c = e - b;
    let s = BACK_OVERSHOOT * 1.525;
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * (t * t * ((s + 1.0) * t - s)) + b;
    }
    let t = t - 2.0;
    c / 2.0 * (t * t * ((s + 1.0) * t + s) + 2.0) + b
}

#[inline]
pub fn ease_in_bounce(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let c = e - b;
    c - ease_out_bounce(d - t, 0.0, c, d) + b
}

pub fn ease_out_bounce(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let c = e - b;
    let t = t / d;
    if t < 1.0 / 2.75 {
        c * (7.5625 * t * t) + b
    } else if t < 2.0 / 2.75 {
        let t = t - 1.5 / 2.75;
        c * (7.5625 * t * t + 0.75) + b
    } else if t < 2.5 / 2.75 {
        let t = t - 2.25 / 2.75;
        c * (7.5625 * t * t + 0.9375) + b
    } else {
        let t = t - 2.625 / 2.75;
        c * (7.5625 * t * t + 0.984375) + b
    }
}

#[inline]
pub fn ease_in_out_bounce(t: f64, b: f64, e: f64, d: f64) -> f64 {
    let c = e - b;
    if t < d / 2.0 {
        return ease_in_bounce(t * 2.0, 0.0, c, d) * 0.5 + b;
    }
    ease_out_bounce(t * 2.0 - d, 0.0, c, d) * 0.5 + c * 0.5 + b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn quad_in_out_is_symmetric_at_midpoint() {
        approx(ease_in_out_quad(50.0, 0.0, 100.0, 100.0), 50.0, 1e-9);
        approx(ease_in_out_quad(25.0, 0.0, 100.0, 100.0), 12.5, 1e-9);
        approx(ease_in_out_quad(75.0, 0.0, 100.0, 100.0), 87.5, 1e-9);
    }

    #[test]
    fn back_overshoots_below_begin() {
        assert!(ease_in_back(20.0, 0.0, 1.0, 100.0) < 0.0);
        assert!(ease_out_back(80.0, 0.0, 1.0, 100.0) > 1.0);
    }

    #[test]
    fn bounce_halves_meet() {
        let left = ease_in_out_bounce(49.999_999, 0.0, 10.0, 100.0);
        let right = ease_in_out_bounce(50.0, 0.0, 10.0, 100.0);
        approx(left, right, 1e-4);
    }

    #[test]
    fn elastic_with_flat_range_stays_flat() {
        approx(ease_out_elastic(30.0, 4.0, 4.0, 100.0), 4.0, 1e-12);
        approx(ease_in_elastic(30.0, 4.0, 4.0, 100.0), 4.0, 1e-12);
    }
}
