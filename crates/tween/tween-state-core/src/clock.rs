//! Time sources. All engine time is in milliseconds as `f64`.

use std::cell::Cell;
use std::rc::Rc;

/// Wall-clock reader consulted at registration, sampling and tick time.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Milliseconds since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: instant::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle while the host owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, t: f64) {
        self.now.set(t);
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> f64 {
        self.now.get()
    }
}
