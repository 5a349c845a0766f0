#![allow(dead_code)]
use tween_state::{
    Component, EngineConfig, FieldSet, Locator, ManualClock, TweenConfig, TweenQueue, TweenState,
};

/// Root fields `x`, `y` and a list of rows with an `h` field each.
#[derive(Clone)]
pub struct Widget {
    pub root: FieldSet,
    pub rows: Vec<FieldSet>,
    pub queue: TweenQueue<Widget>,
}

impl TweenState for Widget {
    fn fields(&self) -> &FieldSet {
        &self.root
    }
    fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.root
    }
    fn tween_queue(&self) -> &TweenQueue<Self> {
        &self.queue
    }
    fn tween_queue_mut(&mut self) -> &mut TweenQueue<Self> {
        &mut self.queue
    }
}

pub fn widget() -> Widget {
    Widget {
        root: FieldSet::new().with("x", 0.0).with("y", 0.0),
        rows: vec![
            FieldSet::new().with("h", 0.0),
            FieldSet::new().with("h", 0.0),
        ],
        queue: TweenQueue::new(),
    }
}

pub fn row(i: usize) -> Locator<Widget> {
    Locator::new(move |s: &Widget| s.rows.get(i), move |s: &mut Widget| s.rows.get_mut(i))
        .labeled(format!("rows[{i}]"))
}

pub fn to(end: f64) -> TweenConfig<Widget> {
    TweenConfig::to(end)
}

/// Component at t=0 plus a handle on its clock.
pub fn mount() -> (Component<Widget, ManualClock>, ManualClock) {
    let clock = ManualClock::new(0.0);
    let c = Component::new(widget(), clock.clone(), EngineConfig::default());
    (c, clock)
}

pub fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}
