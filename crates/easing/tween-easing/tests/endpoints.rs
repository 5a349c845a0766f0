use tween_easing::{Easing, NAMED};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

#[test]
fn every_named_curve_hits_both_endpoints() {
    for (name, easing) in NAMED {
        let begin = easing.apply(0.0, -20.0, 80.0, 300.0);
        let end = easing.apply(300.0, -20.0, 80.0, 300.0);
        assert!((begin - -20.0).abs() <= 1e-6, "{name}: begin {begin}");
        assert!((end - 80.0).abs() <= 1e-6, "{name}: end {end}");
    }
}

#[test]
fn monotonic_curves_stay_inside_the_range() {
    let monotonic = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInSine,
        Easing::EaseOutSine,
        Easing::EaseInOutSine,
        Easing::EaseInCirc,
        Easing::EaseOutCirc,
        Easing::EaseInOutCirc,
    ];
    for easing in monotonic {
        let mut prev = easing.apply(0.0, 0.0, 1.0, 100.0);
        for step in 1..=100 {
            let v = easing.apply(step as f64, 0.0, 1.0, 100.0);
            assert!(v + 1e-12 >= prev, "{easing} decreased at {step}");
            assert!((-1e-12..=1.0 + 1e-12).contains(&v), "{easing} left range at {step}");
            prev = v;
        }
    }
}

#[test]
fn linear_midpoint() {
    approx(Easing::Linear.apply(50.0, 0.0, 100.0, 100.0), 50.0, 1e-12);
    approx(Easing::Linear.apply(25.0, 100.0, 0.0, 100.0), 75.0, 1e-12);
}

#[test]
fn serializes_by_camel_case_name() {
    let json = serde_json::to_string(&Easing::EaseInOutQuad).unwrap();
    assert_eq!(json, "\"easeInOutQuad\"");
    let back: Easing = serde_json::from_str("\"easeOutElastic\"").unwrap();
    assert_eq!(back, Easing::EaseOutElastic);
    assert!(serde_json::from_str::<Easing>("\"custom\"").is_err());
}

#[test]
fn default_is_ease_in_out_quad() {
    assert_eq!(Easing::default(), Easing::EaseInOutQuad);
}
