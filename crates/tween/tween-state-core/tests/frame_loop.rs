mod common;

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use anyhow::anyhow;
use common::{approx, mount, row, to, widget};
use tween_state::{
    Clock, DriverState, Easing, Host, StackBehavior, TickOutcome, TweenId, TweenState,
};

#[test]
fn frame_loop_retires_and_goes_idle() {
    let (mut c, clock) = mount();
    c.register_tween("x", to(100.0).duration(100.0).easing(Easing::Linear))
        .unwrap();
    assert_eq!(c.engine().driver_state(), DriverState::Armed);

    let reports = c.advance(50.0);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].outcome, TickOutcome::Committed);
    assert_eq!(reports[0].active, 1);
    approx(c.sample_tween("x").unwrap(), 50.0, 1e-9);

    let reports = c.advance(50.0);
    assert_eq!(reports[0].retired, vec![TweenId(0)]);
    assert_eq!(reports[0].active, 0);
    assert!(c.state().queue.is_empty());
    assert_eq!(c.state().root.get("x"), Some(100.0));
    assert_eq!(c.sample_tween("x").unwrap(), 100.0);

    // One more frame finds the queue empty and stops the loop.
    let reports = c.advance(16.0);
    assert_eq!(reports[0].outcome, TickOutcome::Idle);
    assert_eq!(c.engine().driver_state(), DriverState::Idle);
    assert!(c.advance(16.0).is_empty());
    assert_eq!(c.host().frames_requested(), 3);
    assert_eq!(clock.now(), 132.0);
}

#[test]
fn expiry_is_strict_at_duration() {
    let (mut c, _clock) = mount();
    c.register_tween("x", to(1.0).duration(100.0)).unwrap();
    let reports = c.advance(99.0);
    assert!(reports[0].retired.is_empty());
    let reports = c.advance(1.0);
    assert_eq!(reports[0].retired.len(), 1);
}

#[test]
fn on_end_fires_once_per_request_in_insertion_order() {
    let (mut c, _clock) = mount();
    let fired = Rc::new(RefCell::new(Vec::new()));
    for (i, field) in ["x", "y", "x"].into_iter().enumerate() {
        let log = Rc::clone(&fired);
        c.register_tween(
            field,
            to(i as f64).duration(10.0).on_end(move |cx| {
                log.borrow_mut().push((i, cx.tween()));
                Ok(())
            }),
        )
        .unwrap();
    }

    let reports = c.advance(10.0);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].retired, vec![TweenId(0), TweenId(1), TweenId(2)]);
    assert_eq!(
        *fired.borrow(),
        vec![(0, TweenId(0)), (1, TweenId(1)), (2, TweenId(2))]
    );
    assert!(c.state().queue.is_empty());

    c.run_until_idle(10.0, 10);
    assert_eq!(fired.borrow().len(), 3);
}

#[test]
fn only_expired_requests_fire() {
    let (mut c, _clock) = mount();
    let fired = Rc::new(RefCell::new(0));
    let (a, b) = (Rc::clone(&fired), Rc::clone(&fired));
    c.register_tween(
        "x",
        to(1.0).duration(10.0).on_end(move |_| {
            *a.borrow_mut() += 1;
            Ok(())
        }),
    )
    .unwrap();
    c.register_tween(
        "y",
        to(1.0).duration(10.0).delay(30.0).on_end(move |_| {
            *b.borrow_mut() += 10;
            Ok(())
        }),
    )
    .unwrap();

    c.advance(10.0);
    assert_eq!(*fired.borrow(), 1);
    assert_eq!(c.state().queue.len(), 1);
    c.advance(30.0);
    assert_eq!(*fired.borrow(), 11);
}

#[test]
fn failing_callback_does_not_stop_the_tick() {
    let (mut c, _clock) = mount();
    let fired = Rc::new(RefCell::new(Vec::new()));
    for i in 0..3 {
        let log = Rc::clone(&fired);
        c.register_tween(
            "x",
            to(1.0).duration(5.0).on_end(move |_| {
                log.borrow_mut().push(i);
                if i == 1 {
                    return Err(anyhow!("listener {i} exploded"));
                }
                Ok(())
            }),
        )
        .unwrap();
    }

    let reports = c.advance(5.0);
    let report = &reports[0];
    assert_eq!(report.outcome, TickOutcome::Committed);
    assert_eq!(*fired.borrow(), vec![0, 1, 2]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].tween, TweenId(1));
    assert_eq!(report.failures[0].field, "x");
    assert!(report.failures[0].message.contains("exploded"));
    assert!(c.state().queue.is_empty());
}

#[test]
fn teardown_inside_on_end_skips_the_commit() {
    let (mut c, _clock) = mount();
    let alive = c.liveness();
    c.register_tween(
        "x",
        to(1.0).duration(5.0).on_end(move |_| {
            alive.kill();
            Ok(())
        }),
    )
    .unwrap();
    c.register_tween("y", to(1.0).duration(50.0)).unwrap();
    let renders = c.host().renders();

    let reports = c.advance(5.0);
    assert_eq!(reports[0].outcome, TickOutcome::HostGone);
    assert_eq!(c.host().renders(), renders);
    assert_eq!(c.state().queue.len(), 2);
    assert_eq!(c.engine().driver_state(), DriverState::Idle);
    assert!(c.advance(5.0).is_empty());
}

#[test]
fn unmount_between_frames_short_circuits_next_tick() {
    let (mut c, _clock) = mount();
    c.register_tween("x", to(1.0).duration(100.0)).unwrap();
    c.advance(10.0);
    c.liveness().kill();
    // The frame armed before teardown is still delivered once.
    let reports = c.advance(10.0);
    assert_eq!(reports[0].outcome, TickOutcome::HostGone);
    assert!(c.advance(10.0).is_empty());
}

#[test]
fn tween_registered_from_on_end_joins_the_same_tick() {
    let (mut c, clock) = mount();
    c.register_tween(
        "x",
        to(100.0)
            .duration(100.0)
            .easing(Easing::Linear)
            .on_end(|cx| {
                cx.register_tween("x", to(0.0).duration(100.0).easing(Easing::Linear));
                Ok(())
            }),
    )
    .unwrap();
    let frames_before = c.host().frames_requested();

    let reports = c.advance(100.0);
    assert_eq!(reports[0].retired, vec![TweenId(0)]);
    assert!(reports[0].rejected.is_empty());
    assert_eq!(reports[0].active, 1);
    assert_eq!(c.state().queue.len(), 1);
    assert_eq!(c.state().root.get("x"), Some(0.0));
    approx(c.sample_tween("x").unwrap(), 100.0, 1e-9);
    // Exactly one re-arm: the re-entrant registration did not start a second chain.
    assert_eq!(c.host().frames_requested(), frames_before + 1);

    clock.advance(50.0);
    approx(c.sample_tween("x").unwrap(), 50.0, 1e-9);
}

#[test]
fn rejected_registration_from_on_end_is_reported() {
    let (mut c, _clock) = mount();
    c.register_tween(
        "x",
        to(1.0).duration(1.0).on_end(|cx| {
            cx.register_tween((row(5), "h"), to(3.0));
            Ok(())
        }),
    )
    .unwrap();
    let reports = c.advance(1.0);
    assert_eq!(reports[0].rejected.len(), 1);
    assert_eq!(reports[0].rejected[0].category(), "target");
    assert!(c.state().queue.is_empty());
}

#[test]
fn overlapping_registrations_arm_a_single_frame_chain() {
    let (mut c, _clock) = mount();
    c.register_tween("x", to(1.0)).unwrap();
    c.register_tween("x", to(2.0)).unwrap();
    c.register_tween((row(1), "h"), to(2.0)).unwrap();
    // Destructive replacement of the only tween on y starts no new chain either.
    c.register_tween("y", to(1.0)).unwrap();
    c.register_tween("y", to(2.0).stack(StackBehavior::Destructive))
        .unwrap();
    assert_eq!(c.host().frames_requested(), 1);

    let frames = c.run_until_idle(16.0, 1_000);
    // Every frame delivered exactly one tick.
    assert_eq!(c.host().frames_requested() as usize, frames);
    assert!(c.state().queue.is_empty());
}

#[test]
fn new_activation_after_idle_rearms() {
    let (mut c, _clock) = mount();
    c.register_tween("x", to(1.0).duration(10.0)).unwrap();
    c.run_until_idle(10.0, 100);
    assert_eq!(c.engine().driver_state(), DriverState::Idle);
    let before = c.host().frames_requested();

    c.register_tween("x", to(2.0).duration(10.0)).unwrap();
    assert_eq!(c.engine().driver_state(), DriverState::Armed);
    assert_eq!(c.host().frames_requested(), before + 1);
}

#[test]
fn replacing_state_drops_its_queue() {
    let (mut c, _clock) = mount();
    c.register_tween("x", to(10.0).duration(1_000.0)).unwrap();
    c.host_mut().replace_state(widget());
    let reports = c.advance(16.0);
    assert_eq!(reports[0].outcome, TickOutcome::Idle);
    assert_eq!(c.sample_tween("x").unwrap(), 0.0);
}

#[test]
fn tick_commits_into_an_open_batch() {
    let (mut c, _clock) = mount();
    c.register_tween("x", to(1.0).duration(10.0)).unwrap();
    c.host_mut().begin_batch();
    c.register_tween("y", to(1.0).duration(100.0)).unwrap();
    let reports = c.advance(10.0);
    assert_eq!(reports[0].retired, vec![TweenId(0)]);
    // The pruned queue keeps the batched registration.
    assert_eq!(c.host().latest_state().tween_queue().len(), 1);
    c.host_mut().end_batch();
    assert_eq!(c.state().queue.len(), 1);
}

#[test]
fn restored_snapshot_with_queued_tweens_rearms_on_next_registration() {
    let (mut c, _clock) = mount();
    c.register_tween("x", to(5.0).duration(50.0)).unwrap();
    let snapshot = c.state().clone();
    c.run_until_idle(16.0, 100);
    assert_eq!(c.engine().driver_state(), DriverState::Idle);

    c.host_mut().replace_state(snapshot);
    assert_eq!(c.state().queue.len(), 1);
    c.register_tween("y", to(1.0).duration(50.0)).unwrap();
    assert_eq!(c.engine().driver_state(), DriverState::Armed);

    let frames = c.run_until_idle(16.0, 100);
    assert!(frames > 0);
    assert!(c.state().queue.is_empty());
    assert_eq!(c.engine().driver_state(), DriverState::Idle);
}

#[test]
fn panicking_on_end_leaves_the_driver_rearmable() {
    let (mut c, _clock) = mount();
    c.register_tween(
        "x",
        to(1.0).duration(10.0).on_end(|_| panic!("listener blew up")),
    )
    .unwrap();

    let unwound = catch_unwind(AssertUnwindSafe(|| c.advance(10.0)));
    assert!(unwound.is_err());
    assert_eq!(c.engine().driver_state(), DriverState::Idle);
    // The unwound tick committed nothing.
    assert_eq!(c.state().queue.len(), 1);

    c.register_tween("y", to(1.0).duration(10.0)).unwrap();
    assert_eq!(c.engine().driver_state(), DriverState::Armed);
    c.run_until_idle(10.0, 10);
    assert!(c.state().queue.is_empty());
}
