use std::sync::Arc;

use keyframe_animation_core::{
    Interpolator, KeyframeError, KeyframeSequence, KeyframeSequenceBuilder, StateError, LINEAR,
    STEP,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "keyframe_animation_core=debug".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn mk_scalar(keys: &[(i32, f32)], duration: i32, repeated: bool) -> KeyframeSequence {
    let mut builder = KeyframeSequenceBuilder::with_components(1)
        .unwrap()
        .duration(duration)
        .unwrap()
        .repeated(repeated)
        .interpolator(Arc::clone(&*LINEAR));
    for (t, v) in keys {
        builder = builder.keyframe(*t, &[*v]).unwrap();
    }
    builder.build().unwrap()
}

fn sample(seq: &KeyframeSequence, time: i32) -> (f32, bool) {
    let (value, in_range) = seq.value_at(time).unwrap();
    (value[0], in_range)
}

#[test]
fn constant_ramp_scenario() {
    init_tracing();
    let seq = mk_scalar(&[(0, 0.0), (8, 64.0)], 8, false);
    let cases = [
        (0, 0.0, true),
        (2, 16.0, true),
        (4, 32.0, true),
        (8, 64.0, true),
        (9, 64.0, false),
        (-1, 0.0, true),
    ];
    for (time, expected, expected_in_range) in cases {
        let (v, in_range) = sample(&seq, time);
        approx(v, expected, 1e-4);
        assert_eq!(in_range, expected_in_range, "time={time}");
    }
}

#[test]
fn repeated_ramp_scenario() {
    init_tracing();
    let seq = mk_scalar(&[(0, 0.0), (8, 64.0)], 12, true);
    let cases = [
        (0, 0.0),
        (2, 16.0),
        (4, 32.0),
        (8, 64.0),
        (9, 48.0),
        (10, 32.0),
        (12, 0.0),
        (13, 8.0),
        (-1, 16.0),
        (-2, 32.0),
        (-4, 64.0),
    ];
    for (time, expected) in cases {
        let (v, in_range) = sample(&seq, time);
        approx(v, expected, 1e-4);
        assert!(in_range, "repeat mode is always in range (time={time})");
    }
}

#[test]
fn constant_mode_holds_first_value_before_first_keyframe() {
    let seq = mk_scalar(&[(3, 7.0), (6, 1.0)], 6, false);
    for time in [-100, 0, 2, 3] {
        assert_eq!(sample(&seq, time), (7.0, true));
    }
}

#[test]
fn constant_mode_past_duration_reports_out_of_range() {
    // Duration falls between keyframes: the value is clamped to the duration's interpolation.
    let seq = mk_scalar(&[(0, 0.0), (10, 100.0)], 4, false);
    let (v, in_range) = sample(&seq, 4);
    approx(v, 40.0, 1e-4);
    assert!(in_range);
    for time in [5, 10, 500] {
        let (v, in_range) = sample(&seq, time);
        approx(v, 40.0, 1e-4);
        assert!(!in_range, "time={time}");
    }

    // Duration after the last keyframe: the last value holds.
    let seq = mk_scalar(&[(0, 0.0), (10, 100.0)], 20, false);
    assert_eq!(sample(&seq, 15), (100.0, true));
    assert_eq!(sample(&seq, 21), (100.0, false));
}

#[test]
fn repeated_mode_is_periodic() {
    let seq = mk_scalar(&[(1, 3.0), (4, -6.0), (7, 12.0)], 9, true);
    for time in -30..30 {
        if time % 9 == 0 {
            // Exact cycle ends resolve to the end of the cycle, not the start.
            continue;
        }
        let (base, _) = sample(&seq, time);
        for k in [-3, -1, 1, 2, 5] {
            let (shifted, in_range) = sample(&seq, time + k * 9);
            approx(shifted, base, 1e-4);
            assert!(in_range);
        }
    }
}

#[test]
fn repeated_mode_cycle_end_vs_start() {
    // First keyframe at 0 and a different value at the duration.
    let seq = mk_scalar(&[(0, 1.0), (5, 2.0), (10, 3.0)], 10, true);
    assert_eq!(sample(&seq, 0), (1.0, true));
    assert_eq!(sample(&seq, 10), (3.0, true));
    assert_eq!(sample(&seq, 20), (3.0, true));
    assert_eq!(sample(&seq, -10), (3.0, true));
}

#[test]
fn duplicate_times_tie_break_in_constant_mode() {
    let seq = mk_scalar(
        &[(0, 0.0), (5, 10.0), (5, 20.0), (10, 30.0), (10, 40.0)],
        10,
        false,
    );
    // Exact hit: first among ties.
    assert_eq!(sample(&seq, 5), (10.0, true));
    assert_eq!(sample(&seq, 10), (30.0, true));
    // Clamped down to the duration: last among ties.
    assert_eq!(sample(&seq, 11), (40.0, false));
    // Interpolation leaves from the last tie and arrives at the first.
    let (v, _) = sample(&seq, 7);
    approx(v, 24.0, 1e-4);
    let (v, _) = sample(&seq, 2);
    approx(v, 4.0, 1e-4);
}

#[test]
fn duplicate_times_tie_break_in_repeated_mode() {
    let seq = mk_scalar(
        &[(0, 0.0), (5, 10.0), (5, 20.0), (10, 30.0), (10, 40.0)],
        10,
        true,
    );
    assert_eq!(sample(&seq, 5), (10.0, true));
    assert_eq!(sample(&seq, 10), (30.0, true));
    assert_eq!(sample(&seq, 20), (30.0, true));
    let (v, _) = sample(&seq, 7);
    approx(v, 24.0, 1e-4);
}

#[test]
fn repeated_seam_wraps_from_last_tie_at_duration() {
    // Keyframes start after 0, so early times blend from the last keyframe at
    // the duration (the later of the two ties) towards the first keyframe.
    let seq = mk_scalar(&[(4, 0.0), (8, 10.0), (8, 50.0)], 8, true);
    let (v, _) = sample(&seq, 2);
    // Seam segment 8 -> 4 spans 4 units; time 2 is 2 units in.
    approx(v, 25.0, 1e-4);
    assert_eq!(sample(&seq, 8), (10.0, true));
}

#[test]
fn single_keyframe_sequences() {
    let constant = mk_scalar(&[(3, 9.0)], 5, false);
    for time in [-1, 3, 4, 5] {
        assert_eq!(sample(&constant, time), (9.0, true));
    }
    assert_eq!(sample(&constant, 6), (9.0, false));

    let repeated = mk_scalar(&[(3, 9.0)], 5, true);
    for time in -7..12 {
        assert_eq!(sample(&repeated, time), (9.0, true));
    }
}

#[test]
fn sampling_preconditions() {
    let mut seq = KeyframeSequence::new(2, 1).unwrap();
    seq.set_keyframe(0, 4, &[0.0]).unwrap();
    seq.set_keyframe(1, 8, &[1.0]).unwrap();

    assert_eq!(
        seq.value_at(0).unwrap_err(),
        KeyframeError::State(StateError::InterpolatorNotSet)
    );

    seq.set_interpolator(Some(Arc::clone(&*LINEAR)));
    assert_eq!(
        seq.value_at(0).unwrap_err(),
        KeyframeError::State(StateError::DurationNotSet)
    );

    seq.set_duration(3).unwrap();
    assert_eq!(
        seq.value_at(0).unwrap_err(),
        KeyframeError::State(StateError::NoKeyframeWithinDuration {
            duration: 3,
            first_time: 4
        })
    );

    seq.set_duration(4).unwrap();
    assert_eq!(seq.value_at(0).unwrap(), (vec![0.0], true));
}

#[test]
fn output_buffer_is_checked_and_only_front_written() {
    let seq = KeyframeSequenceBuilder::with_components(2)
        .unwrap()
        .keyframe(0, &[1.0, 2.0])
        .unwrap()
        .duration(1)
        .unwrap()
        .interpolator(Arc::clone(&*LINEAR))
        .build()
        .unwrap();
    let mut short = [0.0; 1];
    assert!(matches!(
        seq.value_at_into(0, &mut short),
        Err(KeyframeError::InvalidArgument { .. })
    ));
    let mut wide = [9.0; 3];
    assert!(seq.value_at_into(0, &mut wide).unwrap());
    assert_eq!(wide, [1.0, 2.0, 9.0]);
}

#[test]
fn explicit_interpolator_overrides_configured_one() {
    let seq = mk_scalar(&[(0, 0.0), (8, 64.0)], 8, false);
    let mut out = [0.0];
    let step: &dyn Interpolator = &**STEP;
    seq.value_at_with(6, step, &mut out).unwrap();
    assert_eq!(out, [0.0]);
    seq.value_at_into(6, &mut out).unwrap();
    approx(out[0], 48.0, 1e-4);
}

#[test]
fn clones_are_independent() {
    let seq = mk_scalar(&[(0, 0.0), (8, 64.0)], 8, false);
    let mut copy = seq.clone();
    copy.set_keyframe(1, 8, &[0.0]).unwrap();
    copy.set_repeated(true);
    assert_eq!(sample(&seq, 8), (64.0, true));
    assert_eq!(sample(&copy, 8), (0.0, true));
    assert!(Arc::ptr_eq(
        seq.interpolator().unwrap(),
        copy.interpolator().unwrap()
    ));
}

#[test]
fn unsorted_store_does_not_panic() {
    let mut seq = mk_scalar(&[(0, 0.0), (4, 1.0), (8, 2.0)], 8, false);
    seq.set_keyframe_time(1, 9).unwrap();
    seq.set_keyframe_time(2, 1).unwrap();
    for repeated in [false, true] {
        seq.set_repeated(repeated);
        for time in -20..20 {
            assert!(seq.value_at(time).is_ok(), "time={time} repeated={repeated}");
        }
    }
}

#[test]
fn sampling_does_not_mutate() {
    let seq = mk_scalar(&[(0, 0.0), (5, 10.0), (5, 20.0), (8, 64.0)], 12, true);
    let before = seq.store().clone();
    for time in -50..50 {
        let _ = seq.value_at(time).unwrap();
    }
    assert_eq!(seq.store(), &before);
}
