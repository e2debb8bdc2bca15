use std::thread;

use orb_animation_core::{
    AnimationContext, CommandError, Config, CycleLimit, PatternSpec, PhaseDescriptor, PhaseKind,
    Preset, SessionEvent, SessionState, VisualVariant,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn seeded(variant: VisualVariant) -> AnimationContext {
    AnimationContext::new(Config::for_variant(variant).with_seed(11))
}

#[test]
fn commands_from_another_thread_reach_the_frame_loop() {
    let mut ctx = seeded(VisualVariant::BreathingExercise);
    let handle = ctx.handle();

    thread::spawn(move || {
        handle.start_pattern(Preset::Box.pattern()).unwrap();
        handle.set_activity_target(0.9);
        handle.set_point_count(6).unwrap();
    })
    .join()
    .unwrap();

    let out = ctx.update(0.0);
    assert!(out.frame.is_active);
    assert_eq!(out.frame.vertex_offsets.len(), 6);
    assert_eq!(ctx.machine().state(), SessionState::Running);
    assert_eq!(ctx.activity().target(), 0.9);
}

#[test]
fn session_events_arrive_in_transition_order() {
    let mut ctx = seeded(VisualVariant::BreathingExercise);
    let handle = ctx.handle();
    handle
        .start(
            vec![
                PhaseDescriptor::new(PhaseKind::Inhale, 1.0, 1.3, "In"),
                PhaseDescriptor::new(PhaseKind::Exhale, 1.0, 0.8, "Out"),
            ],
            CycleLimit::Finite(2),
        )
        .unwrap();

    let mut events = Vec::new();
    for i in 0..=50 {
        let out = ctx.update(f64::from(i) / 10.0);
        events.extend(out.events.iter().cloned());
    }

    let labels: Vec<String> = events
        .iter()
        .map(|e| match e {
            SessionEvent::PhaseChanged { label, .. } => label.clone(),
            SessionEvent::ExerciseCompleted { .. } => "done".to_string(),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(labels, ["Out", "In", "Out", "done"]);
    assert!(!ctx.outputs().frame.is_active);
    assert_eq!(ctx.machine().state(), SessionState::Complete);
}

#[test]
fn pause_holds_the_frame() {
    let mut ctx = seeded(VisualVariant::BreathingExercise);
    let handle = ctx.handle();
    handle.start_pattern(Preset::Calming.pattern()).unwrap();
    ctx.update(0.0);
    let before = ctx.update(1.5).frame.clone();

    handle.pause().unwrap();
    ctx.update(1.5);
    let held = ctx.update(20.0).frame.clone();
    assert_eq!(held.scale, before.scale);
    assert_eq!(held.ring_progress, before.ring_progress);
    assert_eq!(held.label, before.label);
    assert!(held.is_active);

    handle.resume().unwrap();
    ctx.update(20.0);
    let resumed = ctx.update(20.1).frame.clone();
    assert!(resumed.ring_progress > before.ring_progress);
}

#[test]
fn wire_pattern_starts_a_session() {
    let json = orb_test_fixtures::patterns::json("box").unwrap();
    let spec: PatternSpec = serde_json::from_str(&json).unwrap();
    let mut ctx = seeded(VisualVariant::Orb);
    ctx.handle().start_spec(&spec).unwrap();
    let out = ctx.update(3.0);
    assert_eq!(out.frame.label, "Breathe In");
    approx(out.frame.scale, 1.0, 1e-12);
}

#[test]
fn bad_wire_pattern_never_reaches_the_context() {
    let json = orb_test_fixtures::patterns::json("unknown-kind").unwrap();
    let spec: PatternSpec = serde_json::from_str(&json).unwrap();
    let mut ctx = seeded(VisualVariant::Orb);
    let err = ctx.handle().start_spec(&spec).unwrap_err();
    assert!(matches!(err, CommandError::Pattern(_)));
    assert!(!ctx.update(0.0).frame.is_active);
}

#[test]
fn idle_orb_breathes_with_activity() {
    let mut ctx = seeded(VisualVariant::Orb);
    ctx.handle().set_activity_target(1.0);
    let mut min: f64 = 1.0;
    let mut max: f64 = 1.0;
    for i in 0..900 {
        let frame = &ctx.update(f64::from(i) / 60.0).frame;
        assert_eq!(frame.scale, frame.breathing_scale);
        assert_eq!(frame.rotation_speed, 18.0);
        min = min.min(frame.scale);
        max = max.max(frame.scale);
    }
    assert!(max > 1.1 && min < 0.9, "min {min} max {max}");
    let frame = &ctx.outputs().frame;
    assert!(frame.activity > 0.99);
    approx(frame.glow_intensity, 0.08 + frame.activity * 1.8, 1e-12);
}

#[test]
fn demo_mode_drives_activity_without_host_writes() {
    let json = orb_test_fixtures::configs::json("orb-demo").unwrap();
    let cfg = Config::from_json(&json).unwrap();
    assert!(cfg.demo_mode);
    let mut ctx = AnimationContext::new(cfg);
    for i in 0..240 {
        ctx.update(f64::from(i) / 60.0);
    }
    assert!(ctx.activity().target() > 0.0);
    assert!(ctx.outputs().frame.activity > 0.0);
    assert_eq!(ctx.outputs().frame.vertex_offsets.len(), 10);
}

#[test]
fn wobble_intensity_zero_flattens_the_blob() {
    let mut ctx = seeded(VisualVariant::BreathingExercise);
    ctx.handle().set_wobble_intensity(0.0).unwrap();
    for i in 0..120 {
        ctx.update(f64::from(i) / 60.0);
    }
    assert_eq!(ctx.wobble_intensity(), 0.0);
    assert!(ctx
        .outputs()
        .frame
        .vertex_offsets
        .iter()
        .all(|o| *o == 0.0));
}

#[test]
fn stop_after_a_pause_resume_flood_from_another_thread() {
    let mut ctx = seeded(VisualVariant::BreathingExercise);
    let handle = ctx.handle();
    handle.start_pattern(Preset::Box.pattern()).unwrap();
    ctx.update(0.0);

    thread::spawn(move || {
        for _ in 0..300 {
            handle.pause().unwrap();
            handle.resume().unwrap();
        }
        handle.stop().unwrap();
    })
    .join()
    .unwrap();

    let out = ctx.update(0.016);
    assert!(!out.frame.is_active);
    assert!(out.is_quiet());
    assert_eq!(ctx.machine().state(), SessionState::Stopped);
}
