//! Runs a box-breathing session at 10 frames per simulated second and prints
//! the frame values and session events.
//!
//! `RUST_LOG=debug cargo run -p orb-animation-core --example box_session`

use orb_animation_core::{AnimationContext, Config, Point, Preset, SessionEvent, VisualVariant};

fn main() {
    env_logger::init();

    let mut ctx = AnimationContext::new(Config::for_variant(VisualVariant::BreathingExercise));
    let handle = ctx.handle();
    if let Err(err) = handle.start_pattern(Preset::Box.pattern()) {
        eprintln!("failed to start: {err}");
        return;
    }
    handle.set_activity_target(0.5);

    for i in 0..=650 {
        let now = f64::from(i) / 10.0;
        let out = ctx.update(now);
        for event in &out.events {
            match event {
                SessionEvent::PhaseChanged {
                    label, cycle_index, ..
                } => println!("{now:6.1}s  cycle {cycle_index}  {label}"),
                SessionEvent::ExerciseCompleted {
                    total_cycles,
                    total_duration_seconds,
                } => println!(
                    "{now:6.1}s  done: {total_cycles} cycles in {total_duration_seconds:.1}s"
                ),
                _ => {}
            }
        }
        if i % 10 == 0 {
            let f = &out.frame;
            println!(
                "{now:6.1}s  scale {:.3}  ring {:.2}  glow {:.2}  '{}'",
                f.scale, f.ring_progress, f.glow_intensity, f.label
            );
        }
    }

    let path = ctx.blob_path(Point::new(150.0, 150.0), 150.0);
    println!("final outline: {} segments", path.segments.len());
}
