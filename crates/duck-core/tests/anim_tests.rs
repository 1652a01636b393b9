// Host-side tests for the per-frame animation state machine.

use duck_core::*;
use glam::Vec3;
use std::f32::consts::TAU;

fn context_with_duck() -> SceneContext {
    let mut ctx = SceneContext::new(&SceneConfig::default());
    let duck = MeshData::cuboid(Vec3::new(4.0, 6.0, 4.0), [1.0, 0.9, 0.1]);
    ctx.attach_duck::<String>(Ok(duck));
    ctx
}

#[test]
fn water_time_advances_by_fixed_step() {
    let mut ctx = SceneContext::new(&SceneConfig::default());
    for _ in 0..120 {
        // wall clock deliberately irregular
        ctx.tick(123.0);
    }
    assert!((ctx.animation.water_time() - 2.0).abs() < 1e-4);
    assert_eq!(ctx.animation.frames(), 120);
}

#[test]
fn duck_height_follows_sine() {
    for t in [0.0_f32, 0.5, 1.0, 2.7, 10.0, 100.0] {
        assert!((duck_height(t) - (t.sin() * 4.0 + DUCK_BASELINE_Y)).abs() < 1e-6);
    }
}

#[test]
fn duck_height_is_periodic() {
    for t in [0.0_f32, 0.3, 1.7, 4.2] {
        assert!((duck_height(t) - duck_height(t + TAU)).abs() < 1e-4);
    }
}

#[test]
fn tick_moves_loaded_duck() {
    let mut ctx = context_with_duck();
    ctx.tick(1.25);
    let pos = ctx.scene.duck_position().expect("duck loaded");
    assert!((pos.y - duck_height(1.25)).abs() < 1e-6);
    let rot = ctx.scene.duck.get().unwrap().transform.rotation;
    assert!(rot.angle_between(glam::Quat::IDENTITY) > 0.0);
    assert!(rot.angle_between(glam::Quat::IDENTITY) < 0.3);
}

#[test]
fn tick_without_duck_is_harmless() {
    let mut ctx = SceneContext::new(&SceneConfig::default());
    let rod_before = ctx.scene.rod.transform;
    let events = ctx.tick(3.0);
    assert!(events.is_empty());
    assert!(ctx.scene.duck_position().is_none());
    // no duck, nothing to look at
    assert_eq!(ctx.scene.rod.transform, rod_before);
}

#[test]
fn rod_points_above_duck() {
    let mut ctx = context_with_duck();
    ctx.tick(0.8);
    let duck = ctx.scene.duck_position().unwrap();
    let target = duck + Vec3::Y * ROD_TARGET_HEIGHT;
    let rod = &ctx.scene.rod.transform;
    let facing = rod.rotation * Vec3::Z;
    let wanted = (target - rod.translation).normalize();
    assert!(facing.dot(wanted) > 0.9999, "rod +Z {facing:?} vs {wanted:?}");
}

#[test]
fn look_at_straight_down_stays_finite() {
    let mut t = Transform {
        translation: Vec3::new(0.0, 10.0, 0.0),
        ..Default::default()
    };
    t.look_at(Vec3::ZERO, Vec3::Y);
    let facing = t.rotation * Vec3::Z;
    assert!(facing.is_finite());
    assert!(facing.dot(Vec3::NEG_Y) > 0.999);
}

#[test]
fn wake_word_triggers_once_then_clears() {
    let mut ctx = SceneContext::new(&SceneConfig::default());
    ctx.utterances.publish("look at that Duck over there");
    let events = ctx.tick(0.0);
    assert_eq!(events.as_slice(), &[SceneEvent::PlaySound]);
    assert!(ctx.utterances.is_empty());
    assert!(ctx.tick(0.1).is_empty());
}

#[test]
fn empty_or_unmatched_utterance_does_nothing() {
    let mut ctx = SceneContext::new(&SceneConfig::default());
    ctx.utterances.publish("");
    assert!(ctx.tick(0.0).is_empty());
    ctx.utterances.publish("hello there");
    assert!(ctx.tick(0.0).is_empty());
    // drained even without a match
    assert!(ctx.utterances.is_empty());
}

#[test]
fn burst_of_results_collapses_to_latest() {
    let mut ctx = SceneContext::new(&SceneConfig::default());
    ctx.utterances.publish("duck");
    ctx.utterances.publish("nothing to see");
    assert!(ctx.tick(0.0).is_empty());
}
