// Host-side tests for click picking and rod dragging.

use duck_core::*;
use glam::{Vec2, Vec3};

fn ndc_of(ctx: &SceneContext, world: Vec3) -> Vec2 {
    let p = ctx.scene.camera.view_projection().project_point3(world);
    Vec2::new(p.x, p.y)
}

fn context(stick: bool) -> SceneContext {
    let mut ctx = SceneContext::new(&SceneConfig::default());
    ctx.resize(1280, 720);
    ctx.set_has_stick(stick);
    ctx
}

#[test]
fn pointer_ndc_maps_corners_and_centre() {
    assert_eq!(pointer_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(pointer_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(pointer_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    // zero-sized canvas
    assert_eq!(pointer_ndc(10.0, 10.0, 0.0, 0.0), Vec2::ZERO);
}

#[test]
fn click_on_duck_quacks_and_renders() {
    let mut ctx = context(false);
    let duck = MeshData::cuboid(Vec3::new(4.0, 6.0, 4.0), [1.0, 0.9, 0.1]);
    ctx.attach_duck::<String>(Ok(duck));
    let at = ndc_of(&ctx, Vec3::ZERO);
    ctx.pointer_move(at);
    let events = ctx.click();
    assert_eq!(
        events.as_slice(),
        &[SceneEvent::PlaySound, SceneEvent::RenderNow]
    );
}

#[test]
fn click_on_empty_sky_does_nothing() {
    let mut ctx = context(false);
    let duck = MeshData::cuboid(Vec3::new(4.0, 6.0, 4.0), [1.0, 0.9, 0.1]);
    ctx.attach_duck::<String>(Ok(duck));
    ctx.pointer_move(Vec2::new(-0.95, 0.95));
    assert!(ctx.click().is_empty());
}

#[test]
fn click_before_duck_loads_does_nothing() {
    let mut ctx = context(false);
    ctx.pointer_move(ndc_of(&ctx, Vec3::ZERO));
    assert!(ctx.click().is_empty());
}

#[test]
fn drag_rod_highlights_moves_and_stops_sound() {
    let mut ctx = context(true);
    let start = ctx.scene.rod.transform.translation;
    ctx.pointer_move(ndc_of(&ctx, start));

    assert!(ctx.pointer_down());
    assert_eq!(ctx.interaction.dragging(), Some(NodeId::Rod));
    assert_eq!(ctx.scene.rod.emissive, ROD_HIGHLIGHT);

    let moved_to = ndc_of(&ctx, start) + Vec2::new(0.1, -0.05);
    ctx.pointer_move(moved_to);
    let now = ctx.scene.rod.transform.translation;
    assert!((now - start).length() > 1.0, "rod should follow the pointer");
    // stays on the camera-facing plane through the grab point
    let forward = ctx.scene.camera.forward();
    assert!((now - start).dot(forward).abs() < 1e-2);
    // and sits under the pointer again
    let back = ndc_of(&ctx, now);
    assert!((back - moved_to).length() < 1e-3);

    let events = ctx.pointer_up();
    assert_eq!(events.as_slice(), &[SceneEvent::StopSound]);
    assert_eq!(ctx.scene.rod.emissive, [0.0; 3]);
    assert_eq!(ctx.interaction.dragging(), None);
}

#[test]
fn pointer_up_without_drag_emits_nothing() {
    let mut ctx = context(true);
    assert!(ctx.pointer_up().is_empty());
}

#[test]
fn hidden_rod_is_not_draggable() {
    let mut ctx = context(false);
    let at = ndc_of(&ctx, ctx.scene.rod.transform.translation);
    ctx.pointer_move(at);
    assert!(!ctx.pointer_down());
    assert_eq!(ctx.interaction.dragging(), None);
    assert!(!ctx.scene.is_draggable(NodeId::Rod));
}

#[test]
fn hiding_rod_mid_drag_releases_it() {
    let mut ctx = context(true);
    let start = ctx.scene.rod.transform.translation;
    let at = ndc_of(&ctx, start);
    ctx.pointer_move(at);
    assert!(ctx.pointer_down());

    let events = ctx.set_has_stick(false);
    assert_eq!(events.as_slice(), &[SceneEvent::StopSound]);
    assert_eq!(ctx.interaction.dragging(), None);
    assert_eq!(ctx.scene.rod.emissive, [0.0; 3]);

    // later moves leave the hidden rod where it was
    ctx.pointer_move(at + Vec2::new(0.2, 0.0));
    assert_eq!(ctx.scene.rod.transform.translation, start);

    ctx.set_has_stick(true);
    assert_eq!(ctx.scene.rod.transform.translation, start);
}

#[test]
fn toggling_stick_without_drag_emits_nothing() {
    let mut ctx = context(true);
    assert!(ctx.set_has_stick(false).is_empty());
    assert!(ctx.set_has_stick(true).is_empty());
}

#[test]
fn stick_toggle_keeps_rod_state() {
    let mut ctx = context(true);
    ctx.scene.rod.transform.translation = Vec3::new(1.0, 2.0, 3.0);
    ctx.set_has_stick(false);
    assert!(!ctx.scene.is_rendered(NodeId::Rod));
    ctx.set_has_stick(true);
    assert!(ctx.scene.is_rendered(NodeId::Rod));
    assert_eq!(ctx.scene.rod.transform.translation, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn ray_hits_cuboid_triangles() {
    let cube = MeshData::cuboid(Vec3::splat(2.0), [1.0; 3]);
    let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
    let t = ray_mesh(&ray, &cube.positions(), &cube.indices).expect("hit");
    assert!((t - 9.0).abs() < 1e-5);

    let miss = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z);
    assert!(ray_mesh(&miss, &cube.positions(), &cube.indices).is_none());
}
