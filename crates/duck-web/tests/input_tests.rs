// Host-side tests for pure input helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn client_to_ndc_accounts_for_canvas_offset() {
    // canvas at (100, 50), 400x200 CSS pixels
    let centre = client_to_ndc(Vec2::new(300.0, 150.0), 100.0, 50.0, 400.0, 200.0);
    assert!(centre.length() < 1e-6);
    let top_left = client_to_ndc(Vec2::new(100.0, 50.0), 100.0, 50.0, 400.0, 200.0);
    assert_eq!(top_left, Vec2::new(-1.0, 1.0));
    let bottom_right = client_to_ndc(Vec2::new(500.0, 250.0), 100.0, 50.0, 400.0, 200.0);
    assert_eq!(bottom_right, Vec2::new(1.0, -1.0));
}

#[test]
fn client_to_ndc_zero_rect_is_centre() {
    assert_eq!(
        client_to_ndc(Vec2::new(10.0, 10.0), 0.0, 0.0, 0.0, 0.0),
        Vec2::ZERO
    );
}

#[test]
fn backing_size_scales_by_dpr_and_never_zero() {
    assert_eq!(backing_size(800.0, 600.0, 2.0), (1600, 1200));
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
    assert_eq!(backing_size(100.0, 50.0, f64::NAN), (100, 50));
    assert_eq!(backing_size(100.0, 50.0, 0.0), (100, 50));
}

#[test]
fn parse_slider_clamps_and_rejects_garbage() {
    assert_eq!(parse_slider("45", (0.0, 90.0)), Some(45.0));
    assert_eq!(parse_slider(" 120 ", (0.0, 90.0)), Some(90.0));
    assert_eq!(parse_slider("-200", (-180.0, 180.0)), Some(-180.0));
    assert_eq!(parse_slider("abc", (0.0, 1.0)), None);
    assert_eq!(parse_slider("NaN", (0.0, 1.0)), None);
}

#[test]
fn slider_steps_are_round_numbers() {
    assert!((slider_step((0.0, 90.0)) - 0.05).abs() < 1e-6);
    assert!((slider_step((-180.0, 180.0)) - 0.2).abs() < 1e-6);
    assert!((slider_step((0.0, 8.0)) - 0.005).abs() < 1e-7);
    assert!((slider_step((0.1, 10.0)) - 0.005).abs() < 1e-7);
    assert_eq!(slider_step((1.0, 1.0)), 1.0);
}
