use crate::constants::{VOLUME_BASE, VOLUME_STEPS};
use rand::Rng;

/// Map a uniform sample in `[0, 1)` to one of `0.5, 0.6, .. 0.9`.
#[inline]
pub fn volume_from_unit(u: f64) -> f32 {
    let steps = VOLUME_STEPS as f64;
    let step = (u.clamp(0.0, 1.0) * steps).floor().min(steps - 1.0);
    VOLUME_BASE + (step as f32) / 10.0
}

pub fn pick_volume<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    volume_from_unit(rng.gen::<f64>())
}
