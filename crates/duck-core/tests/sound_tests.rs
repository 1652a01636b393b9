// Host-side tests for quack volume selection.

use duck_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn volume_buckets() {
    assert!((volume_from_unit(0.0) - 0.5).abs() < 1e-6);
    assert!((volume_from_unit(0.19) - 0.5).abs() < 1e-6);
    assert!((volume_from_unit(0.2) - 0.6).abs() < 1e-6);
    assert!((volume_from_unit(0.5) - 0.7).abs() < 1e-6);
    assert!((volume_from_unit(0.999) - 0.9).abs() < 1e-6);
    // out-of-range samples clamp
    assert!((volume_from_unit(1.0) - 0.9).abs() < 1e-6);
    assert!((volume_from_unit(-3.0) - 0.5).abs() < 1e-6);
}

#[test]
fn random_volume_stays_in_tenths() {
    let mut rng = StdRng::seed_from_u64(0xD0C);
    let mut seen = [false; 5];
    for _ in 0..500 {
        let v = pick_volume(&mut rng);
        assert!((0.5..=0.9 + 1e-6).contains(&v), "volume {v}");
        let step = ((v - 0.5) * 10.0).round();
        assert!(((v - 0.5) * 10.0 - step).abs() < 1e-4);
        seen[step as usize] = true;
    }
    assert!(seen.iter().all(|s| *s), "every level should come up");
}
