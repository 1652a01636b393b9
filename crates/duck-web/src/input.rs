use glam::Vec2;

/// Pointer position relative to the canvas rect, in normalized device
/// coordinates.
#[inline]
pub fn client_to_ndc(client: Vec2, rect_left: f32, rect_top: f32, rect_w: f32, rect_h: f32) -> Vec2 {
    duck_core::pointer_ndc(client.x - rect_left, client.y - rect_top, rect_w, rect_h)
}

/// Canvas backing-store size for a CSS size and device pixel ratio.
#[inline]
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let w = (css_w.max(0.0) * dpr) as u32;
    let h = (css_h.max(0.0) * dpr) as u32;
    (w.max(1), h.max(1))
}

/// Parse a range input's value, clamped into `range`.
#[inline]
pub fn parse_slider(value: &str, range: (f32, f32)) -> Option<f32> {
    let v = value.trim().parse::<f32>().ok()?;
    v.is_finite().then(|| v.clamp(range.0, range.1))
}

/// Step for a range input so it has roughly a thousand positions.
#[inline]
pub fn slider_step(range: (f32, f32)) -> f32 {
    let span = (range.1 - range.0).abs();
    if span <= 0.0 {
        return 1.0;
    }
    let raw = span / 1000.0;
    // round down to 1, 2 or 5 times a power of ten
    let mag = 10f32.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm >= 5.0 {
        5.0
    } else if norm >= 2.0 {
        2.0
    } else {
        1.0
    };
    nice * mag
}
