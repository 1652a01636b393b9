//! Adjustable scene parameters bound to the debug panel.

use crate::constants::{
    AZIMUTH_RANGE, DEFAULT_AZIMUTH_DEG, DEFAULT_ELEVATION_DEG, ELEVATION_RANGE,
};

/// The three live settings. Elevation and azimuth are in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    pub has_stick: bool,
    pub elevation: f32,
    pub azimuth: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            has_stick: false,
            elevation: DEFAULT_ELEVATION_DEG,
            azimuth: DEFAULT_AZIMUTH_DEG,
        }
    }
}

impl Parameters {
    pub fn set_has_stick(&mut self, on: bool) {
        self.has_stick = on;
    }

    /// Clamped to `[0, 90]`. Non-finite input leaves the value unchanged.
    pub fn set_elevation(&mut self, deg: f32) {
        if deg.is_finite() {
            self.elevation = deg.clamp(ELEVATION_RANGE.0, ELEVATION_RANGE.1);
        }
    }

    /// Clamped to `[-180, 180]`. Non-finite input leaves the value unchanged.
    pub fn set_azimuth(&mut self, deg: f32) {
        if deg.is_finite() {
            self.azimuth = deg.clamp(AZIMUTH_RANGE.0, AZIMUTH_RANGE.1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_startup_scene() {
        let p = Parameters::default();
        assert!(!p.has_stick);
        assert_eq!(p.elevation, 2.0);
        assert_eq!(p.azimuth, 180.0);
    }

    #[test]
    fn setters_clamp_into_range() {
        let mut p = Parameters::default();
        p.set_elevation(120.0);
        assert_eq!(p.elevation, 90.0);
        p.set_elevation(-3.0);
        assert_eq!(p.elevation, 0.0);
        p.set_azimuth(400.0);
        assert_eq!(p.azimuth, 180.0);
        p.set_azimuth(f32::NAN);
        assert_eq!(p.azimuth, 180.0);
    }
}
