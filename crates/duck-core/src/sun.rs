use glam::Vec3;

/// Unit vector pointing at the sun for the given elevation above the horizon
/// and azimuth, both in degrees.
///
/// Spherical to Cartesian with polar angle `90 - elevation` measured from +Y and
/// azimuth measured from +Z towards +X.
#[inline]
pub fn sun_direction(elevation_deg: f32, azimuth_deg: f32) -> Vec3 {
    let phi = (90.0 - elevation_deg).to_radians();
    let theta = azimuth_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta).normalize()
}

/// Caches the last computed direction so repeated updates with the same
/// inputs hand back the identical vector.
#[derive(Clone, Debug)]
pub struct SunTracker {
    inputs: (f32, f32),
    direction: Vec3,
}

impl SunTracker {
    pub fn new(elevation_deg: f32, azimuth_deg: f32) -> Self {
        Self {
            inputs: (elevation_deg, azimuth_deg),
            direction: sun_direction(elevation_deg, azimuth_deg),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn update(&mut self, elevation_deg: f32, azimuth_deg: f32) -> Vec3 {
        if self.inputs != (elevation_deg, azimuth_deg) {
            self.inputs = (elevation_deg, azimuth_deg);
            self.direction = sun_direction(elevation_deg, azimuth_deg);
        }
        self.direction
    }
}
