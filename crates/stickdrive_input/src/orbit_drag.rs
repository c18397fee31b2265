//! Camera orbit drag gesture
//!
//! Dragging anywhere outside the joystick spins the camera around the origin.
//! Angles are relative to where the previous drag left them, so consecutive
//! drags accumulate.

use stickdrive_math::Vec2;

/// Elevation limit in radians (about ±79°), keeps the camera off the poles
pub const ELEVATION_LIMIT: f32 = std::f32::consts::PI * 0.44;

/// Clamp an elevation angle to [`ELEVATION_LIMIT`]
#[inline]
pub fn clamp_elevation(elevation: f32) -> f32 {
    if elevation.is_nan() {
        return 0.0;
    }
    elevation.clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT)
}

/// Camera orbit angles in radians
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitAngles {
    /// Rotation around the world Y axis; 0 looks from +Z
    pub azimuth: f32,
    /// Angle above the XZ plane
    pub elevation: f32,
}

impl OrbitAngles {
    pub fn new(azimuth: f32, elevation: f32) -> Self {
        Self {
            azimuth,
            elevation: clamp_elevation(elevation),
        }
    }
}

/// Drag-to-orbit gesture tracker
#[derive(Clone, Debug)]
pub struct OrbitDrag {
    /// Radians per point of drag
    pub sensitivity: f32,
    start: OrbitAngles,
    current: OrbitAngles,
}

impl Default for OrbitDrag {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitDrag {
    pub fn new() -> Self {
        Self {
            sensitivity: 0.01,
            start: OrbitAngles::default(),
            current: OrbitAngles::default(),
        }
    }

    /// Builder: set drag sensitivity
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Update from the translation since the drag started
    ///
    /// Dragging right increases azimuth; dragging up (negative screen y)
    /// raises the camera.
    pub fn changed(&mut self, translation: Vec2) -> OrbitAngles {
        self.current = OrbitAngles::new(
            self.start.azimuth + translation.x * self.sensitivity,
            self.start.elevation - translation.y * self.sensitivity,
        );
        self.current
    }

    /// Commit the current angles as the start of the next drag
    pub fn ended(&mut self) -> OrbitAngles {
        self.start = self.current;
        self.current
    }

    pub fn angles(&self) -> OrbitAngles {
        self.current
    }

    /// Return to the given angles, dropping any drag in progress
    pub fn reset(&mut self, angles: OrbitAngles) {
        let angles = OrbitAngles::new(angles.azimuth, angles.elevation);
        self.start = angles;
        self.current = angles;
    }
}
