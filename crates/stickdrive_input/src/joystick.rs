//! On-screen virtual joystick
//!
//! A drag that starts on the joystick moves the knob with the pointer. The
//! knob is kept inside a disk of radius `outer - inner` so it never leaves the
//! base circle, and the knob offset divided by that radius is the stick
//! deflection.
//!
//! Releasing the drag zeroes the deflection immediately. The knob itself
//! springs back to rest over a few frames, see [`VirtualJoystick::advance`].

use stickdrive_math::Vec2;
use crate::InputVector;

/// Largest animation sub-step, keeps the spring integration stable at low frame rates
const MAX_SPRING_STEP: f32 = 1.0 / 240.0;

/// Longest interval a single `advance` call integrates
const MAX_ADVANCE: f32 = 0.25;

/// Offset and speed below which the spring snaps to rest
const REST_THRESHOLD: f32 = 0.01;

/// Clamp a drag translation to the travel disk and normalize it
///
/// Returns the knob offset (same units as `translation`) and the deflection.
/// A translation within `outer - inner` passes through unchanged; anything
/// farther is projected onto the travel circle along `atan2(dy, dx)`.
/// Degenerate radii (`outer <= inner`) give a resting knob.
pub fn normalize_drag(translation: Vec2, outer_radius: f32, inner_radius: f32) -> (Vec2, InputVector) {
    let max_distance = outer_radius - inner_radius;
    if max_distance.is_nan() || max_distance <= 0.0 || !translation.x.is_finite() || !translation.y.is_finite() {
        return (Vec2::ZERO, InputVector::ZERO);
    }

    let offset = if translation.length() <= max_distance {
        translation
    } else {
        Vec2::from_polar(max_distance, translation.angle())
    };

    let normalized = offset / max_distance;
    (offset, InputVector::new(normalized.x, normalized.y))
}

/// Virtual joystick state: knob offset, spring-back motion, and deflection
#[derive(Clone, Debug)]
pub struct VirtualJoystick {
    /// Radius of the base circle, in points
    pub outer_radius: f32,
    /// Radius of the knob, in points
    pub inner_radius: f32,
    /// Spring-back settle time in seconds
    pub spring_response: f32,
    /// Spring-back damping fraction (1.0 = critically damped)
    pub spring_damping_fraction: f32,

    offset: Vec2,
    velocity: Vec2,
    input: InputVector,
    dragging: bool,
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualJoystick {
    pub fn new() -> Self {
        Self {
            outer_radius: 75.0,
            inner_radius: 30.0,
            spring_response: 0.3,
            spring_damping_fraction: 0.6,
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
            input: InputVector::ZERO,
            dragging: false,
        }
    }

    /// Builder: set base and knob radii
    pub fn with_radii(mut self, outer: f32, inner: f32) -> Self {
        self.outer_radius = outer;
        self.inner_radius = inner;
        self
    }

    /// Builder: set spring-back response and damping fraction
    pub fn with_spring(mut self, response: f32, damping_fraction: f32) -> Self {
        self.spring_response = response;
        self.spring_damping_fraction = damping_fraction;
        self
    }

    /// Maximum knob travel from rest
    #[inline]
    pub fn max_distance(&self) -> f32 {
        self.outer_radius - self.inner_radius
    }

    /// Update from the translation since the drag started
    pub fn drag_changed(&mut self, translation: Vec2) -> InputVector {
        let (offset, input) = normalize_drag(translation, self.outer_radius, self.inner_radius);
        self.offset = offset;
        self.velocity = Vec2::ZERO;
        self.input = input;
        self.dragging = true;
        input
    }

    /// End the drag: deflection is zero from this call on
    pub fn drag_ended(&mut self) -> InputVector {
        self.input = InputVector::ZERO;
        self.dragging = false;
        if !self.has_spring() {
            self.settle();
        }
        self.input
    }

    /// A usable spring needs a positive finite response and finite damping
    fn has_spring(&self) -> bool {
        self.spring_response.is_finite()
            && self.spring_response > 0.0
            && self.spring_damping_fraction.is_finite()
    }

    fn settle(&mut self) {
        self.offset = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
    }

    /// Step the knob's spring-back animation by `dt` seconds
    ///
    /// Unit-mass damped spring with stiffness `(2π / response)²` and damping
    /// `4π · fraction / response`. No effect while dragging or at rest.
    /// Non-finite or non-positive `dt` is ignored; longer intervals are
    /// capped at a quarter second.
    pub fn advance(&mut self, dt: f32) {
        if self.dragging || !self.is_animating() || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        if !self.has_spring() {
            self.settle();
            return;
        }

        let omega = std::f32::consts::TAU / self.spring_response;
        let stiffness = omega * omega;
        let damping = 2.0 * omega * self.spring_damping_fraction;

        let dt = dt.min(MAX_ADVANCE);
        let steps = (dt / MAX_SPRING_STEP).ceil().max(1.0) as u32;
        let step = dt / steps as f32;
        for _ in 0..steps {
            let accel = self.offset * -stiffness - self.velocity * damping;
            self.velocity = self.velocity + accel * step;
            self.offset = self.offset + self.velocity * step;
        }

        let diverged = !self.offset.x.is_finite() || !self.offset.y.is_finite();
        if diverged || (self.offset.length() < REST_THRESHOLD && self.velocity.length() < REST_THRESHOLD) {
            self.settle();
        }
    }

    /// Whether the knob is still returning to rest
    pub fn is_animating(&self) -> bool {
        !self.dragging && (self.offset != Vec2::ZERO || self.velocity != Vec2::ZERO)
    }

    /// Knob offset from the base center, in points
    pub fn stick_offset(&self) -> Vec2 {
        self.offset
    }

    /// Current deflection
    pub fn input(&self) -> InputVector {
        self.input
    }

    /// Whether `point` lies on the base circle centered at `center`
    pub fn contains(&self, point: Vec2, center: Vec2) -> bool {
        (point - center).length() <= self.outer_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_within_travel_passes_through() {
        let (offset, input) = normalize_drag(Vec2::new(30.0, -15.0), 75.0, 30.0);
        assert_eq!(offset, Vec2::new(30.0, -15.0));
        assert!((input.x() - 30.0 / 45.0).abs() < EPSILON);
        assert!((input.y() + 15.0 / 45.0).abs() < EPSILON);
    }

    #[test]
    fn test_beyond_travel_clamps_to_boundary() {
        let (offset, input) = normalize_drag(Vec2::new(100.0, 0.0), 75.0, 30.0);
        assert!((offset.x - 45.0).abs() < EPSILON);
        assert!(offset.y.abs() < EPSILON);
        assert!((input.x() - 1.0).abs() < EPSILON);
        assert!(input.y().abs() < EPSILON);
    }

    #[test]
    fn test_beyond_travel_keeps_direction() {
        let translation = Vec2::new(-80.0, 120.0);
        let (_, input) = normalize_drag(translation, 75.0, 30.0);
        assert!((input.magnitude() - 1.0).abs() < EPSILON);
        let angle = input.y().atan2(input.x());
        assert!((angle - translation.angle()).abs() < EPSILON);
    }

    #[test]
    fn test_exactly_on_boundary() {
        let (offset, input) = normalize_drag(Vec2::new(0.0, 45.0), 75.0, 30.0);
        assert_eq!(offset, Vec2::new(0.0, 45.0));
        assert_eq!(input.y(), 1.0);
    }

    #[test]
    fn test_degenerate_radii_rest() {
        let (offset, input) = normalize_drag(Vec2::new(10.0, 10.0), 30.0, 30.0);
        assert_eq!(offset, Vec2::ZERO);
        assert!(input.is_zero());
    }

    #[test]
    fn test_drag_end_zeroes_input_immediately() {
        let mut stick = VirtualJoystick::new();
        stick.drag_changed(Vec2::new(40.0, 40.0));
        assert!(!stick.input().is_zero());

        let input = stick.drag_ended();
        assert!(input.is_zero());
        assert!(stick.input().is_zero());
        // The knob is still out and animating back
        assert!(stick.is_animating());
    }

    #[test]
    fn test_spring_settles_to_rest() {
        let mut stick = VirtualJoystick::new();
        stick.drag_changed(Vec2::new(45.0, 0.0));
        stick.drag_ended();

        for _ in 0..120 {
            stick.advance(1.0 / 60.0);
        }
        assert_eq!(stick.stick_offset(), Vec2::ZERO);
        assert!(!stick.is_animating());
    }

    #[test]
    fn test_zero_response_snaps() {
        let mut stick = VirtualJoystick::new().with_spring(0.0, 0.6);
        stick.drag_changed(Vec2::new(20.0, 0.0));
        stick.drag_ended();
        assert_eq!(stick.stick_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_advance_ignored_while_dragging() {
        let mut stick = VirtualJoystick::new();
        stick.drag_changed(Vec2::new(20.0, 0.0));
        stick.advance(0.5);
        assert_eq!(stick.stick_offset(), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_advance_with_huge_dt_returns() {
        let mut stick = VirtualJoystick::new();
        stick.drag_changed(Vec2::new(45.0, 0.0));
        stick.drag_ended();

        stick.advance(f32::INFINITY);
        assert_eq!(stick.stick_offset(), Vec2::new(45.0, 0.0));

        for _ in 0..20 {
            stick.advance(1.0e9);
        }
        assert_eq!(stick.stick_offset(), Vec2::ZERO);
        assert!(!stick.is_animating());
    }

    #[test]
    fn test_invalid_spring_snaps() {
        for response in [f32::NAN, -1.0, f32::INFINITY] {
            let mut stick = VirtualJoystick::new().with_spring(response, 0.6);
            stick.drag_changed(Vec2::new(20.0, 0.0));
            stick.drag_ended();
            assert_eq!(stick.stick_offset(), Vec2::ZERO);
            assert!(!stick.is_animating());
        }

        let mut stick = VirtualJoystick::new().with_spring(0.3, f32::NAN);
        stick.drag_changed(Vec2::new(20.0, 0.0));
        stick.drag_ended();
        stick.advance(1.0 / 60.0);
        assert!(!stick.is_animating());
    }

    #[test]
    fn test_contains() {
        let stick = VirtualJoystick::new();
        let center = Vec2::new(100.0, 100.0);
        assert!(stick.contains(Vec2::new(150.0, 100.0), center));
        assert!(!stick.contains(Vec2::new(200.0, 100.0), center));
    }
}
