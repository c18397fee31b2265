//! Normalized 2D stick deflection

/// Stick deflection with magnitude never exceeding 1
///
/// Components are in [-1, 1]. `x` grows to the right. `y` follows the
/// producer's convention: screen drags grow downward, gamepad axes grow
/// upward. Consumers negate `y` where they need "push up = forward".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputVector {
    x: f32,
    y: f32,
}

impl InputVector {
    /// No deflection
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a vector, projecting anything outside the unit disk onto its
    /// boundary. Non-finite components collapse to zero.
    pub fn new(x: f32, y: f32) -> Self {
        let x = if x.is_finite() { x } else { 0.0 };
        let y = if y.is_finite() { y } else { 0.0 };

        let magnitude = x.hypot(y);
        if magnitude > 1.0 {
            Self {
                x: (x / magnitude).clamp(-1.0, 1.0),
                y: (y / magnitude).clamp(-1.0, 1.0),
            }
        } else {
            Self { x, y }
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_disk_unchanged() {
        let v = InputVector::new(0.5, -0.5);
        assert_eq!(v.x(), 0.5);
        assert_eq!(v.y(), -0.5);
    }

    #[test]
    fn test_outside_disk_projected() {
        let v = InputVector::new(3.0, 4.0);
        assert!((v.magnitude() - 1.0).abs() < 1e-6);
        assert!((v.x() - 0.6).abs() < 1e-6);
        assert!((v.y() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_collapses() {
        let v = InputVector::new(f32::NAN, f32::INFINITY);
        assert!(v.is_zero());
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(InputVector::default(), InputVector::ZERO);
    }
}
