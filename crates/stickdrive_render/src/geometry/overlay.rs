//! On-screen joystick overlay geometry
//!
//! Layout is in logical points with y growing downward, like pointer
//! events. Triangles come out in NDC for the overlay pipeline.

use stickdrive_math::Vec2;
use crate::pipeline::OverlayVertex;

/// Base disk fill
pub const BASE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.3];
/// Outline around the base
pub const RING_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
/// Knob fill
pub const KNOB_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
/// Soft shadow under the knob
pub const SHADOW_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.3];

/// Outline width in points
pub const RING_WIDTH: f32 = 2.0;
/// Shadow displacement (down) in points
pub const SHADOW_OFFSET: Vec2 = Vec2::new(0.0, 2.0);

/// Render target size and DPI
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Physical pixels
    pub width: u32,
    pub height: u32,
    /// Physical pixels per logical point
    pub scale_factor: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    fn scale(&self) -> f32 {
        if self.scale_factor.is_finite() && self.scale_factor > 0.0 {
            self.scale_factor as f32
        } else {
            1.0
        }
    }

    /// Size in logical points
    pub fn logical_size(&self) -> Vec2 {
        let s = self.scale();
        Vec2::new(self.width as f32 / s, self.height as f32 / s)
    }

    /// Logical point to normalized device coordinates
    pub fn to_ndc(&self, point: Vec2) -> [f32; 2] {
        let size = self.logical_size();
        let w = size.x.max(1.0);
        let h = size.y.max(1.0);
        [point.x / w * 2.0 - 1.0, 1.0 - point.y / h * 2.0]
    }
}

/// Joystick center for a base of `outer_radius`, inset by `padding` from the
/// bottom-left corner
pub fn bottom_left_anchor(viewport: &Viewport, outer_radius: f32, padding: f32) -> Vec2 {
    let size = viewport.logical_size();
    Vec2::new(padding + outer_radius, size.y - padding - outer_radius)
}

/// Base, outline and knob of the virtual joystick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JoystickOverlay {
    /// Base center in points
    pub center: Vec2,
    pub outer_radius: f32,
    pub inner_radius: f32,
    /// Knob displacement from the center in points
    pub knob_offset: Vec2,
    /// Triangles per disk
    pub segments: u32,
}

impl JoystickOverlay {
    pub fn new(center: Vec2, outer_radius: f32, inner_radius: f32) -> Self {
        Self {
            center,
            outer_radius,
            inner_radius,
            knob_offset: Vec2::ZERO,
            segments: 48,
        }
    }

    pub fn with_knob_offset(mut self, offset: Vec2) -> Self {
        self.knob_offset = offset;
        self
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    /// Back-to-front triangles for the whole overlay
    pub fn vertices(&self, viewport: &Viewport) -> Vec<OverlayVertex> {
        let segments = self.segments.max(3);
        let mut out = Vec::with_capacity(segments as usize * 15);
        let knob = self.center + self.knob_offset;

        push_disk(&mut out, viewport, self.center, self.outer_radius, segments, BASE_COLOR);
        push_ring(
            &mut out,
            viewport,
            self.center,
            self.outer_radius - RING_WIDTH * 0.5,
            self.outer_radius + RING_WIDTH * 0.5,
            segments,
            RING_COLOR,
        );
        push_disk(&mut out, viewport, knob + SHADOW_OFFSET, self.inner_radius, segments, SHADOW_COLOR);
        push_disk(&mut out, viewport, knob, self.inner_radius, segments, KNOB_COLOR);
        out
    }
}

fn rim(center: Vec2, radius: f32, i: u32, segments: u32) -> Vec2 {
    let angle = std::f32::consts::TAU * i as f32 / segments as f32;
    center + Vec2::from_polar(radius, angle)
}

fn vertex(viewport: &Viewport, point: Vec2, color: [f32; 4]) -> OverlayVertex {
    OverlayVertex {
        position: viewport.to_ndc(point),
        color,
    }
}

fn push_disk(
    out: &mut Vec<OverlayVertex>,
    viewport: &Viewport,
    center: Vec2,
    radius: f32,
    segments: u32,
    color: [f32; 4],
) {
    if radius.is_nan() || radius <= 0.0 {
        return;
    }
    for i in 0..segments {
        out.push(vertex(viewport, center, color));
        out.push(vertex(viewport, rim(center, radius, i, segments), color));
        out.push(vertex(viewport, rim(center, radius, i + 1, segments), color));
    }
}

fn push_ring(
    out: &mut Vec<OverlayVertex>,
    viewport: &Viewport,
    center: Vec2,
    inner: f32,
    outer: f32,
    segments: u32,
    color: [f32; 4],
) {
    let inner = inner.max(0.0);
    if outer.is_nan() || outer <= inner {
        return;
    }
    for i in 0..segments {
        let a0 = rim(center, inner, i, segments);
        let a1 = rim(center, inner, i + 1, segments);
        let b0 = rim(center, outer, i, segments);
        let b1 = rim(center, outer, i + 1, segments);
        for p in [a0, b0, b1, a0, b1, a1] {
            out.push(vertex(viewport, p, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_to_ndc_corners() {
        let vp = Viewport::new(800, 600, 1.0);
        assert_eq!(vp.to_ndc(Vec2::new(0.0, 0.0)), [-1.0, 1.0]);
        assert_eq!(vp.to_ndc(Vec2::new(800.0, 600.0)), [1.0, -1.0]);
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), [0.0, 0.0]);
    }

    #[test]
    fn test_hidpi_uses_points() {
        let vp = Viewport::new(1600, 1200, 2.0);
        assert_eq!(vp.logical_size(), Vec2::new(800.0, 600.0));
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), [0.0, 0.0]);
    }

    #[test]
    fn test_bad_scale_factor_falls_back() {
        let vp = Viewport::new(800, 600, 0.0);
        assert_eq!(vp.logical_size(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_bottom_left_anchor() {
        let vp = Viewport::new(800, 600, 1.0);
        let center = bottom_left_anchor(&vp, 75.0, 40.0);
        assert_eq!(center, Vec2::new(115.0, 485.0));
    }

    #[test]
    fn test_vertex_count() {
        let vp = Viewport::new(800, 600, 1.0);
        let overlay = JoystickOverlay::new(Vec2::new(115.0, 485.0), 75.0, 30.0).with_segments(16);
        // Three disks of 16 triangles plus a 32-triangle ring
        assert_eq!(overlay.vertices(&vp).len(), (16 * 3 + 32) * 3);
    }

    #[test]
    fn test_knob_follows_offset() {
        let vp = Viewport::new(800, 600, 1.0);
        let overlay = JoystickOverlay::new(Vec2::new(400.0, 300.0), 75.0, 30.0)
            .with_knob_offset(Vec2::new(45.0, 0.0))
            .with_segments(8);
        let verts = overlay.vertices(&vp);

        // Last disk is the knob; its fan center is the first vertex
        let knob_center = verts[verts.len() - 8 * 3];
        assert_eq!(knob_center.color, KNOB_COLOR);
        assert!((knob_center.position[0] - 45.0 / 400.0).abs() < EPSILON);
        assert!(knob_center.position[1].abs() < EPSILON);
    }

    #[test]
    fn test_base_drawn_first() {
        let vp = Viewport::new(800, 600, 1.0);
        let verts = JoystickOverlay::new(Vec2::new(400.0, 300.0), 75.0, 30.0).vertices(&vp);
        assert_eq!(verts[0].color, BASE_COLOR);
    }

    #[test]
    fn test_degenerate_radius_draws_nothing_for_that_disk() {
        let vp = Viewport::new(800, 600, 1.0);
        let overlay = JoystickOverlay::new(Vec2::new(400.0, 300.0), 75.0, 0.0).with_segments(8);
        // Only base and ring remain
        assert_eq!(overlay.vertices(&vp).len(), (8 + 16) * 3);
    }
}
