//! Pointer gesture routing
//!
//! Turns mouse and touch events into drag gestures with a target, reporting
//! translations relative to the press point. One gesture at a time; other
//! pointers are ignored until it ends.

use stickdrive_math::Vec2;

/// What a drag gesture controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// The on-screen joystick knob
    Joystick,
    /// The camera orbit
    Orbit,
}

/// Source of pointer events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

/// A gesture update for the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Translation from the press point, logical points
    Changed { target: DragTarget, translation: Vec2 },
    Ended { target: DragTarget },
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    pointer: PointerId,
    target: DragTarget,
    origin: Vec2,
}

/// Tracks the cursor and the gesture in progress
#[derive(Debug, Default)]
pub struct PointerRouter {
    cursor: Option<Vec2>,
    active: Option<ActiveDrag>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known mouse position
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Target of the gesture in progress
    pub fn active_target(&self) -> Option<DragTarget> {
        self.active.map(|drag| drag.target)
    }

    /// Start a gesture at `point`
    ///
    /// `on_joystick` is the host's hit test; presses elsewhere orbit the
    /// camera. Returns the target, or `None` while another gesture runs.
    pub fn press(&mut self, pointer: PointerId, point: Vec2, on_joystick: bool) -> Option<DragTarget> {
        if self.active.is_some() {
            return None;
        }
        let target = if on_joystick {
            DragTarget::Joystick
        } else {
            DragTarget::Orbit
        };
        self.active = Some(ActiveDrag {
            pointer,
            target,
            origin: point,
        });
        log::debug!("{:?} drag started at ({:.0}, {:.0})", target, point.x, point.y);
        Some(target)
    }

    /// Start a mouse gesture at the last cursor position
    pub fn press_mouse(&mut self, on_joystick: impl FnOnce(Vec2) -> bool) -> Option<DragTarget> {
        let point = self.cursor?;
        self.press(PointerId::Mouse, point, on_joystick(point))
    }

    /// A pointer moved
    pub fn moved(&mut self, pointer: PointerId, point: Vec2) -> Option<DragEvent> {
        if pointer == PointerId::Mouse {
            self.cursor = Some(point);
        }
        let drag = self.active.filter(|drag| drag.pointer == pointer)?;
        Some(DragEvent::Changed {
            target: drag.target,
            translation: point - drag.origin,
        })
    }

    /// A pointer was released or its touch cancelled
    pub fn release(&mut self, pointer: PointerId) -> Option<DragEvent> {
        let drag = self.active.filter(|drag| drag.pointer == pointer)?;
        self.active = None;
        Some(DragEvent::Ended { target: drag.target })
    }

    /// Abort the gesture in progress (focus lost, mode switched)
    pub fn cancel(&mut self) -> Option<DragEvent> {
        let drag = self.active.take()?;
        Some(DragEvent::Ended { target: drag.target })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_routes_by_hit_test() {
        let mut router = PointerRouter::new();
        assert_eq!(
            router.press(PointerId::Mouse, Vec2::new(100.0, 500.0), true),
            Some(DragTarget::Joystick)
        );
        router.release(PointerId::Mouse);
        assert_eq!(
            router.press(PointerId::Mouse, Vec2::new(600.0, 100.0), false),
            Some(DragTarget::Orbit)
        );
    }

    #[test]
    fn test_translation_relative_to_press() {
        let mut router = PointerRouter::new();
        router.press(PointerId::Touch(7), Vec2::new(100.0, 100.0), true);
        assert_eq!(
            router.moved(PointerId::Touch(7), Vec2::new(130.0, 60.0)),
            Some(DragEvent::Changed {
                target: DragTarget::Joystick,
                translation: Vec2::new(30.0, -40.0),
            })
        );
    }

    #[test]
    fn test_moves_without_gesture_only_track_cursor() {
        let mut router = PointerRouter::new();
        assert_eq!(router.moved(PointerId::Mouse, Vec2::new(5.0, 6.0)), None);
        assert_eq!(router.cursor(), Some(Vec2::new(5.0, 6.0)));
    }

    #[test]
    fn test_press_mouse_uses_cursor() {
        let mut router = PointerRouter::new();
        assert_eq!(router.press_mouse(|_| true), None);

        router.moved(PointerId::Mouse, Vec2::new(10.0, 20.0));
        let target = router.press_mouse(|p| p == Vec2::new(10.0, 20.0));
        assert_eq!(target, Some(DragTarget::Joystick));
    }

    #[test]
    fn test_second_pointer_ignored() {
        let mut router = PointerRouter::new();
        router.press(PointerId::Touch(1), Vec2::ZERO, false);
        assert_eq!(router.press(PointerId::Touch(2), Vec2::ZERO, true), None);
        assert_eq!(router.moved(PointerId::Touch(2), Vec2::new(9.0, 9.0)), None);
        assert_eq!(router.release(PointerId::Touch(2)), None);
        assert_eq!(router.active_target(), Some(DragTarget::Orbit));
    }

    #[test]
    fn test_release_ends_gesture() {
        let mut router = PointerRouter::new();
        router.press(PointerId::Mouse, Vec2::ZERO, true);
        assert_eq!(
            router.release(PointerId::Mouse),
            Some(DragEvent::Ended { target: DragTarget::Joystick })
        );
        assert_eq!(router.active_target(), None);
        assert_eq!(router.release(PointerId::Mouse), None);
    }

    #[test]
    fn test_cancel() {
        let mut router = PointerRouter::new();
        assert_eq!(router.cancel(), None);
        router.press(PointerId::Mouse, Vec2::ZERO, false);
        assert_eq!(router.cancel(), Some(DragEvent::Ended { target: DragTarget::Orbit }));
    }
}
