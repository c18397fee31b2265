//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like ToggleMode, Exit, etc.
//! Pointer drags are NOT mapped here - they go through the PointerRouter.

use stickdrive_input::ControllerMode;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Switch to the other controller mode (Tab)
    ToggleMode,
    /// Switch to a specific controller mode (1 / 2)
    SelectMode(ControllerMode),
    /// Switch between translate and rotate (P)
    TogglePolicy,
    /// Put the object and camera back where they started (R)
    Reset,
    /// Toggle fullscreen mode (F)
    ToggleFullscreen,
    /// Exit application (Escape)
    Exit,
}

/// Maps raw key events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for releases and unbound keys.
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Tab => Some(InputAction::ToggleMode),
            KeyCode::Digit1 | KeyCode::Numpad1 => {
                Some(InputAction::SelectMode(ControllerMode::Custom))
            }
            KeyCode::Digit2 | KeyCode::Numpad2 => {
                Some(InputAction::SelectMode(ControllerMode::ExternalGamepad))
            }
            KeyCode::KeyP => Some(InputAction::TogglePolicy),
            KeyCode::KeyR => Some(InputAction::Reset),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None,
        }
    }
}
