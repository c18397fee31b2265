//! Input sources for stickdrive
//!
//! This crate turns pointer drags and gamepad sticks into a single
//! normalized [`InputVector`], and drags outside the joystick into camera
//! orbit angles.
//!
//! - [`VirtualJoystick`] - on-screen stick, clamps drags to a disk
//! - [`OrbitDrag`] - camera azimuth/elevation from a drag gesture
//! - [`ControllerSource`] - selects between the stick and an external gamepad
//! - [`gamepad`] - device subscription and the `gilrs` backend

mod input_vector;
mod joystick;
mod orbit_drag;
mod controller_source;
pub mod gamepad;

pub use input_vector::InputVector;
pub use joystick::{normalize_drag, VirtualJoystick};
pub use orbit_drag::{clamp_elevation, OrbitAngles, OrbitDrag, ELEVATION_LIMIT};
pub use controller_source::{ControllerMode, ControllerSource, SourceEffect};
pub use gamepad::{DeviceError, DeviceName, GamepadBackend, GamepadConfig, GilrsBackend, StickElement, Subscription};
