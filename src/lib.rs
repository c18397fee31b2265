//! stickdrive - virtual joystick and gamepad driving a 3D object
//!
//! The binary wires these modules into a winit application; they are
//! exposed as a library so integration tests can reach them.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
