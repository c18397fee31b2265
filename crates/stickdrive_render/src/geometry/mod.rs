//! CPU-side geometry builders

mod box_mesh;
mod overlay;

pub use box_mesh::BoxMesh;
pub use overlay::{bottom_left_anchor, JoystickOverlay, Viewport};
pub use overlay::{BASE_COLOR, KNOB_COLOR, RING_COLOR};
