//! Input handling module
//!
//! Provides key mapping to semantic actions and pointer gesture routing.

mod input_mapper;
mod pointer;

pub use input_mapper::{InputMapper, InputAction};
pub use pointer::{DragEvent, DragTarget, PointerId, PointerRouter};
