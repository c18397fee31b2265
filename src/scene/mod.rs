//! Scene construction utilities

mod scene_builder;

pub use scene_builder::{SceneBuilder, SceneHandles, DEFAULT_CUBE_SIZE};
