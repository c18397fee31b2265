//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Mesh and overlay pipelines
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use stickdrive_core::{EntityKey, World};
use stickdrive_math::mat4;
use stickdrive_render::{
    camera::{view_projection, Projection},
    context::{ContextError, RenderContext},
    geometry::{BoxMesh, JoystickOverlay, Viewport},
    pipeline::{shading_code, GpuMesh, MeshPipeline, MeshUniforms, OverlayPipeline},
};
use crate::config::{CameraConfig, RenderingConfig};
use crate::scene::SceneHandles;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU setup failed
    Context(ContextError),
    /// Surface was lost or outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(e) => write!(f, "GPU setup failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    mesh_pipeline: MeshPipeline,
    overlay_pipeline: OverlayPipeline,
    object_mesh: Option<GpuMesh>,
    projection: Projection,
    render_config: RenderingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: &CameraConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mesh_pipeline = MeshPipeline::new(
            &context.device,
            context.config.format,
            context.size.width,
            context.size.height,
        );
        let overlay_pipeline = OverlayPipeline::new(&context.device, context.config.format);

        Ok(Self {
            context,
            mesh_pipeline,
            overlay_pipeline,
            object_mesh: None,
            projection: camera_config.projection(),
            render_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.mesh_pipeline
            .ensure_depth_texture(&self.context.device, self.context.config.width, self.context.config.height);
    }

    /// Reconfigure the surface after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Upload the driven object's mesh
    pub fn upload_object(&mut self, world: &World, object: Option<EntityKey>) {
        let mesh = object
            .and_then(|key| world.get_entity(key))
            .and_then(|entity| entity.mesh.as_ref())
            .map(BoxMesh::from_mesh);

        self.object_mesh = mesh.map(|mesh| {
            log::info!("Uploaded object mesh: {} triangles", mesh.triangle_count());
            GpuMesh::upload(&self.context.device, &mesh)
        });
    }

    /// Render a single frame
    ///
    /// `overlay` is drawn on top when present.
    pub fn render_frame(
        &mut self,
        world: &World,
        handles: &SceneHandles,
        overlay: Option<&JoystickOverlay>,
        scale_factor: f64,
    ) -> Result<(), RenderError> {
        let aspect = self.context.aspect_ratio();
        let view_proj = handles
            .camera
            .and_then(|key| world.get_entity(key))
            .map(|camera| view_projection(&camera.transform, &self.projection, aspect))
            .unwrap_or_else(|| self.projection.matrix(aspect));

        let object = handles.object.and_then(|key| world.get_entity(key));
        let uniforms = MeshUniforms {
            view_proj,
            model: object.map(|e| e.transform.to_matrix()).unwrap_or(mat4::IDENTITY),
            base_color: object.map(|e| e.material.base_color).unwrap_or([1.0; 4]),
            light_dir: self.render_config.light_dir,
            shading: object.map(|e| shading_code(e.material.shading)).unwrap_or_default(),
            ambient_strength: self.render_config.ambient_strength,
            diffuse_strength: self.render_config.diffuse_strength,
            _padding: [0.0; 2],
        };
        self.mesh_pipeline
            .update_uniforms(&self.context.queue, &uniforms);

        match overlay {
            Some(overlay) => {
                let viewport = Viewport::new(self.context.config.width, self.context.config.height, scale_factor);
                self.overlay_pipeline
                    .upload(&self.context.queue, &overlay.vertices(&viewport));
            }
            None => self.overlay_pipeline.clear(),
        }

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = &self.render_config.background_color;
        // Only draw the object while its entity is still live
        let mesh = object.and(self.object_mesh.as_ref());
        self.mesh_pipeline.render(
            &mut encoder,
            &view,
            mesh,
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        );
        self.overlay_pipeline.render(&mut encoder, &view);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.config.width, self.context.config.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
        assert_eq!(
            format!("{}", RenderError::from(ContextError::NoAdapter)),
            "GPU setup failed: No compatible GPU adapter found"
        );
    }
}
