//! stickdrive - drive a cube with an on-screen joystick or a gamepad
//!
//! Drag the bottom-left stick (Custom mode) or use a gamepad's left stick
//! to move the cube; drag anywhere else to orbit the camera.

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use stickdrive::config::AppConfig;
use stickdrive::input::{DragEvent, InputAction, InputMapper, PointerId, PointerRouter};
use stickdrive::scene::{SceneBuilder, SceneHandles};
use stickdrive::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};
use stickdrive_core::World;
use stickdrive_input::{ControllerMode, GilrsBackend};
use stickdrive_math::Vec2;
use stickdrive_render::geometry::{bottom_left_anchor, JoystickOverlay, Viewport};

/// Main application state
struct App {
    config: AppConfig,
    world: World,
    handles: SceneHandles,
    simulation: SimulationSystem,
    router: PointerRouter,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    /// Device name currently in the title bar
    shown_device: Option<String>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let (world, handles) = SceneBuilder::demo_scene();

        let mut simulation =
            SimulationSystem::from_config(&config, Box::new(GilrsBackend::new()));
        simulation.start(&world, &handles, config.controller.initial_mode);

        Self {
            config,
            world,
            handles,
            simulation,
            router: PointerRouter::new(),
            window: None,
            render: None,
            shown_device: None,
        }
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map(|w| w.scale_factor()).unwrap_or(1.0)
    }

    /// Physical position to logical points
    fn to_points(&self, position: PhysicalPosition<f64>) -> Vec2 {
        let logical = position.to_logical::<f32>(self.scale_factor());
        Vec2::new(logical.x, logical.y)
    }

    /// Joystick base center in points, anchored bottom-left
    fn joystick_center(&self) -> Option<Vec2> {
        let window = self.window.as_ref()?;
        let size = window.window().inner_size();
        let viewport = Viewport::new(size.width, size.height, window.scale_factor());
        Some(bottom_left_anchor(
            &viewport,
            self.config.joystick.outer_radius,
            self.config.joystick.padding,
        ))
    }

    fn is_joystick_hit(&self, point: Vec2) -> bool {
        self.joystick_center()
            .is_some_and(|center| self.simulation.joystick_hit(point, center))
    }

    fn apply_drag(&mut self, event: Option<DragEvent>) {
        if let Some(event) = event {
            self.simulation.handle_drag(event);
        }
    }

    fn update_title(&mut self) {
        self.shown_device = self.simulation.source().device_name();
        if let Some(window) = &self.window {
            window.update_title(
                self.simulation.mode(),
                self.simulation.policy(),
                self.shown_device.as_deref(),
            );
        }
    }

    fn switch_mode(&mut self, mode: ControllerMode) {
        // An in-flight stick drag belongs to the old mode
        if self.simulation.set_mode(mode) {
            let cancelled = self.router.cancel();
            self.apply_drag(cancelled);
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::ToggleMode => {
                let mode = self.simulation.mode().toggled();
                self.switch_mode(mode);
            }
            InputAction::SelectMode(mode) => self.switch_mode(mode),
            InputAction::TogglePolicy => {
                self.simulation.toggle_policy();
            }
            InputAction::Reset => self.simulation.reset(&mut self.world),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::Exit => {
                event_loop.exit();
                return;
            }
        }
        self.update_title();
    }

    fn overlay(&self) -> Option<JoystickOverlay> {
        if self.simulation.mode() != ControllerMode::Custom {
            return None;
        }
        let joystick = self.simulation.joystick();
        let center = self.joystick_center()?;
        Some(
            JoystickOverlay::new(center, joystick.outer_radius, joystick.inner_radius)
                .with_knob_offset(joystick.stick_offset()),
        )
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        // 1-3. Poll source, advance stick animation, integrate
        self.simulation.update(&mut self.world);

        // The driver names the pad some time after subscribing
        if self.simulation.source().device_name() != self.shown_device {
            self.update_title();
        }

        // 4. Render
        let overlay = self.overlay();
        let scale_factor = self.scale_factor();
        if let Some(render) = &mut self.render {
            match render.render_frame(&self.world, &self.handles, overlay.as_ref(), scale_factor) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.reconfigure(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let mut render = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            &self.config.camera,
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };
        render.upload_object(&self.world, self.handles.object);

        self.window = Some(window);
        self.render = Some(render);
        self.update_title();
        log::info!("Tab switches controller mode, P switches policy, R resets");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = self.to_points(position);
                let event = self.router.moved(PointerId::Mouse, point);
                self.apply_drag(event);
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                ElementState::Pressed => {
                    if let Some(point) = self.router.cursor() {
                        let hit = self.is_joystick_hit(point);
                        self.router.press(PointerId::Mouse, point, hit);
                    }
                }
                ElementState::Released => {
                    let event = self.router.release(PointerId::Mouse);
                    self.apply_drag(event);
                }
            },

            WindowEvent::Touch(touch) => {
                let pointer = PointerId::Touch(touch.id);
                let point = self.to_points(touch.location);
                match touch.phase {
                    TouchPhase::Started => {
                        let hit = self.is_joystick_hit(point);
                        self.router.press(pointer, point, hit);
                    }
                    TouchPhase::Moved => {
                        let event = self.router.moved(pointer, point);
                        self.apply_drag(event);
                    }
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        let event = self.router.release(pointer);
                        self.apply_drag(event);
                    }
                }
            }

            WindowEvent::Focused(false) => {
                let event = self.router.cancel();
                self.apply_drag(event);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting stickdrive");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
