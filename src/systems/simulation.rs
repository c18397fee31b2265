//! Simulation system
//!
//! Owns the input state and the motion integrator. Each frame it:
//! - Polls the controller source
//! - Advances the joystick spring-back animation
//! - Integrates motion into the world

use std::time::Instant;
use stickdrive_core::{MotionIntegrator, MotionPolicy, TickResult, World};
use stickdrive_input::{
    ControllerMode, ControllerSource, GamepadBackend, InputVector, OrbitAngles, OrbitDrag,
    VirtualJoystick,
};
use stickdrive_math::Vec2;

use crate::config::AppConfig;
use crate::input::{DragEvent, DragTarget};
use crate::scene::SceneHandles;

/// Result of a simulation update
#[derive(Debug, Clone, Copy)]
pub struct SimulationResult {
    /// Capped frame delta in seconds
    pub dt: f32,
    /// Vector fed to the integrator this frame
    pub input: InputVector,
    pub tick: TickResult,
}

/// Input sources, gestures and the motion integrator
pub struct SimulationSystem {
    source: ControllerSource,
    joystick: VirtualJoystick,
    orbit: OrbitDrag,
    integrator: MotionIntegrator,
    backend: Box<dyn GamepadBackend>,
    last_frame: Instant,
}

impl SimulationSystem {
    pub fn new(
        source: ControllerSource,
        joystick: VirtualJoystick,
        orbit: OrbitDrag,
        integrator: MotionIntegrator,
        backend: Box<dyn GamepadBackend>,
    ) -> Self {
        Self {
            source,
            joystick,
            orbit,
            integrator,
            backend,
            last_frame: Instant::now(),
        }
    }

    /// Build from config; the source starts in Custom until [`Self::start`]
    pub fn from_config(config: &AppConfig, backend: Box<dyn GamepadBackend>) -> Self {
        Self::new(
            ControllerSource::new(config.controller.gamepad.clone()),
            config.joystick.joystick(),
            config.motion.orbit_drag(),
            config.integrator(),
            backend,
        )
    }

    /// Hand the scene's entities to the integrator and enter `initial_mode`
    pub fn start(&mut self, world: &World, handles: &SceneHandles, initial_mode: ControllerMode) {
        if let Some(object) = handles.object {
            self.integrator.attach_object(world, object);
        }
        if let Some(camera) = handles.camera {
            self.integrator.attach_camera(camera);
        }
        self.integrator.set_camera_angles(self.orbit.angles());
        self.set_mode(initial_mode);
        self.last_frame = Instant::now();
    }

    pub fn mode(&self) -> ControllerMode {
        self.source.mode()
    }

    pub fn policy(&self) -> MotionPolicy {
        self.integrator.policy
    }

    pub fn joystick(&self) -> &VirtualJoystick {
        &self.joystick
    }

    pub fn source(&self) -> &ControllerSource {
        &self.source
    }

    pub fn integrator(&self) -> &MotionIntegrator {
        &self.integrator
    }

    /// Switch controller mode; returns whether it changed
    pub fn set_mode(&mut self, mode: ControllerMode) -> bool {
        let changed = self.source.set_mode(mode, self.backend.as_mut());
        if changed {
            self.joystick.drag_ended();
        }
        changed
    }

    pub fn toggle_mode(&mut self) -> ControllerMode {
        self.set_mode(self.source.mode().toggled());
        self.source.mode()
    }

    pub fn toggle_policy(&mut self) -> MotionPolicy {
        self.integrator.policy = self.integrator.policy.toggled();
        log::info!("Motion policy: {}", self.integrator.policy.label());
        self.integrator.policy
    }

    /// Object back to its start pose, camera back to rest
    pub fn reset(&mut self, world: &mut World) {
        self.integrator.reset(world);
        self.orbit.reset(OrbitAngles::default());
        log::info!("Scene reset");
    }

    /// Whether a press at `point` lands on the on-screen stick
    ///
    /// The stick only exists in Custom mode.
    pub fn joystick_hit(&self, point: Vec2, center: Vec2) -> bool {
        self.source.mode() == ControllerMode::Custom && self.joystick.contains(point, center)
    }

    /// Apply a routed pointer gesture
    pub fn handle_drag(&mut self, event: DragEvent) {
        match event {
            DragEvent::Changed { target: DragTarget::Joystick, translation } => {
                let input = self.joystick.drag_changed(translation);
                self.source.set_custom(input);
            }
            DragEvent::Ended { target: DragTarget::Joystick } => {
                let input = self.joystick.drag_ended();
                self.source.set_custom(input);
            }
            DragEvent::Changed { target: DragTarget::Orbit, translation } => {
                let angles = self.orbit.changed(translation);
                self.integrator.set_camera_angles(angles);
            }
            DragEvent::Ended { target: DragTarget::Orbit } => {
                let angles = self.orbit.ended();
                self.integrator.set_camera_angles(angles);
            }
        }
    }

    /// Run one frame using wall-clock delta time
    pub fn update(&mut self, world: &mut World) -> SimulationResult {
        let now = Instant::now();
        // Cap dt so a stalled frame does not fling the stick animation
        let dt = (now - self.last_frame).as_secs_f32().min(0.25);
        self.last_frame = now;
        self.step(world, dt)
    }

    /// Run one frame with an explicit delta time
    pub fn step(&mut self, world: &mut World, dt: f32) -> SimulationResult {
        let input = self.source.poll();
        self.joystick.advance(dt);
        let tick = self.integrator.tick(world, input);
        SimulationResult { dt, input, tick }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneBuilder;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use stickdrive_input::gamepad::{DeviceError, LatestValue, StickSample};
    use stickdrive_input::{GamepadConfig, Subscription};

    struct MockBackend {
        slot: LatestValue<StickSample>,
        connects: Arc<AtomicUsize>,
    }

    impl GamepadBackend for MockBackend {
        fn connect(&mut self, _config: &GamepadConfig) -> Result<Subscription, DeviceError> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            Ok(Subscription::detached(self.slot.clone()))
        }
    }

    fn setup(
        initial_mode: ControllerMode,
    ) -> (SimulationSystem, World, SceneHandles, LatestValue<StickSample>, Arc<AtomicUsize>) {
        let slot = LatestValue::new();
        let connects = Arc::new(AtomicUsize::new(0));
        let backend = MockBackend {
            slot: slot.clone(),
            connects: connects.clone(),
        };
        let mut config = AppConfig::default();
        config.motion.policy = MotionPolicy::Translate;

        let mut sim = SimulationSystem::from_config(&config, Box::new(backend));
        let (world, handles) = SceneBuilder::demo_scene();
        sim.start(&world, &handles, initial_mode);
        (sim, world, handles, slot, connects)
    }

    fn object_position(world: &World, handles: &SceneHandles) -> stickdrive_math::Vec3 {
        world.get_entity(handles.object.unwrap()).unwrap().transform.position
    }

    #[test]
    fn test_start_in_gamepad_mode_subscribes() {
        let (sim, _, _, _, connects) = setup(ControllerMode::ExternalGamepad);
        assert_eq!(sim.mode(), ControllerMode::ExternalGamepad);
        assert!(sim.source().is_subscribed());
        assert_eq!(connects.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_joystick_drag_moves_object() {
        let (mut sim, mut world, handles, _, _) = setup(ControllerMode::Custom);
        sim.handle_drag(DragEvent::Changed {
            target: DragTarget::Joystick,
            translation: Vec2::new(100.0, 0.0),
        });
        let result = sim.step(&mut world, 1.0 / 60.0);

        assert_eq!(result.input, InputVector::new(1.0, 0.0));
        assert!(result.tick.object_moved && result.tick.camera_moved);
        assert!((object_position(&world, &handles).x - 0.02).abs() < 1e-5);
    }

    #[test]
    fn test_joystick_release_stops_immediately() {
        let (mut sim, mut world, handles, _, _) = setup(ControllerMode::Custom);
        sim.handle_drag(DragEvent::Changed {
            target: DragTarget::Joystick,
            translation: Vec2::new(45.0, 0.0),
        });
        sim.step(&mut world, 1.0 / 60.0);
        sim.handle_drag(DragEvent::Ended { target: DragTarget::Joystick });
        let before = object_position(&world, &handles);

        let result = sim.step(&mut world, 1.0 / 60.0);
        assert!(result.input.is_zero());
        assert_eq!(object_position(&world, &handles), before);
        // The knob is still springing back
        assert!(sim.joystick().is_animating());
    }

    #[test]
    fn test_gamepad_samples_drive_object() {
        let (mut sim, mut world, handles, slot, _) = setup(ControllerMode::ExternalGamepad);
        slot.publish((0.0, 1.0));
        sim.step(&mut world, 1.0 / 60.0);
        assert!((object_position(&world, &handles).z + 0.02).abs() < 1e-5);
    }

    #[test]
    fn test_joystick_ignored_in_gamepad_mode() {
        let (mut sim, mut world, handles, _, _) = setup(ControllerMode::ExternalGamepad);
        sim.handle_drag(DragEvent::Changed {
            target: DragTarget::Joystick,
            translation: Vec2::new(45.0, 0.0),
        });
        let result = sim.step(&mut world, 1.0 / 60.0);
        assert!(result.input.is_zero());
        assert_eq!(object_position(&world, &handles), stickdrive_math::Vec3::ZERO);
    }

    #[test]
    fn test_toggle_mode_round_trip() {
        let (mut sim, _, _, _, connects) = setup(ControllerMode::Custom);
        assert_eq!(sim.toggle_mode(), ControllerMode::ExternalGamepad);
        assert_eq!(sim.toggle_mode(), ControllerMode::Custom);
        assert!(!sim.source().is_subscribed());
        assert_eq!(connects.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_joystick_hit_only_in_custom_mode() {
        let (mut sim, _, _, _, _) = setup(ControllerMode::Custom);
        let center = Vec2::new(115.0, 485.0);
        assert!(sim.joystick_hit(Vec2::new(120.0, 480.0), center));
        assert!(!sim.joystick_hit(Vec2::new(400.0, 100.0), center));

        sim.set_mode(ControllerMode::ExternalGamepad);
        assert!(!sim.joystick_hit(Vec2::new(120.0, 480.0), center));
    }

    #[test]
    fn test_orbit_drag_moves_camera() {
        let (mut sim, mut world, handles, _, _) = setup(ControllerMode::Custom);
        sim.handle_drag(DragEvent::Changed {
            target: DragTarget::Orbit,
            translation: Vec2::new(100.0, 0.0),
        });
        sim.handle_drag(DragEvent::Ended { target: DragTarget::Orbit });
        sim.step(&mut world, 1.0 / 60.0);

        assert!((sim.integrator().camera().azimuth() - 1.0).abs() < 1e-5);
        let camera = world.get_entity(handles.camera.unwrap()).unwrap().transform;
        assert!((camera.position.x - 1.0f32.sin()).abs() < 1e-4);
    }

    #[test]
    fn test_reset_restores_scene() {
        let (mut sim, mut world, handles, _, _) = setup(ControllerMode::Custom);
        sim.handle_drag(DragEvent::Changed {
            target: DragTarget::Joystick,
            translation: Vec2::new(0.0, 45.0),
        });
        sim.handle_drag(DragEvent::Changed {
            target: DragTarget::Orbit,
            translation: Vec2::new(50.0, 50.0),
        });
        for _ in 0..3 {
            sim.step(&mut world, 1.0 / 60.0);
        }

        sim.reset(&mut world);
        assert_eq!(object_position(&world, &handles), stickdrive_math::Vec3::ZERO);
        assert_eq!(sim.integrator().camera().angles(), OrbitAngles::default());
    }

    #[test]
    fn test_toggle_policy() {
        let (mut sim, _, _, _, _) = setup(ControllerMode::Custom);
        assert_eq!(sim.toggle_policy(), MotionPolicy::RotateOrbit);
        assert_eq!(sim.policy(), MotionPolicy::RotateOrbit);
    }
}
