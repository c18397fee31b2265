//! Per-tick motion integration
//!
//! Once per frame the integrator reads the current [`InputVector`] and moves
//! the object it was handed, then places the camera entity on its orbit.
//! Steps are fixed per tick (no delta-time scaling), so motion speed follows
//! the display refresh rate.
//!
//! Screen drags report +y downward, so "stick up" is `-input.y` in both
//! policies.

use serde::{Serialize, Deserialize};
use stickdrive_input::{InputVector, OrbitAngles};
use stickdrive_math::{Quat, Vec3};
use crate::{CameraState, EntityKey, Transform, World};

/// How stick deflection moves the object
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPolicy {
    /// Slide the object across the XZ plane
    Translate,
    /// Spin the object: yaw about world Y, pitch about its own X
    #[default]
    RotateOrbit,
}

impl MotionPolicy {
    pub fn label(self) -> &'static str {
        match self {
            MotionPolicy::Translate => "Translate",
            MotionPolicy::RotateOrbit => "Rotate",
        }
    }

    /// The other policy
    pub fn toggled(self) -> Self {
        match self {
            MotionPolicy::Translate => MotionPolicy::RotateOrbit,
            MotionPolicy::RotateOrbit => MotionPolicy::Translate,
        }
    }
}

/// `x += input.x * speed`, `z += -input.y * speed`
pub fn translate_step(transform: &mut Transform, input: InputVector, speed: f32) {
    transform.translate(Vec3::new(input.x() * speed, 0.0, -input.y() * speed));
}

/// `rotation = yaw(input.x * speed) * rotation * pitch(-input.y * speed)`
///
/// Yaw is applied in world space and pitch in object space; the order matters.
pub fn rotate_step(transform: &mut Transform, input: InputVector, speed: f32) {
    let yaw = Quat::from_rotation_y(input.x() * speed);
    let pitch = Quat::from_rotation_x(-input.y() * speed);
    transform.rotation = yaw.compose(&transform.rotation).compose(&pitch).normalize();
}

/// What a tick touched
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickResult {
    /// The object handle was live and the policy ran
    pub object_moved: bool,
    /// The camera handle was live and was repositioned
    pub camera_moved: bool,
}

/// Applies input to the object and orbit angles to the camera
#[derive(Clone, Debug)]
pub struct MotionIntegrator {
    pub policy: MotionPolicy,
    /// World units per tick at full deflection (Translate)
    pub move_speed: f32,
    /// Radians per tick at full deflection (RotateOrbit)
    pub rotation_speed: f32,
    camera: CameraState,
    object: Option<EntityKey>,
    camera_entity: Option<EntityKey>,
    object_home: Transform,
}

impl Default for MotionIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionIntegrator {
    pub fn new() -> Self {
        Self {
            policy: MotionPolicy::default(),
            move_speed: 0.02,
            rotation_speed: 0.05,
            camera: CameraState::default(),
            object: None,
            camera_entity: None,
            object_home: Transform::identity(),
        }
    }

    /// Builder: set motion policy
    pub fn with_policy(mut self, policy: MotionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builder: set translation speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set rotation speed
    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.rotation_speed = speed;
        self
    }

    /// Builder: set camera orbit radius
    pub fn with_camera_radius(mut self, radius: f32) -> Self {
        self.camera.radius = radius;
        self
    }

    /// Hand over the object to move; its current transform becomes the reset pose
    pub fn attach_object(&mut self, world: &World, key: EntityKey) {
        if let Some(entity) = world.get_entity(key) {
            self.object_home = entity.transform;
        }
        self.object = Some(key);
    }

    /// Hand over the camera entity to position
    pub fn attach_camera(&mut self, key: EntityKey) {
        self.camera_entity = Some(key);
    }

    /// Forget both handles; later ticks do nothing
    pub fn detach(&mut self) {
        self.object = None;
        self.camera_entity = None;
    }

    pub fn object(&self) -> Option<EntityKey> {
        self.object
    }

    pub fn camera_entity(&self) -> Option<EntityKey> {
        self.camera_entity
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Set orbit angles for the next tick (elevation is clamped)
    pub fn set_camera_angles(&mut self, angles: OrbitAngles) {
        self.camera.set_angles(angles);
    }

    /// Run one tick
    ///
    /// Missing or stale handles are skipped silently: before the scene is
    /// built there is simply nothing to move.
    pub fn tick(&mut self, world: &mut World, input: InputVector) -> TickResult {
        let mut result = TickResult::default();

        if let Some(entity) = self.object.and_then(|key| world.get_entity_mut(key)) {
            match self.policy {
                MotionPolicy::Translate => translate_step(&mut entity.transform, input, self.move_speed),
                MotionPolicy::RotateOrbit => rotate_step(&mut entity.transform, input, self.rotation_speed),
            }
            result.object_moved = true;
        }

        if let Some(entity) = self.camera_entity.and_then(|key| world.get_entity_mut(key)) {
            self.camera.apply_to(&mut entity.transform);
            result.camera_moved = true;
        }

        result
    }

    /// Put the object back to its attach-time pose and the camera to rest
    pub fn reset(&mut self, world: &mut World) {
        if let Some(entity) = self.object.and_then(|key| world.get_entity_mut(key)) {
            entity.transform = self.object_home;
        }
        self.camera.set_angles(OrbitAngles::default());
        log::debug!("Motion reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entity, Mesh};

    const EPSILON: f32 = 1e-5;

    fn cube_world() -> (World, EntityKey, EntityKey) {
        let mut world = World::new();
        let cube = world.add_entity(Entity::new(Mesh::Cube { size: 0.35 }));
        let camera = world.add_entity(Entity::empty());
        (world, cube, camera)
    }

    #[test]
    fn test_translate_step_example() {
        let mut t = Transform::identity();
        translate_step(&mut t, InputVector::new(0.5, -0.5), 0.02);
        assert!((t.position.x - 0.01).abs() < EPSILON);
        assert!((t.position.z - 0.01).abs() < EPSILON);
        assert_eq!(t.position.y, 0.0);
    }

    #[test]
    fn test_translate_accumulates_per_tick() {
        let mut t = Transform::identity();
        for _ in 0..10 {
            translate_step(&mut t, InputVector::new(1.0, 0.0), 0.02);
        }
        assert!((t.position.x - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_rotate_step_yaw_only() {
        let mut t = Transform::identity();
        rotate_step(&mut t, InputVector::new(1.0, 0.0), 0.05);
        let expected = Quat::from_rotation_y(0.05);
        assert!((t.rotation.y - expected.y).abs() < EPSILON);
        assert!((t.rotation.w - expected.w).abs() < EPSILON);
    }

    #[test]
    fn test_rotate_step_pitch_is_local() {
        // Yaw a quarter turn first, then push the stick up (negative screen y)
        let mut t = Transform::from_position_rotation(
            Vec3::ZERO,
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        rotate_step(&mut t, InputVector::new(0.0, -1.0), std::f32::consts::FRAC_PI_2);
        // Pitch ran about the object's X (world -Z), so local up swings to +X
        let up = t.up();
        assert!((up - Vec3::X).length() < 1e-4, "got {:?}", up);
    }

    #[test]
    fn test_rotation_stays_unit() {
        let mut t = Transform::identity();
        for i in 0..1000 {
            let a = i as f32 * 0.37;
            rotate_step(&mut t, InputVector::new(a.cos(), a.sin()), 0.05);
        }
        assert!((t.rotation.magnitude() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_tick_without_handles_is_noop() {
        let (mut world, cube, _) = cube_world();
        let mut integrator = MotionIntegrator::new().with_policy(MotionPolicy::Translate);
        let result = integrator.tick(&mut world, InputVector::new(1.0, 0.0));

        assert_eq!(result, TickResult::default());
        assert_eq!(world.get_entity(cube).unwrap().transform, Transform::identity());
    }

    #[test]
    fn test_tick_with_stale_handle_is_noop() {
        let (mut world, cube, _) = cube_world();
        let mut integrator = MotionIntegrator::new();
        integrator.attach_object(&world, cube);
        world.remove_entity(cube);

        let result = integrator.tick(&mut world, InputVector::new(1.0, 1.0));
        assert!(!result.object_moved);
    }

    #[test]
    fn test_tick_moves_object_and_camera() {
        let (mut world, cube, camera) = cube_world();
        let mut integrator = MotionIntegrator::new()
            .with_policy(MotionPolicy::Translate)
            .with_camera_radius(2.0);
        integrator.attach_object(&world, cube);
        integrator.attach_camera(camera);
        integrator.set_camera_angles(OrbitAngles { azimuth: 0.0, elevation: 0.0 });

        let result = integrator.tick(&mut world, InputVector::new(0.5, -0.5));
        assert!(result.object_moved && result.camera_moved);

        let cube_pos = world.get_entity(cube).unwrap().transform.position;
        assert!((cube_pos.x - 0.01).abs() < EPSILON);
        let cam = world.get_entity(camera).unwrap().transform;
        assert!((cam.position - Vec3::new(0.0, 0.0, 2.0)).length() < EPSILON);
        assert!((cam.forward() - (-Vec3::Z)).length() < 1e-4);
    }

    #[test]
    fn test_zero_input_leaves_object() {
        let (mut world, cube, _) = cube_world();
        let mut integrator = MotionIntegrator::new();
        integrator.attach_object(&world, cube);
        integrator.tick(&mut world, InputVector::ZERO);
        let t = world.get_entity(cube).unwrap().transform;
        assert!((t.rotation.w - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_reset_restores_home() {
        let (mut world, cube, _) = cube_world();
        let mut integrator = MotionIntegrator::new().with_policy(MotionPolicy::Translate);
        integrator.attach_object(&world, cube);
        integrator.set_camera_angles(OrbitAngles { azimuth: 1.0, elevation: 0.5 });
        integrator.tick(&mut world, InputVector::new(1.0, 1.0));

        integrator.reset(&mut world);
        assert_eq!(world.get_entity(cube).unwrap().transform, Transform::identity());
        assert_eq!(integrator.camera().angles(), OrbitAngles::default());
    }

    #[test]
    fn test_policy_toggle() {
        assert_eq!(MotionPolicy::Translate.toggled(), MotionPolicy::RotateOrbit);
        assert_eq!(MotionPolicy::RotateOrbit.label(), "Rotate");
    }
}
