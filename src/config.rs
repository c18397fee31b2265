//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SD_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use stickdrive_core::{MotionIntegrator, MotionPolicy};
use stickdrive_input::{ControllerMode, GamepadConfig, OrbitDrag, VirtualJoystick};
use stickdrive_render::camera::Projection;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub joystick: JoystickConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub rendering: RenderingConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SD_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SD_MOTION__POLICY=translate -> motion.policy = "translate"
        figment = figment.merge(Env::prefixed("SD_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Motion integrator with the configured policy, speeds and orbit radius
    pub fn integrator(&self) -> MotionIntegrator {
        MotionIntegrator::new()
            .with_policy(self.motion.policy)
            .with_move_speed(self.motion.move_speed)
            .with_rotation_speed(self.motion.rotation_speed)
            .with_camera_radius(self.camera.radius)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width
    pub width: u32,
    /// Logical height
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Stickdrive".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Orbit camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the origin
    pub radius: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            fov: 60.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

impl CameraConfig {
    pub fn projection(&self) -> Projection {
        Projection {
            fov_degrees: self.fov,
            near: self.near,
            far: self.far,
        }
    }
}

/// On-screen joystick configuration (logical points)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickConfig {
    pub outer_radius: f32,
    pub inner_radius: f32,
    /// Inset from the bottom-left corner
    pub padding: f32,
    /// Spring-back response in seconds
    pub spring_response: f32,
    pub spring_damping_fraction: f32,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            outer_radius: 75.0,
            inner_radius: 30.0,
            padding: 40.0,
            spring_response: 0.3,
            spring_damping_fraction: 0.6,
        }
    }
}

impl JoystickConfig {
    pub fn joystick(&self) -> VirtualJoystick {
        VirtualJoystick::new()
            .with_radii(self.outer_radius, self.inner_radius)
            .with_spring(self.spring_response, self.spring_damping_fraction)
    }
}

/// Input source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Mode active after startup
    pub initial_mode: ControllerMode,
    pub gamepad: GamepadConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            initial_mode: ControllerMode::ExternalGamepad,
            gamepad: GamepadConfig::default(),
        }
    }
}

/// How input moves the object and camera
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub policy: MotionPolicy,
    /// World units per tick at full deflection
    pub move_speed: f32,
    /// Radians per tick at full deflection
    pub rotation_speed: f32,
    /// Radians per point of camera drag
    pub orbit_sensitivity: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            policy: MotionPolicy::RotateOrbit,
            move_speed: 0.02,
            rotation_speed: 0.05,
            orbit_sensitivity: 0.01,
        }
    }
}

impl MotionConfig {
    pub fn orbit_drag(&self) -> OrbitDrag {
        OrbitDrag::new().with_sensitivity(self.orbit_sensitivity)
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Light direction [x, y, z]
    pub light_dir: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_strength: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.02, 0.02, 0.05, 1.0],
            light_dir: [0.5, 1.0, 0.3],
            ambient_strength: 0.3,
            diffuse_strength: 0.7,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
