//! Controller source selection
//!
//! Two producers feed one [`InputVector`]: the on-screen joystick (Custom)
//! and an external gamepad. Only the active mode's vector is visible.
//!
//! Mode changes go through [`ControllerSource::transition`], which updates the
//! state and returns the subscription work to do as [`SourceEffect`]s. The
//! caller runs them with [`ControllerSource::apply_effects`], or uses
//! [`ControllerSource::set_mode`] to do both.

use serde::{Serialize, Deserialize};

use crate::gamepad::{GamepadBackend, GamepadConfig, Subscription};
use crate::InputVector;

/// Which producer drives the input vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerMode {
    /// On-screen virtual joystick
    #[default]
    Custom,
    /// Platform gamepad
    ExternalGamepad,
}

impl ControllerMode {
    /// All modes, in selector order
    pub const ALL: [ControllerMode; 2] = [ControllerMode::Custom, ControllerMode::ExternalGamepad];

    /// Label shown in the mode selector
    pub fn label(self) -> &'static str {
        match self {
            ControllerMode::Custom => "Custom",
            ControllerMode::ExternalGamepad => "Gamepad",
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ControllerMode::Custom => ControllerMode::ExternalGamepad,
            ControllerMode::ExternalGamepad => ControllerMode::Custom,
        }
    }
}

/// Side effect requested by a mode transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEffect {
    /// Connect to the external device
    Subscribe,
    /// Drop the external device connection
    Unsubscribe,
}

/// The active input source and its current vector
pub struct ControllerSource {
    mode: ControllerMode,
    custom: InputVector,
    external: InputVector,
    subscription: Option<Subscription>,
    gamepad_config: GamepadConfig,
}

impl Default for ControllerSource {
    fn default() -> Self {
        Self::new(GamepadConfig::default())
    }
}

impl ControllerSource {
    /// Start in Custom mode with nothing subscribed
    pub fn new(gamepad_config: GamepadConfig) -> Self {
        Self {
            mode: ControllerMode::Custom,
            custom: InputVector::ZERO,
            external: InputVector::ZERO,
            subscription: None,
            gamepad_config,
        }
    }

    pub fn mode(&self) -> ControllerMode {
        self.mode
    }

    /// Whether an external device connection is live
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Name of the connected device, once the driver has found one
    pub fn device_name(&self) -> Option<String> {
        self.subscription.as_ref().and_then(|s| s.device_name())
    }

    /// Switch to `mode`, returning the effects the caller must perform
    ///
    /// The vector is zero once this returns for any actual change. Selecting
    /// the current mode is a no-op with no effects.
    pub fn transition(&mut self, mode: ControllerMode) -> Vec<SourceEffect> {
        if mode == self.mode {
            return Vec::new();
        }

        self.custom = InputVector::ZERO;
        self.external = InputVector::ZERO;

        let mut effects = Vec::with_capacity(2);
        if self.mode == ControllerMode::ExternalGamepad {
            effects.push(SourceEffect::Unsubscribe);
        }
        self.mode = mode;
        if mode == ControllerMode::ExternalGamepad {
            effects.push(SourceEffect::Subscribe);
        }

        log::info!("Controller mode: {}", mode.label());
        effects
    }

    /// Perform transition effects against `backend`
    ///
    /// A failed connect is logged and leaves the source inert at zero.
    pub fn apply_effects<B: GamepadBackend + ?Sized>(&mut self, effects: &[SourceEffect], backend: &mut B) {
        for effect in effects {
            match effect {
                SourceEffect::Unsubscribe => {
                    if let Some(subscription) = self.subscription.take() {
                        subscription.disconnect();
                        log::info!("Gamepad unsubscribed");
                    }
                    self.external = InputVector::ZERO;
                }
                SourceEffect::Subscribe => match backend.connect(&self.gamepad_config) {
                    Ok(subscription) => {
                        self.subscription = Some(subscription);
                    }
                    Err(e) => {
                        log::warn!("Failed to connect gamepad: {}. Gamepad input stays inactive.", e);
                    }
                },
            }
        }
    }

    /// Transition and perform the effects; returns whether the mode changed
    pub fn set_mode<B: GamepadBackend + ?Sized>(&mut self, mode: ControllerMode, backend: &mut B) -> bool {
        let effects = self.transition(mode);
        if effects.is_empty() {
            return false;
        }
        self.apply_effects(&effects, backend);
        true
    }

    /// Store the on-screen joystick's vector; ignored outside Custom mode
    pub fn set_custom(&mut self, input: InputVector) {
        if self.mode == ControllerMode::Custom {
            self.custom = input;
        }
    }

    /// Drain the device slot and return the active vector
    ///
    /// Gamepad samples are mapped 1:1; the device already reports normalized axes.
    pub fn poll(&mut self) -> InputVector {
        if self.mode == ControllerMode::ExternalGamepad {
            if let Some((x, y)) = self.subscription.as_ref().and_then(|s| s.latest()) {
                self.external = InputVector::new(x, y);
            }
        }
        self.current()
    }

    /// The active source's vector
    pub fn current(&self) -> InputVector {
        match self.mode {
            ControllerMode::Custom => self.custom,
            ControllerMode::ExternalGamepad => self.external,
        }
    }
}
