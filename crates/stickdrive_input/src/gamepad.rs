//! External gamepad subscription
//!
//! A [`GamepadBackend`] connects to a device and hands back a [`Subscription`].
//! The device's analog stick is sampled on a driver thread that only ever
//! writes into a [`LatestValue`] slot; the event-loop thread drains the slot
//! once per tick. Older unread samples are overwritten, never queued.
//!
//! [`GilrsBackend`] is the platform implementation, built on `gilrs`.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use gilrs::{Axis, Event, EventType, Gilrs};
use serde::{Serialize, Deserialize};

/// Raw stick sample `(x, y)`, each axis in [-1, 1], y up
pub type StickSample = (f32, f32);

/// Single-slot handoff where a new value replaces any unread one
#[derive(Debug)]
pub struct LatestValue<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for LatestValue<T> {
    fn clone(&self) -> Self {
        Self { slot: Arc::clone(&self.slot) }
    }
}

impl<T> Default for LatestValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestValue<T> {
    pub fn new() -> Self {
        Self { slot: Arc::new(Mutex::new(None)) }
    }

    /// Store `value`, discarding any unread previous value
    pub fn publish(&self, value: T) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(value);
    }

    /// Take the newest value, leaving the slot empty
    pub fn take(&self) -> Option<T> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

/// Which analog element of the device to expose
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickElement {
    #[default]
    Left,
    Right,
}

impl StickElement {
    fn axes(self) -> (Axis, Axis) {
        match self {
            StickElement::Left => (Axis::LeftStickX, Axis::LeftStickY),
            StickElement::Right => (Axis::RightStickX, Axis::RightStickY),
        }
    }
}

/// Device configuration registered on connect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadConfig {
    /// Stick that drives the input vector
    pub stick: StickElement,
    /// Radial deadzone; samples inside it are reported as (0, 0)
    pub deadzone: f32,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            stick: StickElement::Left,
            deadzone: 0.05,
        }
    }
}

/// Zero out samples inside the radial deadzone, pass the rest through unscaled
pub fn apply_deadzone(sample: StickSample, deadzone: f32) -> StickSample {
    if sample.0.hypot(sample.1) < deadzone {
        (0.0, 0.0)
    } else {
        sample
    }
}

/// Gamepad connection error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The platform gamepad subsystem failed to initialize
    Init(String),
    /// No gamepad is connected
    NoDevice,
    /// The driver thread could not be started
    DriverThread(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Init(msg) => write!(f, "Gamepad subsystem init failed: {}", msg),
            DeviceError::NoDevice => write!(f, "No gamepad connected"),
            DeviceError::DriverThread(msg) => write!(f, "Gamepad driver thread error: {}", msg),
        }
    }
}

impl std::error::Error for DeviceError {}

/// Name of the connected device, filled in by the driver once it finds one
#[derive(Debug, Clone, Default)]
pub struct DeviceName {
    name: Arc<Mutex<Option<String>>>,
}

impl DeviceName {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: impl Into<String>) {
        *self.name.lock().unwrap_or_else(|e| e.into_inner()) = Some(name.into());
    }

    pub fn get(&self) -> Option<String> {
        self.name.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Live connection to a device
///
/// Dropping the subscription (or calling [`Subscription::disconnect`]) stops
/// and joins the driver thread. No samples are delivered afterwards.
pub struct Subscription {
    samples: LatestValue<StickSample>,
    device: DeviceName,
    stop: Arc<AtomicBool>,
    driver: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Wrap a running driver thread
    pub fn new(
        samples: LatestValue<StickSample>,
        device: DeviceName,
        stop: Arc<AtomicBool>,
        driver: JoinHandle<()>,
    ) -> Self {
        Self {
            samples,
            device,
            stop,
            driver: Some(driver),
        }
    }

    /// A subscription fed by some other producer holding a clone of `samples`
    pub fn detached(samples: LatestValue<StickSample>) -> Self {
        Self {
            samples,
            device: DeviceName::new(),
            stop: Arc::new(AtomicBool::new(false)),
            driver: None,
        }
    }

    pub fn with_device_name(self, name: impl Into<String>) -> Self {
        self.device.set(name);
        self
    }

    /// Device name, once the driver has found a device
    pub fn device_name(&self) -> Option<String> {
        self.device.get()
    }

    /// Newest sample since the last call, if any
    pub fn latest(&self) -> Option<StickSample> {
        self.samples.take()
    }

    /// Stop the driver and wait for it to exit
    pub fn disconnect(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(driver) = self.driver.take() {
            if driver.join().is_err() {
                log::warn!("Gamepad driver thread panicked");
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// A source of gamepad subscriptions
pub trait GamepadBackend {
    /// Register `config` with the device and start delivering samples
    ///
    /// Must not wait for the device. Discovery failures after this returns
    /// are logged by the driver and leave the subscription silent.
    fn connect(&mut self, config: &GamepadConfig) -> Result<Subscription, DeviceError>;
}

/// `gilrs`-backed gamepad access
///
/// Each connection runs its own driver thread that owns the `Gilrs` context.
pub struct GilrsBackend {
    /// Sleep between event polls on the driver thread
    pub poll_interval: Duration,
}

impl Default for GilrsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GilrsBackend {
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_millis(4),
        }
    }
}

impl GamepadBackend for GilrsBackend {
    fn connect(&mut self, config: &GamepadConfig) -> Result<Subscription, DeviceError> {
        let samples = LatestValue::new();
        let device = DeviceName::new();
        let stop = Arc::new(AtomicBool::new(false));

        let driver = {
            let samples = samples.clone();
            let device = device.clone();
            let stop = Arc::clone(&stop);
            let config = config.clone();
            let poll_interval = self.poll_interval;
            thread::Builder::new()
                .name("gamepad-driver".to_string())
                .spawn(move || {
                    if let Err(e) = run_driver(&config, &samples, &device, &stop, poll_interval) {
                        log::warn!("Failed to connect gamepad: {}. Gamepad input stays inactive.", e);
                    }
                })
                .map_err(|e| DeviceError::DriverThread(e.to_string()))?
        };

        Ok(Subscription::new(samples, device, stop, driver))
    }
}

/// Stick state of one pad; events from any other pad are ignored
struct StickTracker<I> {
    pad: I,
    axes: (Axis, Axis),
    stick: StickSample,
}

impl<I: PartialEq> StickTracker<I> {
    fn new(pad: I, element: StickElement) -> Self {
        Self {
            pad,
            axes: element.axes(),
            stick: (0.0, 0.0),
        }
    }

    /// Returns whether the sample changed
    fn axis_changed(&mut self, source: I, axis: Axis, value: f32) -> bool {
        if source != self.pad {
            return false;
        }
        if axis == self.axes.0 {
            self.stick.0 = value;
        } else if axis == self.axes.1 {
            self.stick.1 = value;
        } else {
            return false;
        }
        true
    }

    fn disconnected(&mut self, source: I) -> bool {
        if source != self.pad {
            return false;
        }
        log::info!("Gamepad disconnected");
        self.stick = (0.0, 0.0);
        true
    }

    fn sample(&self) -> StickSample {
        self.stick
    }
}

/// Driver thread body: find a pad, then forward its stick changes
fn run_driver(
    config: &GamepadConfig,
    samples: &LatestValue<StickSample>,
    device: &DeviceName,
    stop: &AtomicBool,
    poll_interval: Duration,
) -> Result<(), DeviceError> {
    let mut gilrs = Gilrs::new().map_err(|e| DeviceError::Init(e.to_string()))?;

    let (pad_id, name) = gilrs
        .gamepads()
        .next()
        .map(|(id, gamepad)| (id, gamepad.name().to_string()))
        .ok_or(DeviceError::NoDevice)?;
    log::info!("Gamepad connected: {}", name);
    device.set(name);

    let mut tracker = StickTracker::new(pad_id, config.stick);

    while !stop.load(Ordering::Acquire) {
        let mut changed = false;
        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            changed |= match event {
                EventType::AxisChanged(axis, value, _) => tracker.axis_changed(id, axis, value),
                EventType::Disconnected => tracker.disconnected(id),
                _ => false,
            };
        }

        if changed {
            samples.publish(apply_deadzone(tracker.sample(), config.deadzone));
        }
        thread::sleep(poll_interval);
    }

    log::debug!("Gamepad driver stopped");
    Ok(())
}
