//! Signal heads: the only point of contact with lamp hardware.
//!
//! [`SignalHead`] is the logical contract every group member satisfies.
//! [`LightUnit`] implements it over discrete `embedded-hal` output pins,
//! [`RgbSignalHead`] over a single RGB LED.

use crate::colors;
use crate::light::{Lamp, LightState};
use embedded_hal::digital::{OutputPin, PinState};
use heapless::LinearMap;
use palette::Srgb;

/// Trait for one addressable signal head.
///
/// Writes cannot fail. Implementations handle hardware errors internally.
pub trait SignalHead {
    /// Switches the given lamps on or off, leaving the others untouched.
    fn set_lights_state(&mut self, lights: LightState, on: bool);

    fn turn_lights_on(&mut self, lights: LightState) {
        self.set_lights_state(lights, true);
    }

    fn turn_lights_off(&mut self, lights: LightState) {
        self.set_lights_state(lights, false);
    }

    fn turn_all_lights_off(&mut self) {
        self.set_lights_state(LightState::ALL, false);
    }
}

/// How lamp outputs are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Output high lights the lamp.
    #[default]
    CommonCathode,

    /// Output low lights the lamp.
    CommonAnode,
}

impl Polarity {
    /// Pin level that gives the requested lamp state.
    #[inline]
    pub fn level(self, on: bool) -> PinState {
        match self {
            Polarity::CommonCathode => PinState::from(on),
            Polarity::CommonAnode => PinState::from(!on),
        }
    }
}

/// A signal head with one output pin per lamp.
///
/// Lamps without a pin are silently ignored, so a vehicle-only head can sit in
/// the same group as a full head with crossing lamps.
pub struct LightUnit<P: OutputPin> {
    pins: LinearMap<Lamp, P, 5>,
    polarity: Polarity,
}

impl<P: OutputPin> LightUnit<P> {
    /// Creates a head with no lamps wired.
    pub fn new(polarity: Polarity) -> Self {
        Self {
            pins: LinearMap::new(),
            polarity,
        }
    }

    /// Creates a vehicle head with red, yellow and green lamps.
    pub fn standard(red: P, yellow: P, green: P, polarity: Polarity) -> Self {
        let mut unit = Self::new(polarity);
        unit.set_up_standard_lights(red, yellow, green);
        unit
    }

    /// Creates a pedestrian head with crossing red and green lamps.
    pub fn crossing(red: P, green: P, polarity: Polarity) -> Self {
        let mut unit = Self::new(polarity);
        unit.set_up_crossing_lights(red, green);
        unit
    }

    /// Creates a head carrying both vehicle and pedestrian lamps.
    pub fn full(
        red: P,
        yellow: P,
        green: P,
        crossing_red: P,
        crossing_green: P,
        polarity: Polarity,
    ) -> Self {
        let mut unit = Self::standard(red, yellow, green, polarity);
        unit.set_up_crossing_lights(crossing_red, crossing_green);
        unit
    }

    pub fn set_up_standard_lights(&mut self, red: P, yellow: P, green: P) {
        self.set_pin(Lamp::Red, red);
        self.set_pin(Lamp::Yellow, yellow);
        self.set_pin(Lamp::Green, green);
    }

    pub fn set_up_crossing_lights(&mut self, red: P, green: P) {
        self.set_pin(Lamp::CrossingRed, red);
        self.set_pin(Lamp::CrossingGreen, green);
    }

    /// Wires `lamp` to `pin`, returning the pin previously wired to it.
    ///
    /// The new pin is driven to the off level immediately.
    pub fn set_pin(&mut self, lamp: Lamp, mut pin: P) -> Option<P> {
        drive(&mut pin, self.polarity.level(false));
        // Every lamp fits: the map holds one entry per Lamp variant.
        match self.pins.insert(lamp, pin) {
            Ok(previous) => previous,
            Err(_) => None,
        }
    }

    /// Changes the drive polarity. Lamps are switched off.
    pub fn set_polarity(&mut self, polarity: Polarity) {
        self.polarity = polarity;
        self.turn_all_lights_off();
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn pin_for(&self, lamp: Lamp) -> Option<&P> {
        self.pins.get(&lamp)
    }

    pub fn has_pin(&self, lamp: Lamp) -> bool {
        self.pins.contains_key(&lamp)
    }

    /// Returns true if any vehicle lamp is wired.
    pub fn has_lights(&self) -> bool {
        self.pins.keys().any(|lamp| !lamp.is_crossing())
    }

    /// Returns true if any crossing lamp is wired.
    pub fn has_crossing_lights(&self) -> bool {
        self.pins.keys().any(|lamp| lamp.is_crossing())
    }

    /// Releases the pins.
    pub fn into_pins(self) -> LinearMap<Lamp, P, 5> {
        self.pins
    }
}

impl<P: OutputPin> SignalHead for LightUnit<P> {
    fn set_lights_state(&mut self, lights: LightState, on: bool) {
        let level = self.polarity.level(on);

        for lamp in lights.lamps() {
            if let Some(pin) = self.pins.get_mut(&lamp) {
                drive(pin, level);
            }
        }
    }
}

fn drive<P: OutputPin>(pin: &mut P, level: PinState) {
    if pin.set_state(level).is_err() {
        warn!("lamp output write failed");
    }
}

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your LED hardware (GPIO, PWM, SPI, etc.). Handle any
/// hardware errors internally - this method cannot fail.
pub trait RgbLed {
    fn set_color(&mut self, color: Srgb);
}

/// A signal head rendered on one RGB LED.
///
/// The LED shows the vehicle aspect; red and yellow together mix to an orange.
/// Heads without vehicle lamps lit fall back to the pedestrian aspect, so the
/// same head also works as a crossing indicator.
pub struct RgbSignalHead<L: RgbLed> {
    led: L,
    lights: LightState,
    current_color: Srgb,
}

impl<L: RgbLed> RgbSignalHead<L> {
    /// Creates a head with the LED turned off.
    pub fn new(mut led: L) -> Self {
        led.set_color(colors::OFF);

        Self {
            led,
            lights: LightState::NONE,
            current_color: colors::OFF,
        }
    }

    /// Lamps currently lit.
    pub fn lights(&self) -> LightState {
        self.lights
    }

    /// Colour currently shown on the LED.
    pub fn current_color(&self) -> Srgb {
        self.current_color
    }

    pub fn led(&self) -> &L {
        &self.led
    }

    fn render(&mut self) {
        let color = if self.lights.intersection(LightState::MAIN).is_empty() {
            colors::crossing_color(self.lights)
        } else {
            colors::vehicle_color(self.lights)
        };

        // Update LED only if color changed
        if color != self.current_color {
            self.led.set_color(color);
            self.current_color = color;
        }
    }
}

impl<L: RgbLed> SignalHead for RgbSignalHead<L> {
    fn set_lights_state(&mut self, lights: LightState, on: bool) {
        self.lights = if on {
            self.lights | lights
        } else {
            self.lights.difference(lights)
        };
        self.render();
    }
}
