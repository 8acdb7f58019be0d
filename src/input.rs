//! Request buttons.

use crate::signal::{SystemRequest, SystemRequests};
use embedded_hal::digital::InputPin;

/// A push button that posts a request when pressed.
///
/// Call [`RequestButton::poll`] from the input loop (every few milliseconds).
/// A request is posted on the released→pressed edge only, so holding the
/// button down posts once.
pub struct RequestButton<P: InputPin> {
    pin: P,
    request: SystemRequest,
    active_low: bool,
    pressed: bool,
}

impl<P: InputPin> RequestButton<P> {
    /// Creates a button that reads high when pressed.
    pub fn new(pin: P, request: SystemRequest) -> Self {
        Self {
            pin,
            request,
            active_low: false,
            pressed: false,
        }
    }

    /// Creates a button that reads low when pressed (pull-up wiring).
    pub fn active_low(pin: P, request: SystemRequest) -> Self {
        Self {
            active_low: true,
            ..Self::new(pin, request)
        }
    }

    /// Samples the pin and posts the request on a new press.
    ///
    /// Returns the sampled pressed state. Read errors count as released.
    pub fn poll(&mut self, requests: &SystemRequests) -> bool {
        let level = match self.pin.is_high() {
            Ok(level) => level,
            Err(_) => {
                warn!("request button read failed");
                self.active_low
            }
        };
        let pressed = level != self.active_low;

        if pressed && !self.pressed {
            requests.post(self.request);
        }

        self.pressed = pressed;
        pressed
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn release(self) -> P {
        self.pin
    }
}
