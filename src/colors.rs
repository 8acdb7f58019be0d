//! Lamp colours for RGB-rendered signal heads.
//!
//! Discrete lamps have no colour to speak of, but development boards often
//! carry a single RGB LED per head. These helpers map a [`LightState`] to the
//! colour such an LED should show.

use crate::light::{Lamp, LightState};
use palette::Srgb;

pub const OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);
pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
pub const AMBER: Srgb = Srgb::new(1.0, 0.75, 0.0);
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);

/// Pedestrian "walk" white-green.
pub const WALK: Srgb = Srgb::new(0.6, 1.0, 0.6);

/// Nominal colour of a single lamp.
#[inline]
pub fn lamp_color(lamp: Lamp) -> Srgb {
    match lamp {
        Lamp::Red | Lamp::CrossingRed => RED,
        Lamp::Yellow => AMBER,
        Lamp::Green => GREEN,
        Lamp::CrossingGreen => WALK,
    }
}

/// Average colour of the lamps in `state` that fall within `mask`.
///
/// Returns [`OFF`] when none of them are lit.
pub fn blend(state: LightState, mask: LightState) -> Srgb {
    let mut count = 0u8;
    let (mut red, mut green, mut blue) = (0.0f32, 0.0f32, 0.0f32);

    for lamp in (state & mask).lamps() {
        let color = lamp_color(lamp);
        red += color.red;
        green += color.green;
        blue += color.blue;
        count += 1;
    }

    if count == 0 {
        return OFF;
    }

    let n = count as f32;
    Srgb::new(red / n, green / n, blue / n)
}

/// Colour of the vehicle aspect.
#[inline]
pub fn vehicle_color(state: LightState) -> Srgb {
    blend(state, LightState::MAIN)
}

/// Colour of the pedestrian aspect.
#[inline]
pub fn crossing_color(state: LightState) -> Srgb {
    blend(state, LightState::CROSSING)
}
