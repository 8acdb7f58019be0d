//! Builders for the sequences the behavioural systems are made of.
//!
//! Every function returns a plain [`Sequence`]; there is no sequence
//! hierarchy, only different step lists.

use crate::light::LightState;
use crate::sequence::Sequence;
use core::time::Duration;

/// Default amber time for both red→green and green→red transitions.
pub const DEFAULT_YELLOW_TIME: Duration = Duration::from_secs(3);

/// Default half-period of a flash.
pub const DEFAULT_FLASH_TIME: Duration = Duration::from_millis(500);

/// Red held on both vehicle and crossing lamps.
pub const ALL_RED: LightState = LightState::RED.union(LightState::CROSSING_RED);

/// Vehicle green with the crossing held at red.
pub const GREEN_WITH_CROSSING_RED: LightState = LightState::GREEN.union(LightState::CROSSING_RED);

/// How a head moves from red to green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightType {
    /// Red, then red+yellow, then green.
    #[default]
    RedYellowGreen,

    /// Red straight to green.
    RedGreen,
}

/// A single step holding `lights` for `delay`.
pub fn static_hold(lights: LightState, delay: Duration) -> Sequence {
    Sequence::new().with_step(lights, delay)
}

/// Yellow for `yellow_time`, then red for `delay`. The crossing stays red.
pub fn green_to_red(delay: Duration, yellow_time: Duration) -> Sequence {
    Sequence::new()
        .with_step(LightState::YELLOW | LightState::CROSSING_RED, yellow_time)
        .with_step(ALL_RED, delay)
}

/// Optionally red+yellow for `yellow_time`, then green for `delay`.
pub fn red_to_green(delay: Duration, light_type: LightType, yellow_time: Duration) -> Sequence {
    let mut sequence = Sequence::new();

    if light_type == LightType::RedYellowGreen {
        sequence.add(
            LightState::RED | LightState::YELLOW | LightState::CROSSING_RED,
            yellow_time,
        );
    }

    sequence.add(GREEN_WITH_CROSSING_RED, delay);
    sequence
}

/// Vehicle red with the crossing at green.
pub fn crossing_green(delay: Duration) -> Sequence {
    static_hold(LightState::RED | LightState::CROSSING_GREEN, delay)
}

/// Vehicle red with the crossing back at red.
pub fn crossing_red(delay: Duration) -> Sequence {
    static_hold(ALL_RED, delay)
}

/// `flashes` cycles of `static_lights` then `lights`, each held for `flash_time`.
pub fn flashing(
    lights: LightState,
    static_lights: LightState,
    flashes: u32,
    flash_time: Duration,
) -> Sequence {
    let mut sequence = Sequence::new();
    add_flashes(&mut sequence, lights, static_lights, flashes, flash_time);
    sequence
}

fn add_flashes(
    sequence: &mut Sequence,
    lights: LightState,
    static_lights: LightState,
    flashes: u32,
    flash_time: Duration,
) {
    for _ in 0..flashes {
        sequence.add(static_lights, flash_time);
        sequence.add(lights, flash_time);
    }
}

/// Flashing yellow plus crossing green against dark, then green held for
/// `post_flash_delay`.
pub fn flashing_crossing_to_green(
    post_flash_delay: Duration,
    flashes: u32,
    flash_time: Duration,
) -> Sequence {
    let mut sequence = Sequence::new();
    add_flashes(
        &mut sequence,
        LightState::YELLOW | LightState::CROSSING_GREEN,
        LightState::NONE,
        flashes,
        flash_time,
    );
    sequence.add(GREEN_WITH_CROSSING_RED, post_flash_delay);
    sequence
}

pub fn yellow_flashing(flashes: u32, flash_time: Duration) -> Sequence {
    flashing(LightState::YELLOW, LightState::CROSSING_RED, flashes, flash_time)
}

pub fn red_flashing(flashes: u32, flash_time: Duration) -> Sequence {
    flashing(LightState::RED, LightState::CROSSING_RED, flashes, flash_time)
}

/// Every lamp on its own, then a fill-up and drain of the vehicle lamps.
pub fn test_animation(step_time: Duration) -> Sequence {
    let red_yellow = LightState::RED | LightState::YELLOW;
    let main = LightState::MAIN;
    let main_crossing_red = LightState::MAIN | LightState::CROSSING_RED;

    [
        LightState::ALL,
        LightState::RED,
        LightState::YELLOW,
        LightState::GREEN,
        LightState::CROSSING_RED,
        LightState::CROSSING_GREEN,
        LightState::NONE,
        LightState::RED,
        red_yellow,
        main,
        main_crossing_red,
        LightState::ALL,
        main_crossing_red,
        main,
        red_yellow,
        LightState::RED,
        LightState::NONE,
    ]
    .into_iter()
    .fold(Sequence::new(), |sequence, lights| {
        sequence.with_step(lights, step_time)
    })
}
