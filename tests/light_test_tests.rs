//! Integration tests for LightTestSystem

mod common;

use common::*;
use traffic_sequencer::{
    HeadRef, LightState, LightTestSystem, LightTestTiming, LightUnit, Polarity, TrafficSystem,
};

#[test]
fn animation_plays_once_on_every_head() {
    let timeline = Timeline::new();
    let mut system = LightTestSystem::from_heads(
        [
            head("north", &timeline) as HeadRef,
            head("south", &timeline) as HeadRef,
        ],
        MockDelay::new(&timeline),
    );

    system.run();

    assert_eq!(timeline.sleeps(), vec![150; 17]);

    let north = timeline.lit("north");
    assert_eq!(north.len(), 17);
    assert_eq!(north, timeline.lit("south"));
    assert_eq!(north[0], LightState::ALL);
    assert_eq!(north[1], LightState::RED);
    assert_eq!(north[6], LightState::NONE);
    assert_eq!(north[11], LightState::ALL);
    assert_eq!(north[16], LightState::NONE);
}

#[test]
fn every_lamp_is_shown_alone() {
    let timeline = Timeline::new();
    let mut system =
        LightTestSystem::from_heads([head("north", &timeline) as HeadRef], MockDelay::new(&timeline));

    system.run();

    let lit = timeline.lit("north");
    for lamp in [
        LightState::RED,
        LightState::YELLOW,
        LightState::GREEN,
        LightState::CROSSING_RED,
        LightState::CROSSING_GREEN,
    ] {
        assert!(lit.contains(&lamp), "{:?} never shown alone", lamp);
    }
}

#[test]
fn animation_delay_override() {
    let timeline = Timeline::new();
    let mut system =
        LightTestSystem::from_heads([head("north", &timeline) as HeadRef], MockDelay::new(&timeline));

    system.set_timing(LightTestTiming::AnimationDelay, ms(20));
    system.run();

    assert_eq!(timeline.sleeps(), vec![20; 17]);
    assert_eq!(system.delay().elapsed_ms(), 340);
}

#[test]
fn pin_head_ends_dark_on_common_anode() {
    let timeline = Timeline::new();
    let red = MockPin::new();
    let yellow = MockPin::new();
    let green = MockPin::new();
    let crossing_red = MockPin::new();
    let crossing_green = MockPin::new();

    let mut unit = LightUnit::standard(
        red.clone(),
        yellow.clone(),
        green.clone(),
        Polarity::CommonAnode,
    );
    unit.set_up_crossing_lights(crossing_red.clone(), crossing_green.clone());
    let unit = std::rc::Rc::new(std::cell::RefCell::new(unit));

    let mut system = LightTestSystem::from_heads([unit as HeadRef], MockDelay::new(&timeline));
    system.run();

    // Active-low outputs: high means dark.
    for pin in [&red, &yellow, &green, &crossing_red, &crossing_green] {
        assert!(pin.is_high());
        assert!(pin.writes() > 17);
    }
}
