//! Integration tests for signal heads driven through groups

mod common;
use common::*;

use std::cell::RefCell;
use std::rc::Rc;
use traffic_sequencer::{
    Controller, HeadRef, Lamp, LightGroup, LightState, LightUnit, Polarity, RgbSignalHead,
    Sequence, Srgb, colors,
};

// ============================================================================
// Pin-driven heads
// ============================================================================

struct Pins {
    red: MockPin,
    yellow: MockPin,
    green: MockPin,
    crossing_red: MockPin,
    crossing_green: MockPin,
}

impl Pins {
    fn new() -> Self {
        Self {
            red: MockPin::new(),
            yellow: MockPin::new(),
            green: MockPin::new(),
            crossing_red: MockPin::new(),
            crossing_green: MockPin::new(),
        }
    }

    fn unit(&self, polarity: Polarity) -> LightUnit<MockPin> {
        LightUnit::full(
            self.red.clone(),
            self.yellow.clone(),
            self.green.clone(),
            self.crossing_red.clone(),
            self.crossing_green.clone(),
            polarity,
        )
    }

    fn levels(&self) -> [bool; 5] {
        [
            self.red.is_high(),
            self.yellow.is_high(),
            self.green.is_high(),
            self.crossing_red.is_high(),
            self.crossing_green.is_high(),
        ]
    }
}

#[test]
fn common_cathode_drives_lit_lamps_high() {
    let pins = Pins::new();
    let group = LightGroup::single(Rc::new(RefCell::new(pins.unit(Polarity::CommonCathode))));

    group.show(LightState::GREEN | LightState::CROSSING_RED);
    assert_eq!(pins.levels(), [false, false, true, true, false]);

    group.show(LightState::RED | LightState::CROSSING_GREEN);
    assert_eq!(pins.levels(), [true, false, false, false, true]);
}

#[test]
fn common_anode_drives_lit_lamps_low() {
    let pins = Pins::new();
    let group = LightGroup::single(Rc::new(RefCell::new(pins.unit(Polarity::CommonAnode))));

    // Wiring leaves every lamp dark.
    assert_eq!(pins.levels(), [true; 5]);

    group.show(LightState::YELLOW);
    assert_eq!(pins.levels(), [true, false, true, true, true]);
}

#[test]
fn lamps_without_pins_are_ignored() {
    let red = MockPin::new();
    let green = MockPin::new();
    let unit = LightUnit::crossing(red.clone(), green.clone(), Polarity::CommonCathode);
    assert!(unit.has_crossing_lights());
    assert!(!unit.has_lights());

    let group = LightGroup::single(Rc::new(RefCell::new(unit)));
    group.show(LightState::ALL);

    assert!(red.is_high());
    assert!(green.is_high());
}

#[test]
fn replacing_a_pin_returns_the_old_one() {
    let pins = Pins::new();
    let mut unit = pins.unit(Polarity::CommonCathode);

    let spare = MockPin::new();
    let old = unit.set_pin(Lamp::Yellow, spare.clone());
    assert!(old.is_some());
    assert!(unit.has_pin(Lamp::Yellow));
}

#[test]
fn controller_drives_pins_through_shared_head() {
    let timeline = Timeline::new();
    let pins = Pins::new();
    let unit: HeadRef = Rc::new(RefCell::new(pins.unit(Polarity::CommonCathode)));

    let mut controller = Controller::new()
        .with_group(LightGroup::single(unit.clone()), 0)
        .with_group(LightGroup::single(unit), 1)
        .with_sequence(Sequence::new().with_step(LightState::RED, ms(100)), 0)
        .with_sequence(Sequence::new().with_step(LightState::GREEN, ms(100)), 1);

    let mut delay = MockDelay::new(&timeline);
    controller.run(&mut delay);

    assert_eq!(pins.levels(), [false, false, true, false, false]);
    assert_eq!(timeline.sleeps(), vec![100, 100]);
}

// ============================================================================
// RGB-rendered heads
// ============================================================================

#[test]
fn rgb_head_starts_dark() {
    let head = RgbSignalHead::new(MockLed::new());
    assert!(colors_equal(head.current_color(), colors::OFF));
    assert_eq!(head.led().color_history().len(), 1);
}

#[test]
fn rgb_head_shows_vehicle_aspect() {
    let head = Rc::new(RefCell::new(RgbSignalHead::new(MockLed::new())));
    let group = LightGroup::single(head.clone());

    group.show(LightState::RED | LightState::CROSSING_RED);
    assert!(colors_equal(head.borrow().current_color(), colors::RED));

    group.show(LightState::GREEN | LightState::CROSSING_RED);
    assert!(colors_equal(head.borrow().current_color(), colors::GREEN));
}

#[test]
fn rgb_head_mixes_red_and_yellow() {
    let head = Rc::new(RefCell::new(RgbSignalHead::new(MockLed::new())));
    let group = LightGroup::single(head.clone());

    group.show(LightState::RED | LightState::YELLOW | LightState::CROSSING_RED);
    assert!(colors_equal(
        head.borrow().current_color(),
        Srgb::new(1.0, 0.375, 0.0)
    ));
}

#[test]
fn rgb_head_falls_back_to_crossing_aspect() {
    let head = Rc::new(RefCell::new(RgbSignalHead::new(MockLed::new())));
    let group = LightGroup::single(head.clone());

    group.show(LightState::CROSSING_GREEN);
    assert!(colors_equal(head.borrow().current_color(), colors::WALK));

    group.show(LightState::NONE);
    assert!(colors_equal(head.borrow().current_color(), colors::OFF));
}

#[test]
fn rgb_head_only_writes_on_change() {
    let head = Rc::new(RefCell::new(RgbSignalHead::new(MockLed::new())));
    let group = LightGroup::single(head.clone());

    group.turn_lights_on(LightState::RED);
    group.turn_lights_on(LightState::CROSSING_RED);
    group.turn_lights_on(LightState::RED);

    // Initial OFF plus one RED.
    let head = head.borrow();
    assert_eq!(head.led().color_history().len(), 2);
    assert!(colors_equal(head.led().get_last_color(), colors::RED));
    assert_eq!(head.lights(), LightState::RED | LightState::CROSSING_RED);
}
