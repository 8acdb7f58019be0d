//! Shared test infrastructure for traffic-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use palette::Srgb;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use traffic_sequencer::{LightState, RgbLed, SignalHead};

// ============================================================================
// Timeline
// ============================================================================

/// One observable effect: a head lighting a state, or the delay holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Lit(&'static str, LightState),
    Sleep(u32),
}

/// Shared, ordered record of head writes and sleeps.
#[derive(Clone, Default)]
pub struct Timeline(Rc<RefCell<Vec<Event>>>);

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Every sleep, in order.
    pub fn sleeps(&self) -> Vec<u32> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Sleep(ms) => Some(*ms),
                Event::Lit(..) => None,
            })
            .collect()
    }

    pub fn total_ms(&self) -> u64 {
        self.sleeps().iter().map(|ms| *ms as u64).sum()
    }

    /// Every state lit on the named head, in order.
    pub fn lit(&self, head: &str) -> Vec<LightState> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Lit(name, lights) if *name == head => Some(*lights),
                _ => None,
            })
            .collect()
    }

    /// Pairs each state lit on `head` with the sleep that follows it.
    pub fn holds(&self, head: &str) -> Vec<(LightState, u32)> {
        let events = self.0.borrow();
        let mut holds = Vec::new();

        for (index, event) in events.iter().enumerate() {
            if let Event::Lit(name, lights) = event {
                if *name != head {
                    continue;
                }
                let sleep = events[index + 1..]
                    .iter()
                    .find_map(|next| match next {
                        Event::Sleep(ms) => Some(Some(*ms)),
                        Event::Lit(other, _) if *other == head => Some(None),
                        Event::Lit(..) => None,
                    })
                    .flatten()
                    .unwrap_or(0);
                holds.push((*lights, sleep));
            }
        }

        holds
    }
}

// ============================================================================
// Mock Heads
// ============================================================================

/// Head that records every state it is told to light.
pub struct MockHead {
    name: &'static str,
    lights: LightState,
    timeline: Timeline,
}

impl MockHead {
    pub fn new(name: &'static str, timeline: &Timeline) -> Self {
        Self {
            name,
            lights: LightState::NONE,
            timeline: timeline.clone(),
        }
    }

    pub fn lights(&self) -> LightState {
        self.lights
    }
}

impl SignalHead for MockHead {
    fn set_lights_state(&mut self, lights: LightState, on: bool) {
        if on {
            self.lights = self.lights | lights;
            self.timeline.push(Event::Lit(self.name, self.lights));
        } else {
            self.lights = self.lights.difference(lights);
        }
    }
}

/// Convenience: a shared recording head.
pub fn head(name: &'static str, timeline: &Timeline) -> Rc<RefCell<MockHead>> {
    Rc::new(RefCell::new(MockHead::new(name, timeline)))
}

// ============================================================================
// Mock Pin
// ============================================================================

/// Output pin whose level can be read back after the pin is moved.
#[derive(Clone)]
pub struct MockPin {
    high: Rc<Cell<bool>>,
    writes: Rc<Cell<u32>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self {
            high: Rc::new(Cell::new(false)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    pub fn is_high(&self) -> bool {
        self.high.get()
    }

    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.set(false);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high.set(true);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that records sleeps instead of blocking.
///
/// An optional hook runs after every sleep with the total simulated time,
/// standing in for an input context that posts requests while the lighting
/// loop is blocked.
pub struct MockDelay<'a> {
    timeline: Timeline,
    elapsed_ms: u64,
    calls: u32,
    hook: Option<Box<dyn FnMut(u64) + 'a>>,
}

impl<'a> MockDelay<'a> {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
            elapsed_ms: 0,
            calls: 0,
            hook: None,
        }
    }

    pub fn with_hook(timeline: &Timeline, hook: impl FnMut(u64) + 'a) -> Self {
        Self {
            hook: Some(Box::new(hook)),
            ..Self::new(timeline)
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timeline.push(Event::Sleep(ms));
        self.elapsed_ms += ms as u64;
        self.calls += 1;

        if let Some(hook) = self.hook.as_mut() {
            hook(self.elapsed_ms);
        }
    }
}

/// Delay that really sleeps, for tests with a second thread.
pub struct SleepDelay;

impl DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }
}

// ============================================================================
// Mock RGB LED
// ============================================================================

/// Mock LED that records all color changes for testing
pub struct MockLed {
    current_color: Srgb,
    color_history: heapless::Vec<Srgb, 32>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            current_color: Srgb::new(0.0, 0.0, 0.0),
            color_history: heapless::Vec::new(),
        }
    }

    pub fn get_last_color(&self) -> Srgb {
        self.current_color
    }

    pub fn color_history(&self) -> &[Srgb] {
        &self.color_history
    }
}

impl RgbLed for MockLed {
    fn set_color(&mut self, color: Srgb) {
        self.current_color = color;
        let _ = self.color_history.push(color);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}

pub fn ms(millis: u64) -> core::time::Duration {
    core::time::Duration::from_millis(millis)
}
