//! A single pedestrian crossing across one road.

use super::TrafficSystem;
use crate::controller::{Controller, GroupId};
use crate::group::{HeadRef, LightGroup};
use crate::light::LightState;
use crate::patterns::{self, GREEN_WITH_CROSSING_RED, LightType};
use crate::signal::{DEFAULT_POLL_INTERVAL, SystemRequests};
use crate::time::flash_count;
use crate::timing::{TimingKind, TimingStore};
use core::time::Duration;
use embedded_hal::delay::DelayNs;

const LIGHTS: GroupId = 0;

/// Timing kinds of the single crossing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CrossingTiming {
    /// Green held after a request before the lights start to change.
    DelayAfterCrossingRequest,
    /// Vehicle red held before the crossing turns green.
    DelayBetweenRedLightAndGreenCrossing,
    /// Time the crossing shows green (or flashes, in total).
    CrossingTime,
    /// Half-period of a flash in the flashing style.
    FlashInterval,
    /// Dark gap between crossing green and crossing red in the standard style.
    OffTimeBetweenGreenAndRedCrossing,
    /// Crossing red held before vehicles get green again.
    DelayBetweenRedCrossingAndGreenLight,
    /// Minimum vehicle green between two crossings.
    DelayBetweenCrossingRequests,
    /// Amber time in both directions.
    YellowTime,
}

impl TimingKind for CrossingTiming {
    fn standard(self) -> Duration {
        match self {
            CrossingTiming::CrossingTime => Duration::from_secs(8),
            CrossingTiming::DelayAfterCrossingRequest => Duration::from_secs(1),
            CrossingTiming::DelayBetweenRedLightAndGreenCrossing => Duration::from_secs(2),
            CrossingTiming::FlashInterval => patterns::DEFAULT_FLASH_TIME,
            CrossingTiming::OffTimeBetweenGreenAndRedCrossing => Duration::from_secs(4),
            CrossingTiming::DelayBetweenRedCrossingAndGreenLight => Duration::from_secs(3),
            CrossingTiming::DelayBetweenCrossingRequests => Duration::from_secs(5),
            CrossingTiming::YellowTime => patterns::DEFAULT_YELLOW_TIME,
        }
    }
}

/// How the crossing ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CrossingStyle {
    /// Crossing green, dark gap, crossing red, then vehicles back to green.
    #[default]
    Standard,
    /// Crossing green, then flashing amber with flashing crossing green,
    /// then vehicles straight back to green.
    Flashing,
}

/// Where the crossing system is in its protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CrossingStage {
    Idle,
    Green,
    AwaitRequest,
    GreenToRed,
    Crossing,
}

/// Construction-time configuration for [`SingleCrossingSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingConfig {
    pub style: CrossingStyle,
    pub light_type: LightType,
    pub poll_interval: Duration,
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self {
            style: CrossingStyle::default(),
            light_type: LightType::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Vehicles hold green until a pedestrian asks to cross.
///
/// One `run` serves exactly one crossing: green, wait for a request, green to
/// red, crossing, back to green. The request is consumed as the crossing
/// stage starts, so a request posted while pedestrians are crossing is kept
/// for the next `run`.
pub struct SingleCrossingSystem<'r, D: DelayNs> {
    lights: LightGroup,
    timings: TimingStore<CrossingTiming>,
    config: CrossingConfig,
    requests: &'r SystemRequests,
    delay: D,
    stage: CrossingStage,
}

impl<'r, D: DelayNs> SingleCrossingSystem<'r, D> {
    pub fn new(
        lights: LightGroup,
        config: CrossingConfig,
        requests: &'r SystemRequests,
        delay: D,
    ) -> Self {
        Self {
            lights,
            timings: TimingStore::new(),
            config,
            requests,
            delay,
            stage: CrossingStage::Idle,
        }
    }

    pub fn from_heads<I>(
        heads: I,
        config: CrossingConfig,
        requests: &'r SystemRequests,
        delay: D,
    ) -> Self
    where
        I: IntoIterator<Item = HeadRef>,
    {
        Self::new(heads.into_iter().collect(), config, requests, delay)
    }

    pub fn request_crossing(&self) {
        self.requests.request_crossing();
    }

    pub fn set_crossing_style(&mut self, style: CrossingStyle) {
        self.config.style = style;
    }

    pub fn set_light_type(&mut self, light_type: LightType) {
        self.config.light_type = light_type;
    }

    pub fn set_poll_interval(&mut self, poll_interval: Duration) {
        self.config.poll_interval = poll_interval;
    }

    pub fn set_timing(&mut self, timing: CrossingTiming, duration: Duration) {
        self.timings.set(timing, duration);
    }

    pub fn timings(&self) -> &TimingStore<CrossingTiming> {
        &self.timings
    }

    pub fn config(&self) -> &CrossingConfig {
        &self.config
    }

    pub fn stage(&self) -> CrossingStage {
        self.stage
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Flash cycles the flashing style shows: crossing time over two flash
    /// intervals, rounded up.
    pub fn number_of_flashes(&self) -> u32 {
        flash_count(
            self.timing(CrossingTiming::CrossingTime),
            self.timing(CrossingTiming::FlashInterval),
        )
    }

    fn set_stage(&mut self, stage: CrossingStage) {
        debug!("crossing: -> {}", stage);
        self.stage = stage;
    }

    fn timing(&self, timing: CrossingTiming) -> Duration {
        self.timings.global(timing)
    }

    fn controller(&self) -> Controller {
        Controller::new().with_group(self.lights.clone(), LIGHTS)
    }

    fn do_green(&mut self) {
        self.set_stage(CrossingStage::Green);

        let mut controller = self
            .controller()
            .with_sequence(patterns::static_hold(GREEN_WITH_CROSSING_RED, Duration::ZERO), LIGHTS);

        controller.run(&mut self.delay);
    }

    fn await_crossing_request(&mut self) {
        self.set_stage(CrossingStage::AwaitRequest);

        let poll_interval = self.config.poll_interval;
        self.requests
            .crossing()
            .wait(&mut self.delay, poll_interval);
    }

    fn do_green_to_red(&mut self) {
        self.set_stage(CrossingStage::GreenToRed);

        let hold_green = patterns::static_hold(
            GREEN_WITH_CROSSING_RED,
            self.timing(CrossingTiming::DelayAfterCrossingRequest),
        );
        let green_to_red = patterns::green_to_red(
            self.timing(CrossingTiming::DelayBetweenRedLightAndGreenCrossing),
            self.timing(CrossingTiming::YellowTime),
        );

        let mut controller = self
            .controller()
            .with_sequence(hold_green, LIGHTS)
            .with_sequence(green_to_red, LIGHTS);

        controller.run(&mut self.delay);
    }

    fn do_crossing(&mut self) {
        self.set_stage(CrossingStage::Crossing);

        let mut controller = self.controller().with_sequence(
            patterns::crossing_green(self.timing(CrossingTiming::CrossingTime)),
            LIGHTS,
        );

        match self.config.style {
            CrossingStyle::Standard => {
                controller.add_sequence(
                    patterns::static_hold(
                        LightState::RED,
                        self.timing(CrossingTiming::OffTimeBetweenGreenAndRedCrossing),
                    ),
                    LIGHTS,
                );
                controller.add_sequence(
                    patterns::crossing_red(
                        self.timing(CrossingTiming::DelayBetweenRedCrossingAndGreenLight),
                    ),
                    LIGHTS,
                );
                controller.add_sequence(
                    patterns::red_to_green(
                        self.timing(CrossingTiming::DelayBetweenCrossingRequests),
                        self.config.light_type,
                        self.timing(CrossingTiming::YellowTime),
                    ),
                    LIGHTS,
                );
            }
            CrossingStyle::Flashing => {
                controller.add_sequence(
                    patterns::flashing_crossing_to_green(
                        self.timing(CrossingTiming::DelayBetweenCrossingRequests),
                        self.number_of_flashes(),
                        self.timing(CrossingTiming::FlashInterval),
                    ),
                    LIGHTS,
                );
            }
        }

        self.requests.crossing().clear();
        controller.run(&mut self.delay);
    }
}

impl<D: DelayNs> TrafficSystem for SingleCrossingSystem<'_, D> {
    fn run(&mut self) {
        self.do_green();
        self.await_crossing_request();
        self.do_green_to_red();
        self.do_crossing();
        self.set_stage(CrossingStage::Idle);
    }

    fn reset(&mut self) {
        self.stage = CrossingStage::Idle;
    }
}
