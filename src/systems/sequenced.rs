//! Multi-group intersection cycling with crossing and manual-advance requests.

use super::TrafficSystem;
use crate::controller::{Controller, GroupId};
use crate::group::{HeadRef, LightGroup};
use crate::light::LightState;
use crate::patterns::{self, LightType, ALL_RED};
use crate::signal::{SystemRequests, DEFAULT_POLL_INTERVAL};
use crate::time;
use crate::timing::{TimingKind, TimingStore};
use alloc::vec::Vec;
use core::time::Duration;
use embedded_hal::delay::DelayNs;

const ALL_LIGHTS: GroupId = 0;
const CURRENT: GroupId = 1;

/// Timing kinds of the sequenced system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencedTiming {
    /// All-red hold before the current group starts towards green.
    DelayUntilGreenLight,
    /// Minimum green time before the group may go back to red.
    MinimumTimeUntilRedLight,
    /// All-red hold before the crossing turns green.
    DelayUntilGreenCrossing,
    /// Time the crossing shows green.
    CrossingTime,
    /// Red-only gap between crossing green and crossing red. Off by default.
    OffTimeBetweenGreenAndRedCrossing,
    /// Amber time in both directions.
    YellowTime,
}

impl TimingKind for SequencedTiming {
    fn standard(self) -> Duration {
        match self {
            SequencedTiming::CrossingTime => Duration::from_secs(8),
            SequencedTiming::DelayUntilGreenCrossing | SequencedTiming::DelayUntilGreenLight => {
                Duration::from_secs(2)
            }
            SequencedTiming::MinimumTimeUntilRedLight => Duration::from_secs(10),
            SequencedTiming::YellowTime => patterns::DEFAULT_YELLOW_TIME,
            SequencedTiming::OffTimeBetweenGreenAndRedCrossing => Duration::ZERO,
        }
    }
}

/// Whether the system has a pedestrian crossing to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CrossingType {
    /// Crossing requests are never honoured (and never cleared).
    None,
    #[default]
    Standard,
}

/// How the system moves from one group to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencingMode {
    /// Advance after the minimum green time.
    #[default]
    Auto,
    /// Hold green until a next-group request arrives.
    Manual,
}

/// Where the sequenced system is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencedStage {
    Idle,
    RedToGreen,
    AwaitAdvance,
    GreenToRed,
    CrossingIfRequested,
}

/// Construction-time configuration for [`SequencedSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencedConfig {
    pub sequencing: SequencingMode,
    pub light_type: LightType,
    pub crossing_type: CrossingType,
    /// Polling interval while waiting for a request, also used as the
    /// settling pause after each advance point.
    pub poll_interval: Duration,
}

impl Default for SequencedConfig {
    fn default() -> Self {
        Self {
            sequencing: SequencingMode::default(),
            light_type: LightType::default(),
            crossing_type: CrossingType::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Cycles any number of groups one after another.
///
/// For each group in order: every group is held at all-red, the current group
/// goes to green, the system waits for the advance point (a short pause, or a
/// next-group request in manual mode), the current group goes back to red,
/// and a pending crossing request is served with every head at red. `run`
/// returns after the last group.
///
/// Timings are resolved for the current group's index, so one group's crossing
/// time can be tuned without touching the others.
pub struct SequencedSystem<'r, D: DelayNs> {
    groups: Vec<LightGroup>,
    all_lights: LightGroup,
    timings: TimingStore<SequencedTiming>,
    config: SequencedConfig,
    requests: &'r SystemRequests,
    delay: D,
    current_group: usize,
    stage: SequencedStage,
}

impl<'r, D: DelayNs> SequencedSystem<'r, D> {
    /// Creates a system that sequences `groups` in the order given.
    pub fn new(
        groups: Vec<LightGroup>,
        config: SequencedConfig,
        requests: &'r SystemRequests,
        delay: D,
    ) -> Self {
        let all_lights = LightGroup::merged(&groups);

        Self {
            groups,
            all_lights,
            timings: TimingStore::new(),
            config,
            requests,
            delay,
            current_group: 0,
            stage: SequencedStage::Idle,
        }
    }

    /// Creates a system where every head is its own group.
    pub fn from_heads<I>(
        heads: I,
        config: SequencedConfig,
        requests: &'r SystemRequests,
        delay: D,
    ) -> Self
    where
        I: IntoIterator<Item = HeadRef>,
    {
        let groups = heads.into_iter().map(LightGroup::single).collect();
        Self::new(groups, config, requests, delay)
    }

    pub fn request_crossing(&self) {
        self.requests.request_crossing();
    }

    pub fn request_next_group(&self) {
        self.requests.request_next_group();
    }

    pub fn set_light_type(&mut self, light_type: LightType) {
        self.config.light_type = light_type;
    }

    pub fn set_crossing_type(&mut self, crossing_type: CrossingType) {
        self.config.crossing_type = crossing_type;
    }

    pub fn set_sequencing_mode(&mut self, sequencing: SequencingMode) {
        self.config.sequencing = sequencing;
    }

    pub fn set_poll_interval(&mut self, poll_interval: Duration) {
        self.config.poll_interval = poll_interval;
    }

    /// Overrides `timing` for every group without a group-specific override.
    pub fn set_timing(&mut self, timing: SequencedTiming, duration: Duration) {
        self.timings.set(timing, duration);
    }

    /// Overrides `timing` for the group at index `group`.
    pub fn set_group_timing(&mut self, timing: SequencedTiming, duration: Duration, group: GroupId) {
        self.timings.set_for_group(timing, duration, group);
    }

    pub fn timings(&self) -> &TimingStore<SequencedTiming> {
        &self.timings
    }

    pub fn config(&self) -> &SequencedConfig {
        &self.config
    }

    pub fn stage(&self) -> SequencedStage {
        self.stage
    }

    /// Index of the group being served.
    pub fn current_group(&self) -> usize {
        self.current_group
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    fn set_stage(&mut self, stage: SequencedStage) {
        debug!("sequenced: group {} -> {}", self.current_group, stage);
        self.stage = stage;
    }

    fn timing(&self, timing: SequencedTiming) -> Duration {
        self.timings.get(timing, Some(self.current_group))
    }

    fn current(&self) -> LightGroup {
        self.groups[self.current_group].clone()
    }

    fn do_red_to_green(&mut self) {
        self.set_stage(SequencedStage::RedToGreen);

        let all_red = patterns::static_hold(ALL_RED, self.timing(SequencedTiming::DelayUntilGreenLight));
        let red_to_green = patterns::red_to_green(
            self.timing(SequencedTiming::MinimumTimeUntilRedLight),
            self.config.light_type,
            self.timing(SequencedTiming::YellowTime),
        );

        let mut controller = Controller::new()
            .with_group(self.all_lights.clone(), ALL_LIGHTS)
            .with_group(self.current(), CURRENT)
            .with_sequence(all_red, ALL_LIGHTS)
            .with_sequence(red_to_green, CURRENT);

        controller.run(&mut self.delay);
    }

    fn await_next_group_requested(&mut self) {
        self.set_stage(SequencedStage::AwaitAdvance);

        let poll_interval = self.config.poll_interval;
        let next_group = self.requests.next_group();

        if self.config.sequencing == SequencingMode::Manual {
            next_group.wait(&mut self.delay, poll_interval);
        }

        time::hold(&mut self.delay, poll_interval);
        next_group.clear();
    }

    fn do_green_to_red(&mut self) {
        self.set_stage(SequencedStage::GreenToRed);

        let green_to_red =
            patterns::green_to_red(Duration::ZERO, self.timing(SequencedTiming::YellowTime));

        let mut controller = Controller::new()
            .with_group(self.current(), CURRENT)
            .with_sequence(green_to_red, CURRENT);

        controller.run(&mut self.delay);
    }

    fn do_crossing_if_requested(&mut self) {
        self.set_stage(SequencedStage::CrossingIfRequested);

        // With no crossing the request stays pending.
        if self.config.crossing_type == CrossingType::None || !self.requests.crossing().take() {
            return;
        }

        let mut controller = Controller::new()
            .with_group(self.all_lights.clone(), ALL_LIGHTS)
            .with_sequence(
                patterns::crossing_red(self.timing(SequencedTiming::DelayUntilGreenCrossing)),
                ALL_LIGHTS,
            )
            .with_sequence(
                patterns::crossing_green(self.timing(SequencedTiming::CrossingTime)),
                ALL_LIGHTS,
            );

        let off_time = self.timing(SequencedTiming::OffTimeBetweenGreenAndRedCrossing);
        if !off_time.is_zero() {
            controller.add_sequence(patterns::static_hold(LightState::RED, off_time), ALL_LIGHTS);
        }

        controller.add_sequence(patterns::crossing_red(Duration::ZERO), ALL_LIGHTS);
        controller.run(&mut self.delay);
    }

    fn advance_to_next_group(&mut self) -> bool {
        self.current_group += 1;
        self.current_group < self.groups.len()
    }
}

impl<D: DelayNs> TrafficSystem for SequencedSystem<'_, D> {
    fn run(&mut self) {
        self.reset();

        if self.groups.is_empty() {
            return;
        }

        loop {
            self.do_red_to_green();
            self.await_next_group_requested();
            self.do_green_to_red();
            self.do_crossing_if_requested();

            if !self.advance_to_next_group() {
                break;
            }
        }

        self.set_stage(SequencedStage::Idle);
    }

    fn reset(&mut self) {
        self.current_group = 0;
        self.stage = SequencedStage::Idle;
    }
}
