//! North-American flashing stop / give-way.

use super::TrafficSystem;
use crate::controller::{Controller, GroupId};
use crate::group::{HeadRef, LightGroup};
use crate::light::LightState;
use crate::patterns::{self, ALL_RED};
use crate::time::flash_count;
use crate::timing::{TimingKind, TimingStore};
use alloc::vec::Vec;
use core::time::Duration;
use embedded_hal::delay::DelayNs;

const PRIORITY: GroupId = 0;
const STOP: GroupId = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopGiveWayTiming {
    /// Half-period of a flash.
    FlashInterval,
    /// Total flashing time of one `run`.
    LoopTime,
}

impl TimingKind for StopGiveWayTiming {
    fn standard(self) -> Duration {
        match self {
            StopGiveWayTiming::FlashInterval => Duration::from_secs(1),
            StopGiveWayTiming::LoopTime => Duration::from_secs(10),
        }
    }
}

/// The priority road flashes amber, every other approach holds red.
///
/// The crossing lamps stay at red throughout. One `run` flashes for the loop
/// time (rounded up to whole cycles) and returns.
pub struct StopGiveWaySystem<D: DelayNs> {
    priority: LightGroup,
    stop: LightGroup,
    timings: TimingStore<StopGiveWayTiming>,
    delay: D,
}

impl<D: DelayNs> StopGiveWaySystem<D> {
    pub fn new(priority: LightGroup, stop: LightGroup, delay: D) -> Self {
        Self {
            priority,
            stop,
            timings: TimingStore::new(),
            delay,
        }
    }

    /// Splits `heads` into the priority head at `priority_index` and stop
    /// heads for the rest. An out-of-range index selects the first head.
    pub fn from_heads<I>(heads: I, priority_index: usize, delay: D) -> Self
    where
        I: IntoIterator<Item = HeadRef>,
    {
        let heads: Vec<HeadRef> = heads.into_iter().collect();
        let priority_index = if priority_index < heads.len() {
            priority_index
        } else {
            0
        };

        let mut priority = LightGroup::new();
        let mut stop = LightGroup::new();

        for (offset, head) in heads.into_iter().enumerate() {
            if offset == priority_index {
                priority.add_head(head);
            } else {
                stop.add_head(head);
            }
        }

        Self::new(priority, stop, delay)
    }

    pub fn set_timing(&mut self, timing: StopGiveWayTiming, duration: Duration) {
        self.timings.set(timing, duration);
    }

    pub fn timings(&self) -> &TimingStore<StopGiveWayTiming> {
        &self.timings
    }

    pub fn priority_group(&self) -> &LightGroup {
        &self.priority
    }

    pub fn stop_group(&self) -> &LightGroup {
        &self.stop
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Full on/off cycles per `run`.
    pub fn flashes_per_run(&self) -> u32 {
        flash_count(
            self.timings.global(StopGiveWayTiming::LoopTime),
            self.timings.global(StopGiveWayTiming::FlashInterval),
        )
    }

    fn flash(&mut self) {
        let flash_interval = self.timings.global(StopGiveWayTiming::FlashInterval);
        let flashes = self.flashes_per_run();
        debug!("stop/give-way: {} flashes", flashes);

        let mut controller = Controller::new()
            .with_group(self.priority.clone(), PRIORITY)
            .with_group(self.stop.clone(), STOP)
            .with_sequence(patterns::static_hold(ALL_RED, Duration::ZERO), STOP)
            .with_sequence(
                patterns::static_hold(LightState::YELLOW | LightState::CROSSING_RED, flash_interval),
                PRIORITY,
            )
            .with_sequence(
                patterns::static_hold(LightState::CROSSING_RED, flash_interval),
                PRIORITY,
            );

        for _ in 0..flashes {
            controller.run(&mut self.delay);
        }
    }
}

impl<D: DelayNs> TrafficSystem for StopGiveWaySystem<D> {
    fn run(&mut self) {
        self.flash();
    }
}
