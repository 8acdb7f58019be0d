//! Behavioural systems built on controllers and sequences.
//!
//! Each system owns its groups, its [`TimingStore`](crate::TimingStore) and
//! its delay, and builds short-lived [`Controller`](crate::Controller)s for
//! each stage of its protocol.

mod crossing;
mod sequenced;
mod stop_give_way;

pub use crossing::{CrossingConfig, CrossingStage, CrossingStyle, CrossingTiming, SingleCrossingSystem};
pub use light_test::{LightTestSystem, LightTestTiming};
pub use sequenced::{
    CrossingType, SequencedConfig, SequencedStage, SequencedSystem, SequencedTiming, SequencingMode,
};
pub use stop_give_way::{StopGiveWaySystem, StopGiveWayTiming};

/// A runnable traffic-light protocol.
pub trait TrafficSystem {
    /// Runs one pass of the protocol, blocking until it completes.
    ///
    /// Callers usually invoke this in an endless loop.
    fn run(&mut self);

    /// Returns the system to its initial position.
    fn reset(&mut self) {}
}
