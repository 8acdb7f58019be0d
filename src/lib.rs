#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LightState`**: A set of simultaneously lit lamps (vehicle red/yellow/green, crossing red/green)
//! - **`Sequence`**: An ordered list of (`LightState`, duration) steps with a restartable cursor
//! - **`SignalHead`**: Trait for one addressable signal head; `LightUnit` drives discrete GPIO lamps
//! - **`LightGroup`**: A set of shared heads that receive identical state changes
//! - **`Controller`**: Drives (sequence, group) pairs in order, blocking on the delay primitive
//! - **`TimingStore`**: Per-group and global duration overrides over compiled-in defaults
//! - **`TrafficSystem`**: Behavioural systems layered on controllers (sequenced intersection,
//!   single crossing, North-American stop/give-way, light test)
//! - **`SystemRequests`**: Crossing and next-group request flags posted from another context
//!
//! Hardware is reached only through `embedded-hal`: `OutputPin` for lamps, `InputPin` for
//! request buttons and `DelayNs` for every timed hold.

extern crate alloc;

#[macro_use]
mod fmt;

pub mod colors;
pub mod controller;
pub mod group;
pub mod head;
pub mod input;
pub mod light;
pub mod patterns;
pub mod sequence;
pub mod signal;
pub mod systems;
pub mod time;
pub mod timing;

pub use controller::{Controller, GroupId};
pub use group::{HeadRef, LightGroup};
pub use head::{LightUnit, Polarity, RgbLed, RgbSignalHead, SignalHead};
pub use input::RequestButton;
pub use light::{Lamp, LightState};
pub use patterns::LightType;
pub use sequence::{Sequence, SequenceStep};
pub use signal::{RequestFlag, SystemRequest, SystemRequests};
pub use systems::{
    CrossingConfig, CrossingStage, CrossingStyle, CrossingTiming, CrossingType, LightTestSystem,
    LightTestTiming, SequencedConfig, SequencedStage, SequencedSystem, SequencedTiming,
    SequencingMode, SingleCrossingSystem, StopGiveWaySystem, StopGiveWayTiming, TrafficSystem,
};
pub use time::flash_count;
#[cfg(feature = "std")]
pub use time::StdDelay;
pub use timing::{TimingKind, TimingStore};

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_compile() {
        let _ = LightType::RedGreen;
        let _ = LightType::RedYellowGreen;
        let _ = SequencingMode::Auto;
        let _ = SequencingMode::Manual;
        let _ = CrossingStyle::Flashing;
    }
}
