//! Duration helpers around the blocking delay primitive.

use core::time::Duration;
use embedded_hal::delay::DelayNs;

/// Number of on/off flash cycles that fit in `total`, rounded up.
///
/// A cycle is two `interval`s long. A zero interval yields zero flashes.
pub fn flash_count(total: Duration, interval: Duration) -> u32 {
    let cycle = interval.as_millis() * 2;
    if cycle == 0 {
        return 0;
    }

    let flashes = total.as_millis().div_ceil(cycle);
    u32::try_from(flashes).unwrap_or(u32::MAX)
}

/// Milliseconds in `duration`, saturating at `u32::MAX`.
#[inline]
pub fn as_millis_u32(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// Blocks for `duration`. Zero durations return without touching the delay.
pub fn hold<D: DelayNs + ?Sized>(delay: &mut D, duration: Duration) {
    let millis = as_millis_u32(duration);
    if millis > 0 {
        delay.delay_ms(millis);
    }
}

/// [`DelayNs`] backed by `std::thread::sleep`, for running systems on a host.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}
