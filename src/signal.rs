//! Request signals posted to a running system.
//!
//! A [`RequestFlag`] is a single-slot, idempotent notification: posting twice
//! before it is consumed has the same effect as posting once, and posting
//! never blocks or needs to know whether anyone is waiting. The lighting loop
//! only looks at a flag at its own interrupt points, so a request posted
//! mid-transition is held until the next one.

use crate::time;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use embedded_hal::delay::DelayNs;

/// Default polling interval while blocked on a request.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A pending/not-pending request flag, safe to post from another thread or
/// an interrupt handler.
#[derive(Debug, Default)]
pub struct RequestFlag(AtomicBool);

impl RequestFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Marks the request pending.
    #[inline]
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Consumes a pending request, returning whether one was pending.
    pub fn take(&self) -> bool {
        // load/store only: thumbv6m has no atomic swap.
        if self.is_pending() {
            self.clear();
            return true;
        }

        false
    }

    /// Blocks until the flag is pending, checking every `poll_interval`.
    ///
    /// The flag is left pending.
    pub fn wait<D: DelayNs + ?Sized>(&self, delay: &mut D, poll_interval: Duration) {
        while !self.is_pending() {
            // hold() skips zero durations; never spin without yielding.
            let interval = if poll_interval.is_zero() {
                Duration::from_millis(1)
            } else {
                poll_interval
            };
            time::hold(delay, interval);
        }
    }
}

/// Requests a system can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemRequest {
    /// A pedestrian wants to cross.
    Crossing,

    /// Advance to the next group (manual sequencing).
    NextGroup,
}

/// The request flags shared between a system and whoever drives its inputs.
///
/// Typically placed in a `static` on embedded targets, or borrowed into a
/// scoped input thread on a host.
#[derive(Debug, Default)]
pub struct SystemRequests {
    crossing: RequestFlag,
    next_group: RequestFlag,
}

impl SystemRequests {
    pub const fn new() -> Self {
        Self {
            crossing: RequestFlag::new(),
            next_group: RequestFlag::new(),
        }
    }

    /// Posts a request.
    pub fn post(&self, request: SystemRequest) {
        debug!("request posted: {}", request);
        self.flag(request).request();
    }

    pub fn request_crossing(&self) {
        self.post(SystemRequest::Crossing);
    }

    pub fn request_next_group(&self) {
        self.post(SystemRequest::NextGroup);
    }

    pub fn is_pending(&self, request: SystemRequest) -> bool {
        self.flag(request).is_pending()
    }

    pub fn crossing(&self) -> &RequestFlag {
        &self.crossing
    }

    pub fn next_group(&self) -> &RequestFlag {
        &self.next_group
    }

    pub fn flag(&self, request: SystemRequest) -> &RequestFlag {
        match request {
            SystemRequest::Crossing => &self.crossing,
            SystemRequest::NextGroup => &self.next_group,
        }
    }
}
