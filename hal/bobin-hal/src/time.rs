//! Monotonic millisecond clock
//!
//! All debouncing and throttling runs off a `u32` millisecond counter that
//! wraps after ~49.7 days. Elapsed time must always be taken with
//! [`elapsed_ms`], never by comparing two timestamps directly.

/// Free-running millisecond counter
pub trait Clock {
    /// Milliseconds since boot, wrapping at `u32::MAX`
    fn now_ms(&self) -> u32;
}

/// Milliseconds from `since` to `now`, correct across counter wraparound
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
