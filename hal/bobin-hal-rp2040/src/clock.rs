//! Millisecond clock over the embassy time driver

use embassy_time::Instant;

use bobin_hal::Clock;

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping counter the core expects
        Instant::now().as_millis() as u32
    }
}
