//! Monotonic clock backed by embassy-time

use embassy_time::Instant;
use unistep_core::traits::Clock;

/// Microsecond clock from the embassy time driver
///
/// The 64-bit uptime is truncated to the wrapping 32-bit counter the
/// controller works with.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_us(&self) -> u32 {
        Instant::now().as_micros() as u32
    }
}
