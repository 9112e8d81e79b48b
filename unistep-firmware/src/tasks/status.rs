//! Status logging task
//!
//! Reports the published motor state at a fixed interval.

use defmt::*;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use crate::channels::{ENERGIZED, POSITION, STEPS_TO_GO};

/// Status interval in milliseconds
pub const STATUS_INTERVAL_MS: u64 = 400;

/// Status task
#[embassy_executor::task]
pub async fn status_task() {
    info!("Status task started");

    let mut ticker = Ticker::every(Duration::from_millis(STATUS_INTERVAL_MS));
    let mut last = None;

    loop {
        ticker.next().await;

        let snapshot = (
            POSITION.load(Ordering::Relaxed),
            STEPS_TO_GO.load(Ordering::Relaxed),
            ENERGIZED.load(Ordering::Relaxed),
        );

        if last == Some(snapshot) {
            trace!("Motor unchanged");
            continue;
        }
        last = Some(snapshot);

        let (position, steps_to_go, energized) = snapshot;
        info!(
            "position={} steps_to_go={} energized={}",
            position, steps_to_go, energized
        );
    }
}
