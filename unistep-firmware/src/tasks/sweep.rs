//! Demo motion task
//!
//! Swings the output shaft between home and half a turn, pausing at each
//! end. Stands in for application logic that decides where the motor
//! should go.

use defmt::*;
use embassy_time::Timer;

use crate::channels::{MotionCommand, MOTION_CMD, MOVE_DONE};

/// Pause at each end of the sweep
const DWELL_MS: u64 = 2000;

/// Sweep task
#[embassy_executor::task]
pub async fn sweep_task(steps_per_rev: u32) {
    info!("Sweep task started");

    let targets = [steps_per_rev / 2, 0];

    loop {
        for target in targets {
            MOVE_DONE.reset();
            MOTION_CMD.send(MotionCommand::MoveTo(target)).await;

            let reached = MOVE_DONE.wait().await;
            if reached != target {
                warn!("Sweep stopped short at {} (target {})", reached, target);
            }

            Timer::after_millis(DWELL_MS).await;
        }
    }
}
