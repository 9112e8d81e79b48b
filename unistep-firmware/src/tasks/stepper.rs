//! Stepper motion task
//!
//! Owns the motion controller. Sleeps until either a command arrives or
//! the next half-step is due, so the controller is polled once per step
//! instead of in a busy loop.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::Timer;
use portable_atomic::Ordering;

use unistep_core::motion::Tick;
use unistep_drivers::stepper::Uln2003;

use crate::channels::{MotionCommand, ENERGIZED, MOTION_CMD, MOVE_DONE, POSITION, STEPS_TO_GO};
use crate::clock::EmbassyClock;

/// The one motor this firmware drives
pub type Motor = Uln2003<Output<'static>, EmbassyClock>;

/// Stepper task
#[embassy_executor::task]
pub async fn stepper_task(mut motor: Motor) {
    info!("Stepper task started");

    // Start released
    motor.stop();
    publish(&motor);

    loop {
        let command = match motor.time_to_next_step() {
            // Idle: nothing to do until someone asks for motion
            None => Some(MOTION_CMD.receive().await),
            Some(wait_us) => {
                match select(MOTION_CMD.receive(), Timer::after_micros(wait_us as u64)).await {
                    Either::First(command) => Some(command),
                    Either::Second(()) => None,
                }
            }
        };

        if let Some(command) = command {
            apply(&mut motor, command);
        }

        if motor.tick() == Tick::Stepped && !motor.is_running() {
            info!(
                "{}: move complete at {}",
                motor.config().name.as_str(),
                motor.current_position()
            );
            MOVE_DONE.signal(motor.current_position());
        }

        publish(&motor);
    }
}

fn apply(motor: &mut Motor, command: MotionCommand) {
    debug!("Motion command: {:?}", command);

    match command {
        MotionCommand::MoveBy(steps) => motor.move_by(steps),
        MotionCommand::MoveTo(target) => {
            if let Err(e) = motor.move_to(target) {
                warn!("Move rejected: {:?}", e);
                return;
            }
        }
        MotionCommand::Stop => {
            let was_running = motor.is_running();
            motor.stop();
            if was_running {
                info!("Stopped at {}", motor.current_position());
                MOVE_DONE.signal(motor.current_position());
            }
            return;
        }
        MotionCommand::Hold => {
            motor.power_up();
            return;
        }
    }

    // Already at the target: the move is over before it started
    if !motor.is_running() {
        MOVE_DONE.signal(motor.current_position());
    }
}

fn publish(motor: &Motor) {
    POSITION.store(motor.current_position(), Ordering::Relaxed);
    STEPS_TO_GO.store(motor.steps_to_go(), Ordering::Relaxed);
    ENERGIZED.store(motor.is_energized(), Ordering::Relaxed);
}
