//! Inter-task communication channels
//!
//! The stepper task is the only owner of the motion controller. Other
//! tasks send it commands through [`MOTION_CMD`] and read its published
//! state from the atomics below.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicI32, AtomicU32};

/// Channel capacity for motion commands
const MOTION_CHANNEL_SIZE: usize = 4;

/// Commands accepted by the stepper task
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum MotionCommand {
    /// Relative move, positive is clockwise
    MoveBy(i32),
    /// Absolute move the short way round
    MoveTo(u32),
    /// Halt and release the coils
    Stop,
    /// Energize the coils at the current phase
    Hold,
}

/// Motion commands for the stepper task
pub static MOTION_CMD: Channel<CriticalSectionRawMutex, MotionCommand, MOTION_CHANNEL_SIZE> =
    Channel::new();

/// Signalled with the final position when a move ends (completed or stopped)
pub static MOVE_DONE: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Last published position in half-steps
pub static POSITION: AtomicU32 = AtomicU32::new(0);

/// Last published remaining step count
pub static STEPS_TO_GO: AtomicI32 = AtomicI32::new(0);

/// Whether the coils are currently energized
pub static ENERGIZED: AtomicBool = AtomicBool::new(false);
