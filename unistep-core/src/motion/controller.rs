//! Non-blocking stepper motion controller
//!
//! The controller never waits. A polling loop calls [`MotionController::tick`]
//! as often as it likes (at least once per step delay); each call either
//! returns immediately or applies exactly one half-step.
//!
//! ```text
//!            move_by / move_to
//!   ┌──────┐ ───────────────▶ ┌──────────────────────┐
//!   │ Idle │                  │ MovingCw / MovingCcw │ ──┐ tick: one step
//!   └──────┘ ◀─────────────── └──────────────────────┘ ◀─┘
//!            last step / stop
//! ```
//!
//! All mutating methods take `&mut self`. When the controller is shared
//! between tasks or interrupt handlers, calls must be serialized by the
//! owner (one task owning the controller and receiving commands over a
//! channel is the intended setup).

use crate::config::{ConfigError, MotorConfig};
use crate::power::PowerManager;
use crate::sequencer::{self, Direction, Phase};
use crate::timing::TimingGate;
use crate::traits::{Clock, CoilDriver};

use super::state::{shortest_delta, MotionError, MotionState, MotorState, Tick};

/// Half-step motion controller for one unipolar stepper
pub struct MotionController<D, C> {
    config: MotorConfig,
    power: PowerManager<D>,
    gate: TimingGate,
    clock: C,
    state: MotionState,
}

impl<D: CoilDriver, C: Clock> MotionController<D, C> {
    /// Create a controller
    ///
    /// The configuration is validated here; an unusable config is
    /// rejected before any pin is touched. The motor starts idle at
    /// position 0, phase 0, coils untouched.
    pub fn new(config: MotorConfig, coils: D, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            gate: TimingGate::new(config.step_delay_us),
            power: PowerManager::new(coils),
            clock,
            state: MotionState::new(),
            config,
        })
    }

    /// Start a relative move
    ///
    /// Positive counts turn clockwise, negative counts counter-clockwise.
    /// Replaces any move in progress. The coils are powered up at the
    /// current phase, even for a zero count, which leaves the motor
    /// holding its position until [`stop`](Self::stop) is called.
    pub fn move_by(&mut self, steps: i32) {
        self.power.power_up(self.state.phase);
        self.state.steps_to_go = steps;

        #[cfg(feature = "defmt")]
        defmt::debug!("{}: move {} steps", self.config.name.as_str(), steps);
    }

    /// Start a move to an absolute position
    ///
    /// Takes the shorter way round the circular track; a target exactly
    /// half a revolution away is reached clockwise.
    pub fn move_to(&mut self, target: u32) -> Result<(), MotionError> {
        let steps_per_rev = self.config.steps_per_rev;
        if target >= steps_per_rev {
            return Err(MotionError::TargetOutOfRange {
                target,
                steps_per_rev,
            });
        }

        self.power.power_up(self.state.phase);
        self.state.steps_to_go = shortest_delta(self.state.current_step, target, steps_per_rev);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{}: move to {} ({} steps)",
            self.config.name.as_str(),
            target,
            self.state.steps_to_go
        );

        Ok(())
    }

    /// Poll the controller
    ///
    /// Returns [`Tick::Idle`] without touching the clock or the coils when
    /// no steps are pending. Otherwise applies one half-step if the step
    /// delay has elapsed since the previous one. The coils are released
    /// after the last step of a move.
    pub fn tick(&mut self) -> Tick {
        let Some(direction) = Direction::from_steps(self.state.steps_to_go) else {
            return Tick::Idle;
        };

        let now = self.clock.now_us();
        if !self.gate.is_due(now, self.state.last_step_us) {
            return Tick::Waiting;
        }

        let (phase, pattern) = sequencer::advance(self.state.phase, direction);
        self.power.apply(pattern);
        self.state.phase = phase;
        self.state.record_step(direction, self.config.steps_per_rev);

        if self.state.steps_to_go == 0 {
            // Less hum and no heat while stationary
            self.power.deenergize();

            #[cfg(feature = "defmt")]
            defmt::debug!(
                "{}: move complete at {}",
                self.config.name.as_str(),
                self.state.current_step
            );
        }

        self.state.last_step_us = now;
        Tick::Stepped
    }

    /// Poll the controller, returning `true` if it was idle
    ///
    /// Boolean form of [`tick`](Self::tick): `true` only when no steps
    /// were pending on entry, `false` while a move is in progress,
    /// including the call that applies the final step.
    pub fn run(&mut self) -> bool {
        self.tick().is_idle()
    }

    /// Halt immediately and release the coils
    ///
    /// No deceleration: pending steps are dropped and all four coils go
    /// low regardless of the current phase.
    pub fn stop(&mut self) {
        self.state.steps_to_go = 0;
        self.power.deenergize();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{}: stop at {}",
            self.config.name.as_str(),
            self.state.current_step
        );
    }

    /// Energize the coils for the current phase without stepping
    pub fn power_up(&mut self) {
        self.power.power_up(self.state.phase);
    }

    /// Absolute position in `[0, steps_per_rev)`
    pub fn current_position(&self) -> u32 {
        self.state.current_step
    }

    /// Remaining half-steps, positive clockwise, 0 when idle
    pub fn steps_to_go(&self) -> i32 {
        self.state.steps_to_go
    }

    /// Current state
    pub fn state(&self) -> MotorState {
        MotorState::from_steps_to_go(self.state.steps_to_go)
    }

    /// Check if a move is in progress
    pub fn is_running(&self) -> bool {
        self.state.steps_to_go != 0
    }

    /// Current position in the half-step cycle
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Check if any coil is currently energized
    pub fn is_energized(&self) -> bool {
        self.power.is_energized()
    }

    /// Microseconds until the next step is due
    ///
    /// `None` when idle, `Some(0)` when a step is due now.
    pub fn time_to_next_step(&self) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        Some(self.gate.remaining(self.clock.now_us(), self.state.last_step_us))
    }

    /// Snapshot of the motion state
    pub fn motion_state(&self) -> &MotionState {
        &self.state
    }

    /// Get configuration reference
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Get access to the coil driver
    pub fn coils(&self) -> &D {
        self.power.driver()
    }

    /// Get access to the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Tear down the controller, returning the coil driver and clock
    ///
    /// The coils are left as they are; call [`stop`](Self::stop) first to
    /// release them.
    pub fn into_parts(self) -> (D, C) {
        (self.power.into_inner(), self.clock)
    }
}
