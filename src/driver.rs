//! The stepper driver boundary.
//!
//! The chair does not generate step pulses itself; it leans on a stepper
//! control library (hardware timers, velocity profiles) behind this trait.
//! The contract is asynchronous move-to-target: a motion command returns
//! once accepted, and completion is observed by polling [`is_running`].
//!
//! [`is_running`]: StepperDriver::is_running

use crate::error::Result;

/// Operations the chair core consumes from a stepper control library.
///
/// Positions are absolute steps in the reference frame established by
/// [`set_current_position`] at startup. Implementations own pulse
/// generation and the acceleration profile; the core only commands targets
/// and polls for completion.
///
/// [`set_current_position`]: StepperDriver::set_current_position
pub trait StepperDriver {
    /// Set the travel speed in steps/second for subsequent moves.
    fn set_speed_hz(&mut self, hz: f32) -> Result<()>;

    /// Set the acceleration in steps/second² for subsequent moves.
    fn set_acceleration(&mut self, steps_per_sec2: f32) -> Result<()>;

    /// Start a move to an absolute step position. Returns once the command
    /// is accepted; the motion itself completes asynchronously.
    fn move_to(&mut self, target: i64) -> Result<()>;

    /// Start a move relative to the current target position.
    fn move_relative(&mut self, delta: i64) -> Result<()>;

    /// Current position in steps, as counted by the driver.
    ///
    /// Steppers are open loop; this is the commanded pulse count, not a
    /// measurement.
    fn current_position(&self) -> i64;

    /// Whether a motion command is still in progress.
    fn is_running(&self) -> bool;

    /// Overwrite the driver's idea of the current position. Used once at
    /// startup to zero the reference frame.
    fn set_current_position(&mut self, position: i64);
}
