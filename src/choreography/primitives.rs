//! Motion primitives: the named segments rides are composed from.
//!
//! Each primitive is a deterministic, parameterized fragment over one or
//! two axes. All targets go through the rig, so they are clamped into the
//! configured travel before any driver sees them, and every primitive
//! leaves the chair at a documented position so the next one can trust its
//! baseline.

use embedded_hal::delay::DelayNs;
use rand::Rng;

use crate::config::{ChoreographyConfig, FractionMoveConfig, HoldMoveConfig, Steps};
use crate::driver::StepperDriver;
use crate::error::Result;
use crate::rig::{Axis, ChairRig};

/// How long a rumble runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RumbleRun {
    /// A fixed number of jog rounds.
    Iterations(u32),
    /// Roughly this long, at the configured jog interval.
    DurationMs(u32),
}

/// The leveling factor for a given average speed.
///
/// Faster rigs get a smaller factor and therefore coarser leveling steps;
/// the floor keeps the factor usable at any speed.
pub fn leveling_factor(average_speed: f32) -> f32 {
    (1.0 - average_speed / 1000.0).max(0.01)
}

/// Ramp the pitch axis to its positive extreme in equal increments.
///
/// Ends at the pitch extreme, settled.
pub fn slow_climb<S, D>(rig: &mut ChairRig<S, D>, cfg: &ChoreographyConfig) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    let c = &cfg.slow_climb;
    rig.set_axis_kinematics(Axis::Pitch, c.speed_hz, c.acceleration)?;

    let top = rig.limits(Axis::Pitch).max_steps;
    let start = rig.axis_position(Axis::Pitch);
    let increments = c.increments as i64;

    for i in 1..=increments {
        let target = start + (top - start) * i / increments;
        rig.command_axis(Axis::Pitch, Steps(target))?;
        rig.hold(c.step_delay_ms);
    }

    rig.settle()
}

/// One large pitch move to the positive extreme, held at the top.
pub fn fast_climb<S, D>(rig: &mut ChairRig<S, D>, cfg: &ChoreographyConfig) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    let c = &cfg.fast_climb;
    rig.set_axis_kinematics(Axis::Pitch, c.speed_hz, c.acceleration)?;

    let top = rig.limits(Axis::Pitch).max_steps;
    rig.command_axis(Axis::Pitch, Steps(top))?;
    rig.settle()?;
    rig.hold(c.hold_ms);
    Ok(())
}

/// Bring the pitch axis back toward zero in decreasing increments.
///
/// Speed-adaptive on purpose: the increment size and the inter-step delay
/// both derive from the rig's current average commanded speed, so fast
/// runs settle in coarser, quicker steps. Ends at pitch zero, settled.
pub fn level_out<S, D>(rig: &mut ChairRig<S, D>, cfg: &ChoreographyConfig) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    let c = &cfg.level_out;
    let average_speed = rig.average_speed();

    let factor = leveling_factor(average_speed);
    let delay_ms = (average_speed / c.delay_divisor)
        .clamp(c.min_delay_ms as f32, c.max_delay_ms as f32) as u32;

    let mut position = rig.axis_position(Axis::Pitch) as f32;
    for _ in 0..c.increments {
        position *= factor;
        rig.command_axis(Axis::Pitch, Steps(position as i64))?;
        rig.hold(delay_ms);
    }

    rig.command_axis(Axis::Pitch, Steps(0))?;
    rig.settle()
}

/// Drop the pitch axis to a fraction of its negative extreme and hold.
pub fn fast_fall<S, D>(rig: &mut ChairRig<S, D>, cfg: &ChoreographyConfig) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    pitch_fraction_move(rig, &cfg.fast_fall, Direction::Down)
}

/// A shallow pitch drop, held briefly.
pub fn gentle_dip<S, D>(rig: &mut ChairRig<S, D>, cfg: &ChoreographyConfig) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    pitch_fraction_move(rig, &cfg.gentle_dip, Direction::Down)
}

/// A shallow pitch rise, held briefly.
pub fn small_hill<S, D>(rig: &mut ChairRig<S, D>, cfg: &ChoreographyConfig) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    pitch_fraction_move(rig, &cfg.small_hill, Direction::Up)
}

enum Direction {
    Up,
    Down,
}

fn pitch_fraction_move<S, D>(
    rig: &mut ChairRig<S, D>,
    c: &FractionMoveConfig,
    direction: Direction,
) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    rig.set_axis_kinematics(Axis::Pitch, c.speed_hz, c.acceleration)?;

    let limits = rig.limits(Axis::Pitch);
    let target = match direction {
        Direction::Up => (limits.max_steps as f32 * c.fraction) as i64,
        Direction::Down => (limits.min_steps as f32 * c.fraction) as i64,
    };

    rig.command_axis(Axis::Pitch, Steps(target))?;
    rig.settle()?;
    rig.hold(c.hold_ms);
    Ok(())
}

/// Yaw hard right, hold, and come back to center.
pub fn sharp_right_turn<S, D>(rig: &mut ChairRig<S, D>, cfg: &ChoreographyConfig) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    let target = rig.limits(Axis::Yaw).max_steps;
    held_excursion(rig, Axis::Yaw, target, &cfg.turn)
}

/// Yaw hard left, hold, and come back to center.
pub fn sharp_left_turn<S, D>(rig: &mut ChairRig<S, D>, cfg: &ChoreographyConfig) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    let target = rig.limits(Axis::Yaw).min_steps;
    held_excursion(rig, Axis::Yaw, target, &cfg.turn)
}

/// Roll to the extreme, hold, and level back out.
pub fn sudden_twist<S, D>(rig: &mut ChairRig<S, D>, cfg: &ChoreographyConfig) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    let target = rig.limits(Axis::Roll).max_steps;
    held_excursion(rig, Axis::Roll, target, &cfg.twist)
}

fn held_excursion<S, D>(
    rig: &mut ChairRig<S, D>,
    axis: Axis,
    target: i64,
    c: &HoldMoveConfig,
) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    rig.set_axis_kinematics(axis, c.speed_hz, c.acceleration)?;
    rig.command_axis(axis, Steps(target))?;
    rig.settle()?;
    rig.hold(c.hold_ms);
    rig.command_axis(axis, Steps(0))?;
    rig.settle()
}

/// Shake all three axes with bounded random jogs, then put everything back.
///
/// The pre-rumble stepper positions are recorded before the first jog.
/// After the last jog the rig waits for every stepper to stop, then drives
/// each one back to its recorded position and settles again, so the next
/// primitive composes from the same baseline this one started at.
pub fn rumble<S, D, R>(
    rig: &mut ChairRig<S, D>,
    cfg: &ChoreographyConfig,
    intensity: f32,
    run: RumbleRun,
    rng: &mut R,
) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
    R: Rng,
{
    let c = &cfg.rumble;
    let snapshot = rig.positions();

    let tilt_amplitude = ((c.tilt_amplitude_steps as f32 * intensity) as i64).max(1);
    let yaw_amplitude = ((c.yaw_amplitude_steps as f32 * intensity) as i64).max(1);

    let rounds = match run {
        RumbleRun::Iterations(n) => n,
        RumbleRun::DurationMs(ms) => ms / c.interval_ms.max(1),
    };

    for _ in 0..rounds {
        rig.jog_axis(Axis::Pitch, rng.gen_range(-tilt_amplitude..=tilt_amplitude))?;
        rig.jog_axis(Axis::Roll, rng.gen_range(-tilt_amplitude..=tilt_amplitude))?;
        rig.jog_axis(Axis::Yaw, rng.gen_range(-yaw_amplitude..=yaw_amplitude))?;
        rig.hold(c.interval_ms);
    }

    rig.settle()?;
    rig.restore(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leveling_factor_tracks_speed() {
        // Slow rig: nearly full factor, fine steps.
        assert!((leveling_factor(100.0) - 0.9).abs() < 1e-6);
        assert!((leveling_factor(900.0) - 0.1).abs() < 1e-6);
        // The factor never drops below its floor, however fast the rig runs.
        assert_eq!(leveling_factor(6000.0), 0.01);
        assert_eq!(leveling_factor(1000.0), 0.01);
    }
}
