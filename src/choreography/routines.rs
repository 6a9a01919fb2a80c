//! Ride routines: primitives composed into full experiences.

use embedded_hal::delay::DelayNs;
use rand::Rng;

use crate::config::{ChoreographyConfig, Steps};
use crate::driver::StepperDriver;
use crate::error::Result;
use crate::rig::{Axis, ChairRig};

use super::primitives::{
    fast_fall, gentle_dip, level_out, rumble, sharp_left_turn, sharp_right_turn, slow_climb,
    small_hill, sudden_twist, RumbleRun,
};

/// Sweep every axis through its full travel and back to rest.
///
/// Nine axis moves in a fixed order: pitch to its positive extreme, its
/// negative extreme, and zero; then roll the same way; then yaw. Each move
/// settles before the next begins. The tilt pair keeps its sign
/// conventions throughout, so roll sweeps reach the right stepper
/// mirrored.
pub fn full_experience<S, D>(rig: &mut ChairRig<S, D>) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
{
    for axis in Axis::ALL {
        let limits = rig.limits(axis);
        for target in [limits.max_steps, limits.min_steps, 0] {
            rig.command_axis(axis, Steps(target))?;
            rig.settle()?;
        }
    }
    Ok(())
}

/// The roller coaster: a themed ride scripted from the primitives.
///
/// The ordering is deterministic; only rumble's jog directions come from
/// the injected RNG. Every segment starts from the position the previous
/// one documented leaving, and the ride ends at rest at zero on all axes
/// (`level_out` closes it out).
pub fn roller_coaster<S, D, R>(
    rig: &mut ChairRig<S, D>,
    cfg: &ChoreographyConfig,
    rng: &mut R,
) -> Result<()>
where
    S: StepperDriver,
    D: DelayNs,
    R: Rng,
{
    let shakes = RumbleRun::Iterations(cfg.rumble.iterations);

    slow_climb(rig, cfg)?;
    level_out(rig, cfg)?;
    fast_fall(rig, cfg)?;
    rumble(rig, cfg, 1.0, shakes, rng)?;
    gentle_dip(rig, cfg)?;
    small_hill(rig, cfg)?;
    sharp_right_turn(rig, cfg)?;
    sharp_left_turn(rig, cfg)?;
    sudden_twist(rig, cfg)?;
    rumble(rig, cfg, 0.6, shakes, rng)?;
    level_out(rig, cfg)
}
