//! The chair rig: three steppers behind one clamped command surface.

use embedded_hal::delay::DelayNs;

use crate::config::{ChairConfig, StepLimits, Steps};
use crate::driver::StepperDriver;
use crate::error::Result;

use super::axis::Axis;

/// Interval between completion polls while a motion finishes.
const SETTLE_POLL_MS: u32 = 2;

const LEFT: usize = 0;
const RIGHT: usize = 1;
const YAW: usize = 2;

/// The three-stepper chair rig.
///
/// Owns the two tilt steppers (shared by pitch and roll), the yaw stepper,
/// and the delay provider that paces holds and completion polls. Every
/// command is clamped into the configured travel before it reaches a
/// driver; the sign conventions from [`Axis`] are applied here and nowhere
/// else.
///
/// The rig caches the last commanded speed and target per stepper because
/// the driver contract has no getters for either.
pub struct ChairRig<S, D>
where
    S: StepperDriver,
    D: DelayNs,
{
    /// Left tilt stepper.
    left: S,

    /// Right tilt stepper.
    right: S,

    /// Yaw stepper.
    yaw: S,

    /// Delay provider for holds and completion polls.
    delay: D,

    /// Pitch travel in steps.
    pitch_limits: StepLimits,

    /// Roll travel in steps.
    roll_limits: StepLimits,

    /// Yaw travel in steps.
    yaw_limits: StepLimits,

    /// Widest travel a tilt stepper can be commanded to (union of the pitch
    /// and roll ranges); bounds relative jogs.
    tilt_envelope: StepLimits,

    /// Last commanded speed per stepper (left, right, yaw).
    speed: [f32; 3],

    /// Last commanded target per stepper (left, right, yaw).
    target: [i64; 3],
}

impl<S, D> ChairRig<S, D>
where
    S: StepperDriver,
    D: DelayNs,
{
    /// Assemble the rig, zero the reference frame, and apply the startup
    /// kinematics to every stepper.
    pub fn new(left: S, right: S, yaw: S, delay: D, config: &ChairConfig) -> Result<Self> {
        let pitch_limits = config.step_limits(Axis::Pitch);
        let roll_limits = config.step_limits(Axis::Roll);
        let yaw_limits = config.step_limits(Axis::Yaw);
        let tilt_envelope = StepLimits {
            min_steps: pitch_limits.min_steps.min(roll_limits.min_steps),
            max_steps: pitch_limits.max_steps.max(roll_limits.max_steps),
        };

        let mut rig = Self {
            left,
            right,
            yaw,
            delay,
            pitch_limits,
            roll_limits,
            yaw_limits,
            tilt_envelope,
            speed: [config.startup.speed_hz; 3],
            target: [0; 3],
        };

        rig.left.set_current_position(0);
        rig.right.set_current_position(0);
        rig.yaw.set_current_position(0);

        // Pitch covers both tilt steppers, yaw the third.
        rig.set_axis_kinematics(Axis::Pitch, config.startup.speed_hz, config.startup.acceleration)?;
        rig.set_axis_kinematics(Axis::Yaw, config.startup.speed_hz, config.startup.acceleration)?;

        Ok(rig)
    }

    /// Step limits for an axis.
    pub fn limits(&self, axis: Axis) -> StepLimits {
        match axis {
            Axis::Pitch => self.pitch_limits,
            Axis::Roll => self.roll_limits,
            Axis::Yaw => self.yaw_limits,
        }
    }

    /// Apply speed and acceleration to the stepper(s) bound to an axis.
    ///
    /// Values are expected to be pre-clamped by the session or a
    /// choreography tuning table.
    pub fn set_axis_kinematics(&mut self, axis: Axis, speed_hz: f32, acceleration: f32) -> Result<()> {
        match axis {
            Axis::Pitch | Axis::Roll => {
                self.left.set_speed_hz(speed_hz)?;
                self.left.set_acceleration(acceleration)?;
                self.speed[LEFT] = speed_hz;
                self.right.set_speed_hz(speed_hz)?;
                self.right.set_acceleration(acceleration)?;
                self.speed[RIGHT] = speed_hz;
            }
            Axis::Yaw => {
                self.yaw.set_speed_hz(speed_hz)?;
                self.yaw.set_acceleration(acceleration)?;
                self.speed[YAW] = speed_hz;
            }
        }
        Ok(())
    }

    /// Command an axis to an absolute position.
    ///
    /// The target is clamped into the axis travel first; an out-of-range
    /// value never reaches a driver unmodified. Pitch reaches both tilt
    /// steppers with the same sign, roll mirrors the right stepper.
    pub fn command_axis(&mut self, axis: Axis, target: Steps) -> Result<()> {
        match axis {
            Axis::Pitch => {
                let t = self.pitch_limits.clamp(target).value();
                self.left.move_to(t)?;
                self.target[LEFT] = t;
                self.right.move_to(t)?;
                self.target[RIGHT] = t;
            }
            Axis::Roll => {
                let t = self.roll_limits.clamp(target).value();
                self.left.move_to(t)?;
                self.target[LEFT] = t;
                self.right.move_to(-t)?;
                self.target[RIGHT] = -t;
            }
            Axis::Yaw => {
                let t = self.yaw_limits.clamp(target).value();
                self.yaw.move_to(t)?;
                self.target[YAW] = t;
            }
        }
        Ok(())
    }

    /// Jog an axis by a relative amount.
    ///
    /// Each affected stepper's delta is trimmed so its tracked target stays
    /// inside the travel envelope; a jog that would leave it does less, or
    /// nothing.
    pub fn jog_axis(&mut self, axis: Axis, delta: i64) -> Result<()> {
        match axis {
            Axis::Pitch => {
                let dl = self.trimmed_delta(LEFT, delta, self.tilt_envelope);
                if dl != 0 {
                    self.left.move_relative(dl)?;
                    self.target[LEFT] += dl;
                }
                let dr = self.trimmed_delta(RIGHT, delta, self.tilt_envelope);
                if dr != 0 {
                    self.right.move_relative(dr)?;
                    self.target[RIGHT] += dr;
                }
            }
            Axis::Roll => {
                let dl = self.trimmed_delta(LEFT, delta, self.tilt_envelope);
                if dl != 0 {
                    self.left.move_relative(dl)?;
                    self.target[LEFT] += dl;
                }
                let dr = self.trimmed_delta(RIGHT, -delta, self.tilt_envelope);
                if dr != 0 {
                    self.right.move_relative(dr)?;
                    self.target[RIGHT] += dr;
                }
            }
            Axis::Yaw => {
                let dy = self.trimmed_delta(YAW, delta, self.yaw_limits);
                if dy != 0 {
                    self.yaw.move_relative(dy)?;
                    self.target[YAW] += dy;
                }
            }
        }
        Ok(())
    }

    fn trimmed_delta(&self, index: usize, delta: i64, limits: StepLimits) -> i64 {
        let clamped = limits.clamp(Steps(self.target[index] + delta)).value();
        clamped - self.target[index]
    }

    /// Block until no stepper reports a motion in progress.
    ///
    /// Delay-paced polling, not a tight spin; the drivers keep pulsing from
    /// their own timers while we wait.
    pub fn settle(&mut self) -> Result<()> {
        while self.left.is_running() || self.right.is_running() || self.yaw.is_running() {
            self.delay.delay_ms(SETTLE_POLL_MS);
        }
        Ok(())
    }

    /// Hold the current pose for a duration.
    pub fn hold(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Snapshot the three stepper positions (left, right, yaw).
    pub fn positions(&self) -> [i64; 3] {
        [
            self.left.current_position(),
            self.right.current_position(),
            self.yaw.current_position(),
        ]
    }

    /// Drive every stepper back to a recorded snapshot and settle.
    pub fn restore(&mut self, snapshot: [i64; 3]) -> Result<()> {
        self.left.move_to(snapshot[LEFT])?;
        self.target[LEFT] = snapshot[LEFT];
        self.right.move_to(snapshot[RIGHT])?;
        self.target[RIGHT] = snapshot[RIGHT];
        self.yaw.move_to(snapshot[YAW])?;
        self.target[YAW] = snapshot[YAW];
        self.settle()
    }

    /// Position of an axis in steps (for pitch and roll this reads the left
    /// tilt stepper).
    pub fn axis_position(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Pitch | Axis::Roll => self.left.current_position(),
            Axis::Yaw => self.yaw.current_position(),
        }
    }

    /// Mean of the last commanded stepper speeds, the input to the
    /// speed-adaptive level-out.
    pub fn average_speed(&self) -> f32 {
        (self.speed[LEFT] + self.speed[RIGHT] + self.speed[YAW]) / 3.0
    }

    /// Borrow the steppers (left, right, yaw) for inspection.
    pub fn steppers(&self) -> (&S, &S, &S) {
        (&self.left, &self.right, &self.yaw)
    }
}
