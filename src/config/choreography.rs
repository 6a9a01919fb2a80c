//! Tuning tables for the choreography primitives.
//!
//! One named section per primitive so the numbers live in configuration
//! instead of being scattered through the routines. Defaults reproduce the
//! feel of the original ride scripts.

use serde::Deserialize;

/// Tuning for the slow climb: equal pitch increments at gentle settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SlowClimbConfig {
    /// Number of equal increments up to the pitch extreme.
    #[serde(default = "default_climb_increments")]
    pub increments: u8,

    /// Pause between increments in milliseconds.
    #[serde(default = "default_climb_step_delay_ms")]
    pub step_delay_ms: u32,

    /// Speed for the climb in steps/second.
    #[serde(default = "default_climb_speed")]
    pub speed_hz: f32,

    /// Acceleration for the climb in steps/second².
    #[serde(default = "default_climb_acceleration")]
    pub acceleration: f32,
}

fn default_climb_increments() -> u8 {
    10
}

fn default_climb_step_delay_ms() -> u32 {
    400
}

fn default_climb_speed() -> f32 {
    1500.0
}

fn default_climb_acceleration() -> f32 {
    3000.0
}

impl Default for SlowClimbConfig {
    fn default() -> Self {
        Self {
            increments: default_climb_increments(),
            step_delay_ms: default_climb_step_delay_ms(),
            speed_hz: default_climb_speed(),
            acceleration: default_climb_acceleration(),
        }
    }
}

/// Tuning for a single move held at its target: fast climb, turns, twist.
#[derive(Debug, Clone, Deserialize)]
pub struct HoldMoveConfig {
    /// How long to hold at the target, in milliseconds.
    pub hold_ms: u32,

    /// Speed in steps/second.
    pub speed_hz: f32,

    /// Acceleration in steps/second².
    pub acceleration: f32,
}

/// Tuning for a single move to a fraction of the pitch extreme: fall, dip, hill.
#[derive(Debug, Clone, Deserialize)]
pub struct FractionMoveConfig {
    /// Fraction of the pitch extreme to move to, in (0, 1].
    pub fraction: f32,

    /// How long to hold at the target, in milliseconds.
    pub hold_ms: u32,

    /// Speed in steps/second.
    pub speed_hz: f32,

    /// Acceleration in steps/second².
    pub acceleration: f32,
}

/// Tuning for the speed-adaptive level-out.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelOutConfig {
    /// Number of decreasing increments toward zero.
    #[serde(default = "default_level_increments")]
    pub increments: u8,

    /// Divisor turning average speed into the inter-step delay.
    #[serde(default = "default_level_delay_divisor")]
    pub delay_divisor: f32,

    /// Lower bound on the inter-step delay in milliseconds.
    #[serde(default = "default_level_min_delay_ms")]
    pub min_delay_ms: u32,

    /// Upper bound on the inter-step delay in milliseconds.
    #[serde(default = "default_level_max_delay_ms")]
    pub max_delay_ms: u32,
}

fn default_level_increments() -> u8 {
    10
}

fn default_level_delay_divisor() -> f32 {
    20.0
}

fn default_level_min_delay_ms() -> u32 {
    100
}

fn default_level_max_delay_ms() -> u32 {
    500
}

impl Default for LevelOutConfig {
    fn default() -> Self {
        Self {
            increments: default_level_increments(),
            delay_divisor: default_level_delay_divisor(),
            min_delay_ms: default_level_min_delay_ms(),
            max_delay_ms: default_level_max_delay_ms(),
        }
    }
}

/// Tuning for the rumble: bounded random jogs on all three axes.
#[derive(Debug, Clone, Deserialize)]
pub struct RumbleConfig {
    /// Jog amplitude for the two tilt steppers, in steps.
    #[serde(default = "default_tilt_amplitude")]
    pub tilt_amplitude_steps: u16,

    /// Jog amplitude for the yaw stepper, in steps.
    #[serde(default = "default_yaw_amplitude")]
    pub yaw_amplitude_steps: u16,

    /// Interval between jogs in milliseconds.
    #[serde(default = "default_rumble_interval_ms")]
    pub interval_ms: u32,

    /// Default jog count when a routine does not pick its own.
    #[serde(default = "default_rumble_iterations")]
    pub iterations: u32,
}

fn default_tilt_amplitude() -> u16 {
    8
}

fn default_yaw_amplitude() -> u16 {
    12
}

fn default_rumble_interval_ms() -> u32 {
    50
}

fn default_rumble_iterations() -> u32 {
    40
}

impl Default for RumbleConfig {
    fn default() -> Self {
        Self {
            tilt_amplitude_steps: default_tilt_amplitude(),
            yaw_amplitude_steps: default_yaw_amplitude(),
            interval_ms: default_rumble_interval_ms(),
            iterations: default_rumble_iterations(),
        }
    }
}

/// Tuning tables for every choreography primitive.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoreographyConfig {
    /// Slow climb tuning.
    #[serde(default)]
    pub slow_climb: SlowClimbConfig,

    /// Fast climb tuning.
    #[serde(default = "default_fast_climb")]
    pub fast_climb: HoldMoveConfig,

    /// Level-out tuning.
    #[serde(default)]
    pub level_out: LevelOutConfig,

    /// Fast fall tuning.
    #[serde(default = "default_fast_fall")]
    pub fast_fall: FractionMoveConfig,

    /// Gentle dip tuning.
    #[serde(default = "default_gentle_dip")]
    pub gentle_dip: FractionMoveConfig,

    /// Small hill tuning.
    #[serde(default = "default_small_hill")]
    pub small_hill: FractionMoveConfig,

    /// Sharp turn tuning (both directions).
    #[serde(default = "default_turn")]
    pub turn: HoldMoveConfig,

    /// Sudden twist tuning.
    #[serde(default = "default_twist")]
    pub twist: HoldMoveConfig,

    /// Rumble tuning.
    #[serde(default)]
    pub rumble: RumbleConfig,
}

fn default_fast_climb() -> HoldMoveConfig {
    HoldMoveConfig {
        hold_ms: 1200,
        speed_hz: 6000.0,
        acceleration: 10_000.0,
    }
}

fn default_fast_fall() -> FractionMoveConfig {
    FractionMoveConfig {
        fraction: 1.0,
        hold_ms: 800,
        speed_hz: 8000.0,
        acceleration: 10_000.0,
    }
}

fn default_gentle_dip() -> FractionMoveConfig {
    FractionMoveConfig {
        fraction: 0.35,
        hold_ms: 600,
        speed_hz: 3000.0,
        acceleration: 6000.0,
    }
}

fn default_small_hill() -> FractionMoveConfig {
    FractionMoveConfig {
        fraction: 0.4,
        hold_ms: 600,
        speed_hz: 4000.0,
        acceleration: 8000.0,
    }
}

fn default_turn() -> HoldMoveConfig {
    HoldMoveConfig {
        hold_ms: 500,
        speed_hz: 8000.0,
        acceleration: 10_000.0,
    }
}

fn default_twist() -> HoldMoveConfig {
    HoldMoveConfig {
        hold_ms: 500,
        speed_hz: 8000.0,
        acceleration: 10_000.0,
    }
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            slow_climb: SlowClimbConfig::default(),
            fast_climb: default_fast_climb(),
            level_out: LevelOutConfig::default(),
            fast_fall: default_fast_fall(),
            gentle_dip: default_gentle_dip(),
            small_hill: default_small_hill(),
            turn: default_turn(),
            twist: default_twist(),
            rumble: RumbleConfig::default(),
        }
    }
}
