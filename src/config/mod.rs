//! Configuration module for chair-motion.
//!
//! Provides the canonical limits table and tuning constants, loadable from
//! TOML files (with `std` feature) or built from defaults.

mod chair;
mod choreography;
mod drive;
mod limits;
#[cfg(feature = "std")]
mod loader;
pub mod units;
mod validation;

pub use chair::{ChairConfig, StartupConfig};
pub use choreography::{
    ChoreographyConfig, FractionMoveConfig, HoldMoveConfig, LevelOutConfig, RumbleConfig,
    SlowClimbConfig,
};
pub use drive::DriveConfig;
pub use limits::{AxisLimitsTable, AxisRange, ClampBound, Clamped, SpeedRange, StepLimits};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Microsteps, StepConverter, Steps};
