//! Error types for chair-motion.
//!
//! Provides unified error handling across configuration, the stepper driver
//! boundary, and the operator console.

use core::fmt;

use crate::rig::Axis;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all chair-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Stepper driver fault
    Driver(DriverError),
    /// Console I/O error
    Console(ConsoleError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Invalid steps per revolution (must be > 0)
    InvalidStepsPerRevolution(u16),
    /// Invalid gear ratio (must be > 0)
    InvalidGearRatio(f32),
    /// Invalid speed clamp range (must be 0 < min <= max)
    InvalidSpeedRange {
        /// Minimum speed in steps/second
        min: f32,
        /// Maximum speed in steps/second
        max: f32,
    },
    /// Invalid acceleration clamp range (must be 0 < min <= max)
    InvalidAccelerationRange {
        /// Minimum acceleration in steps/second²
        min: f32,
        /// Maximum acceleration in steps/second²
        max: f32,
    },
    /// Invalid axis travel range (min must be < max)
    InvalidAxisLimits {
        /// Axis the range belongs to
        axis: Axis,
        /// Minimum position in degrees
        min: f32,
        /// Maximum position in degrees
        max: f32,
    },
    /// Invalid choreography tuning value
    InvalidChoreography(heapless::String<64>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Stepper driver errors, reported by [`StepperDriver`](crate::driver::StepperDriver)
/// implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// The driver refused a motion command
    CommandRejected,
    /// The driver reported a hardware fault
    Fault,
}

/// Console I/O errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// The input source has no more lines to give
    Closed,
    /// A line exceeded the console line buffer
    BufferOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Driver(e) => write!(f, "Driver error: {}", e),
            Error::Console(e) => write!(f, "Console error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidGearRatio(v) => write!(f, "Invalid gear ratio: {}. Must be > 0", v),
            ConfigError::InvalidSpeedRange { min, max } => {
                write!(f, "Invalid speed range: min ({}) must be > 0 and <= max ({})", min, max)
            }
            ConfigError::InvalidAccelerationRange { min, max } => {
                write!(f, "Invalid acceleration range: min ({}) must be > 0 and <= max ({})", min, max)
            }
            ConfigError::InvalidAxisLimits { axis, min, max } => {
                write!(f, "Invalid {} limits: min ({}) must be < max ({})", axis, min, max)
            }
            ConfigError::InvalidChoreography(msg) => write!(f, "Invalid choreography tuning: {}", msg),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::CommandRejected => write!(f, "Motion command rejected by driver"),
            DriverError::Fault => write!(f, "Stepper driver hardware fault"),
        }
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Closed => write!(f, "Console input closed"),
            ConsoleError::BufferOverflow => write!(f, "Console line buffer overflow"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Error::Driver(e)
    }
}

impl From<ConsoleError> for Error {
    fn from(e: ConsoleError) -> Self {
        Error::Console(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}

#[cfg(feature = "std")]
impl std::error::Error for ConsoleError {}
