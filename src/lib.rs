//! # chair-motion
//!
//! Control core for a three-axis (pitch/roll/yaw) stepper motion
//! simulation chair: a line-based operator console drives either a single
//! clamped axis move or a scripted multi-axis ride, over any stepper
//! control library that can do asynchronous move-to-target with an
//! acceleration profile.
//!
//! ## Features
//!
//! - **Configuration-driven**: travel limits, clamp ranges and choreography
//!   tuning in one TOML-loadable structure
//! - **Pluggable driver**: the stepper library sits behind the
//!   [`StepperDriver`] trait; pulse generation and velocity profiles are
//!   its problem
//! - **Pure session logic**: the console dialog is a transition function
//!   over input lines, testable without I/O or hardware
//! - **Clamped by construction**: every commanded position, speed and
//!   acceleration passes the limits table before reaching a driver
//! - **no_std compatible**: the core works without the standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chair_motion::{console, ChairConfig, ChairRig};
//!
//! let config = chair_motion::load_config("chair.toml")?;
//!
//! // Steppers and delay come from your HAL / stepper library glue.
//! let mut rig = ChairRig::new(left, right, yaw, delay, &config)?;
//!
//! let mut console_io = console::StdConsole::new();
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(0x5eed);
//! console::run(&mut console_io, &mut rig, &config, &mut rng)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing, and the [`sim`] module
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod choreography;
pub mod config;
pub mod console;
pub mod driver;
pub mod error;
pub mod rig;
pub mod session;

// Software doubles (std only)
#[cfg(feature = "std")]
pub mod sim;

// Re-exports for ergonomic API
pub use config::{validate_config, ChairConfig, ChoreographyConfig, SpeedRange};
pub use console::{run, Console};
pub use driver::StepperDriver;
pub use error::{Error, Result};
pub use rig::{Axis, ChairRig};
pub use session::{Effect, Notice, Session, SessionState};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

// Unit types
pub use config::units::{Degrees, Microsteps, StepConverter, Steps};
