//! Console I/O: the line-based operator boundary and the control loop.
//!
//! The loop owns the pacing of the whole program: print a prompt, block
//! for one line, run the transition, execute whatever effect it produced,
//! repeat. Anything that can read and write lines can drive the chair, so
//! the dialog runs the same over a UART, stdin, or a scripted test
//! console.

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use rand::Rng;

use crate::choreography;
use crate::config::{ChairConfig, Steps};
use crate::driver::StepperDriver;
use crate::error::{ConsoleError, Error, Result};
use crate::rig::ChairRig;
use crate::session::{Effect, Session};

/// Capacity of the console line buffer.
pub const LINE_CAPACITY: usize = 64;

/// Banner printed once at startup.
const WELCOME: &str = "Welcome to our motion simulation chair!";

/// A blocking, line-oriented operator console.
pub trait Console {
    /// Block until one full line is available and copy it into `buf`
    /// (without its line terminator).
    ///
    /// # Errors
    ///
    /// `ConsoleError::Closed` when no more input will ever arrive,
    /// `ConsoleError::BufferOverflow` when the line does not fit in `buf`.
    fn read_line(&mut self, buf: &mut heapless::String<LINE_CAPACITY>) -> Result<()>;

    /// Write one line, terminating it as the transport requires.
    fn write_line(&mut self, line: &str) -> Result<()>;
}

/// Run the operator control loop until the console closes.
///
/// Single-threaded and cooperative: while a motion effect runs, the loop
/// blocks inside it; while waiting for input, nothing else happens. That
/// is the intended shape for a human-attended console.
pub fn run<C, S, D, R>(
    console: &mut C,
    rig: &mut ChairRig<S, D>,
    config: &ChairConfig,
    rng: &mut R,
) -> Result<()>
where
    C: Console,
    S: StepperDriver,
    D: DelayNs,
    R: Rng,
{
    let mut session = Session::new();
    let mut line = heapless::String::<LINE_CAPACITY>::new();

    console.write_line(WELCOME)?;
    console.write_line("")?;

    loop {
        if let Some(prompt) = session.prompt(config) {
            let mut text = heapless::String::<256>::new();
            let _ = write!(text, "{}", prompt);
            console.write_line(&text)?;
        }

        line.clear();
        match console.read_line(&mut line) {
            Ok(()) => {}
            Err(Error::Console(ConsoleError::BufferOverflow)) => {
                console.write_line("Input too long.")?;
                continue;
            }
            Err(Error::Console(ConsoleError::Closed)) => return Ok(()),
            Err(e) => return Err(e),
        }

        let outcome = session.handle_line(&line, config);

        for notice in &outcome.notices {
            let mut text = heapless::String::<256>::new();
            let _ = write!(text, "{}", notice);
            console.write_line(&text)?;
        }

        if let Some(effect) = outcome.effect {
            execute_effect(console, rig, config, rng, effect)?;
            if session.is_executing() {
                session.complete();
            }
        }
    }
}

/// Run one effect against the rig, blocking until the motion is done.
fn execute_effect<C, S, D, R>(
    console: &mut C,
    rig: &mut ChairRig<S, D>,
    config: &ChairConfig,
    rng: &mut R,
    effect: Effect,
) -> Result<()>
where
    C: Console,
    S: StepperDriver,
    D: DelayNs,
    R: Rng,
{
    match effect {
        Effect::ApplyKinematics {
            axis,
            speed_hz,
            acceleration,
        } => rig.set_axis_kinematics(axis, speed_hz, acceleration),
        Effect::MoveAxis { axis, target_steps } => {
            rig.command_axis(axis, Steps(target_steps))?;
            rig.settle()
        }
        Effect::FullExperience => {
            console.write_line("Moving all three motors!")?;
            choreography::full_experience(rig)
        }
        Effect::RollerCoaster => {
            console.write_line("Performing roller coaster simulation!")?;
            choreography::roller_coaster(rig, &config.choreography, rng)
        }
    }
}

/// Console over stdin/stdout.
#[cfg(feature = "std")]
pub struct StdConsole {
    stdin: std::io::Stdin,
    stdout: std::io::Stdout,
}

#[cfg(feature = "std")]
impl StdConsole {
    /// Create a console over the process's stdin and stdout.
    pub fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
            stdout: std::io::stdout(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Console for StdConsole {
    fn read_line(&mut self, buf: &mut heapless::String<LINE_CAPACITY>) -> Result<()> {
        let mut line = String::new();
        let read = self
            .stdin
            .read_line(&mut line)
            .map_err(|_| Error::Console(ConsoleError::Closed))?;
        if read == 0 {
            return Err(Error::Console(ConsoleError::Closed));
        }

        let trimmed = line.trim_end_matches(|c| c == '\r' || c == '\n');
        buf.push_str(trimmed)
            .map_err(|_| Error::Console(ConsoleError::BufferOverflow))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        use std::io::Write;
        writeln!(self.stdout, "{}", line).map_err(|_| Error::Console(ConsoleError::Closed))?;
        self.stdout
            .flush()
            .map_err(|_| Error::Console(ConsoleError::Closed))
    }
}
