//! Software doubles for host-side runs and tests (std only).
//!
//! [`SimStepper`] stands in for the stepper control library: it tracks
//! position, honors the driver contract, and records every command into a
//! journal shared by all three steppers so tests can assert cross-axis
//! ordering. [`ScriptedConsole`] replaces the serial line with canned
//! input. Neither moves anything; motion "completes" after a configurable
//! number of `is_running` polls.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

use crate::console::{Console, LINE_CAPACITY};
use crate::driver::StepperDriver;
use crate::error::{ConsoleError, Error, Result};

/// One recorded driver call.
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    /// `set_speed_hz`
    SetSpeedHz(f32),
    /// `set_acceleration`
    SetAcceleration(f32),
    /// `move_to`
    MoveTo(i64),
    /// `move_relative`
    MoveRelative(i64),
    /// `set_current_position`
    SetCurrentPosition(i64),
}

/// A journal entry: which stepper got which command.
#[derive(Debug, Clone, PartialEq)]
pub struct SimEvent {
    /// Stepper label ("left", "right", "yaw").
    pub stepper: &'static str,
    /// The recorded command.
    pub command: SimCommand,
}

/// Command journal shared between the three sim steppers.
#[derive(Debug, Clone, Default)]
pub struct SimJournal(Rc<RefCell<Vec<SimEvent>>>);

impl SimJournal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded event, in issue order.
    pub fn events(&self) -> Vec<SimEvent> {
        self.0.borrow().clone()
    }

    /// Just the `move_to` calls, in issue order, as (stepper, target).
    pub fn move_tos(&self) -> Vec<(&'static str, i64)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e.command {
                SimCommand::MoveTo(target) => Some((e.stepper, target)),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn record(&self, stepper: &'static str, command: SimCommand) {
        self.0.borrow_mut().push(SimEvent { stepper, command });
    }
}

/// A software stepper implementing the driver contract.
///
/// Moves land instantly in `position`, but `is_running` stays true for
/// `polls_per_move` polls after each motion command so settle loops
/// actually loop.
#[derive(Debug)]
pub struct SimStepper {
    label: &'static str,
    journal: SimJournal,
    position: i64,
    running_polls: Cell<u32>,
    polls_per_move: u32,
}

impl SimStepper {
    /// Create a stepper recording into `journal` under `label`.
    pub fn new(label: &'static str, journal: SimJournal) -> Self {
        Self {
            label,
            journal,
            position: 0,
            running_polls: Cell::new(0),
            polls_per_move: 2,
        }
    }

    /// Build the chair's three steppers sharing one journal.
    pub fn trio() -> (SimStepper, SimStepper, SimStepper, SimJournal) {
        let journal = SimJournal::new();
        (
            SimStepper::new("left", journal.clone()),
            SimStepper::new("right", journal.clone()),
            SimStepper::new("yaw", journal.clone()),
            journal,
        )
    }

    /// How many `is_running` polls a motion command stays "running" for.
    pub fn set_polls_per_move(&mut self, polls: u32) {
        self.polls_per_move = polls;
    }

    /// The stepper's label.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl StepperDriver for SimStepper {
    fn set_speed_hz(&mut self, hz: f32) -> Result<()> {
        self.journal.record(self.label, SimCommand::SetSpeedHz(hz));
        Ok(())
    }

    fn set_acceleration(&mut self, steps_per_sec2: f32) -> Result<()> {
        self.journal
            .record(self.label, SimCommand::SetAcceleration(steps_per_sec2));
        Ok(())
    }

    fn move_to(&mut self, target: i64) -> Result<()> {
        self.journal.record(self.label, SimCommand::MoveTo(target));
        self.position = target;
        self.running_polls.set(self.polls_per_move);
        Ok(())
    }

    fn move_relative(&mut self, delta: i64) -> Result<()> {
        self.journal
            .record(self.label, SimCommand::MoveRelative(delta));
        self.position += delta;
        self.running_polls.set(self.polls_per_move);
        Ok(())
    }

    fn current_position(&self) -> i64 {
        self.position
    }

    fn is_running(&self) -> bool {
        let polls = self.running_polls.get();
        if polls > 0 {
            self.running_polls.set(polls - 1);
            true
        } else {
            false
        }
    }

    fn set_current_position(&mut self, position: i64) {
        self.journal
            .record(self.label, SimCommand::SetCurrentPosition(position));
        self.position = position;
    }
}

/// A delay provider that returns immediately; sim time needs no pacing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// A console fed from a script, capturing everything written.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    /// Create a console that will serve the given lines in order, then
    /// report itself closed.
    pub fn new<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            input: lines.into_iter().map(str::to_owned).collect(),
            output: Vec::new(),
        }
    }

    /// Everything written so far, one entry per line.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Whether any written line contains `needle`.
    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, buf: &mut heapless::String<LINE_CAPACITY>) -> Result<()> {
        let line = self
            .input
            .pop_front()
            .ok_or(Error::Console(ConsoleError::Closed))?;
        buf.push_str(&line)
            .map_err(|_| Error::Console(ConsoleError::BufferOverflow))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.output.push(line.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_stepper_runs_then_stops() {
        let (mut left, _right, _yaw, journal) = SimStepper::trio();

        left.move_to(25).unwrap();
        assert_eq!(left.current_position(), 25);
        assert!(left.is_running());
        assert!(left.is_running());
        assert!(!left.is_running());

        assert_eq!(journal.move_tos(), vec![("left", 25)]);
    }

    #[test]
    fn test_journal_preserves_cross_stepper_order() {
        let (mut left, mut right, mut yaw, journal) = SimStepper::trio();

        left.move_to(1).unwrap();
        yaw.move_to(2).unwrap();
        right.move_to(3).unwrap();

        assert_eq!(
            journal.move_tos(),
            vec![("left", 1), ("yaw", 2), ("right", 3)]
        );
    }

    #[test]
    fn test_scripted_console_closes_after_script() {
        let mut console = ScriptedConsole::new(["2"]);
        let mut buf = heapless::String::new();

        assert!(console.read_line(&mut buf).is_ok());
        assert_eq!(buf.as_str(), "2");

        buf.clear();
        assert_eq!(
            console.read_line(&mut buf),
            Err(Error::Console(ConsoleError::Closed))
        );
    }
}
