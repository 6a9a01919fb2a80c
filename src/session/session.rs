//! The operator session: a pure transition function over console lines.
//!
//! `Session::handle_line` never touches hardware or I/O. It consumes one
//! trimmed input line, moves the state machine, and hands back the notices
//! to print and at most one effect for the control loop to run against the
//! rig. That keeps the whole dialog testable without a console or a motor.

use core::fmt;

use heapless::Vec;

use crate::config::{ChairConfig, ClampBound, Degrees};
use crate::rig::Axis;

use super::state::SessionState;

/// A motion command produced by a transition, to be executed by the
/// control loop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Apply clamped speed/acceleration to the bound axis's stepper(s).
    ApplyKinematics {
        /// Axis the values apply to.
        axis: Axis,
        /// Clamped speed in steps/second.
        speed_hz: f32,
        /// Clamped acceleration in steps/second².
        acceleration: f32,
    },
    /// Move one axis to an absolute step position.
    MoveAxis {
        /// Axis to move.
        axis: Axis,
        /// Target in steps, already clamped and converted.
        target_steps: i64,
    },
    /// Run the fixed full-experience sweep.
    FullExperience,
    /// Run the roller coaster script.
    RollerCoaster,
}

/// Operator-facing message produced by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    /// The experience choice was not 1, 2 or 3.
    InvalidExperienceChoice,
    /// The axis name was not Pitch, Roll or Yaw.
    InvalidAxis,
    /// Speed was at or below zero and was raised to the minimum.
    SpeedRaisedToMinimum,
    /// Speed exceeded the limit and was lowered to the maximum.
    SpeedLoweredToMaximum,
    /// Acceleration was at or below zero and was raised to the minimum.
    AccelerationRaisedToMinimum,
    /// Acceleration exceeded the limit and was lowered to the maximum.
    AccelerationLoweredToMaximum,
    /// Echo of the converted target position.
    PositionInSteps(i64),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InvalidExperienceChoice => write!(
                f,
                "Invalid choice. Please enter 1 for single direction, 2 for full experience, or 3 for roller coaster."
            ),
            Notice::InvalidAxis => write!(f, "Invalid axis. Please enter Pitch, Roll, or Yaw."),
            Notice::SpeedRaisedToMinimum => {
                write!(f, "Speed value is 0 or below. Setting to minimum speed.")
            }
            Notice::SpeedLoweredToMaximum => write!(
                f,
                "Speed value is above the specified limit. Setting to maximum speed."
            ),
            Notice::AccelerationRaisedToMinimum => write!(
                f,
                "Acceleration value is 0 or below. Setting to minimum acceleration."
            ),
            Notice::AccelerationLoweredToMaximum => write!(
                f,
                "Acceleration value is above the specified limit. Setting to maximum acceleration."
            ),
            Notice::PositionInSteps(steps) => write!(f, "Position in steps: {}", steps),
        }
    }
}

/// The prompt the console should print before the next line is read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromptKind {
    /// The experience menu.
    ExperienceMenu,
    /// Ask for an axis name.
    AxisChoice,
    /// Ask for the speed.
    Speed,
    /// Ask for the acceleration.
    Acceleration,
    /// Ask for the target position, showing the axis travel range.
    Position {
        /// Axis being moved.
        axis: Axis,
        /// Lower travel bound in degrees.
        min_degrees: f32,
        /// Upper travel bound in degrees.
        max_degrees: f32,
    },
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptKind::ExperienceMenu => write!(
                f,
                "What kind of user experience would you like?\n1: Move in one direction\n2: Full experience of motion\n3: Roller coaster simulation"
            ),
            PromptKind::AxisChoice => write!(f, "Enter Axis (Pitch/Roll/Yaw):"),
            PromptKind::Speed => {
                write!(f, "Enter the speed you want to move at (steps/second):")
            }
            PromptKind::Acceleration => write!(
                f,
                "Enter the acceleration you want to move at (steps/second^2):"
            ),
            PromptKind::Position {
                min_degrees,
                max_degrees,
                ..
            } => write!(
                f,
                "Enter a position in degrees ({} to {}):",
                min_degrees, max_degrees
            ),
        }
    }
}

/// What one input line produced: messages to print and at most one effect.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    /// Notices to print, in order.
    pub notices: Vec<Notice, 2>,
    /// Motion effect for the control loop, if the transition produced one.
    pub effect: Option<Effect>,
}

impl Outcome {
    fn none() -> Self {
        Self::default()
    }

    fn with_notice(notice: Notice) -> Self {
        let mut outcome = Self::default();
        let _ = outcome.notices.push(notice);
        outcome
    }
}

/// One operator interaction with the chair.
///
/// Holds the current [`SessionState`] and nothing else; everything the
/// dialog has gathered lives inside the state variant.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// Start a fresh session at the experience menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether an effect is being executed.
    pub fn is_executing(&self) -> bool {
        self.state.is_executing()
    }

    /// The prompt to print before reading the next line, or `None` while
    /// executing.
    pub fn prompt(&self, config: &ChairConfig) -> Option<PromptKind> {
        match self.state {
            SessionState::AwaitingExperienceChoice => Some(PromptKind::ExperienceMenu),
            SessionState::AwaitingAxisChoice => Some(PromptKind::AxisChoice),
            SessionState::AwaitingSpeedAcceleration { speed: None, .. } => Some(PromptKind::Speed),
            SessionState::AwaitingSpeedAcceleration { speed: Some(_), .. } => {
                Some(PromptKind::Acceleration)
            }
            SessionState::AwaitingTargetPosition { axis } => {
                let range = config.axes.axis(axis);
                Some(PromptKind::Position {
                    axis,
                    min_degrees: range.min.value(),
                    max_degrees: range.max.value(),
                })
            }
            SessionState::Executing => None,
        }
    }

    /// Feed one input line through the transition function.
    ///
    /// Invalid categorical input leaves the state untouched and produces a
    /// notice; out-of-range numeric input is clamped and the dialog moves
    /// on. No input is ever fatal.
    pub fn handle_line(&mut self, line: &str, config: &ChairConfig) -> Outcome {
        let line = line.trim();

        match self.state {
            SessionState::AwaitingExperienceChoice => match line {
                "1" => {
                    self.state = SessionState::AwaitingAxisChoice;
                    Outcome::none()
                }
                "2" => {
                    self.state = SessionState::Executing;
                    Outcome {
                        notices: Vec::new(),
                        effect: Some(Effect::FullExperience),
                    }
                }
                "3" => {
                    self.state = SessionState::Executing;
                    Outcome {
                        notices: Vec::new(),
                        effect: Some(Effect::RollerCoaster),
                    }
                }
                _ => Outcome::with_notice(Notice::InvalidExperienceChoice),
            },

            SessionState::AwaitingAxisChoice => match Axis::parse(line) {
                Some(axis) => {
                    self.state = SessionState::AwaitingSpeedAcceleration { axis, speed: None };
                    Outcome::none()
                }
                None => Outcome::with_notice(Notice::InvalidAxis),
            },

            SessionState::AwaitingSpeedAcceleration { axis, speed: None } => {
                self.state = SessionState::AwaitingSpeedAcceleration {
                    axis,
                    speed: Some(parse_number(line)),
                };
                Outcome::none()
            }

            SessionState::AwaitingSpeedAcceleration {
                axis,
                speed: Some(raw_speed),
            } => {
                let speed = config.speed.clamp_speed(raw_speed);
                let acceleration = config.speed.clamp_acceleration(parse_number(line));

                let mut outcome = Outcome::none();
                if let Some(bound) = speed.bound {
                    let _ = outcome.notices.push(match bound {
                        ClampBound::Min => Notice::SpeedRaisedToMinimum,
                        ClampBound::Max => Notice::SpeedLoweredToMaximum,
                    });
                }
                if let Some(bound) = acceleration.bound {
                    let _ = outcome.notices.push(match bound {
                        ClampBound::Min => Notice::AccelerationRaisedToMinimum,
                        ClampBound::Max => Notice::AccelerationLoweredToMaximum,
                    });
                }

                outcome.effect = Some(Effect::ApplyKinematics {
                    axis,
                    speed_hz: speed.value,
                    acceleration: acceleration.value,
                });
                self.state = SessionState::AwaitingTargetPosition { axis };
                outcome
            }

            SessionState::AwaitingTargetPosition { axis } => {
                let degrees = Degrees(parse_number(line));
                let clamped = config.axes.axis(axis).clamp(degrees);
                let steps = config.converter().steps_from_degrees(clamped).value();

                self.state = SessionState::Executing;
                let mut outcome = Outcome::with_notice(Notice::PositionInSteps(steps));
                outcome.effect = Some(Effect::MoveAxis {
                    axis,
                    target_steps: steps,
                });
                outcome
            }

            // No input is expected mid-execution; swallow anything queued.
            SessionState::Executing => Outcome::none(),
        }
    }

    /// Reset to the experience menu after an effect has finished running.
    pub fn complete(&mut self) {
        self.state = SessionState::AwaitingExperienceChoice;
    }
}

/// Numeric input parsing with the firmware's forgiving semantics: anything
/// unparseable behaves as zero and takes the clamp path.
fn parse_number(line: &str) -> f32 {
    line.trim().parse::<f32>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;

    fn config() -> ChairConfig {
        ChairConfig::default()
    }

    #[test]
    fn test_invalid_experience_choice_stays_put() {
        let config = config();
        let mut session = Session::new();

        let outcome = session.handle_line("5", &config);

        assert_eq!(*session.state(), SessionState::AwaitingExperienceChoice);
        assert_eq!(outcome.notices.as_slice(), &[Notice::InvalidExperienceChoice]);
        assert!(outcome.effect.is_none());
    }

    #[test]
    fn test_single_axis_flow_with_clamped_kinematics() {
        let config = config();
        let mut session = Session::new();

        assert!(session.handle_line("1", &config).effect.is_none());
        assert_eq!(*session.state(), SessionState::AwaitingAxisChoice);

        assert!(session.handle_line("Pitch", &config).effect.is_none());
        assert!(matches!(
            session.state(),
            SessionState::AwaitingSpeedAcceleration {
                axis: Axis::Pitch,
                speed: None
            }
        ));

        // First numeric line is stored raw, nothing applied yet.
        assert!(session.handle_line("-10", &config).effect.is_none());

        // Second line clamps both fields and applies them.
        let outcome = session.handle_line("99999999", &config);
        assert_eq!(
            outcome.effect,
            Some(Effect::ApplyKinematics {
                axis: Axis::Pitch,
                speed_hz: config.speed.min_speed,
                acceleration: 10_000.0,
            })
        );
        assert!(outcome.notices.contains(&Notice::SpeedRaisedToMinimum));
        assert!(outcome
            .notices
            .contains(&Notice::AccelerationLoweredToMaximum));
        assert_eq!(
            *session.state(),
            SessionState::AwaitingTargetPosition { axis: Axis::Pitch }
        );
    }

    #[test]
    fn test_in_range_kinematics_pass_unchanged() {
        let config = config();
        let mut session = Session::new();

        session.handle_line("1", &config);
        session.handle_line("yaw", &config);
        session.handle_line("6000", &config);
        let outcome = session.handle_line("2500", &config);

        assert_eq!(
            outcome.effect,
            Some(Effect::ApplyKinematics {
                axis: Axis::Yaw,
                speed_hz: 6000.0,
                acceleration: 2500.0,
            })
        );
        assert!(outcome.notices.is_empty());
    }

    #[test]
    fn test_target_position_is_clamped_and_converted() {
        let config = config();
        let mut session = Session::new();

        session.handle_line("1", &config);
        session.handle_line("Pitch", &config);
        session.handle_line("6000", &config);
        session.handle_line("10000", &config);

        // 15 degrees is outside pitch travel; clamps to 9.81 -> 109 steps.
        let outcome = session.handle_line("15", &config);
        assert_eq!(
            outcome.effect,
            Some(Effect::MoveAxis {
                axis: Axis::Pitch,
                target_steps: 109,
            })
        );
        assert_eq!(outcome.notices.as_slice(), &[Notice::PositionInSteps(109)]);
        assert!(session.is_executing());

        session.complete();
        assert_eq!(*session.state(), SessionState::AwaitingExperienceChoice);
    }

    #[test]
    fn test_invalid_axis_reprompts() {
        let config = config();
        let mut session = Session::new();

        session.handle_line("1", &config);
        let outcome = session.handle_line("sideways", &config);

        assert_eq!(outcome.notices.as_slice(), &[Notice::InvalidAxis]);
        assert_eq!(*session.state(), SessionState::AwaitingAxisChoice);
    }

    #[test]
    fn test_unparseable_speed_behaves_as_zero() {
        let config = config();
        let mut session = Session::new();

        session.handle_line("1", &config);
        session.handle_line("roll", &config);
        session.handle_line("fast please", &config);
        let outcome = session.handle_line("5000", &config);

        assert_eq!(
            outcome.effect,
            Some(Effect::ApplyKinematics {
                axis: Axis::Roll,
                speed_hz: config.speed.min_speed,
                acceleration: 5000.0,
            })
        );
        assert!(outcome.notices.contains(&Notice::SpeedRaisedToMinimum));
    }

    #[test]
    fn test_scripted_experiences_skip_to_executing() {
        let config = config();

        let mut session = Session::new();
        let outcome = session.handle_line("2", &config);
        assert_eq!(outcome.effect, Some(Effect::FullExperience));
        assert!(session.is_executing());

        let mut session = Session::new();
        let outcome = session.handle_line("3", &config);
        assert_eq!(outcome.effect, Some(Effect::RollerCoaster));
        assert!(session.is_executing());
    }

    #[test]
    fn test_prompts_follow_the_dialog() {
        let config = config();
        let mut session = Session::new();

        assert_eq!(session.prompt(&config), Some(PromptKind::ExperienceMenu));
        session.handle_line("1", &config);
        assert_eq!(session.prompt(&config), Some(PromptKind::AxisChoice));
        session.handle_line("Yaw", &config);
        assert_eq!(session.prompt(&config), Some(PromptKind::Speed));
        session.handle_line("100", &config);
        assert_eq!(session.prompt(&config), Some(PromptKind::Acceleration));
        session.handle_line("100", &config);
        assert_eq!(
            session.prompt(&config),
            Some(PromptKind::Position {
                axis: Axis::Yaw,
                min_degrees: -45.0,
                max_degrees: 45.0,
            })
        );
        session.handle_line("10", &config);
        assert_eq!(session.prompt(&config), None);
    }
}
