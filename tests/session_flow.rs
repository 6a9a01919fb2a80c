//! End-to-end console scenarios: scripted input through the control loop.

use chair_motion::config::ChairConfig;
use chair_motion::sim::{NoopDelay, ScriptedConsole, SimCommand, SimJournal, SimStepper};
use chair_motion::{console, Axis, ChairRig};

use rand::rngs::SmallRng;
use rand::SeedableRng;

fn sim_rig(config: &ChairConfig) -> (ChairRig<SimStepper, NoopDelay>, SimJournal) {
    let (left, right, yaw, journal) = SimStepper::trio();
    let rig = ChairRig::new(left, right, yaw, NoopDelay, config).expect("rig should assemble");
    journal.clear();
    (rig, journal)
}

/// Run the loop over a scripted console until the script runs out.
fn run_script(lines: &[&str]) -> (ScriptedConsole, SimJournal) {
    let config = ChairConfig::default();
    let (mut rig, journal) = sim_rig(&config);
    let mut console_io = ScriptedConsole::new(lines.iter().copied());
    let mut rng = SmallRng::seed_from_u64(42);

    console::run(&mut console_io, &mut rig, &config, &mut rng)
        .expect("loop should exit cleanly when the script closes");

    (console_io, journal)
}

#[test]
fn welcome_and_menu_are_printed() {
    let (console_io, _journal) = run_script(&[]);

    assert!(console_io.printed("Welcome to our motion simulation chair!"));
    assert!(console_io.printed("What kind of user experience would you like?"));
}

#[test]
fn invalid_experience_choice_reprompts_without_motion() {
    let (console_io, journal) = run_script(&["5"]);

    assert!(console_io.printed("Invalid choice"));
    // No stepper call of any kind resulted from the bad input.
    assert!(journal.is_empty());
    // The menu was printed again for the retry.
    let menus = console_io
        .output()
        .iter()
        .filter(|line| line.contains("What kind of user experience"))
        .count();
    assert_eq!(menus, 2);
}

#[test]
fn full_experience_choice_runs_the_sweep_and_resets() {
    let (console_io, journal) = run_script(&["2"]);

    assert!(console_io.printed("Moving all three motors!"));

    // Nine axis moves over the shared tilt pair and yaw: 15 driver calls.
    assert_eq!(journal.move_tos().len(), 15);

    // Control returned to the experience menu after the ride.
    let menus = console_io
        .output()
        .iter()
        .filter(|line| line.contains("What kind of user experience"))
        .count();
    assert_eq!(menus, 2);
}

#[test]
fn roller_coaster_choice_runs_the_script() {
    let (console_io, journal) = run_script(&["3"]);

    assert!(console_io.printed("Performing roller coaster simulation!"));
    assert!(!journal.is_empty());
}

#[test]
fn single_axis_flow_clamps_and_moves() {
    let config = ChairConfig::default();
    let (console_io, journal) = run_script(&["1", "Pitch", "-10", "99999999", "15"]);

    assert!(console_io.printed("Speed value is 0 or below"));
    assert!(console_io.printed("Acceleration value is above the specified limit"));
    assert!(console_io.printed("Position in steps: 109"));

    let events = journal.events();

    // Clamped kinematics reached both tilt steppers.
    for stepper in ["left", "right"] {
        assert!(events.iter().any(|e| e.stepper == stepper
            && e.command == SimCommand::SetSpeedHz(config.speed.min_speed)));
        assert!(events.iter().any(|e| e.stepper == stepper
            && e.command == SimCommand::SetAcceleration(config.speed.max_acceleration)));
    }

    // The clamped 15° -> 9.81° target went to both steppers with equal sign.
    assert_eq!(journal.move_tos(), vec![("left", 109), ("right", 109)]);
}

#[test]
fn axis_prompt_shows_the_travel_range() {
    let (console_io, _journal) = run_script(&["1", "Yaw", "100", "100"]);

    assert!(console_io.printed("Enter Axis (Pitch/Roll/Yaw):"));
    assert!(console_io.printed("Enter a position in degrees (-45 to 45):"));
}

#[test]
fn invalid_axis_reprompts() {
    let (console_io, journal) = run_script(&["1", "sideways", "roll", "500", "500", "0"]);

    assert!(console_io.printed("Invalid axis"));

    // The dialog recovered: roll was bound and the move ran, mirrored.
    let moves = journal.move_tos();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0].0, "left");
    assert_eq!(moves[1].0, "right");
    assert_eq!(moves[0].1, -moves[1].1);
}

#[test]
fn case_insensitive_axis_names_are_accepted() {
    let (_console_io, journal) = run_script(&["1", "yAw", "1000", "1000", "-45"]);

    let config = ChairConfig::default();
    let min = config.step_limits(Axis::Yaw).min_steps;
    assert_eq!(journal.move_tos(), vec![("yaw", min)]);
}

#[test]
fn overlong_input_line_is_reported_and_skipped() {
    let long = "x".repeat(200);
    let (console_io, journal) = run_script(&[long.as_str(), "2"]);

    assert!(console_io.printed("Input too long."));
    // The ride still ran afterwards.
    assert_eq!(journal.move_tos().len(), 15);
}
