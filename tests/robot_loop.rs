//! The robot built from a config and driven round by round

mod common;

use image::RgbaImage;
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{calm_frame, screen_with_bobber, splash_frame, Event, FakeDesktop};
use wow_fisher::config::{ActionDefinition, Params, WindowConfig};
use wow_fisher::log_main::load_catches;
use wow_fisher::robot::builder::params;
use wow_fisher::{
    ActionError, ActionOutcome, ActionRegistry, BuildError, Config, ErrorPolicy, PlatformError,
    Robot, WindowTarget,
};

fn fish_def(captures_dir: &std::path::Path, extra: &[(&str, &str)]) -> ActionDefinition {
    let mut pairs = vec![("captures_dir", captures_dir.to_str().unwrap())];
    pairs.extend_from_slice(extra);
    ActionDefinition::new("fish", params(pairs))
}

fn afk_def(happens: &str) -> ActionDefinition {
    ActionDefinition::new("afk", params([("happens", happens)]))
}

fn robot(config: &Config, desktop: &FakeDesktop) -> Robot {
    Robot::new(config, &ActionRegistry::with_defaults(), Box::new(desktop.clone()))
        .unwrap()
        .with_rng(StdRng::seed_from_u64(7))
}

fn broken_frames() -> Vec<RgbaImage> {
    vec![calm_frame(), calm_frame(), RgbaImage::new(10, 10)]
}

#[tokio::test(start_paused = true)]
async fn round_runs_actions_in_order() {
    let root = tempfile::tempdir().unwrap();
    let desktop = FakeDesktop::new(
        screen_with_bobber(900, 450),
        vec![calm_frame(), calm_frame(), calm_frame(), splash_frame()],
    );
    let config = Config::with_actions(vec![
        afk_def("always"),
        fish_def(root.path(), &[("happens", "never")]),
        fish_def(root.path(), &[]),
    ]);
    let mut robot = robot(&config, &desktop);

    let outcomes = robot.run_round().await.unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], ActionOutcome::Idled);
    assert_eq!(outcomes[1], ActionOutcome::Skipped);
    assert!(matches!(outcomes[2], ActionOutcome::Caught { sample: 4, .. }));

    let stats = robot.stats();
    assert_eq!((stats.casts, stats.catches, stats.skips, stats.idles), (1, 1, 1, 1));
    assert_eq!(stats.rate(), 100.0);
}

#[tokio::test(start_paused = true)]
async fn abort_policy_stops_the_round() {
    let root = tempfile::tempdir().unwrap();
    let desktop = FakeDesktop::new(screen_with_bobber(900, 450), broken_frames());
    let config = Config::with_actions(vec![fish_def(root.path(), &[]), afk_def("always")]);
    let mut robot = robot(&config, &desktop);

    let err = robot.run_round().await.unwrap_err();

    assert!(matches!(err, ActionError::Image(_)));
    assert_eq!(robot.stats().failures, 1);
    assert_eq!(robot.stats().idles, 0);
}

#[tokio::test(start_paused = true)]
async fn skip_policy_moves_on() {
    let root = tempfile::tempdir().unwrap();
    let desktop = FakeDesktop::new(screen_with_bobber(900, 450), broken_frames());
    let mut config = Config::with_actions(vec![fish_def(root.path(), &[]), afk_def("always")]);
    config.on_action_error = ErrorPolicy::Skip;
    let mut robot = robot(&config, &desktop);

    let outcomes = robot.run_round().await.unwrap();

    assert_eq!(outcomes, vec![ActionOutcome::Idled]);
    assert_eq!(robot.stats().failures, 1);
}

#[tokio::test(start_paused = true)]
async fn start_focuses_the_window_first() {
    let root = tempfile::tempdir().unwrap();
    let desktop = FakeDesktop::new(screen_with_bobber(900, 450), broken_frames());
    let mut config = Config::with_actions(vec![fish_def(root.path(), &[])]);
    config.window = Some(WindowConfig {
        title: None,
        process_id: Some(12389),
    });
    let mut robot = robot(&config, &desktop);

    // the broken frames end the loop on the first cast
    let err = robot.start().await.unwrap_err();

    assert!(matches!(err, ActionError::Image(_)));
    assert_eq!(desktop.events()[0], Event::Activate(WindowTarget::Process(12389)));
}

#[tokio::test(start_paused = true)]
async fn start_fails_without_the_game_window() {
    let desktop = FakeDesktop::with_window(screen_with_bobber(900, 450), vec![calm_frame()], false);
    let mut config = Config::with_actions(vec![afk_def("always")]);
    config.window = Some(WindowConfig {
        title: Some("World of Warcraft".to_string()),
        process_id: None,
    });
    let mut robot = robot(&config, &desktop);

    let err = robot.start().await.unwrap_err();

    assert!(matches!(err, ActionError::Platform(PlatformError::WindowNotFound(_))));
    assert_eq!(robot.stats().idles, 0);
}

#[tokio::test(start_paused = true)]
async fn casts_are_written_to_the_catch_log() {
    let root = tempfile::tempdir().unwrap();
    let log_file = root.path().join("logs").join("fishing_log.json");
    let desktop = FakeDesktop::new(
        screen_with_bobber(900, 450),
        vec![calm_frame(), calm_frame(), calm_frame(), splash_frame()],
    );
    let captures_dir = root.path().join("captures");
    let mut config = Config::with_actions(vec![fish_def(&captures_dir, &[]), afk_def("always")]);
    config.catch_log = Some(log_file.clone());
    let mut robot = robot(&config, &desktop);

    robot.run_round().await.unwrap();

    let entries = load_catches(&log_file);
    assert_eq!(entries.len(), 1);
    assert!(entries[0].status);
    assert_eq!(entries[0].samples, 4);
}

#[test]
fn unknown_action_means_no_robot() {
    let desktop = FakeDesktop::new(screen_with_bobber(900, 450), vec![calm_frame()]);
    let config = Config::with_actions(vec![
        afk_def("always"),
        ActionDefinition::new("herbalism", Params::new()),
    ]);

    let err = Robot::new(&config, &ActionRegistry::with_defaults(), Box::new(desktop))
        .err()
        .unwrap();

    assert!(matches!(err, BuildError::NoBuilder(ref name) if name == "herbalism"));
}

#[test]
fn bad_parameter_names_the_action() {
    let desktop = FakeDesktop::new(screen_with_bobber(900, 450), vec![calm_frame()]);
    let config = Config::with_actions(vec![ActionDefinition::new(
        "fish",
        params([("toggle_blue_threshold", "256")]),
    )]);

    let err = Robot::new(&config, &ActionRegistry::with_defaults(), Box::new(desktop))
        .err()
        .unwrap();

    assert!(matches!(err, BuildError::Action { ref name, .. } if name == "fish"));
    assert_eq!(err.to_string(), "cannot build action \"fish\"");
}

#[test]
fn unknown_spell_key_fails_at_startup() {
    let root = tempfile::tempdir().unwrap();
    let desktop = FakeDesktop::new(screen_with_bobber(900, 450), vec![calm_frame()]);
    let config = Config::with_actions(vec![fish_def(root.path(), &[("spell_key", "numpad9")])]);

    let err = Robot::new(&config, &ActionRegistry::with_defaults(), Box::new(desktop.clone()))
        .err()
        .unwrap();

    assert!(matches!(err, BuildError::Action { ref name, .. } if name == "fish"));
    assert!(desktop.events().is_empty());
}
