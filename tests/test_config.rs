use bee_pollination::config::{GameConfig, PhysicsConfig};
use bee_pollination::entities::GoalKind;
use bee_pollination::GameError;

#[test]
fn defaults_are_valid() {
    let config = GameConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.tick_rate, 60.0);
    assert_eq!(config.seed, None);
    assert_eq!(config.physics, PhysicsConfig::default());
    assert_eq!(config.levels.len(), 5);
}

#[test]
fn default_levels_escalate() {
    let config = GameConfig::default();
    let goals: Vec<(GoalKind, u32, Option<f32>)> = config
        .levels
        .iter()
        .map(|l| (l.goal, l.amount, l.time_limit))
        .collect();
    assert_eq!(
        goals,
        vec![
            (GoalKind::Pollen, 50, None),
            (GoalKind::Nectar, 30, None),
            (GoalKind::Pollen, 100, Some(60.0)),
            (GoalKind::Nectar, 60, Some(90.0)),
            (GoalKind::Pollen, 300, Some(180.0)),
        ]
    );
}

#[test]
fn empty_toml_gives_defaults() {
    let config = GameConfig::from_toml_str("").unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = GameConfig::from_toml_str(
        r#"
        tick_rate = 30.0
        seed = 7

        [physics]
        gravity = 0.01
        "#,
    )
    .unwrap();
    assert_eq!(config.tick_rate, 30.0);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.physics.gravity, 0.01);
    assert_eq!(config.physics.jump_speed, 0.05);
    assert_eq!(config.physics.x_speed, 0.5);
    assert_eq!(config.levels.len(), 5);
}

#[test]
fn custom_levels_replace_defaults() {
    let config = GameConfig::from_toml_str(
        r#"
        [[levels]]
        description = "Sip 10\nnectar"
        goal = "nectar"
        amount = 10

        [[levels]]
        description = "Quick"
        goal = "pollen"
        amount = 5
        time_limit = 20.0
        "#,
    )
    .unwrap();
    assert_eq!(config.levels.len(), 2);
    assert_eq!(config.levels[0].goal, GoalKind::Nectar);
    assert_eq!(config.levels[0].time_limit, None);
    assert_eq!(config.levels[1].time_limit, Some(20.0));
}

// ── Rejections ────────────────────────────────────────────────────────────────

#[test]
fn empty_level_list_is_rejected() {
    let err = GameConfig::from_toml_str("levels = []").unwrap_err();
    assert!(matches!(err, GameError::NoLevels));
}

#[test]
fn zero_amount_is_rejected() {
    let err = GameConfig::from_toml_str(
        r#"
        [[levels]]
        description = "Nothing"
        goal = "pollen"
        amount = 0
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, GameError::InvalidLevel { number: 1, .. }));
}

#[test]
fn non_positive_time_limit_is_rejected() {
    let err = GameConfig::from_toml_str(
        r#"
        [[levels]]
        description = "Ok"
        goal = "pollen"
        amount = 5

        [[levels]]
        description = "Backwards"
        goal = "nectar"
        amount = 5
        time_limit = -5.0
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, GameError::InvalidLevel { number: 2, .. }));
}

#[test]
fn blank_description_is_rejected() {
    let err = GameConfig::from_toml_str(
        r#"
        [[levels]]
        description = "  "
        goal = "pollen"
        amount = 5
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, GameError::InvalidLevel { number: 1, .. }));
}

#[test]
fn zero_tick_rate_is_rejected() {
    let err = GameConfig::from_toml_str("tick_rate = 0.0").unwrap_err();
    assert!(matches!(err, GameError::InvalidTickRate(_)));
}

#[test]
fn unknown_goal_is_a_parse_error() {
    let err = GameConfig::from_toml_str(
        r#"
        [[levels]]
        description = "Honey"
        goal = "honey"
        amount = 5
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, GameError::ConfigParse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GameConfig::load("/nonexistent/bee_pollination.toml").unwrap_err();
    assert!(matches!(err, GameError::Io(_)));
}

// ── Level queue ───────────────────────────────────────────────────────────────

#[test]
fn level_queue_numbers_from_one_with_popups_armed() {
    let queue = GameConfig::default().level_queue();
    assert_eq!(queue.len(), 5);
    for (i, level) in queue.iter().enumerate() {
        assert_eq!(level.number, i as u32 + 1);
        assert!(level.show_popup());
    }
    assert_eq!(queue[0].description, "Collect 50\npollen");
}
