use bee_pollination::entities::*;
use bee_pollination::platform::Frame;

fn pollen_level(amount: u32, time_limit: Option<f32>) -> Level {
    Level::new(1, "Collect\npollen", GoalKind::Pollen, amount, time_limit)
}

fn hive_with(pollen: u32, nectar: u32) -> Beehive {
    let mut hive = Beehive::default();
    hive.pollen = pollen;
    hive.nectar = nectar;
    hive
}

// ── Completion ────────────────────────────────────────────────────────────────

#[test]
fn pollen_goal_completes_at_threshold() {
    let level = pollen_level(300, None);
    assert!(!level.completed(299, 0));
    assert!(level.completed(300, 0));
    assert!(level.completed(301, 0));
}

#[test]
fn nectar_goal_ignores_pollen() {
    let level = Level::new(2, "Nectar", GoalKind::Nectar, 30, None);
    assert!(!level.completed(1_000, 29));
    assert!(level.completed(0, 30));
}

// ── Failure ───────────────────────────────────────────────────────────────────

#[test]
fn timed_level_fails_when_clock_runs_out() {
    let level = pollen_level(300, Some(30.0));
    assert!(level.failed(0, 0, 30.0));
    assert!(!level.failed(0, 0, 29.9));
}

#[test]
fn untimed_level_never_fails() {
    let level = pollen_level(300, None);
    assert!(!level.failed(0, 0, 1_000_000.0));
}

#[test]
fn completed_level_does_not_fail() {
    let level = pollen_level(300, Some(30.0));
    assert!(!level.failed(300, 0, 45.0));
}

#[test]
fn evaluate_prefers_completion() {
    let level = pollen_level(10, Some(5.0));
    assert_eq!(level.evaluate(&hive_with(0, 0), 1.0), LevelStatus::InProgress);
    assert_eq!(level.evaluate(&hive_with(10, 0), 6.0), LevelStatus::Completed);
    assert_eq!(level.evaluate(&hive_with(9, 0), 5.0), LevelStatus::Failed);
}

#[test]
fn seconds_remaining_counts_down_to_zero() {
    let level = pollen_level(10, Some(30.0));
    assert_eq!(level.seconds_remaining(0.0), Some(30));
    assert_eq!(level.seconds_remaining(10.5), Some(20));
    assert_eq!(level.seconds_remaining(45.0), Some(0));
    assert_eq!(pollen_level(10, None).seconds_remaining(5.0), None);
}

// ── Popup lifecycle ───────────────────────────────────────────────────────────

#[test]
fn popup_starts_visible_and_rearms_on_reset() {
    let mut level = pollen_level(10, None);
    assert!(level.show_popup());
    level.hide_popup();
    assert!(!level.show_popup());
    level.reset();
    assert!(level.show_popup());
}

#[test]
fn popup_shows_number_and_each_description_line() {
    let level = pollen_level(10, None);
    let mut frame = Frame::new();
    level.render_popup(&mut frame);
    let labels: Vec<&str> = frame.labels().collect();
    assert_eq!(
        labels,
        vec!["Level 1", "Collect", "pollen", "Goal 10 pollen", "Press Enter"]
    );
}

#[test]
fn popup_states_goal_and_time_limit_for_custom_description() {
    let level = Level::new(1, "Warm up", GoalKind::Nectar, 40, Some(20.0));
    let mut frame = Frame::new();
    level.render_popup(&mut frame);
    let labels: Vec<&str> = frame.labels().collect();
    assert_eq!(
        labels,
        vec!["Level 1", "Warm up", "Goal 40 nectar", "Time 20s", "Press Enter"]
    );
}

#[test]
fn hud_shows_both_hive_counters_and_clock() {
    let level = pollen_level(50, Some(60.0));
    let mut frame = Frame::new();
    level.render_hud(&mut frame, &hive_with(12, 3), 15.0);
    let labels: Vec<&str> = frame.labels().collect();
    assert_eq!(labels, vec!["P12/50 N3", "45"]);
}

#[test]
fn hud_puts_goal_on_nectar_for_nectar_levels() {
    let level = Level::new(2, "Nectar", GoalKind::Nectar, 30, None);
    let mut frame = Frame::new();
    level.render_hud(&mut frame, &hive_with(12, 3), 15.0);
    let labels: Vec<&str> = frame.labels().collect();
    assert_eq!(labels, vec!["P12 N3/30"]);
}

// ── Beehive totals ────────────────────────────────────────────────────────────

#[test]
fn hive_total_matches_goal_kind() {
    let hive = hive_with(7, 4);
    assert_eq!(hive.total(GoalKind::Pollen), 7);
    assert_eq!(hive.total(GoalKind::Nectar), 4);
}
