//! Level goals: evaluation against the hive and the clock, and the
//! intro popup / HUD that present them.

use crate::entities::{Beehive, GoalKind, Level, LevelStatus, SCREEN_SIZE};
use crate::platform::{Align, Frame, Rgb, BLACK, WHITE, YELLOW};

const POPUP_MARGIN: f32 = 4.0;
const POPUP_BACKDROP: Rgb = Rgb(40, 30, 10);
const POPUP_FILL: Rgb = Rgb(250, 220, 120);
const LINE_HEIGHT: f32 = 7.0;

impl Level {
    pub fn new(
        number: u32,
        description: &str,
        goal: GoalKind,
        goal_amount: u32,
        time_limit: Option<f32>,
    ) -> Self {
        Level {
            number,
            description: description.to_string(),
            goal,
            goal_amount,
            time_limit,
            popup_visible: true,
        }
    }

    /// Arm the intro popup (on first start and after a failure).
    pub fn reset(&mut self) {
        self.popup_visible = true;
    }

    pub fn hide_popup(&mut self) {
        self.popup_visible = false;
    }

    pub fn show_popup(&self) -> bool {
        self.popup_visible
    }

    /// True iff the tracked hive resource has reached the goal.
    pub fn completed(&self, pollen: u32, nectar: u32) -> bool {
        match self.goal {
            GoalKind::Pollen => pollen >= self.goal_amount,
            GoalKind::Nectar => nectar >= self.goal_amount,
        }
    }

    /// True iff the level is timed, the clock has run out, and the goal
    /// was not reached.
    pub fn failed(&self, pollen: u32, nectar: u32, elapsed_seconds: f32) -> bool {
        match self.time_limit {
            Some(limit) => elapsed_seconds >= limit && !self.completed(pollen, nectar),
            None => false,
        }
    }

    pub fn evaluate(&self, hive: &Beehive, elapsed_seconds: f32) -> LevelStatus {
        if self.completed(hive.pollen, hive.nectar) {
            LevelStatus::Completed
        } else if self.failed(hive.pollen, hive.nectar, elapsed_seconds) {
            LevelStatus::Failed
        } else {
            LevelStatus::InProgress
        }
    }

    /// Whole seconds left on the clock, if timed.
    pub fn seconds_remaining(&self, elapsed_seconds: f32) -> Option<u32> {
        self.time_limit
            .map(|limit| (limit - elapsed_seconds).max(0.0).ceil() as u32)
    }

    // ── Presentation ─────────────────────────────────────────────────────────

    pub fn render_popup(&self, frame: &mut Frame) {
        let inner = SCREEN_SIZE - POPUP_MARGIN * 2.0;
        frame.solid(POPUP_MARGIN - 1.0, POPUP_MARGIN - 1.0, inner + 2.0, inner + 2.0, POPUP_BACKDROP);
        frame.solid(POPUP_MARGIN, POPUP_MARGIN, inner, inner, POPUP_FILL);

        let center = SCREEN_SIZE / 2.0;
        let mut y = SCREEN_SIZE - POPUP_MARGIN - 2.0;
        frame.label(center, y, format!("Level {}", self.number), Align::Center, BLACK);
        y -= LINE_HEIGHT + 2.0;
        for line in self.description.lines() {
            frame.label(center, y, line, Align::Center, BLACK);
            y -= LINE_HEIGHT;
        }
        y -= 2.0;
        frame.label(
            center,
            y,
            format!("Goal {} {}", self.goal_amount, goal_name(self.goal)),
            Align::Center,
            BLACK,
        );
        if let Some(limit) = self.time_limit {
            y -= LINE_HEIGHT;
            frame.label(center, y, format!("Time {}s", limit.ceil() as u32), Align::Center, BLACK);
        }
        frame.label(center, POPUP_MARGIN + LINE_HEIGHT + 1.0, "Press Enter", Align::Center, BLACK);
    }

    /// Both hive counters, the tracked one against its goal, and the
    /// countdown in the top-right corner when the level is timed.
    pub fn render_hud(&self, frame: &mut Frame, hive: &Beehive, elapsed_seconds: f32) {
        let progress = match self.goal {
            GoalKind::Pollen => format!("P{}/{} N{}", hive.pollen, self.goal_amount, hive.nectar),
            GoalKind::Nectar => format!("P{} N{}/{}", hive.pollen, hive.nectar, self.goal_amount),
        };
        frame.label(1.0, SCREEN_SIZE - 8.0, progress, Align::Left, WHITE);
        if let Some(left) = self.seconds_remaining(elapsed_seconds) {
            frame.label(SCREEN_SIZE - 1.0, SCREEN_SIZE - 1.0, left.to_string(), Align::Right, YELLOW);
        }
    }
}

fn goal_name(goal: GoalKind) -> &'static str {
    match goal {
        GoalKind::Pollen => "pollen",
        GoalKind::Nectar => "nectar",
    }
}
