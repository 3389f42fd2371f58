use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of segments in the intake progress bar.
pub const SEGMENT_COUNT: usize = 8;

/// Default daily intake goal, in milliliters.
pub const DEFAULT_GOAL_ML: u32 = 250;

/// Messages shown after recording a drink.
pub const PEP_TALKS: [&str; 7] = [
    "You got this!",
    "More water!",
    "You are doing amazing!",
    "Keep going!",
    "Every sip matters!",
    "Almost there!",
    "Your efforts will pay off!",
];

/// Pick a pep-talk message, uniformly at random.
pub fn random_pep_talk() -> &'static str {
    PEP_TALKS[rand::thread_rng().gen_range(0..PEP_TALKS.len())]
}

/// Water intake recorded for the current session.
///
/// A plain value: every transition consumes the old state and returns the
/// new one, so the owning event loop replaces it wholesale. The state lives
/// for the process lifetime only.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeState {
    /// Total water drank this session, in milliliters
    pub current_intake_ml: u32,

    /// Daily intake goal in milliliters, always positive
    pub daily_goal_ml: u32,
}

impl Default for IntakeState {
    fn default() -> Self {
        Self {
            current_intake_ml: 0,
            daily_goal_ml: DEFAULT_GOAL_ML,
        }
    }
}

impl IntakeState {
    /// Fresh state with the given goal. A zero goal falls back to
    /// [`DEFAULT_GOAL_ML`].
    pub fn new(goal_ml: u32) -> Self {
        Self::default().with_goal(goal_ml)
    }

    /// Record a drink of `amount_ml`. Intake has no upper clamp and may
    /// exceed the goal.
    pub fn record_drink(self, amount_ml: u32) -> Self {
        Self {
            current_intake_ml: self.current_intake_ml.saturating_add(amount_ml),
            ..self
        }
    }

    /// Record one goal-sized drink.
    pub fn record_default_drink(self) -> Self {
        self.record_drink(self.daily_goal_ml)
    }

    /// Replace the daily goal. A zero goal is ignored and the previous
    /// value kept.
    pub fn with_goal(self, goal_ml: u32) -> Self {
        if goal_ml == 0 {
            return self;
        }

        Self {
            daily_goal_ml: goal_ml,
            ..self
        }
    }

    /// Fill level of one progress segment, in `[0, 1]`.
    ///
    /// Segments below the filled count are fully opaque, the segment at the
    /// filled count carries the fractional remainder, everything above is
    /// transparent. A fully saturated bar has no partial segment.
    pub fn segment_opacity(&self, segment: usize, segment_count: usize) -> f64 {
        if segment_count == 0 {
            return 0.0;
        }

        let progress = f64::from(self.current_intake_ml)
            / (f64::from(self.daily_goal_ml) * segment_count as f64);
        let scaled = progress * segment_count as f64;
        let remainder = scaled - scaled.floor();
        let filled = scaled.floor() as usize;

        if segment < filled {
            1.0
        } else if segment == filled && filled != segment_count {
            remainder
        } else {
            0.0
        }
    }
}
