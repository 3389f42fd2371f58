use serde::{Deserialize, Serialize};

use crate::state::{random_pep_talk, IntakeState, SEGMENT_COUNT};
use crate::structs::splash_point::SplashPoint;
use crate::structs::theme::Theme;

/// One user interaction with the tracker screen.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A press on the drink button. `None` drinks one goal-sized serving.
    Drink { amount_ml: Option<u32> },

    /// A goal change from the settings surface. Zero is a no-op.
    SetGoal { goal_ml: u32 },

    ToggleTheme,

    /// A tap anywhere on the surface.
    Tap { x: f32, y: f32 },
}

/// Transient feedback for the render surface. Emitted per event, never
/// stored.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Feedback {
    PepTalk { message: &'static str },
    Splash { at: SplashPoint },
}

/// Owner of the screen state.
///
/// All mutation goes through [`App::apply`], which replaces the held
/// [`IntakeState`] wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct App {
    state: IntakeState,
    theme: Theme,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Apply one event and return the transient feedback it produced.
    pub fn apply(&mut self, event: AppEvent) -> Vec<Feedback> {
        match event {
            AppEvent::Drink { amount_ml } => {
                self.state = match amount_ml {
                    Some(ml) => self.state.record_drink(ml),
                    None => self.state.record_default_drink(),
                };
                vec![Feedback::PepTalk {
                    message: random_pep_talk(),
                }]
            }
            AppEvent::SetGoal { goal_ml } => {
                self.state = self.state.with_goal(goal_ml);
                Vec::new()
            }
            AppEvent::ToggleTheme => {
                self.theme = self.theme.toggled();
                Vec::new()
            }
            AppEvent::Tap { x, y } => vec![Feedback::Splash {
                at: SplashPoint::new(x, y),
            }],
        }
    }

    /// Text rendering of the progress bar, one glyph per segment.
    pub fn render_bar(&self) -> String {
        (0..SEGMENT_COUNT)
            .map(|segment| glyph(self.theme, self.state.segment_opacity(segment, SEGMENT_COUNT)))
            .collect()
    }
}

fn glyph(theme: Theme, opacity: f64) -> char {
    let palette = match theme {
        Theme::Light => ['·', '░', '▒', '▓', '█'],
        Theme::Dark => [' ', '░', '▒', '▓', '█'],
    };
    let bucket = ((opacity * 4.0).floor() as usize).min(palette.len() - 1);
    palette[bucket]
}
