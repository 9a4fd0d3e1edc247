use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sample::{Action, Point};
use crate::source::InputSource;

/// Selects which bracketing events surround the interpolated path.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SwipeMode {
    /// Same bracket as `Start`.
    #[default]
    Exact,
    /// Press at the start, leave the pointer down at the end.
    Start,
    /// Neither press nor release.
    Move,
    /// Continue an existing press and release at the end.
    End,
}

impl SwipeMode {
    pub const ALL: [SwipeMode; 4] = [
        SwipeMode::Start,
        SwipeMode::Move,
        SwipeMode::End,
        SwipeMode::Exact,
    ];

    pub const fn command(self) -> &'static str {
        match self {
            SwipeMode::Exact => "exact",
            SwipeMode::Start => "start",
            SwipeMode::Move => "move",
            SwipeMode::End => "end",
        }
    }

    pub fn from_command(command: &str) -> Option<SwipeMode> {
        Self::ALL.into_iter().find(|mode| mode.command() == command)
    }

    pub const fn leading_action(self) -> Action {
        match self {
            SwipeMode::Exact | SwipeMode::Start => Action::Down,
            SwipeMode::Move | SwipeMode::End => Action::Move,
        }
    }

    pub const fn trailing_action(self) -> Action {
        match self {
            SwipeMode::End => Action::Up,
            SwipeMode::Exact | SwipeMode::Start | SwipeMode::Move => Action::Move,
        }
    }

    /// One-line description shown in the usage text.
    pub const fn summary(self) -> &'static str {
        match self {
            SwipeMode::Start => "Start a swipe, but don't inject the ending ACTION_UP",
            SwipeMode::Move => concat!(
                "Start a swipe, but inject neither the ending ACTION_UP ",
                "nor the beginning ACTION_DOWN"
            ),
            SwipeMode::End => "Start a swipe, but don't inject the beginning ACTION_DOWN",
            SwipeMode::Exact => "Identical to 'start'.",
        }
    }
}

impl fmt::Display for SwipeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

impl FromStr for SwipeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_command(s).ok_or_else(|| format!("unknown command: {s}"))
    }
}

/// A fully validated swipe, built once per invocation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GestureRequest {
    pub source: InputSource,
    pub mode: SwipeMode,
    pub start: Point,
    pub end: Point,
    /// Path length advanced per interior sample. Always finite and positive.
    pub step: f32,
}
