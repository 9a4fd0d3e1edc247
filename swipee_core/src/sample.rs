use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Position in device coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Down,
    Move,
    Up,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Down => "ACTION_DOWN",
            Action::Move => "ACTION_MOVE",
            Action::Up => "ACTION_UP",
        })
    }
}

/// A position on the path together with the action to perform there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub action: Action,
    pub position: Point,
}

pub const DEFAULT_PRESSURE: f32 = 1.0;

/// One timestamped touch sample handed to the injector.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub action: Action,
    pub position: Point,
    /// Time since the gesture's first sample.
    pub timestamp: Duration,
    pub pressure: f32,
}

impl TouchSample {
    pub fn new(waypoint: Waypoint, timestamp: Duration) -> Self {
        Self {
            action: waypoint.action,
            position: waypoint.position,
            timestamp,
            pressure: DEFAULT_PRESSURE,
        }
    }
}

impl fmt::Display for TouchSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x={} y={} t={}ms pressure={}",
            self.action,
            self.position.x,
            self.position.y,
            self.timestamp.as_millis(),
            self.pressure
        )
    }
}
