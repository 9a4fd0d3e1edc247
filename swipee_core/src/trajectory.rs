//! Path generation for a single swipe, bracketed per [`SwipeMode`](crate::SwipeMode).

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::request::GestureRequest;
use crate::sample::{Action, Point, Waypoint};

pub fn lerp(a: f32, b: f32, alpha: f32) -> f32 {
    (b - a) * alpha + a
}

/// Sine ease-in-out between `a` and `b`.
pub fn serp(a: f32, b: f32, alpha: f32) -> f32 {
    let interpolation = -((PI * alpha).cos() - 1.0) / 2.0;
    (b - a) * interpolation + a
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Linear,
    Sine,
}

impl Interpolation {
    pub fn apply(self, a: f32, b: f32, alpha: f32) -> f32 {
        match self {
            Interpolation::Linear => lerp(a, b, alpha),
            Interpolation::Sine => serp(a, b, alpha),
        }
    }

    pub fn point(self, start: Point, end: Point, alpha: f32) -> Point {
        Point::new(
            self.apply(start.x, end.x, alpha),
            self.apply(start.y, end.y, alpha),
        )
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Interpolation::Linear => "linear",
            Interpolation::Sine => "sine",
        })
    }
}

impl FromStr for Interpolation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Interpolation::Linear),
            "sine" => Ok(Interpolation::Sine),
            other => Err(format!("unknown interpolation: {other}")),
        }
    }
}

/// How the length of the path is measured before it is cut into steps.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// `sqrt(|dx| + |dy|)`. Not a norm, but it fixes the number and spacing
    /// of samples existing scripts were tuned against.
    #[default]
    Observed,
    /// `sqrt(dx^2 + dy^2)`.
    Euclidean,
}

impl DistanceMetric {
    pub fn distance(self, a: Point, b: Point) -> f32 {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        match self {
            DistanceMetric::Observed => (dx.abs() + dy.abs()).sqrt(),
            DistanceMetric::Euclidean => dx.hypot(dy),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DistanceMetric::Observed => "observed",
            DistanceMetric::Euclidean => "euclidean",
        })
    }
}

impl FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "observed" => Ok(DistanceMetric::Observed),
            "euclidean" => Ok(DistanceMetric::Euclidean),
            other => Err(format!("unknown distance metric: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Leading,
    Interior(u64),
    Done,
}

/// Lazy iterator over the waypoints of one gesture.
#[derive(Debug, Clone)]
pub struct Trajectory {
    start: Point,
    end: Point,
    step: f32,
    distance: f32,
    // Number of interior samples, `ceil(distance / step)`.
    count: u64,
    interpolation: Interpolation,
    leading: Action,
    trailing: Action,
    phase: Phase,
}

impl Trajectory {
    pub fn new(
        request: &GestureRequest,
        interpolation: Interpolation,
        metric: DistanceMetric,
    ) -> Self {
        let distance = metric.distance(request.start, request.end);
        // A zero-length path is already at its target; an overflowing one has
        // no meaningful interior.
        let steps = distance / request.step;
        let count = if distance > 0.0 && steps.is_finite() {
            steps.ceil() as u64
        } else {
            0
        };
        Self {
            start: request.start,
            end: request.end,
            step: request.step,
            distance,
            count,
            interpolation,
            leading: request.mode.leading_action(),
            trailing: request.mode.trailing_action(),
            phase: Phase::Leading,
        }
    }

    /// Full path length under the metric the trajectory was built with.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Number of `Move` samples between the two bracket waypoints.
    pub fn interior_len(&self) -> u64 {
        self.count
    }

    fn interior(&self, index: u64) -> Option<Point> {
        if index >= self.count {
            return None;
        }
        let alpha = (index as f32 * self.step / self.distance).min(1.0);
        Some(self.interpolation.point(self.start, self.end, alpha))
    }
}

impl Iterator for Trajectory {
    type Item = Waypoint;

    fn next(&mut self) -> Option<Waypoint> {
        match self.phase {
            Phase::Leading => {
                self.phase = Phase::Interior(0);
                Some(Waypoint {
                    action: self.leading,
                    position: self.start,
                })
            }
            Phase::Interior(index) => match self.interior(index) {
                Some(position) => {
                    self.phase = Phase::Interior(index + 1);
                    Some(Waypoint {
                        action: Action::Move,
                        position,
                    })
                }
                None => {
                    self.phase = Phase::Done;
                    Some(Waypoint {
                        action: self.trailing,
                        position: self.end,
                    })
                }
            },
            Phase::Done => None,
        }
    }
}
