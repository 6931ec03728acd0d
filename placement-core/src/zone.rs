use serde::{Deserialize, Serialize};

use crate::error::PlacementError;

/// Point in stage space. The y axis grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

impl From<(f64, f64)> for Position {
    fn from(v: (f64, f64)) -> Self {
        Position { x: v.0, y: v.1 }
    }
}

/// Axis-aligned target rectangle a piece must be released inside.
///
/// Only [`GoalZone::new`] builds one, so every instance has a finite origin
/// and a strictly positive, finite size. Deserialization goes through the
/// same check.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGoalZone")]
pub struct GoalZone {
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct RawGoalZone {
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
}

impl TryFrom<RawGoalZone> for GoalZone {
    type Error = PlacementError;

    fn try_from(raw: RawGoalZone) -> Result<Self, Self::Error> {
        GoalZone::new(raw.min_x, raw.min_y, raw.width, raw.height)
    }
}

impl GoalZone {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Result<Self, PlacementError> {
        let size_ok = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !size_ok || !min_x.is_finite() || !min_y.is_finite() {
            return Err(PlacementError::InvalidGoalZone {
                min_x,
                min_y,
                width,
                height,
            });
        }
        Ok(GoalZone {
            min_x,
            min_y,
            width,
            height,
        })
    }

    /// Strict containment: points on the outline are outside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x > self.min_x && x < self.max_x() && y > self.min_y && y < self.max_y()
    }

    pub fn contains_point(&self, p: Position) -> bool {
        self.contains(p.x, p.y)
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    pub fn center(&self) -> Position {
        Position {
            x: self.min_x + self.width / 2.0,
            y: self.min_y + self.height / 2.0,
        }
    }
}
