use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PlacementError;
use crate::item::ItemId;
use crate::registry::PlacementRegistry;
use crate::trigger::CompletionTrigger;
use crate::zone::{GoalZone, Position};

const BUNDLED_CLOTHES: &str = include_str!("../layouts/clothes.json");

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("failed to parse layout: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error("stage must have a positive size, got {width}x{height}")]
    InvalidStage { width: f64, height: f64 },
    #[error("`{id}` must have a positive size, got {width}x{height}")]
    InvalidSize { id: String, width: f64, height: f64 },
}

/// Logical coordinate space the layout is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub width: f64,
    pub height: f64,
}

/// Static, non-draggable artwork drawn under the pieces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub id: String,
    pub center: Position,
    pub width: f64,
    pub height: f64,
}

/// A draggable piece: its goal plus where and how big it starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceSpec {
    pub id: ItemId,
    pub goal: GoalZone,
    pub start: Position,
    pub width: f64,
    pub height: f64,
}

/// Full puzzle configuration, read once at setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub stage: Stage,
    /// Where the host goes once every piece is placed.
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub decorations: Vec<Decoration>,
    pub pieces: Vec<PieceSpec>,
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl Layout {
    /// Parses and validates a layout document.
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let layout: Layout = serde_json::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    /// The dress-up layout shipped with the crate.
    pub fn bundled() -> Result<Self, LayoutError> {
        Self::from_json(BUNDLED_CLOTHES)
    }

    /// Dress-up puzzle scaled to an arbitrary stage: a body in the middle,
    /// a shirt and trousers that belong on its chest and hips.
    pub fn clothes(width: f64, height: f64) -> Result<Self, LayoutError> {
        let goal_side = height * 0.06;
        let goal = |min_y_frac: f64| {
            GoalZone::new(width * 0.48, height * min_y_frac, goal_side, goal_side)
        };
        let body_h = height * 0.6;
        let shirt_h = height / 7.0;
        let trousers_h = height / 4.0;
        let layout = Layout {
            stage: Stage { width, height },
            next: Some("video.html".to_string()),
            decorations: vec![Decoration {
                id: "cuerpo".to_string(),
                center: Position::new(width / 2.0, height / 2.0),
                width: body_h * 0.4,
                height: body_h,
            }],
            pieces: vec![
                PieceSpec {
                    id: ItemId::from("camiseta"),
                    goal: goal(0.36)?,
                    start: Position::new(width / 7.0, height / 7.0),
                    width: shirt_h,
                    height: shirt_h,
                },
                PieceSpec {
                    id: ItemId::from("pantalon"),
                    goal: goal(0.56)?,
                    start: Position::new(width * 5.0 / 7.0, height * 5.0 / 7.0),
                    width: trousers_h * 0.4,
                    height: trousers_h,
                },
            ],
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let Stage { width, height } = self.stage;
        if !positive(width) || !positive(height) {
            return Err(LayoutError::InvalidStage { width, height });
        }
        if self.pieces.is_empty() {
            return Err(PlacementError::EmptyRegistry.into());
        }
        let mut seen = HashSet::new();
        for p in &self.pieces {
            if !seen.insert(p.id.as_str()) {
                return Err(PlacementError::DuplicateIdentity(p.id.clone()).into());
            }
            if !positive(p.width) || !positive(p.height) {
                return Err(LayoutError::InvalidSize {
                    id: p.id.to_string(),
                    width: p.width,
                    height: p.height,
                });
            }
        }
        for d in &self.decorations {
            if !positive(d.width) || !positive(d.height) {
                return Err(LayoutError::InvalidSize {
                    id: d.id.clone(),
                    width: d.width,
                    height: d.height,
                });
            }
        }
        Ok(())
    }

    pub fn piece(&self, id: &str) -> Option<&PieceSpec> {
        self.pieces.iter().find(|p| p.id.as_str() == id)
    }

    /// Registers every piece's goal and seals the registry.
    pub fn registry(&self, trigger: CompletionTrigger) -> Result<PlacementRegistry, LayoutError> {
        let mut builder = PlacementRegistry::builder();
        for p in &self.pieces {
            builder.register_item(p.id.clone(), p.goal)?;
        }
        Ok(builder.build(trigger)?)
    }
}
