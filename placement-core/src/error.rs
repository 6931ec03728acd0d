use crate::item::ItemId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("item id already registered: {0}")]
    DuplicateIdentity(ItemId),
    #[error("unknown item id: {0}")]
    UnknownIdentity(String),
    #[error("invalid goal zone at ({min_x}, {min_y}) sized {width}x{height}")]
    InvalidGoalZone {
        min_x: f64,
        min_y: f64,
        width: f64,
        height: f64,
    },
    #[error("a puzzle needs at least one item")]
    EmptyRegistry,
}
