//! Placement tracking for drag-to-target puzzles.
//!
//! Every piece has a rectangular goal. The host reports where each drag
//! ended; the registry marks pieces placed when they land strictly inside
//! their goal and runs the completion callback once, when the last piece
//! goes in. Rendering and pointer handling stay with the host.

pub mod concurrent;
mod error;
mod item;
pub mod layout;
pub mod palette;
mod registry;
mod screen;
mod trigger;
mod zone;

pub use concurrent::ConcurrentRegistry;
pub use error::PlacementError;
pub use item::{ItemId, ItemState, PlacementItem};
pub use layout::{Decoration, Layout, LayoutError, PieceSpec, Stage};
pub use palette::piece_color;
pub use registry::{PlacementRegistry, PuzzleState, RegistryBuilder, ReleaseOutcome};
pub use screen::Screen;
pub use trigger::CompletionTrigger;
pub use zone::{GoalZone, Position};
