use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::zone::GoalZone;

/// Stable identity of a draggable piece, e.g. `"camiseta"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Pending,
    Placed,
}

/// Logical state of one piece. Only the registry hands out `&mut` access.
#[derive(Clone, Debug)]
pub struct PlacementItem {
    id: ItemId,
    goal: GoalZone,
    ready: bool,
}

impl PlacementItem {
    pub(crate) fn new(id: ItemId, goal: GoalZone) -> Self {
        PlacementItem {
            id,
            goal,
            ready: false,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn goal(&self) -> &GoalZone {
        &self.goal
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn state(&self) -> ItemState {
        if self.ready {
            ItemState::Placed
        } else {
            ItemState::Pending
        }
    }

    /// Returns `true` only on the pending -> placed transition.
    pub(crate) fn mark_ready(&mut self) -> bool {
        if self.ready {
            return false;
        }
        self.ready = true;
        true
    }
}
