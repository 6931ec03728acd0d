//! Registry variant for hosts that deliver drag-release events from more
//! than one thread.
//!
//! Each item's pending -> placed step is a compare-and-set, and a shared
//! counter of pending items decides which caller crosses the completion
//! edge. Only that caller takes the callback out of its slot.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::PlacementError;
use crate::item::{ItemId, ItemState};
use crate::registry::{PuzzleState, ReleaseOutcome};
use crate::zone::{GoalZone, Position};

type SharedCallback = Box<dyn FnOnce() + Send>;

struct SharedItem {
    goal: GoalZone,
    ready: AtomicBool,
}

pub struct ConcurrentRegistry {
    items: HashMap<ItemId, SharedItem>,
    pending: AtomicUsize,
    callback: Mutex<Option<SharedCallback>>,
}

impl ConcurrentRegistry {
    /// Builds the registry from `(id, goal)` pairs in one go; the identity
    /// set cannot change afterwards.
    pub fn new<I>(
        goals: I,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> Result<Self, PlacementError>
    where
        I: IntoIterator<Item = (ItemId, GoalZone)>,
    {
        let mut items = HashMap::new();
        for (id, goal) in goals {
            if items.contains_key(&id) {
                return Err(PlacementError::DuplicateIdentity(id));
            }
            items.insert(
                id,
                SharedItem {
                    goal,
                    ready: AtomicBool::new(false),
                },
            );
        }
        if items.is_empty() {
            return Err(PlacementError::EmptyRegistry);
        }
        let pending = AtomicUsize::new(items.len());
        Ok(ConcurrentRegistry {
            items,
            pending,
            callback: Mutex::new(Some(Box::new(on_complete))),
        })
    }

    pub fn on_drag_release(
        &self,
        id: &str,
        position: Position,
    ) -> Result<ReleaseOutcome, PlacementError> {
        let Some(item) = self.items.get(id) else {
            tracing::warn!(id, "release for unknown item");
            return Err(PlacementError::UnknownIdentity(id.to_string()));
        };
        if item.ready.load(Ordering::Acquire) {
            return Ok(ReleaseOutcome::AlreadyPlaced);
        }
        if !item.goal.contains_point(position) {
            return Ok(ReleaseOutcome::Missed);
        }
        if item
            .ready
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(ReleaseOutcome::AlreadyPlaced);
        }
        // Exactly one successful CAS per item, so exactly one caller sees 1 here.
        if self.pending.fetch_sub(1, Ordering::AcqRel) != 1 {
            return Ok(ReleaseOutcome::Placed);
        }
        tracing::info!(items = self.items.len(), "all items placed");
        let callback = match self.callback.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(cb) = callback {
            cb();
        }
        Ok(ReleaseOutcome::Completed)
    }

    pub fn all_ready(&self) -> bool {
        self.pending.load(Ordering::Acquire) == 0
    }

    pub fn puzzle_state(&self) -> PuzzleState {
        if self.all_ready() {
            PuzzleState::Complete
        } else {
            PuzzleState::InProgress
        }
    }

    pub fn item_state(&self, id: &str) -> Option<ItemState> {
        self.items.get(id).map(|it| {
            if it.ready.load(Ordering::Acquire) {
                ItemState::Placed
            } else {
                ItemState::Pending
            }
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
