use std::collections::HashMap;

use serde::Serialize;

use crate::error::PlacementError;
use crate::item::{ItemId, ItemState, PlacementItem};
use crate::trigger::CompletionTrigger;
use crate::zone::{GoalZone, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleState {
    InProgress,
    Complete,
}

/// What a single drag-release did to the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseOutcome {
    /// The item was already placed; nothing changed.
    AlreadyPlaced,
    /// Released outside the item's goal; nothing changed.
    Missed,
    /// The item is now placed but others are still pending.
    Placed,
    /// The item was the last pending one and the completion trigger ran.
    Completed,
}

impl ReleaseOutcome {
    pub fn changed_state(self) -> bool {
        matches!(self, ReleaseOutcome::Placed | ReleaseOutcome::Completed)
    }
}

/// Collects items during setup. Sealing it with [`RegistryBuilder::build`]
/// fixes the set of identities for the puzzle's lifetime.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    items: Vec<PlacementItem>,
    index: HashMap<ItemId, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_item(
        &mut self,
        id: impl Into<ItemId>,
        goal: GoalZone,
    ) -> Result<&mut Self, PlacementError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(PlacementError::DuplicateIdentity(id));
        }
        self.index.insert(id.clone(), self.items.len());
        self.items.push(PlacementItem::new(id, goal));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn build(self, trigger: CompletionTrigger) -> Result<PlacementRegistry, PlacementError> {
        if self.items.is_empty() {
            return Err(PlacementError::EmptyRegistry);
        }
        tracing::debug!(items = self.items.len(), "placement registry sealed");
        Ok(PlacementRegistry {
            items: self.items,
            index: self.index,
            trigger,
        })
    }
}

/// Owns every [`PlacementItem`] of one puzzle and decides completion.
#[derive(Debug)]
pub struct PlacementRegistry {
    items: Vec<PlacementItem>,
    index: HashMap<ItemId, usize>,
    trigger: CompletionTrigger,
}

impl PlacementRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Feeds the final center position of a finished drag.
    ///
    /// Unknown ids are reported and rejected without touching any state.
    /// Placed items ignore further releases, which keeps the completion edge
    /// from being crossed twice.
    pub fn on_drag_release(
        &mut self,
        id: &str,
        position: Position,
    ) -> Result<ReleaseOutcome, PlacementError> {
        let Some(&idx) = self.index.get(id) else {
            tracing::warn!(id, x = position.x, y = position.y, "release for unknown item");
            return Err(PlacementError::UnknownIdentity(id.to_string()));
        };
        let item = &mut self.items[idx];
        if item.is_ready() {
            return Ok(ReleaseOutcome::AlreadyPlaced);
        }
        if !item.goal().contains_point(position) {
            tracing::debug!(id, x = position.x, y = position.y, "released outside goal");
            return Ok(ReleaseOutcome::Missed);
        }
        item.mark_ready();
        tracing::debug!(id, "item placed");

        if !self.all_ready() {
            return Ok(ReleaseOutcome::Placed);
        }
        tracing::info!(items = self.items.len(), "all items placed");
        self.trigger.fire();
        Ok(ReleaseOutcome::Completed)
    }

    pub fn all_ready(&self) -> bool {
        self.items.iter().all(PlacementItem::is_ready)
    }

    pub fn puzzle_state(&self) -> PuzzleState {
        if self.all_ready() {
            PuzzleState::Complete
        } else {
            PuzzleState::InProgress
        }
    }

    pub fn item(&self, id: &str) -> Option<&PlacementItem> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn item_state(&self, id: &str) -> Option<ItemState> {
        self.item(id).map(PlacementItem::state)
    }

    /// Items in registration order.
    pub fn items(&self) -> impl Iterator<Item = &PlacementItem> {
        self.items.iter()
    }

    /// Goal outlines for the rendering layer.
    pub fn goals(&self) -> impl Iterator<Item = (&ItemId, &GoalZone)> {
        self.items.iter().map(|it| (it.id(), it.goal()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`: building an empty registry is rejected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn placed_count(&self) -> usize {
        self.items.iter().filter(|it| it.is_ready()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn zone(x: f64, y: f64) -> GoalZone {
        GoalZone::new(x, y, 5.0, 5.0).unwrap()
    }

    fn counting_trigger() -> (CompletionTrigger, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (CompletionTrigger::new(move || c.set(c.get() + 1)), count)
    }

    fn two_item_registry() -> (PlacementRegistry, Rc<Cell<u32>>) {
        let mut b = PlacementRegistry::builder();
        b.register_item("i1", zone(10.0, 10.0))
            .unwrap()
            .register_item("i2", zone(20.0, 20.0))
            .unwrap();
        let (trigger, count) = counting_trigger();
        (b.build(trigger).unwrap(), count)
    }

    #[test]
    fn miss_leaves_item_pending() {
        let (mut reg, count) = two_item_registry();
        let out = reg.on_drag_release("i1", Position::new(0.0, 0.0)).unwrap();
        assert_eq!(out, ReleaseOutcome::Missed);
        assert_eq!(reg.item_state("i1"), Some(ItemState::Pending));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn last_placement_completes() {
        let (mut reg, count) = two_item_registry();
        assert_eq!(
            reg.on_drag_release("i1", Position::new(12.0, 12.0)).unwrap(),
            ReleaseOutcome::Placed
        );
        assert_eq!(reg.puzzle_state(), PuzzleState::InProgress);
        assert_eq!(count.get(), 0);
        assert_eq!(
            reg.on_drag_release("i2", Position::new(22.0, 22.0)).unwrap(),
            ReleaseOutcome::Completed
        );
        assert_eq!(reg.puzzle_state(), PuzzleState::Complete);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn placed_item_ignores_later_releases() {
        let (mut reg, count) = two_item_registry();
        reg.on_drag_release("i1", Position::new(12.0, 12.0)).unwrap();
        reg.on_drag_release("i2", Position::new(22.0, 22.0)).unwrap();
        for p in [(0.0, 0.0), (12.0, 12.0), (22.0, 22.0)] {
            assert_eq!(
                reg.on_drag_release("i1", p.into()).unwrap(),
                ReleaseOutcome::AlreadyPlaced
            );
            assert_eq!(
                reg.on_drag_release("i2", p.into()).unwrap(),
                ReleaseOutcome::AlreadyPlaced
            );
        }
        assert_eq!(count.get(), 1);
        assert_eq!(reg.placed_count(), 2);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut b = PlacementRegistry::builder();
        b.register_item("i1", zone(0.0, 0.0)).unwrap();
        let err = b.register_item("i1", zone(30.0, 30.0)).unwrap_err();
        assert_eq!(err, PlacementError::DuplicateIdentity(ItemId::from("i1")));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn empty_registry_is_a_configuration_error() {
        let err = PlacementRegistry::builder()
            .build(CompletionTrigger::noop())
            .unwrap_err();
        assert_eq!(err, PlacementError::EmptyRegistry);
    }

    #[test]
    fn goals_follow_registration_order() {
        let (reg, _) = two_item_registry();
        let ids: Vec<&str> = reg.goals().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["i1", "i2"]);
    }
}
