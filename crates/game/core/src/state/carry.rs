//! Unit carry inventory.
//!
//! A unit's bounded, mobile resource holdings. Every stack occupies exactly
//! one slot regardless of amount; total carried mass must stay within the
//! unit's weight budget. Slot and weight limits reject independently.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{OwnerId, ResourceStack, WorldPosition};

/// Carry transaction failures. The inventory is untouched on error.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarryError {
    /// Pickup would exceed the slot count or the weight budget.
    #[error("pickup exceeds capacity (slots {used_slots}/{max_slots}, weight {would_weigh:.1}/{max_weight:.1})")]
    CapacityExceeded {
        used_slots: usize,
        max_slots: usize,
        would_weigh: f32,
        max_weight: f32,
    },

    /// Drop targeted a slot index that does not exist.
    #[error("slot {slot} out of range (carrying {len})")]
    InvalidSlot { slot: usize, len: usize },
}

impl GameError for CarryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CapacityExceeded { .. } => ErrorSeverity::Recoverable,
            Self::InvalidSlot { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::InvalidSlot { .. } => "invalid_slot",
        }
    }
}

/// Capacity-constrained stack container for one unit.
///
/// Invariant after any successful mutation: `len() <= max_slots` and
/// `current_weight() <= max_weight`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarryInventory {
    stacks: Vec<ResourceStack>,
    max_slots: usize,
    max_weight: f32,
}

impl CarryInventory {
    pub fn new(max_slots: usize, max_weight: f32) -> Self {
        Self {
            stacks: Vec::new(),
            max_slots,
            max_weight,
        }
    }

    /// Whether `stack` would fit. Checks both constraints; does not mutate.
    pub fn can_accept(&self, stack: &ResourceStack) -> bool {
        self.stacks.len() < self.max_slots
            && self.current_weight() + stack.stack_weight() <= self.max_weight
    }

    /// Picks up a stack, tagging it as carried by `carrier`.
    ///
    /// Authoritative-only: callers must hold authority (the engine gates
    /// this). Returns the slot index on success.
    pub fn pickup(&mut self, mut stack: ResourceStack, carrier: OwnerId) -> Result<usize, CarryError> {
        if !self.can_accept(&stack) {
            return Err(CarryError::CapacityExceeded {
                used_slots: self.stacks.len(),
                max_slots: self.max_slots,
                would_weigh: self.current_weight() + stack.stack_weight(),
                max_weight: self.max_weight,
            });
        }
        stack.set_carried_by(carrier);
        self.stacks.push(stack);
        Ok(self.stacks.len() - 1)
    }

    /// Removes the stack at `slot` and tags it on the ground at `position`.
    ///
    /// The caller is responsible for re-materializing a physical pile
    /// through the spawn collaborator.
    pub fn drop_at(&mut self, slot: usize, position: WorldPosition) -> Result<ResourceStack, CarryError> {
        if slot >= self.stacks.len() {
            return Err(CarryError::InvalidSlot {
                slot,
                len: self.stacks.len(),
            });
        }
        let mut stack = self.stacks.remove(slot);
        stack.set_on_ground(position);
        Ok(stack)
    }

    /// Drops every slot at `position`, front to back.
    pub fn drop_all(&mut self, position: WorldPosition) -> Vec<ResourceStack> {
        let mut dropped = Vec::with_capacity(self.stacks.len());
        while !self.stacks.is_empty() {
            // drop_at(0) cannot fail while a slot remains
            match self.drop_at(0, position) {
                Ok(stack) => dropped.push(stack),
                Err(_) => break,
            }
        }
        dropped
    }

    /// Total carried mass across all slots.
    pub fn current_weight(&self) -> f32 {
        self.stacks.iter().map(ResourceStack::stack_weight).sum()
    }

    pub fn free_slots(&self) -> usize {
        self.max_slots - self.stacks.len()
    }

    pub fn is_full(&self) -> bool {
        self.stacks.len() >= self.max_slots
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn max_weight(&self) -> f32 {
        self.max_weight
    }

    pub fn get(&self, slot: usize) -> Option<&ResourceStack> {
        self.stacks.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceStack> {
        self.stacks.iter()
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ResourceKind, ResourceLocation, UnitId};

    const CARRIER: OwnerId = OwnerId::Unit(UnitId(1));

    fn stack(kind: ResourceKind, amount: u32, weight: f32) -> ResourceStack {
        ResourceStack::new(kind, amount, weight)
    }

    #[test]
    fn pickup_tags_stack_as_carried() {
        let mut carry = CarryInventory::new(2, 20.0);
        let slot = carry.pickup(stack(ResourceKind::Sword, 1, 3.5), CARRIER).unwrap();
        assert_eq!(slot, 0);
        let carried = carry.get(0).unwrap();
        assert_eq!(carried.location, ResourceLocation::CarriedByUnit);
        assert_eq!(carried.container, Some(CARRIER));
    }

    #[test]
    fn slot_limit_rejects_even_with_weight_headroom() {
        let mut carry = CarryInventory::new(2, 20.0);
        carry.pickup(stack(ResourceKind::Sword, 1, 3.5), CARRIER).unwrap();
        carry.pickup(stack(ResourceKind::ElvishBow, 1, 0.5), CARRIER).unwrap();

        let err = carry.pickup(stack(ResourceKind::Wood, 1, 0.1), CARRIER).unwrap_err();
        assert!(matches!(err, CarryError::CapacityExceeded { used_slots: 2, max_slots: 2, .. }));
    }

    #[test]
    fn weight_limit_rejects_even_with_free_slots() {
        let mut carry = CarryInventory::new(8, 10.0);
        carry.pickup(stack(ResourceKind::Wood, 2, 4.0), CARRIER).unwrap(); // 8.0
        let err = carry.pickup(stack(ResourceKind::Wood, 1, 3.0), CARRIER).unwrap_err();
        assert!(matches!(err, CarryError::CapacityExceeded { .. }));
        assert_eq!(carry.len(), 1);
    }

    #[test]
    fn both_constraints_reject_independently() {
        // Two slots of weight 4 fill both slots at total weight 8; a third
        // pickup of weight 3 fails on slots even though 8+3 > 10 would also
        // fail on weight.
        let mut carry = CarryInventory::new(2, 10.0);
        carry.pickup(stack(ResourceKind::Wood, 1, 4.0), CARRIER).unwrap();
        carry.pickup(stack(ResourceKind::Wood, 1, 4.0), CARRIER).unwrap();
        assert!((carry.current_weight() - 8.0).abs() < f32::EPSILON);

        let err = carry.pickup(stack(ResourceKind::Wood, 1, 3.0), CARRIER).unwrap_err();
        assert!(matches!(err, CarryError::CapacityExceeded { used_slots: 2, .. }));
    }

    #[test]
    fn drop_returns_stack_tagged_on_ground() {
        let mut carry = CarryInventory::new(2, 20.0);
        carry.pickup(stack(ResourceKind::Sword, 1, 3.5), CARRIER).unwrap();

        let here = WorldPosition::new(100.0, -50.0, 0.0);
        let dropped = carry.drop_at(0, here).unwrap();
        assert_eq!(dropped.location, ResourceLocation::OnGround);
        assert_eq!(dropped.world_position, Some(here));
        assert!(carry.is_empty());
    }

    #[test]
    fn drop_invalid_slot_is_rejected() {
        let mut carry = CarryInventory::new(2, 20.0);
        let err = carry.drop_at(0, WorldPosition::ZERO).unwrap_err();
        assert_eq!(err, CarryError::InvalidSlot { slot: 0, len: 0 });
    }

    #[test]
    fn drop_all_empties_in_slot_order() {
        let mut carry = CarryInventory::new(3, 20.0);
        carry.pickup(stack(ResourceKind::Sword, 1, 3.5), CARRIER).unwrap();
        carry.pickup(stack(ResourceKind::ElvishBow, 1, 0.5), CARRIER).unwrap();

        let dropped = carry.drop_all(WorldPosition::ZERO);
        assert_eq!(dropped.len(), 2);
        assert_eq!(dropped[0].kind, ResourceKind::Sword);
        assert_eq!(dropped[1].kind, ResourceKind::ElvishBow);
        assert!(carry.is_empty());
        assert_eq!(carry.current_weight(), 0.0);
    }

    #[test]
    fn two_slot_unit_scenario() {
        let mut carry = CarryInventory::new(2, 20.0);
        carry.pickup(stack(ResourceKind::Sword, 1, 3.5), CARRIER).unwrap();
        carry.pickup(stack(ResourceKind::ElvishBow, 1, 0.5), CARRIER).unwrap();

        // Third pickup of anything fails regardless of weight.
        let err = carry.pickup(stack(ResourceKind::Wood, 1, 0.01), CARRIER).unwrap_err();
        assert!(matches!(err, CarryError::CapacityExceeded { .. }));
    }
}
