//! Unit-side actions: picking piles up off the ground and dropping them back.

use crate::action::{ActionTransition, ExecuteError};
use crate::env::Env;
use crate::state::{GameState, OwnerId, ResourceKind, UnitId};
use crate::world::PileHandle;

/// Picks up a specific ground pile into a unit's carry inventory.
///
/// Atomic with respect to the world: the pile is only destroyed if the
/// inventory accepts the stack. When the inventory rejects it the pile is
/// re-materialized at its original position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupPile {
    pub unit: UnitId,
    pub pile: PileHandle,
}

impl ActionTransition for PickupPile {
    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ExecuteError> {
        if state.unit(self.unit).is_none() {
            return Err(ExecuteError::UnitNotFound(self.unit));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<Vec<OwnerId>, ExecuteError> {
        let unit = state
            .unit_mut(self.unit)
            .ok_or(ExecuteError::UnitNotFound(self.unit))?;

        let takeout = env.spawn.destroy_pile(self.pile)?;
        match unit.carry.pickup(takeout.stack.clone(), OwnerId::Unit(self.unit)) {
            Ok(_slot) => Ok(vec![OwnerId::Unit(self.unit)]),
            Err(err) => {
                // Inventory full or too heavy: put the pile back where it was.
                env.spawn.spawn_pile(takeout.stack, takeout.position);
                Err(err.into())
            }
        }
    }
}

/// Picks up the nearest matching pile within `radius` of the unit.
/// `kind: None` matches any pile. Distances are toroidal on wrapped maps;
/// the spawn oracle owns that metric.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupNearest {
    pub unit: UnitId,
    pub kind: Option<ResourceKind>,
    pub radius: f32,
}

impl ActionTransition for PickupNearest {
    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ExecuteError> {
        if state.unit(self.unit).is_none() {
            return Err(ExecuteError::UnitNotFound(self.unit));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<Vec<OwnerId>, ExecuteError> {
        let from = state
            .unit(self.unit)
            .ok_or(ExecuteError::UnitNotFound(self.unit))?
            .position;

        let pile = env
            .spawn
            .find_nearest_pile(self.kind, from, self.radius)
            .ok_or(ExecuteError::NoPileInRange {
                kind: self.kind,
                radius: self.radius,
            })?;

        PickupPile {
            unit: self.unit,
            pile,
        }
        .apply(state, env)
    }
}

/// Drops one carried slot onto the ground at the unit's feet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropSlot {
    pub unit: UnitId,
    pub slot: usize,
}

impl ActionTransition for DropSlot {
    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ExecuteError> {
        if state.unit(self.unit).is_none() {
            return Err(ExecuteError::UnitNotFound(self.unit));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<Vec<OwnerId>, ExecuteError> {
        let unit = state
            .unit_mut(self.unit)
            .ok_or(ExecuteError::UnitNotFound(self.unit))?;
        let position = unit.position;

        let stack = unit.carry.drop_at(self.slot, position)?;
        env.spawn.spawn_pile(stack, position);
        Ok(vec![OwnerId::Unit(self.unit)])
    }
}

/// Empties a unit's carry inventory onto the ground, one pile per slot.
/// A no-op (still successful) when the inventory is already empty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropAll {
    pub unit: UnitId,
}

impl ActionTransition for DropAll {
    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ExecuteError> {
        if state.unit(self.unit).is_none() {
            return Err(ExecuteError::UnitNotFound(self.unit));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<Vec<OwnerId>, ExecuteError> {
        let unit = state
            .unit_mut(self.unit)
            .ok_or(ExecuteError::UnitNotFound(self.unit))?;
        let position = unit.position;

        let dropped = unit.carry.drop_all(position);
        if dropped.is_empty() {
            return Ok(Vec::new());
        }
        for stack in dropped {
            env.spawn.spawn_pile(stack, position);
        }
        Ok(vec![OwnerId::Unit(self.unit)])
    }
}
