//! Authoritative game state representation.
//!
//! This module owns the data structures that describe players, units, and
//! their resource holdings. Runtime layers clone or query this state but
//! mutate it exclusively through the engine.

mod carry;
mod common;
mod kinds;
mod ledger;
mod resource;

pub use carry::{CarryError, CarryInventory};
pub use common::{OwnerId, PlayerId, Rotation, UnitId, WorldPosition};
pub use kinds::{ActorTag, BuildingKind, RaceKind};
pub use ledger::{LedgerError, ResourceLedger};
pub use resource::{
    ResourceKind, ResourceLocation, ResourceStack, WEIGHT_TOLERANCE, weights_match,
};

/// Per-player bookkeeping: team, chosen race, banked resources, owned units.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub team: u32,
    /// Set once at race selection; grants are seeded at the same moment.
    pub race: Option<RaceKind>,
    pub ledger: ResourceLedger,
    pub units: Vec<UnitId>,
    /// Placed buildings, in placement order.
    pub buildings: Vec<BuildingKind>,
}

impl PlayerState {
    pub fn new(team: u32) -> Self {
        Self {
            team,
            race: None,
            ledger: ResourceLedger::new(),
            units: Vec::new(),
            buildings: Vec::new(),
        }
    }

    pub fn has_selected_race(&self) -> bool {
        self.race.is_some()
    }
}

/// Per-unit bookkeeping: owner, pose, carry inventory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    pub owner: PlayerId,
    pub position: WorldPosition,
    pub rotation: Rotation,
    pub carry: CarryInventory,
}

impl UnitState {
    pub fn new(owner: PlayerId, position: WorldPosition, carry: CarryInventory) -> Self {
        Self {
            owner,
            position,
            rotation: Rotation::default(),
            carry,
        }
    }
}

/// Canonical snapshot of the simulation state.
///
/// Single-writer-per-tick: all mutation happens on one logical simulation
/// thread through [`crate::engine::GameEngine`], so no interior locking.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    players: std::collections::BTreeMap<PlayerId, PlayerState>,
    units: std::collections::BTreeMap<UnitId, UnitState>,
    /// Sequential unit id allocator (monotonically increasing, never reused).
    next_unit_id: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== players =====

    pub fn add_player(&mut self, id: PlayerId, team: u32) -> &mut PlayerState {
        self.players.entry(id).or_insert_with(|| PlayerState::new(team))
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = (&PlayerId, &PlayerState)> {
        self.players.iter()
    }

    // ===== units =====

    /// Spawns a unit for `owner` and registers it on the owning player.
    pub fn spawn_unit(
        &mut self,
        owner: PlayerId,
        position: WorldPosition,
        carry: CarryInventory,
    ) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.insert(id, UnitState::new(owner, position, carry));
        if let Some(player) = self.players.get_mut(&owner) {
            player.units.push(id);
        }
        id
    }

    /// Removes a unit and unregisters it from its owner. Returns the state
    /// so callers can drop carried stacks back into the world.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<UnitState> {
        let unit = self.units.remove(&id)?;
        if let Some(player) = self.players.get_mut(&unit.owner) {
            player.units.retain(|&u| u != id);
        }
        Some(unit)
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitState> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut UnitState> {
        self.units.get_mut(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = (&UnitId, &UnitState)> {
        self.units.iter()
    }

    pub fn units_of_team(&self, team: u32) -> Vec<UnitId> {
        self.units
            .iter()
            .filter(|(_, unit)| {
                self.players
                    .get(&unit.owner)
                    .is_some_and(|p| p.team == team)
            })
            .map(|(&id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_registers_unit_on_owner() {
        let mut state = GameState::new();
        let player = PlayerId(0);
        state.add_player(player, 1);

        let unit = state.spawn_unit(player, WorldPosition::ZERO, CarryInventory::new(2, 20.0));
        assert_eq!(state.player(player).unwrap().units, vec![unit]);
        assert_eq!(state.unit(unit).unwrap().owner, player);
    }

    #[test]
    fn remove_unregisters_unit_from_owner() {
        let mut state = GameState::new();
        let player = PlayerId(0);
        state.add_player(player, 1);
        let unit = state.spawn_unit(player, WorldPosition::ZERO, CarryInventory::new(2, 20.0));

        let removed = state.remove_unit(unit).unwrap();
        assert_eq!(removed.owner, player);
        assert!(state.player(player).unwrap().units.is_empty());
        assert!(state.unit(unit).is_none());
    }

    #[test]
    fn unit_ids_are_never_reused() {
        let mut state = GameState::new();
        let player = PlayerId(0);
        state.add_player(player, 1);
        let a = state.spawn_unit(player, WorldPosition::ZERO, CarryInventory::new(1, 1.0));
        state.remove_unit(a);
        let b = state.spawn_unit(player, WorldPosition::ZERO, CarryInventory::new(1, 1.0));
        assert_ne!(a, b);
    }

    #[test]
    fn team_query_spans_players() {
        let mut state = GameState::new();
        state.add_player(PlayerId(0), 1);
        state.add_player(PlayerId(1), 2);
        let u0 = state.spawn_unit(PlayerId(0), WorldPosition::ZERO, CarryInventory::new(1, 1.0));
        let _u1 = state.spawn_unit(PlayerId(1), WorldPosition::ZERO, CarryInventory::new(1, 1.0));

        assert_eq!(state.units_of_team(1), vec![u0]);
    }
}
