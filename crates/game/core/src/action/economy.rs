//! Ledger-side actions: race seeding, grants, spending, building placement.

use crate::action::{ActionTransition, ExecuteError};
use crate::env::Env;
use crate::state::{
    BuildingKind, GameState, OwnerId, PlayerId, RaceKind, ResourceKind, ResourceStack,
};

/// Adds stacks to a player's ledger (mining yield, trade income, cheats).
/// Infallible once the player resolves.
#[derive(Clone, Debug, PartialEq)]
pub struct GrantResources {
    pub player: PlayerId,
    pub grants: Vec<ResourceStack>,
}

impl ActionTransition for GrantResources {
    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ExecuteError> {
        if state.player(self.player).is_none() {
            return Err(ExecuteError::PlayerNotFound(self.player));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &mut Env<'_>) -> Result<Vec<OwnerId>, ExecuteError> {
        let player = state
            .player_mut(self.player)
            .ok_or(ExecuteError::PlayerNotFound(self.player))?;
        for grant in &self.grants {
            player.ledger.add(grant.clone());
        }
        Ok(vec![OwnerId::Player(self.player)])
    }
}

/// Locks in a player's race and seeds the starting economy.
///
/// The grant list comes from content (the host resolves the race's initial
/// resources before issuing the action). Replaces any prior holdings, so
/// re-selection is rejected instead.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectRace {
    pub player: PlayerId,
    pub race: RaceKind,
    pub grants: Vec<ResourceStack>,
}

impl ActionTransition for SelectRace {
    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ExecuteError> {
        let player = state
            .player(self.player)
            .ok_or(ExecuteError::PlayerNotFound(self.player))?;
        if player.has_selected_race() {
            return Err(ExecuteError::RaceAlreadySelected(self.player));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &mut Env<'_>) -> Result<Vec<OwnerId>, ExecuteError> {
        let player = state
            .player_mut(self.player)
            .ok_or(ExecuteError::PlayerNotFound(self.player))?;
        player.race = Some(self.race);
        player.ledger.clear();
        for grant in &self.grants {
            player.ledger.add(grant.clone());
        }
        tracing::debug!(player = %self.player, race = %self.race, grants = self.grants.len(),
            "race selected, ledger seeded");
        Ok(vec![OwnerId::Player(self.player)])
    }
}

/// Spends resources from a player's ledger. Multi-kind and all-or-nothing:
/// every line must be affordable or nothing is consumed.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsumeResources {
    pub player: PlayerId,
    pub costs: Vec<(ResourceKind, u32)>,
}

impl ConsumeResources {
    /// Costs summed per kind (the list may repeat a kind).
    fn totals(&self) -> Vec<(ResourceKind, u32)> {
        let mut totals: Vec<(ResourceKind, u32)> = Vec::new();
        for &(kind, amount) in &self.costs {
            match totals.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, total)) => *total += amount,
                None => totals.push((kind, amount)),
            }
        }
        totals
    }
}

impl ActionTransition for ConsumeResources {
    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ExecuteError> {
        let player = state
            .player(self.player)
            .ok_or(ExecuteError::PlayerNotFound(self.player))?;
        for (kind, amount) in self.totals() {
            if !player.ledger.has_at_least(kind, amount) {
                return Err(crate::state::LedgerError::InsufficientResource {
                    kind,
                    requested: amount,
                    available: player.ledger.total_of(kind),
                }
                .into());
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &mut Env<'_>) -> Result<Vec<OwnerId>, ExecuteError> {
        let player = state
            .player_mut(self.player)
            .ok_or(ExecuteError::PlayerNotFound(self.player))?;
        for (kind, amount) in self.totals() {
            player.ledger.consume(kind, amount)?;
        }
        Ok(vec![OwnerId::Player(self.player)])
    }
}

/// Pays for and records a building placement.
///
/// Costs are resolved from content by the host; the world-side spawn of the
/// building mesh is outside the core.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceBuilding {
    pub player: PlayerId,
    pub building: BuildingKind,
    pub costs: Vec<(ResourceKind, u32)>,
}

impl ActionTransition for PlaceBuilding {
    fn pre_validate(&self, state: &GameState, env: &Env<'_>) -> Result<(), ExecuteError> {
        ConsumeResources {
            player: self.player,
            costs: self.costs.clone(),
        }
        .pre_validate(state, env)
    }

    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<Vec<OwnerId>, ExecuteError> {
        let changed = ConsumeResources {
            player: self.player,
            costs: self.costs.clone(),
        }
        .apply(state, env)?;

        let player = state
            .player_mut(self.player)
            .ok_or(ExecuteError::PlayerNotFound(self.player))?;
        player.buildings.push(self.building);
        tracing::debug!(player = %self.player, building = %self.building, "building placed");
        Ok(changed)
    }
}
