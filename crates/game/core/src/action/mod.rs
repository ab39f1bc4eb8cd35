//! Player and unit commands as explicit, replayable state transitions.
//!
//! Hosts never mutate [`crate::state::GameState`] directly: they build an
//! [`Action`] and hand it to the engine, which gates on authority, runs
//! `pre_validate`, then `apply`. Keeping mutations in enum form makes them
//! trivially queueable and serializable for a client/server deployment.

mod carry_ops;
mod economy;
mod transition;

pub use carry_ops::{DropAll, DropSlot, PickupNearest, PickupPile};
pub use economy::{ConsumeResources, GrantResources, PlaceBuilding, SelectRace};
pub use transition::ActionTransition;

use crate::env::Env;
use crate::error::{ErrorSeverity, GameError, NotAuthoritative};
use crate::state::{
    CarryError, GameState, LedgerError, OwnerId, PlayerId, ResourceKind, UnitId,
};
use crate::world::RegistryError;

/// Any failure an action can surface.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    NotAuthoritative(#[from] NotAuthoritative),

    #[error("player {0} does not exist")]
    PlayerNotFound(PlayerId),

    #[error("unit {0} does not exist")]
    UnitNotFound(UnitId),

    #[error("player {0} already selected a race")]
    RaceAlreadySelected(PlayerId),

    #[error("no matching pile within {radius} units (kind: {kind:?})")]
    NoPileInRange {
        kind: Option<ResourceKind>,
        radius: f32,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Carry(#[from] CarryError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotAuthoritative(err) => err.severity(),
            Self::PlayerNotFound(_) | Self::UnitNotFound(_) => ErrorSeverity::Validation,
            Self::RaceAlreadySelected(_) => ErrorSeverity::Validation,
            Self::NoPileInRange { .. } => ErrorSeverity::Recoverable,
            Self::Ledger(err) => err.severity(),
            Self::Carry(err) => err.severity(),
            Self::Registry(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAuthoritative(err) => err.error_code(),
            Self::PlayerNotFound(_) => "player_not_found",
            Self::UnitNotFound(_) => "unit_not_found",
            Self::RaceAlreadySelected(_) => "race_already_selected",
            Self::NoPileInRange { .. } => "no_pile_in_range",
            Self::Ledger(err) => err.error_code(),
            Self::Carry(err) => err.error_code(),
            Self::Registry(err) => err.error_code(),
        }
    }
}

/// The closed set of commands the engine executes.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SelectRace(SelectRace),
    GrantResources(GrantResources),
    ConsumeResources(ConsumeResources),
    PlaceBuilding(PlaceBuilding),
    PickupPile(PickupPile),
    PickupNearest(PickupNearest),
    DropSlot(DropSlot),
    DropAll(DropAll),
}

impl ActionTransition for Action {
    fn pre_validate(&self, state: &GameState, env: &Env<'_>) -> Result<(), ExecuteError> {
        match self {
            Self::SelectRace(action) => action.pre_validate(state, env),
            Self::GrantResources(action) => action.pre_validate(state, env),
            Self::ConsumeResources(action) => action.pre_validate(state, env),
            Self::PlaceBuilding(action) => action.pre_validate(state, env),
            Self::PickupPile(action) => action.pre_validate(state, env),
            Self::PickupNearest(action) => action.pre_validate(state, env),
            Self::DropSlot(action) => action.pre_validate(state, env),
            Self::DropAll(action) => action.pre_validate(state, env),
        }
    }

    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<Vec<OwnerId>, ExecuteError> {
        match self {
            Self::SelectRace(action) => action.apply(state, env),
            Self::GrantResources(action) => action.apply(state, env),
            Self::ConsumeResources(action) => action.apply(state, env),
            Self::PlaceBuilding(action) => action.apply(state, env),
            Self::PickupPile(action) => action.apply(state, env),
            Self::PickupNearest(action) => action.apply(state, env),
            Self::DropSlot(action) => action.apply(state, env),
            Self::DropAll(action) => action.apply(state, env),
        }
    }
}
