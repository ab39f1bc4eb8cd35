//! Deterministic simulation core: resource economy and toroidal world math.
//!
//! `torus-core` defines the canonical rules (actions, engine, world state)
//! for an edge-wrapping RTS map and exposes pure APIs that hosts and tools
//! reuse. All state mutation flows through [`engine::GameEngine`]; the
//! physical world (spawning, actors, ghosts) is reached only through the
//! collaborator traits in [`env`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod state;
pub mod world;
pub use action::{
    Action, ActionTransition, ConsumeResources, DropAll, DropSlot, ExecuteError, GrantResources,
    PickupNearest, PickupPile, PlaceBuilding, SelectRace,
};
pub use config::GameConfig;
pub use engine::GameEngine;
pub use env::{
    ActorId, ActorWorld, AuthorityOracle, Env, GhostId, LocalAuthority, ResourcePileTakeout,
    SpawnOracle, WrapExclusions,
};
pub use error::{ErrorSeverity, GameError, NotAuthoritative};
pub use events::{ObserverRegistry, ResourceObserver};
pub use state::{
    ActorTag, BuildingKind, CarryError, CarryInventory, GameState, LedgerError, OwnerId, PlayerId,
    PlayerState, RaceKind, ResourceKind, ResourceLedger, ResourceLocation, ResourceStack, Rotation,
    UnitId, UnitState, WorldPosition,
};
pub use world::{
    EdgeProximity, PileHandle, RegistryError, ResourcePile, ToroidalMapper, WorldResourceRegistry,
    WrappedActorTracker,
};
