//! Traits describing the core's external collaborators.
//!
//! Every collaborator (world spawn, authority checks, actor access) is an
//! explicit trait injected into the engine or tracker rather than a global,
//! so hosts and tests can substitute their own.

use std::collections::BTreeSet;
use std::fmt;

use crate::state::{ActorTag, ResourceStack, Rotation, WorldPosition};
use crate::world::{PileHandle, RegistryError};

/// Host-issued identifier for a live actor (unit, building, camera...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Host-issued identifier for a ghost duplicate. Ghosts are visual-only and
/// never authoritative; a stale id is silently dropped, never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GhostId(pub u64);

/// Spawn collaborator: materializes and destroys physical resource piles.
///
/// The core calls this when re-materializing dropped stacks and when a
/// pickup consumes its target pile.
pub trait SpawnOracle {
    fn spawn_pile(&mut self, stack: ResourceStack, position: WorldPosition) -> PileHandle;

    fn destroy_pile(&mut self, handle: PileHandle) -> Result<ResourcePileTakeout, RegistryError>;

    /// Nearest-pile query, delegated so hosts can index however they like.
    fn find_nearest_pile(
        &self,
        kind: Option<crate::state::ResourceKind>,
        from: WorldPosition,
        radius: f32,
    ) -> Option<PileHandle>;
}

/// What comes back when a pile is destroyed for pickup.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourcePileTakeout {
    pub stack: ResourceStack,
    pub position: WorldPosition,
}

/// Authority predicate gating every mutating entry point.
///
/// In a client/server deployment only the server answers true; clients see
/// replicated read-only snapshots and their mutation attempts are no-ops
/// (fail closed).
pub trait AuthorityOracle {
    fn is_authoritative(&self) -> bool;
}

/// Always-authoritative oracle for single-process hosts and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalAuthority;

impl AuthorityOracle for LocalAuthority {
    fn is_authoritative(&self) -> bool {
        true
    }
}

/// The tracker's window onto live actors and their ghost duplicates.
///
/// All accessors are fallible by design: actors can be destroyed out of
/// band between ticks, and the tracker must prune them defensively.
pub trait ActorWorld {
    fn is_valid(&self, actor: ActorId) -> bool;

    fn actor_tag(&self, actor: ActorId) -> Option<ActorTag>;

    fn position(&self, actor: ActorId) -> Option<WorldPosition>;

    fn rotation(&self, actor: ActorId) -> Option<Rotation>;

    /// Snaps the actor to a new position (the visible wrap jump).
    fn set_position(&mut self, actor: ActorId, position: WorldPosition);

    /// Spawns a non-colliding visual duplicate of `original` at `position`.
    /// May fail (None) if the original vanished mid-tick.
    fn spawn_ghost(&mut self, original: ActorId, position: WorldPosition) -> Option<GhostId>;

    /// Re-poses a ghost; false means the ghost no longer exists.
    fn set_ghost_pose(&mut self, ghost: GhostId, position: WorldPosition, rotation: Rotation)
    -> bool;

    /// Best-effort destroy; missing ghosts are ignored.
    fn destroy_ghost(&mut self, ghost: GhostId);
}

/// Actor classes that must never be registered for wrapping (terrain,
/// cameras, and similar). Owned by host configuration.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WrapExclusions {
    tags: BTreeSet<ActorTag>,
}

impl WrapExclusions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tag: ActorTag) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn insert(&mut self, tag: ActorTag) {
        self.tags.insert(tag);
    }

    pub fn excludes(&self, tag: ActorTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Bundles the collaborators the action pipeline needs.
pub struct Env<'a> {
    pub spawn: &'a mut dyn SpawnOracle,
    pub authority: &'a dyn AuthorityOracle,
}

impl<'a> Env<'a> {
    pub fn new(spawn: &'a mut dyn SpawnOracle, authority: &'a dyn AuthorityOracle) -> Self {
        Self { spawn, authority }
    }
}
