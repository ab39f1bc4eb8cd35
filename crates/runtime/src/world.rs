//! In-memory actor world.
//!
//! Stands in for a scene graph or engine world: actors and ghost duplicates
//! are plain records keyed by id. Implements [`ActorWorld`] so the core's
//! wrap tracker can drive it; hosts embedding a real engine supply their own
//! implementation instead.

use std::collections::BTreeMap;

use torus_core::{ActorId, ActorTag, ActorWorld, GhostId, Rotation, WorldPosition};

#[derive(Clone, Debug)]
struct ActorRecord {
    tag: ActorTag,
    position: WorldPosition,
    rotation: Rotation,
}

#[derive(Clone, Debug)]
struct GhostRecord {
    original: ActorId,
    position: WorldPosition,
    rotation: Rotation,
}

/// Owns all live actors and ghosts for a single-process game.
#[derive(Debug, Default)]
pub struct InMemoryWorld {
    actors: BTreeMap<ActorId, ActorRecord>,
    ghosts: BTreeMap<GhostId, GhostRecord>,
    next_actor: u64,
    next_ghost: u64,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_actor(&mut self, tag: ActorTag, position: WorldPosition) -> ActorId {
        let actor = ActorId(self.next_actor);
        self.next_actor += 1;
        self.actors.insert(
            actor,
            ActorRecord {
                tag,
                position,
                rotation: Rotation::default(),
            },
        );
        actor
    }

    /// Removes the actor and any ghosts duplicating it.
    pub fn destroy_actor(&mut self, actor: ActorId) {
        self.actors.remove(&actor);
        self.ghosts.retain(|_, ghost| ghost.original != actor);
    }

    pub fn move_actor(&mut self, actor: ActorId, position: WorldPosition) {
        if let Some(record) = self.actors.get_mut(&actor) {
            record.position = position;
        }
    }

    pub fn rotate_actor(&mut self, actor: ActorId, rotation: Rotation) {
        if let Some(record) = self.actors.get_mut(&actor) {
            record.rotation = rotation;
        }
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn ghost_count(&self) -> usize {
        self.ghosts.len()
    }

    pub fn ghost_pose(&self, ghost: GhostId) -> Option<(WorldPosition, Rotation)> {
        self.ghosts.get(&ghost).map(|g| (g.position, g.rotation))
    }

    pub fn ghosts_of(&self, actor: ActorId) -> Vec<GhostId> {
        self.ghosts
            .iter()
            .filter(|(_, g)| g.original == actor)
            .map(|(&id, _)| id)
            .collect()
    }
}

impl ActorWorld for InMemoryWorld {
    fn is_valid(&self, actor: ActorId) -> bool {
        self.actors.contains_key(&actor)
    }

    fn actor_tag(&self, actor: ActorId) -> Option<ActorTag> {
        self.actors.get(&actor).map(|r| r.tag)
    }

    fn position(&self, actor: ActorId) -> Option<WorldPosition> {
        self.actors.get(&actor).map(|r| r.position)
    }

    fn rotation(&self, actor: ActorId) -> Option<Rotation> {
        self.actors.get(&actor).map(|r| r.rotation)
    }

    fn set_position(&mut self, actor: ActorId, position: WorldPosition) {
        self.move_actor(actor, position);
    }

    fn spawn_ghost(&mut self, original: ActorId, position: WorldPosition) -> Option<GhostId> {
        let rotation = self.rotation(original)?;
        let ghost = GhostId(self.next_ghost);
        self.next_ghost += 1;
        self.ghosts.insert(
            ghost,
            GhostRecord {
                original,
                position,
                rotation,
            },
        );
        Some(ghost)
    }

    fn set_ghost_pose(
        &mut self,
        ghost: GhostId,
        position: WorldPosition,
        rotation: Rotation,
    ) -> bool {
        match self.ghosts.get_mut(&ghost) {
            Some(record) => {
                record.position = position;
                record.rotation = rotation;
                true
            }
            None => false,
        }
    }

    fn destroy_ghost(&mut self, ghost: GhostId) {
        self.ghosts.remove(&ghost);
    }
}
