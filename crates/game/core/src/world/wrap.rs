//! Wrapped-actor tracking.
//!
//! Keeps every registered actor's position normalized to the canonical
//! wrapped range and maintains ghost duplicates near world edges for visual
//! continuity. Driven once per simulation tick by the host's tick loop;
//! records are processed in registration order.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::env::{ActorId, ActorWorld, GhostId, WrapExclusions};
use crate::state::WorldPosition;
use crate::world::toroid::ToroidalMapper;

/// Per-actor tracking record.
///
/// `ghosts` is slot-indexed to match [`ToroidalMapper::ghost_targets`]: a
/// slot is occupied exactly while its proximity holds, so a ghost survives
/// any proximity change that keeps its own edge true (walking from an edge
/// into a corner spawns the two new ghosts without touching the first).
#[derive(Clone, Debug)]
struct TrackedActor {
    actor: ActorId,
    canonical: WorldPosition,
    ghosts: [Option<GhostId>; GameConfig::MAX_GHOSTS],
}

/// Maintains canonical positions and ghost duplicates for registered actors.
pub struct WrappedActorTracker {
    mapper: ToroidalMapper,
    snap_epsilon: f32,
    exclusions: WrapExclusions,
    records: Vec<TrackedActor>,
    index: BTreeMap<ActorId, usize>,
}

impl WrappedActorTracker {
    pub fn new(config: &GameConfig, exclusions: WrapExclusions) -> Self {
        Self {
            mapper: ToroidalMapper::new(config),
            snap_epsilon: config.snap_epsilon,
            exclusions,
            records: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    pub fn mapper(&self) -> &ToroidalMapper {
        &self.mapper
    }

    pub fn is_tracked(&self, actor: ActorId) -> bool {
        self.index.contains_key(&actor)
    }

    pub fn tracked_count(&self) -> usize {
        self.records.len()
    }

    /// Ghosts currently maintained for `actor` (0 when untracked/interior).
    pub fn ghost_count(&self, actor: ActorId) -> usize {
        self.index
            .get(&actor)
            .map_or(0, |&i| self.records[i].ghosts.iter().flatten().count())
    }

    /// Starts tracking `actor` and materializes ghosts immediately.
    ///
    /// No-op when the actor is already tracked, is invalid, or carries an
    /// excluded tag.
    pub fn register(&mut self, world: &mut dyn ActorWorld, actor: ActorId) {
        if self.is_tracked(actor) || !world.is_valid(actor) {
            return;
        }
        if world
            .actor_tag(actor)
            .is_some_and(|tag| self.exclusions.excludes(tag))
        {
            return;
        }
        let Some(position) = world.position(actor) else {
            return;
        };

        let record = TrackedActor {
            actor,
            canonical: self.mapper.canonicalize(position),
            ghosts: [None; GameConfig::MAX_GHOSTS],
        };
        self.index.insert(actor, self.records.len());
        self.records.push(record);
        tracing::debug!(%actor, "registered actor for toroidal wrapping");

        let last = self.records.len() - 1;
        Self::update_record(
            &self.mapper,
            self.snap_epsilon,
            &mut self.records[last],
            world,
        );
    }

    /// Stops tracking `actor`, destroying its ghosts.
    pub fn unregister(&mut self, world: &mut dyn ActorWorld, actor: ActorId) {
        let Some(&position) = self.index.get(&actor) else {
            return;
        };
        let record = self.records.remove(position);
        for ghost in record.ghosts.into_iter().flatten() {
            world.destroy_ghost(ghost);
        }
        self.index.remove(&actor);
        // Later records shifted down one slot.
        for value in self.index.values_mut() {
            if *value > position {
                *value -= 1;
            }
        }
        tracing::debug!(%actor, "unregistered actor from toroidal wrapping");
    }

    /// Per-tick update: normalize, snap, and reconcile ghosts for every
    /// tracked actor in registration order, pruning invalid actors.
    pub fn tick(&mut self, world: &mut dyn ActorWorld) {
        for record in &mut self.records {
            if !world.is_valid(record.actor) {
                continue; // pruned below
            }
            Self::update_record(&self.mapper, self.snap_epsilon, record, world);
        }

        // Defensive prune: actors destroyed out-of-band since last tick.
        let mut pruned = false;
        self.records.retain(|record| {
            if world.is_valid(record.actor) {
                return true;
            }
            for &ghost in record.ghosts.iter().flatten() {
                world.destroy_ghost(ghost);
            }
            tracing::warn!(actor = %record.actor, "pruning invalid actor from wrap tracking");
            pruned = true;
            false
        });
        if pruned {
            self.index = self
                .records
                .iter()
                .enumerate()
                .map(|(i, r)| (r.actor, i))
                .collect();
        }
    }

    fn update_record(
        mapper: &ToroidalMapper,
        snap_epsilon: f32,
        record: &mut TrackedActor,
        world: &mut dyn ActorWorld,
    ) {
        let Some(live) = world.position(record.actor) else {
            return;
        };

        // The actual wrap event: the actor left the canonical range and
        // jumps to the opposite side.
        record.canonical = mapper.canonicalize(live);
        if live.distance(record.canonical) > snap_epsilon {
            tracing::debug!(
                actor = %record.actor,
                from = %live,
                to = %record.canonical,
                "wrapping actor to canonical position"
            );
            world.set_position(record.actor, record.canonical);
        }

        // Reconcile each ghost slot against its target independently, so a
        // proximity change only touches the slots it actually flipped. Dead
        // ghost ids are dropped silently and respawned on the next tick.
        let rotation = world.rotation(record.actor).unwrap_or_default();
        let targets = mapper.ghost_targets(record.canonical);
        for (slot, target) in targets.into_iter().enumerate() {
            match (record.ghosts[slot], target) {
                (Some(ghost), None) => {
                    world.destroy_ghost(ghost);
                    record.ghosts[slot] = None;
                }
                (None, Some(position)) => {
                    record.ghosts[slot] = world.spawn_ghost(record.actor, position);
                }
                (Some(ghost), Some(position)) => {
                    if !world.set_ghost_pose(ghost, position, rotation) {
                        record.ghosts[slot] = None;
                    }
                }
                (None, None) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GhostId;
    use crate::state::{ActorTag, Rotation};
    use std::collections::BTreeMap;

    /// Minimal in-memory actor world for driving the tracker.
    #[derive(Default)]
    struct TestWorld {
        actors: BTreeMap<ActorId, (WorldPosition, Rotation, ActorTag)>,
        ghosts: BTreeMap<GhostId, (ActorId, WorldPosition, Rotation)>,
        next_ghost: u64,
    }

    impl TestWorld {
        fn add_actor(&mut self, id: u64, position: WorldPosition, tag: ActorTag) -> ActorId {
            let actor = ActorId(id);
            self.actors
                .insert(actor, (position, Rotation::default(), tag));
            actor
        }

        fn move_actor(&mut self, actor: ActorId, position: WorldPosition) {
            if let Some(entry) = self.actors.get_mut(&actor) {
                entry.0 = position;
            }
        }

        fn destroy_actor(&mut self, actor: ActorId) {
            self.actors.remove(&actor);
        }
    }

    impl ActorWorld for TestWorld {
        fn is_valid(&self, actor: ActorId) -> bool {
            self.actors.contains_key(&actor)
        }

        fn actor_tag(&self, actor: ActorId) -> Option<ActorTag> {
            self.actors.get(&actor).map(|(_, _, tag)| *tag)
        }

        fn position(&self, actor: ActorId) -> Option<WorldPosition> {
            self.actors.get(&actor).map(|(p, _, _)| *p)
        }

        fn rotation(&self, actor: ActorId) -> Option<Rotation> {
            self.actors.get(&actor).map(|(_, r, _)| *r)
        }

        fn set_position(&mut self, actor: ActorId, position: WorldPosition) {
            if let Some(entry) = self.actors.get_mut(&actor) {
                entry.0 = position;
            }
        }

        fn spawn_ghost(&mut self, original: ActorId, position: WorldPosition) -> Option<GhostId> {
            if !self.is_valid(original) {
                return None;
            }
            let ghost = GhostId(self.next_ghost);
            self.next_ghost += 1;
            self.ghosts
                .insert(ghost, (original, position, Rotation::default()));
            Some(ghost)
        }

        fn set_ghost_pose(
            &mut self,
            ghost: GhostId,
            position: WorldPosition,
            rotation: Rotation,
        ) -> bool {
            match self.ghosts.get_mut(&ghost) {
                Some(entry) => {
                    entry.1 = position;
                    entry.2 = rotation;
                    true
                }
                None => false,
            }
        }

        fn destroy_ghost(&mut self, ghost: GhostId) {
            self.ghosts.remove(&ghost);
        }
    }

    fn tracker() -> WrappedActorTracker {
        WrappedActorTracker::new(&GameConfig::new(), WrapExclusions::new())
    }

    fn pos(x: f32, y: f32) -> WorldPosition {
        WorldPosition::new(x, y, 0.0)
    }

    #[test]
    fn register_interior_actor_creates_no_ghosts() {
        let mut world = TestWorld::default();
        let actor = world.add_actor(1, pos(0.0, 0.0), ActorTag::Unit);
        let mut tracker = tracker();

        tracker.register(&mut world, actor);
        assert!(tracker.is_tracked(actor));
        assert_eq!(tracker.ghost_count(actor), 0);
        assert!(world.ghosts.is_empty());
    }

    #[test]
    fn register_near_edge_creates_ghosts_immediately() {
        let mut world = TestWorld::default();
        let actor = world.add_actor(1, pos(4800.0, 0.0), ActorTag::Unit);
        let mut tracker = tracker();

        tracker.register(&mut world, actor);
        assert_eq!(tracker.ghost_count(actor), 1);
        assert_eq!(world.ghosts.len(), 1);
    }

    #[test]
    fn register_is_idempotent() {
        let mut world = TestWorld::default();
        let actor = world.add_actor(1, pos(4800.0, 0.0), ActorTag::Unit);
        let mut tracker = tracker();

        tracker.register(&mut world, actor);
        tracker.register(&mut world, actor);
        assert_eq!(tracker.tracked_count(), 1);
        assert_eq!(world.ghosts.len(), 1);
    }

    #[test]
    fn excluded_tags_are_never_registered() {
        let mut world = TestWorld::default();
        let terrain = world.add_actor(1, pos(4800.0, 0.0), ActorTag::Terrain);
        let mut tracker = WrappedActorTracker::new(
            &GameConfig::new(),
            WrapExclusions::new().with(ActorTag::Terrain),
        );

        tracker.register(&mut world, terrain);
        assert!(!tracker.is_tracked(terrain));
        assert!(world.ghosts.is_empty());
    }

    #[test]
    fn out_of_range_actor_is_snapped_on_tick() {
        let mut world = TestWorld::default();
        let actor = world.add_actor(1, pos(0.0, 0.0), ActorTag::Unit);
        let mut tracker = tracker();
        tracker.register(&mut world, actor);

        world.move_actor(actor, pos(5100.0, 0.0));
        tracker.tick(&mut world);

        let snapped = world.position(actor).unwrap();
        assert!((snapped.x - -4900.0).abs() < 1e-2, "got {}", snapped.x);
    }

    #[test]
    fn ghosts_appear_and_disappear_with_edge_proximity() {
        let mut world = TestWorld::default();
        let actor = world.add_actor(1, pos(0.0, 0.0), ActorTag::Unit);
        let mut tracker = tracker();
        tracker.register(&mut world, actor);

        // Walk to the right edge: one ghost.
        world.move_actor(actor, pos(4700.0, 0.0));
        tracker.tick(&mut world);
        assert_eq!(tracker.ghost_count(actor), 1);

        // Into the corner: three ghosts.
        world.move_actor(actor, pos(4700.0, 4700.0));
        tracker.tick(&mut world);
        assert_eq!(tracker.ghost_count(actor), 3);

        // Back to the interior: all gone.
        world.move_actor(actor, pos(0.0, 0.0));
        tracker.tick(&mut world);
        assert_eq!(tracker.ghost_count(actor), 0);
        assert!(world.ghosts.is_empty());
    }

    #[test]
    fn ghost_poses_follow_the_actor_every_tick() {
        let mut world = TestWorld::default();
        let actor = world.add_actor(1, pos(4700.0, 0.0), ActorTag::Unit);
        let mut tracker = tracker();
        tracker.register(&mut world, actor);

        world.move_actor(actor, pos(4750.0, 10.0));
        if let Some(entry) = world.actors.get_mut(&actor) {
            entry.1 = Rotation::new(0.0, 90.0, 0.0);
        }
        tracker.tick(&mut world);

        let (_, ghost_pos, ghost_rot) = world.ghosts.values().next().unwrap();
        assert!((ghost_pos.x - (4750.0 - 10_000.0)).abs() < 1e-2);
        assert!((ghost_pos.y - 10.0).abs() < 1e-2);
        assert_eq!(ghost_rot.yaw, 90.0);
    }

    #[test]
    fn invalid_actor_is_pruned_with_its_ghosts() {
        let mut world = TestWorld::default();
        let actor = world.add_actor(1, pos(4700.0, 0.0), ActorTag::Unit);
        let mut tracker = tracker();
        tracker.register(&mut world, actor);
        assert_eq!(world.ghosts.len(), 1);

        world.destroy_actor(actor);
        tracker.tick(&mut world);

        assert!(!tracker.is_tracked(actor));
        assert!(world.ghosts.is_empty());
        // A second tick after pruning is harmless.
        tracker.tick(&mut world);
    }

    #[test]
    fn unregister_cleans_up_ghosts_and_keeps_order() {
        let mut world = TestWorld::default();
        let a = world.add_actor(1, pos(4700.0, 0.0), ActorTag::Unit);
        let b = world.add_actor(2, pos(-4700.0, 0.0), ActorTag::Unit);
        let mut tracker = tracker();
        tracker.register(&mut world, a);
        tracker.register(&mut world, b);

        tracker.unregister(&mut world, a);
        assert!(!tracker.is_tracked(a));
        assert!(tracker.is_tracked(b));
        assert_eq!(tracker.ghost_count(b), 1);

        // b's record index shifted down; a further tick must still work.
        world.move_actor(b, pos(0.0, 0.0));
        tracker.tick(&mut world);
        assert_eq!(tracker.ghost_count(b), 0);
    }

    #[test]
    fn edge_ghost_survives_walking_into_a_corner() {
        let mut world = TestWorld::default();
        let actor = world.add_actor(1, pos(4700.0, 0.0), ActorTag::Unit);
        let mut tracker = tracker();
        tracker.register(&mut world, actor);
        let right_ghost = *world.ghosts.keys().next().unwrap();

        // Entering the corner adds the top and corner ghosts but must not
        // recreate the right-edge one.
        world.move_actor(actor, pos(4700.0, 4700.0));
        tracker.tick(&mut world);
        assert_eq!(tracker.ghost_count(actor), 3);
        assert!(world.ghosts.contains_key(&right_ghost));
        let (_, ghost_pos, _) = world.ghosts[&right_ghost];
        assert!((ghost_pos.y - 4700.0).abs() < 1e-2, "got {}", ghost_pos.y);

        // Leaving the corner destroys only the two that no longer apply.
        world.move_actor(actor, pos(4700.0, 0.0));
        tracker.tick(&mut world);
        assert_eq!(tracker.ghost_count(actor), 1);
        assert!(world.ghosts.contains_key(&right_ghost));
    }

    #[test]
    fn externally_destroyed_ghost_is_dropped_silently() {
        let mut world = TestWorld::default();
        let actor = world.add_actor(1, pos(4700.0, 0.0), ActorTag::Unit);
        let mut tracker = tracker();
        tracker.register(&mut world, actor);

        // Something outside the tracker deletes the ghost.
        let ghost = *world.ghosts.keys().next().unwrap();
        world.ghosts.remove(&ghost);

        // The tick notices the dead id while re-posing and drops it...
        world.move_actor(actor, pos(4710.0, 0.0));
        tracker.tick(&mut world);
        assert_eq!(tracker.ghost_count(actor), 0);

        // ...and the next tick rebuilds it.
        tracker.tick(&mut world);
        assert_eq!(tracker.ghost_count(actor), 1);
        assert_eq!(world.ghosts.len(), 1);
    }
}
