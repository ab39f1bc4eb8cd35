//! Single-process game host.
//!
//! Wires the engine, the pile oracle, the actor world, and the wrap tracker
//! into one tick loop. Commands are queued from anywhere and drained in FIFO
//! order on the authoritative side at the start of each tick; a rejected
//! command never blocks the ones behind it.

use std::collections::VecDeque;
use std::sync::Arc;

use torus_content::ContentCatalog;
use torus_core::{
    Action, ActorId, ActorTag, ActorWorld, AuthorityOracle, BuildingKind, CarryInventory, DropAll,
    Env, ExecuteError, GameConfig, GameEngine, GameError, GameState, LocalAuthority, OwnerId,
    PlaceBuilding, PlayerId, RaceKind, ResourceObserver, SelectRace, UnitId, WorldPosition,
    WrapExclusions, WrappedActorTracker,
};

use crate::piles::WorldPiles;
use crate::world::InMemoryWorld;

/// What happened to one queued command.
#[derive(Debug)]
pub struct ActionOutcome {
    pub action: Action,
    pub result: Result<Vec<OwnerId>, ExecuteError>,
}

/// Summary of one tick.
#[derive(Debug, Default)]
pub struct TickReport {
    pub outcomes: Vec<ActionOutcome>,
}

impl TickReport {
    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn rejected(&self) -> usize {
        self.outcomes.len() - self.applied()
    }
}

/// Owns every subsystem of a running game and drives them in lockstep.
pub struct GameHost {
    config: GameConfig,
    catalog: ContentCatalog,
    engine: GameEngine,
    piles: WorldPiles,
    world: InMemoryWorld,
    tracker: WrappedActorTracker,
    queue: VecDeque<Action>,
    authority: Box<dyn AuthorityOracle>,
    /// Unit ids paired with their world actors, for post-tick pose sync.
    bindings: Vec<(UnitId, ActorId)>,
}

impl GameHost {
    pub fn new(config: GameConfig, catalog: ContentCatalog) -> Self {
        Self::with_authority(config, catalog, Box::new(LocalAuthority))
    }

    pub fn with_authority(
        config: GameConfig,
        catalog: ContentCatalog,
        authority: Box<dyn AuthorityOracle>,
    ) -> Self {
        let exclusions = WrapExclusions::new()
            .with(ActorTag::Terrain)
            .with(ActorTag::Camera);
        Self {
            engine: GameEngine::new(GameState::new()),
            piles: WorldPiles::new(&config),
            world: InMemoryWorld::new(),
            tracker: WrappedActorTracker::new(&config, exclusions),
            queue: VecDeque::new(),
            authority,
            bindings: Vec::new(),
            config,
            catalog,
        }
    }

    // ===== setup =====

    pub fn add_player(&mut self, id: PlayerId, team: u32) {
        self.engine.state_mut().add_player(id, team);
    }

    /// Spawns a unit in both the game state and the actor world, and starts
    /// wrap-tracking it.
    pub fn spawn_unit(
        &mut self,
        owner: PlayerId,
        position: WorldPosition,
        carry: CarryInventory,
    ) -> UnitId {
        let unit = self.engine.state_mut().spawn_unit(owner, position, carry);
        let actor = self.world.spawn_actor(ActorTag::Unit, position);
        self.tracker.register(&mut self.world, actor);
        self.bindings.push((unit, actor));
        unit
    }

    /// Removes a unit everywhere, dropping whatever it carried at its feet.
    ///
    /// The drop runs through the engine so resource observers hear about
    /// the inventory change; a non-authoritative peer cannot despawn.
    pub fn despawn_unit(&mut self, unit: UnitId) {
        if self.engine.state().unit(unit).is_none() {
            return;
        }
        let mut env = Env::new(&mut self.piles, self.authority.as_ref());
        if self
            .engine
            .execute(&Action::DropAll(DropAll { unit }), &mut env)
            .is_err()
        {
            return;
        }
        self.engine.state_mut().remove_unit(unit);
        if let Some(slot) = self.bindings.iter().position(|&(u, _)| u == unit) {
            let (_, actor) = self.bindings.remove(slot);
            self.tracker.unregister(&mut self.world, actor);
            self.world.destroy_actor(actor);
        }
    }

    /// Places a resource pile in the world outside the action pipeline
    /// (map generation, scripted drops).
    pub fn spawn_pile(
        &mut self,
        stack: torus_core::ResourceStack,
        position: WorldPosition,
    ) -> torus_core::PileHandle {
        use torus_core::SpawnOracle;
        self.piles.spawn_pile(stack, position)
    }

    pub fn subscribe(&mut self, observer: Arc<dyn ResourceObserver>) {
        self.engine.subscribe(observer);
    }

    // ===== commands =====

    pub fn enqueue(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    /// Queues a race selection with the starting kit resolved from content.
    pub fn select_race(&mut self, player: PlayerId, race: RaceKind) {
        let grants = self.catalog.initial_grants(race);
        self.enqueue(Action::SelectRace(SelectRace {
            player,
            race,
            grants,
        }));
    }

    /// Queues a building placement priced from content.
    pub fn place_building(&mut self, player: PlayerId, building: BuildingKind) {
        let costs = self.catalog.building_cost(building);
        self.enqueue(Action::PlaceBuilding(PlaceBuilding {
            player,
            building,
            costs,
        }));
    }

    /// Moves a unit's world actor. The canonical (possibly wrapped) position
    /// lands back in the game state on the next tick.
    pub fn move_unit(&mut self, unit: UnitId, position: WorldPosition) {
        if let Some(&(_, actor)) = self.bindings.iter().find(|&&(u, _)| u == unit) {
            self.world.move_actor(actor, position);
        }
    }

    // ===== tick =====

    /// One simulation step: drain the command queue, then reconcile wrapping,
    /// then sync unit poses from the world back into the game state.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        while let Some(action) = self.queue.pop_front() {
            let mut env = Env::new(&mut self.piles, self.authority.as_ref());
            let result = self.engine.execute(&action, &mut env);
            if let Err(err) = &result {
                tracing::warn!(
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    %err,
                    "command rejected"
                );
            }
            report.outcomes.push(ActionOutcome { action, result });
        }

        self.tracker.tick(&mut self.world);

        for &(unit, actor) in &self.bindings {
            if let Some(position) = self.world.position(actor)
                && let Some(state) = self.engine.state_mut().unit_mut(unit)
            {
                state.position = position;
                state.rotation = self.world.rotation(actor).unwrap_or_default();
            }
        }

        report
    }

    // ===== accessors =====

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn piles(&self) -> &WorldPiles {
        &self.piles
    }

    pub fn world(&self) -> &InMemoryWorld {
        &self.world
    }

    pub fn tracker(&self) -> &WrappedActorTracker {
        &self.tracker
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }
}
