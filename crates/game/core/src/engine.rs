//! Single entry point for all authoritative state mutation.

use std::sync::Arc;

use crate::action::{Action, ActionTransition, ExecuteError};
use crate::env::Env;
use crate::error::NotAuthoritative;
use crate::events::{ObserverRegistry, ResourceObserver};
use crate::state::{GameState, OwnerId};

/// Owns the canonical [`GameState`] and executes actions against it.
///
/// Every mutation goes through [`GameEngine::execute`]: the authority gate
/// runs first (fail closed), then the action's validate/apply pair, then
/// resource-change notifications for the owners the action touched. Rejected
/// actions leave the state untouched and notify nobody.
#[derive(Debug, Default)]
pub struct GameEngine {
    state: GameState,
    observers: ObserverRegistry,
}

impl GameEngine {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            observers: ObserverRegistry::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for host-side setup (adding players, spawning
    /// units). Gameplay mutation goes through [`Self::execute`].
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn subscribe(&mut self, observer: Arc<dyn ResourceObserver>) {
        self.observers.subscribe(observer);
    }

    /// Executes one action. Returns the owners whose holdings changed.
    pub fn execute(
        &mut self,
        action: &Action,
        env: &mut Env<'_>,
    ) -> Result<Vec<OwnerId>, ExecuteError> {
        if !env.authority.is_authoritative() {
            tracing::warn!(?action, "rejecting action from non-authoritative peer");
            return Err(NotAuthoritative.into());
        }

        action.pre_validate(&self.state, env)?;
        let changed = action.apply(&mut self.state, env)?;

        for &owner in &changed {
            self.observers.notify(owner);
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{GrantResources, PickupNearest};
    use crate::env::{
        AuthorityOracle, LocalAuthority, ResourcePileTakeout, SpawnOracle,
    };
    use crate::state::{
        CarryInventory, PlayerId, ResourceKind, ResourceStack, WorldPosition,
    };
    use crate::world::{PileHandle, RegistryError, WorldResourceRegistry};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Piles {
        registry: WorldResourceRegistry,
    }

    impl SpawnOracle for Piles {
        fn spawn_pile(&mut self, stack: ResourceStack, position: WorldPosition) -> PileHandle {
            self.registry.insert(stack, position)
        }

        fn destroy_pile(&mut self, handle: PileHandle) -> Result<ResourcePileTakeout, RegistryError> {
            let pile = self.registry.remove(handle)?;
            Ok(ResourcePileTakeout {
                stack: pile.stack,
                position: pile.position,
            })
        }

        fn find_nearest_pile(
            &self,
            kind: Option<ResourceKind>,
            from: WorldPosition,
            radius: f32,
        ) -> Option<PileHandle> {
            self.registry.find_nearest(kind, from, radius)
        }
    }

    struct NeverAuthoritative;

    impl AuthorityOracle for NeverAuthoritative {
        fn is_authoritative(&self) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<OwnerId>>,
    }

    impl ResourceObserver for Recorder {
        fn resources_changed(&self, owner: OwnerId) {
            self.seen.lock().unwrap().push(owner);
        }
    }

    fn grant_wood(player: PlayerId, amount: u32) -> Action {
        Action::GrantResources(GrantResources {
            player,
            grants: vec![ResourceStack::new(ResourceKind::Wood, amount, 1.0)],
        })
    }

    #[test]
    fn execute_applies_and_notifies() {
        let mut engine = GameEngine::default();
        engine.state_mut().add_player(PlayerId(0), 1);
        let recorder = Arc::new(Recorder::default());
        engine.subscribe(recorder.clone());

        let mut piles = Piles::default();
        let mut env = Env::new(&mut piles, &LocalAuthority);
        engine.execute(&grant_wood(PlayerId(0), 50), &mut env).unwrap();

        assert_eq!(
            engine.state().player(PlayerId(0)).unwrap().ledger.total_of(ResourceKind::Wood),
            50
        );
        assert_eq!(*recorder.seen.lock().unwrap(), vec![OwnerId::Player(PlayerId(0))]);
    }

    #[test]
    fn non_authoritative_peer_is_rejected_without_mutation() {
        let mut engine = GameEngine::default();
        engine.state_mut().add_player(PlayerId(0), 1);
        let recorder = Arc::new(Recorder::default());
        engine.subscribe(recorder.clone());

        let mut piles = Piles::default();
        let mut env = Env::new(&mut piles, &NeverAuthoritative);
        let err = engine.execute(&grant_wood(PlayerId(0), 50), &mut env).unwrap_err();

        assert_eq!(err, ExecuteError::NotAuthoritative(NotAuthoritative));
        assert_eq!(
            engine.state().player(PlayerId(0)).unwrap().ledger.total_of(ResourceKind::Wood),
            0
        );
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_validation_notifies_nobody() {
        let mut engine = GameEngine::default();
        engine.state_mut().add_player(PlayerId(0), 1);
        let unit = engine.state_mut().spawn_unit(
            PlayerId(0),
            WorldPosition::ZERO,
            CarryInventory::new(2, 10.0),
        );
        let recorder = Arc::new(Recorder::default());
        engine.subscribe(recorder.clone());

        let mut piles = Piles::default();
        let mut env = Env::new(&mut piles, &LocalAuthority);
        let action = Action::PickupNearest(PickupNearest {
            unit,
            kind: None,
            radius: 100.0,
        });
        assert!(engine.execute(&action, &mut env).is_err());
        assert!(recorder.seen.lock().unwrap().is_empty());
    }
}
