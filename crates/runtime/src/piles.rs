//! Registry-backed spawn oracle with toroidal-aware queries.

use torus_core::{
    GameConfig, PileHandle, RegistryError, ResourceKind, ResourcePile, ResourcePileTakeout,
    ResourceStack, SpawnOracle, ToroidalMapper, WorldPosition, WorldResourceRegistry,
};

/// All resource piles physically present in the world.
///
/// Positions are canonicalized on spawn so every pile lives inside the
/// wrapped range, and nearest-pile queries measure across the seam: a pile
/// just over the opposite edge is close, not a world-width away.
#[derive(Clone, Debug)]
pub struct WorldPiles {
    registry: WorldResourceRegistry,
    mapper: ToroidalMapper,
}

impl WorldPiles {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            registry: WorldResourceRegistry::new(),
            mapper: ToroidalMapper::new(config),
        }
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn get(&self, handle: PileHandle) -> Option<&ResourcePile> {
        self.registry.get(handle)
    }

    pub fn iter_live(&self) -> impl Iterator<Item = (PileHandle, &ResourcePile)> {
        self.registry.iter_live()
    }
}

impl SpawnOracle for WorldPiles {
    fn spawn_pile(&mut self, stack: ResourceStack, position: WorldPosition) -> PileHandle {
        let canonical = self.mapper.canonicalize(position);
        let handle = self.registry.insert(stack, canonical);
        tracing::debug!(position = %canonical, "spawned resource pile");
        handle
    }

    fn destroy_pile(&mut self, handle: PileHandle) -> Result<ResourcePileTakeout, RegistryError> {
        let pile = self.registry.remove(handle)?;
        tracing::debug!(position = %pile.position, "destroyed resource pile");
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
        if self.mapper.is_degenerate() {
            return self.registry.find_nearest(kind, from, radius);
        }
        self.registry.find_nearest_by(kind, from, radius, |a, b| {
            self.mapper.toroidal_distance(a, b)
        })
    }
}
