//! Registry of physical resource piles in the world.
//!
//! Piles are created by the spawn collaborator and destroyed on pickup.
//! The registry hands out generation-checked handles instead of references:
//! piles can be destroyed out-of-band, so a stale handle must be detectable
//! rather than dangle.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ResourceKind, ResourceStack, WorldPosition};

/// Registry operation failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    /// The handle's slot was reused or emptied since the handle was issued.
    #[error("pile handle is stale or was never issued")]
    ActorInvalid,
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "actor_invalid"
    }
}

/// Generation-checked reference to a live pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PileHandle {
    index: u32,
    generation: u32,
}

/// One spawned pile: a stack sitting at a world position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePile {
    pub stack: ResourceStack,
    pub position: WorldPosition,
    /// Monotone insertion counter; the nearest-query tie-break.
    order: u64,
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Slot {
    generation: u32,
    pile: Option<ResourcePile>,
}

/// Tracks live piles and answers nearest-match spatial queries.
///
/// The registry does not enforce carry capacity; "can this unit take it"
/// stays with [`crate::state::CarryInventory::can_accept`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldResourceRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    next_order: u64,
    live: usize,
}

impl WorldResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pile, tagging the stack as on the ground at `position`.
    pub fn insert(&mut self, mut stack: ResourceStack, position: WorldPosition) -> PileHandle {
        stack.set_on_ground(position);
        let pile = ResourcePile {
            stack,
            position,
            order: self.next_order,
        };
        self.next_order += 1;
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.pile = Some(pile);
            return PileHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            pile: Some(pile),
        });
        PileHandle {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, handle: PileHandle) -> Option<&ResourcePile> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.pile.as_ref()
    }

    pub fn is_live(&self, handle: PileHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Destroys a pile and returns it (e.g., to move its stack into a carry
    /// inventory). The slot's generation is bumped so the handle goes stale.
    pub fn remove(&mut self, handle: PileHandle) -> Result<ResourcePile, RegistryError> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .ok_or(RegistryError::ActorInvalid)?;
        if slot.generation != handle.generation || slot.pile.is_none() {
            return Err(RegistryError::ActorInvalid);
        }
        let pile = slot.pile.take().expect("checked above");
        slot.generation += 1;
        self.free.push(handle.index);
        self.live -= 1;
        Ok(pile)
    }

    /// Nearest live, pickupable pile matching `kind` (None = any kind)
    /// within `radius` of `from`, by straight-line distance. Ties in distance
    /// go to the pile that was registered first.
    pub fn find_nearest(
        &self,
        kind: Option<ResourceKind>,
        from: WorldPosition,
        radius: f32,
    ) -> Option<PileHandle> {
        self.find_nearest_by(kind, from, radius, |a, b| a.distance(b))
    }

    /// Same query with a caller-supplied metric (e.g., toroidal distance on
    /// a wrapped map).
    pub fn find_nearest_by(
        &self,
        kind: Option<ResourceKind>,
        from: WorldPosition,
        radius: f32,
        metric: impl Fn(WorldPosition, WorldPosition) -> f32,
    ) -> Option<PileHandle> {
        let mut best: Option<(f32, u64, PileHandle)> = None;

        for (index, slot) in self.slots.iter().enumerate() {
            let Some(pile) = slot.pile.as_ref() else {
                continue;
            };
            if kind.is_some_and(|k| pile.stack.kind != k) {
                continue;
            }
            if !pile.stack.can_be_picked_up() {
                continue;
            }
            let distance = metric(from, pile.position);
            if distance > radius {
                continue;
            }

            let handle = PileHandle {
                index: index as u32,
                generation: slot.generation,
            };
            let candidate = (distance, pile.order, handle);
            best = match best {
                None => Some(candidate),
                Some(current) => {
                    // strictly closer wins; equal distance keeps the earlier
                    // registration
                    if distance < current.0 || (distance == current.0 && pile.order < current.1) {
                        Some(candidate)
                    } else {
                        Some(current)
                    }
                }
            };
        }

        best.map(|(_, _, handle)| handle)
    }

    pub fn iter_live(&self) -> impl Iterator<Item = (PileHandle, &ResourcePile)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.pile.as_ref().map(|pile| {
                (
                    PileHandle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    pile,
                )
            })
        })
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
