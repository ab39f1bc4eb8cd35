//! Physical world layer: toroidal coordinates, pile registry, wrap tracking.

mod registry;
pub mod toroid;
mod wrap;

pub use registry::{PileHandle, RegistryError, ResourcePile, WorldResourceRegistry};
pub use toroid::{EdgeProximity, ToroidalMapper};
pub use wrap::WrappedActorTracker;
