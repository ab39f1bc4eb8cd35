//! Data-driven economy content and loaders.
//!
//! This crate houses static economy data and provides loaders for RON files:
//! - Race starting kits (which stacks a player is seeded with)
//! - Building price lists
//!
//! Content is resolved by hosts into concrete action payloads and never
//! appears in game state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{BuildingSpec, ContentCatalog, CostEntry, GrantEntry, RaceSpec};

#[cfg(feature = "loaders")]
pub use loaders::CatalogLoader;
