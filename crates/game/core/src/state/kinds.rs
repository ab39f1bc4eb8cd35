//! Closed kind sets for races, buildings, and actor classes.
//!
//! Behavior differences (grants, costs, meshes) are data keyed by kind,
//! not virtual dispatch. Content definitions refer to kinds by display
//! name.

/// Playable races.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaceKind {
    Elves,
    Dwarves,
}

/// Placeable building types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    CoreBuilding,
    SimpleBuilding,
    DwarfHouse,
    BlacksmithWorkshop,
}

/// Coarse actor classification, used by the wrap-exclusion configuration
/// (terrain and cameras never get ghost duplicates, for example).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorTag {
    Unit,
    Building,
    ResourcePile,
    Terrain,
    Camera,
}
