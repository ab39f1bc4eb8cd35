//! Resource stacks: the fungible unit of the economy.
//!
//! A stack is a quantity of one resource kind at one quality (weight) level.
//! Stacks flow between player ledgers, unit carry inventories, and physical
//! world piles; the `location` tag records which of those the stack is in.

use std::collections::BTreeMap;

use crate::state::{OwnerId, WorldPosition};

/// Relative tolerance used when comparing stack weights for merging.
pub const WEIGHT_TOLERANCE: f32 = 1e-4;

/// Closed set of resource kinds.
///
/// When adding a kind, extend this enum; content files refer to kinds by
/// their display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    #[strum(serialize = "wood")]
    Wood,
    #[strum(serialize = "small water barrel")]
    WaterSmall,
    #[strum(serialize = "Elvish bow")]
    ElvishBow,
    #[strum(serialize = "Sword")]
    Sword,
}

/// Where a stack physically (or logically) lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceLocation {
    /// Abstract/logical state: banked in a player's ledger.
    #[default]
    InPlayerInventory,
    /// Materialized as a pile in the world.
    OnGround,
    /// Riding in a unit's carry inventory.
    CarriedByUnit,
    /// Stored inside a building.
    StoredInBuilding,
}

/// A named, weighted, quantity-bearing resource stack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceStack {
    pub kind: ResourceKind,
    /// Non-negative count. Owning collections drop stacks that reach zero;
    /// a zero entry is never retained.
    pub amount: u32,
    /// Weight/mass of a single unit. Doubles as the quality level: higher
    /// weight is consumed first when spending.
    pub unit_weight: f32,
    /// Open-ended named attributes (e.g. "Damage" on a sword).
    pub properties: BTreeMap<String, f32>,
    pub location: ResourceLocation,
    /// Present while the stack is on the ground or carried.
    pub world_position: Option<WorldPosition>,
    /// The entity currently holding this stack, if any.
    pub container: Option<OwnerId>,
}

impl ResourceStack {
    pub fn new(kind: ResourceKind, amount: u32, unit_weight: f32) -> Self {
        Self {
            kind,
            amount,
            unit_weight,
            properties: BTreeMap::new(),
            location: ResourceLocation::InPlayerInventory,
            world_position: None,
            container: None,
        }
    }

    /// Two stacks are the same kind iff their kinds match and their unit
    /// weights agree within [`WEIGHT_TOLERANCE`] (relative).
    ///
    /// Properties are deliberately not part of this comparison: two swords
    /// with different Damage values merge if kind and weight match. Pending
    /// product clarification; do not change it here without changing merge
    /// semantics everywhere.
    pub fn same_kind(&self, other: &Self) -> bool {
        self.kind == other.kind && weights_match(self.unit_weight, other.unit_weight)
    }

    /// Total carried mass of this stack.
    pub fn stack_weight(&self) -> f32 {
        self.unit_weight * self.amount as f32
    }

    // ===== property helpers =====

    pub fn set_property(&mut self, name: impl Into<String>, value: f32) {
        self.properties.insert(name.into(), value);
    }

    pub fn property(&self, name: &str, default: f32) -> f32 {
        self.properties.get(name).copied().unwrap_or(default)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Builder-style property attachment, for content definitions.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: f32) -> Self {
        self.set_property(name, value);
        self
    }

    // ===== physical state management =====

    pub fn set_on_ground(&mut self, position: WorldPosition) {
        self.location = ResourceLocation::OnGround;
        self.world_position = Some(position);
        self.container = None;
    }

    pub fn set_carried_by(&mut self, carrier: OwnerId) {
        self.location = ResourceLocation::CarriedByUnit;
        self.container = Some(carrier);
    }

    pub fn set_in_inventory(&mut self) {
        self.location = ResourceLocation::InPlayerInventory;
        self.world_position = None;
        self.container = None;
    }

    pub fn is_physically_present(&self) -> bool {
        self.location != ResourceLocation::InPlayerInventory
    }

    pub fn can_be_picked_up(&self) -> bool {
        self.location == ResourceLocation::OnGround
    }
}

/// Weight comparison with a relative tolerance (absolute floor of one unit).
pub fn weights_match(a: f32, b: f32) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= WEIGHT_TOLERANCE * scale
}
