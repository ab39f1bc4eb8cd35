//! Static economy data: race starting kits and building price lists.

use torus_core::{BuildingKind, RaceKind, ResourceKind, ResourceLedger, ResourceStack};

/// One line of a building's price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostEntry {
    pub kind: ResourceKind,
    pub amount: u32,
}

/// One stack granted at race selection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantEntry {
    pub kind: ResourceKind,
    pub amount: u32,
    pub unit_weight: f32,
    /// Named attributes carried onto the granted stack (e.g. "Damage").
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Vec<(String, f32)>,
}

impl GrantEntry {
    pub fn new(kind: ResourceKind, amount: u32, unit_weight: f32) -> Self {
        Self {
            kind,
            amount,
            unit_weight,
            properties: Vec::new(),
        }
    }

    pub fn to_stack(&self) -> ResourceStack {
        let mut stack = ResourceStack::new(self.kind, self.amount, self.unit_weight);
        for (name, value) in &self.properties {
            stack.set_property(name.clone(), *value);
        }
        stack
    }
}

/// Starting kit and building roster for one race.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceSpec {
    pub race: RaceKind,
    pub initial_grants: Vec<GrantEntry>,
    /// Buildings this race may place.
    #[cfg_attr(feature = "serde", serde(default))]
    pub buildings: Vec<BuildingKind>,
}

/// Price list for one building kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingSpec {
    pub building: BuildingKind,
    pub costs: Vec<CostEntry>,
}

/// The full economy catalog a host resolves actions against.
///
/// Content never appears in game state: hosts look up grants and costs here
/// and embed the resolved values in the actions they issue, so the core
/// stays independent of content versions.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentCatalog {
    pub races: Vec<RaceSpec>,
    pub buildings: Vec<BuildingSpec>,
}

impl ContentCatalog {
    /// Stacks to seed a player's ledger with at race selection.
    /// Empty when the race has no entry.
    pub fn initial_grants(&self, race: RaceKind) -> Vec<ResourceStack> {
        self.races
            .iter()
            .find(|spec| spec.race == race)
            .map(|spec| spec.initial_grants.iter().map(|g| g.to_stack()).collect())
            .unwrap_or_default()
    }

    /// Price of a building as the cost list the consume action expects.
    /// Unlisted buildings are free.
    pub fn building_cost(&self, building: BuildingKind) -> Vec<(ResourceKind, u32)> {
        self.buildings
            .iter()
            .find(|spec| spec.building == building)
            .map(|spec| spec.costs.iter().map(|c| (c.kind, c.amount)).collect())
            .unwrap_or_default()
    }

    /// Whether `race` is allowed to place `building` at all.
    pub fn race_can_build(&self, race: RaceKind, building: BuildingKind) -> bool {
        self.races
            .iter()
            .find(|spec| spec.race == race)
            .is_some_and(|spec| spec.buildings.contains(&building))
    }

    /// Affordability preflight against a live ledger. The authoritative
    /// check happens again inside the placement action.
    pub fn can_afford(&self, ledger: &ResourceLedger, building: BuildingKind) -> bool {
        let mut totals: Vec<(ResourceKind, u32)> = Vec::new();
        for (kind, amount) in self.building_cost(building) {
            match totals.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, total)) => *total += amount,
                None => totals.push((kind, amount)),
            }
        }
        totals
            .iter()
            .all(|&(kind, amount)| ledger.has_at_least(kind, amount))
    }

    /// Compiled-in default economy, used when no data file is supplied.
    pub fn builtin() -> Self {
        Self {
            races: vec![
                RaceSpec {
                    race: RaceKind::Elves,
                    initial_grants: vec![
                        GrantEntry::new(ResourceKind::Wood, 100, 1.0),
                        GrantEntry {
                            kind: ResourceKind::ElvishBow,
                            amount: 5,
                            unit_weight: 3.0,
                            properties: vec![("Damage".to_string(), 12.0)],
                        },
                        GrantEntry::new(ResourceKind::WaterSmall, 10, 8.0),
                    ],
                    buildings: vec![BuildingKind::CoreBuilding, BuildingKind::SimpleBuilding],
                },
                RaceSpec {
                    race: RaceKind::Dwarves,
                    initial_grants: vec![
                        GrantEntry::new(ResourceKind::Wood, 80, 1.0),
                        GrantEntry {
                            kind: ResourceKind::Sword,
                            amount: 5,
                            unit_weight: 7.0,
                            properties: vec![("Damage".to_string(), 18.0)],
                        },
                        GrantEntry::new(ResourceKind::WaterSmall, 10, 8.0),
                    ],
                    buildings: vec![
                        BuildingKind::CoreBuilding,
                        BuildingKind::SimpleBuilding,
                        BuildingKind::DwarfHouse,
                        BuildingKind::BlacksmithWorkshop,
                    ],
                },
            ],
            buildings: vec![
                BuildingSpec {
                    building: BuildingKind::CoreBuilding,
                    costs: vec![CostEntry {
                        kind: ResourceKind::Wood,
                        amount: 150,
                    }],
                },
                BuildingSpec {
                    building: BuildingKind::SimpleBuilding,
                    costs: vec![CostEntry {
                        kind: ResourceKind::Wood,
                        amount: 50,
                    }],
                },
                BuildingSpec {
                    building: BuildingKind::DwarfHouse,
                    costs: vec![CostEntry {
                        kind: ResourceKind::Wood,
                        amount: 80,
                    }],
                },
                BuildingSpec {
                    building: BuildingKind::BlacksmithWorkshop,
                    costs: vec![
                        CostEntry {
                            kind: ResourceKind::Wood,
                            amount: 60,
                        },
                        CostEntry {
                            kind: ResourceKind::Sword,
                            amount: 2,
                        },
                    ],
                },
            ],
        }
    }
}
