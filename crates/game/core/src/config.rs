use crate::state::WorldPosition;

/// Game configuration constants and tunable parameters.
///
/// The toroidal defaults match the shipped map: a 10000 x 10000 play area
/// centered on the origin, with wrapping duplicates maintained for anything
/// within 1000 units of an edge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Extent of the play area along X. Positions wrap at +/- width/2.
    pub world_width: f32,
    /// Extent of the play area along Y. Positions wrap at +/- height/2.
    pub world_height: f32,
    /// Distance from an edge inside which ghost duplicates are maintained.
    pub wrap_threshold: f32,
    /// World-space origin of the toroidal coordinate frame.
    pub world_center: WorldPosition,
    /// Minimum displacement before a live actor is snapped to its canonical
    /// position (the visible "wrap" jump).
    pub snap_epsilon: f32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum ghost duplicates per tracked actor. Typically at most 3 (two
    /// edges plus the corner); 8 covers a degenerate threshold of half the
    /// world dimension, where both edges of an axis are "near" at once.
    pub const MAX_GHOSTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_WORLD_WIDTH: f32 = 10_000.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 10_000.0;
    pub const DEFAULT_WRAP_THRESHOLD: f32 = 1_000.0;
    pub const DEFAULT_SNAP_EPSILON: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            world_width: Self::DEFAULT_WORLD_WIDTH,
            world_height: Self::DEFAULT_WORLD_HEIGHT,
            wrap_threshold: Self::DEFAULT_WRAP_THRESHOLD,
            world_center: WorldPosition::ZERO,
            snap_epsilon: Self::DEFAULT_SNAP_EPSILON,
        }
    }

    pub fn with_dimensions(world_width: f32, world_height: f32) -> Self {
        Self {
            world_width,
            world_height,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
