//! Toroidal coordinate math.
//!
//! Not an actual torus - a discontinuous edge connection: X wraps at
//! +/- width/2, Y wraps at +/- height/2, Z never wraps. All functions here
//! are pure; the mapper carries only the world configuration.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::GameConfig;
use crate::state::WorldPosition;

bitflags! {
    /// Which wrap boundaries a position currently sits within threshold of.
    ///
    /// Bit order matches the fixed ghost evaluation order: right, left,
    /// top, bottom.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EdgeProximity: u8 {
        const RIGHT = 1 << 0;
        const LEFT = 1 << 1;
        const TOP = 1 << 2;
        const BOTTOM = 1 << 3;
    }
}

/// Converts between absolute world coordinates and the canonical wrapped
/// range, and answers wrap-aware distance/direction/ghost queries.
#[derive(Clone, Debug)]
pub struct ToroidalMapper {
    width: f32,
    height: f32,
    threshold: f32,
    center: WorldPosition,
}

impl ToroidalMapper {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            width: config.world_width,
            height: config.world_height,
            threshold: config.wrap_threshold,
            center: config.world_center,
        }
    }

    /// A zero or negative dimension disables wrapping on that axis rather
    /// than crashing. Hosts should treat this as a misconfiguration.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    // ===== coordinate conversion =====

    /// World space -> toroidal frame (relative to the configured center).
    pub fn world_to_toroidal(&self, world: WorldPosition) -> WorldPosition {
        world - self.center
    }

    /// Toroidal frame -> world space.
    pub fn toroidal_to_world(&self, toroidal: WorldPosition) -> WorldPosition {
        toroidal + self.center
    }

    /// Wraps a toroidal coordinate into X in [-width/2, +width/2) and
    /// Y in [-height/2, +height/2); Z is untouched.
    ///
    /// O(1) for inputs arbitrarily far outside the range, and idempotent.
    pub fn normalize(&self, coord: WorldPosition) -> WorldPosition {
        WorldPosition::new(
            wrap_axis(coord.x, self.width),
            wrap_axis(coord.y, self.height),
            coord.z,
        )
    }

    /// Full round trip: world position -> canonical (wrapped) world position.
    pub fn canonicalize(&self, world: WorldPosition) -> WorldPosition {
        self.toroidal_to_world(self.normalize(self.world_to_toroidal(world)))
    }

    // ===== wrap-aware metrics =====

    /// Distance along the shorter arc of each wrapped axis.
    ///
    /// Symmetric; two points 100 units apart across an edge measure ~100,
    /// not ~(dimension - 100).
    pub fn toroidal_distance(&self, a: WorldPosition, b: WorldPosition) -> f32 {
        let pa = self.normalize(self.world_to_toroidal(a));
        let pb = self.normalize(self.world_to_toroidal(b));

        let dx = axis_separation((pa.x - pb.x).abs(), self.width);
        let dy = axis_separation((pa.y - pb.y).abs(), self.height);
        let dz = (pa.z - pb.z).abs();

        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Unit vector from `from` toward `to` along the shorter wrap-around
    /// path. Zero vector when the points coincide.
    pub fn toroidal_direction(&self, from: WorldPosition, to: WorldPosition) -> WorldPosition {
        let pf = self.normalize(self.world_to_toroidal(from));
        let pt = self.normalize(self.world_to_toroidal(to));

        let delta = WorldPosition::new(
            shorter_arc_delta(pt.x - pf.x, self.width),
            shorter_arc_delta(pt.y - pf.y, self.height),
            pt.z - pf.z,
        );

        let length = (delta.x * delta.x + delta.y * delta.y + delta.z * delta.z).sqrt();
        if length <= f32::EPSILON {
            return WorldPosition::ZERO;
        }
        WorldPosition::new(delta.x / length, delta.y / length, delta.z / length)
    }

    // ===== edge / ghost queries =====

    /// Boundary proximities of the normalized position, in fixed bit order.
    pub fn edge_proximity(&self, world: WorldPosition) -> EdgeProximity {
        if self.is_degenerate() {
            return EdgeProximity::empty();
        }
        let pos = self.normalize(self.world_to_toroidal(world));
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;

        let mut edges = EdgeProximity::empty();
        if pos.x > half_w - self.threshold {
            edges |= EdgeProximity::RIGHT;
        }
        if pos.x < -half_w + self.threshold {
            edges |= EdgeProximity::LEFT;
        }
        if pos.y > half_h - self.threshold {
            edges |= EdgeProximity::TOP;
        }
        if pos.y < -half_h + self.threshold {
            edges |= EdgeProximity::BOTTOM;
        }
        edges
    }

    pub fn is_near_edge(&self, world: WorldPosition) -> bool {
        !self.edge_proximity(world).is_empty()
    }

    /// Ghost duplicate targets, slot-indexed in the fixed evaluation order:
    /// right, left, top, bottom, then the corner combinations right+top,
    /// right+bottom, left+top, left+bottom.
    ///
    /// A slot is `Some` while its proximity (or proximity pair) holds, so a
    /// ghost keyed to a slot stays stable as long as that proximity stays
    /// true; walking from an edge into a corner fills new slots without
    /// touching the existing one.
    pub fn ghost_targets(
        &self,
        world: WorldPosition,
    ) -> [Option<WorldPosition>; GameConfig::MAX_GHOSTS] {
        let mut targets = [None; GameConfig::MAX_GHOSTS];
        if self.is_degenerate() {
            return targets;
        }

        let pos = self.normalize(self.world_to_toroidal(world));
        let edges = self.edge_proximity(world);

        let shifted = |dx: f32, dy: f32| {
            Some(self.toroidal_to_world(WorldPosition::new(pos.x + dx, pos.y + dy, pos.z)))
        };

        if edges.contains(EdgeProximity::RIGHT) {
            targets[0] = shifted(-self.width, 0.0);
        }
        if edges.contains(EdgeProximity::LEFT) {
            targets[1] = shifted(self.width, 0.0);
        }
        if edges.contains(EdgeProximity::TOP) {
            targets[2] = shifted(0.0, -self.height);
        }
        if edges.contains(EdgeProximity::BOTTOM) {
            targets[3] = shifted(0.0, self.height);
        }
        if edges.contains(EdgeProximity::RIGHT | EdgeProximity::TOP) {
            targets[4] = shifted(-self.width, -self.height);
        }
        if edges.contains(EdgeProximity::RIGHT | EdgeProximity::BOTTOM) {
            targets[5] = shifted(-self.width, self.height);
        }
        if edges.contains(EdgeProximity::LEFT | EdgeProximity::TOP) {
            targets[6] = shifted(self.width, -self.height);
        }
        if edges.contains(EdgeProximity::LEFT | EdgeProximity::BOTTOM) {
            targets[7] = shifted(self.width, self.height);
        }

        targets
    }

    /// Ghost duplicate positions for a world position near the boundary,
    /// in the fixed slot order. A position at a single edge yields 1 entry;
    /// a corner yields 3.
    pub fn ghost_positions(
        &self,
        world: WorldPosition,
    ) -> ArrayVec<WorldPosition, { GameConfig::MAX_GHOSTS }> {
        self.ghost_targets(world).into_iter().flatten().collect()
    }
}

/// Wraps a single axis value into [-dim/2, +dim/2). Identity when the
/// dimension is not positive.
fn wrap_axis(value: f32, dimension: f32) -> f32 {
    if dimension <= 0.0 {
        return value;
    }
    let half = dimension * 0.5;
    let wrapped = (value + half).rem_euclid(dimension) - half;
    // rem_euclid of exactly +dim can land on +half through rounding
    if wrapped >= half { wrapped - dimension } else { wrapped }
}

/// Shorter of the direct and wrapped separations for an absolute delta.
fn axis_separation(delta: f32, dimension: f32) -> f32 {
    if dimension <= 0.0 {
        return delta;
    }
    delta.min(dimension - delta)
}

/// Signed delta corrected to the shorter arc.
fn shorter_arc_delta(delta: f32, dimension: f32) -> f32 {
    if dimension <= 0.0 {
        return delta;
    }
    if delta.abs() > dimension * 0.5 {
        if delta > 0.0 {
            delta - dimension
        } else {
            delta + dimension
        }
    } else {
        delta
    }
}
