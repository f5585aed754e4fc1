//! # Coordinates Module
//!
//! Helpers for block coordinates: the canonical spatial key used for visited sets,
//! the 6-connected neighborhood and the per-axis distance fence used by the scanner.

use std::fmt;

use cgmath::{Point3, Vector3};

/// Offsets of the six face-adjacent neighbors of a block.
///
/// The order is up, down, east, west, south, north. Scans expand neighbors in
/// this order, which makes scan results deterministic for a given world.
pub const ADJACENT_OFFSETS: [Vector3<i32>; 6] = [
    Vector3 { x: 0, y: 1, z: 0 },
    Vector3 { x: 0, y: -1, z: 0 },
    Vector3 { x: 1, y: 0, z: 0 },
    Vector3 { x: -1, y: 0, z: 0 },
    Vector3 { x: 0, y: 0, z: 1 },
    Vector3 { x: 0, y: 0, z: -1 },
];

/// Canonical, hashable identity of a block coordinate.
///
/// Two coordinates produce the same key if and only if they are component-wise
/// equal. The `Display` form is `x,y,z`, which is what shows up in log lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpatialKey {
    /// East-west component.
    pub x: i32,
    /// Height.
    pub y: i32,
    /// North-south component.
    pub z: i32,
}

impl From<Point3<i32>> for SpatialKey {
    fn from(pos: Point3<i32>) -> Self {
        SpatialKey {
            x: pos.x,
            y: pos.y,
            z: pos.z,
        }
    }
}

impl fmt::Display for SpatialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Returns the spatial key of a coordinate.
pub fn to_key(pos: Point3<i32>) -> SpatialKey {
    SpatialKey::from(pos)
}

/// Iterates over the six face-adjacent neighbors of `pos`, in [`ADJACENT_OFFSETS`] order.
pub fn neighbors(pos: Point3<i32>) -> impl Iterator<Item = Point3<i32>> {
    ADJACENT_OFFSETS.into_iter().map(move |offset| pos + offset)
}

/// Checks the per-axis distance fence.
///
/// Each axis is compared on its own, so the fence is a cube of side
/// `2 * max_distance + 1` centered on `origin`, not a sphere.
pub fn within_axis_distance(origin: Point3<i32>, pos: Point3<i32>, max_distance: u32) -> bool {
    origin.x.abs_diff(pos.x) <= max_distance
        && origin.y.abs_diff(pos.y) <= max_distance
        && origin.z.abs_diff(pos.z) <= max_distance
}

/// Converts a free-floating location into the block that contains it.
pub fn block_containing(location: Point3<f32>) -> Point3<i32> {
    Point3::new(
        location.x.floor() as i32,
        location.y.floor() as i32,
        location.z.floor() as i32,
    )
}
