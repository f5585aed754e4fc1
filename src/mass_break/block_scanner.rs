//! # Block Scanner
//!
//! Finds the blocks connected to a broken block.
//!
//! ## Algorithm
//!
//! Breadth-first flood fill over the 6-connected neighborhood:
//!
//! 1. The origin and its six neighbors are marked visited; the neighbors form the
//!    initial frontier. The origin itself is never tested, it is already broken.
//! 2. Each dequeued coordinate is read. Unreadable blocks are logged and skipped,
//!    absent blocks and blocks of another type are skipped.
//! 3. A matching block is accepted and its unvisited neighbors are enqueued,
//!    provided they pass the optional per-axis distance fence.
//! 4. The scan stops when the frontier is empty or `max_blocks` are accepted.
//!
//! Coordinates are marked visited when enqueued, not when accepted, so every
//! coordinate is read at most once however many accepted blocks touch it. The work
//! of a scan is bounded by the size of the visited set.

use std::collections::{HashSet, VecDeque};

use cgmath::Point3;
use log::{trace, warn};

use crate::world::{
    coordinates::{neighbors, to_key, within_axis_distance, SpatialKey},
    Dimension,
};

/// Scans for blocks of `target_type_id` connected to `start_location`.
///
/// # Arguments
/// * `start_location` - The broken block; excluded from the result
/// * `target_type_id` - Block type to follow
/// * `dimension` - World to read from
/// * `max_blocks` - Upper bound on the number of returned coordinates
/// * `max_distance` - Optional per-axis limit on the distance from `start_location`
///
/// # Returns
/// Matching coordinates in the order they were accepted.
pub fn scan_connected_blocks(
    start_location: Point3<i32>,
    target_type_id: &str,
    dimension: &dyn Dimension,
    max_blocks: usize,
    max_distance: Option<u32>,
) -> Vec<Point3<i32>> {
    let mut queue: VecDeque<Point3<i32>> = VecDeque::new();
    let mut visited: HashSet<SpatialKey> = HashSet::new();
    let mut result = Vec::new();

    visited.insert(to_key(start_location));
    for neighbor in neighbors(start_location) {
        if visited.insert(to_key(neighbor)) {
            queue.push_back(neighbor);
        }
    }

    while result.len() < max_blocks {
        let Some(current) = queue.pop_front() else {
            break;
        };

        let block = match dimension.get_block(current) {
            Ok(block) => block,
            Err(err) => {
                // Unloaded chunks and the like; the rest of the frontier is still valid.
                warn!("Skipping block at {}: {}", to_key(current), err);
                continue;
            }
        };

        if !block.is_some_and(|block| block.is_type(target_type_id)) {
            continue;
        }

        result.push(current);

        for neighbor in neighbors(current) {
            if let Some(max_distance) = max_distance {
                if !within_axis_distance(start_location, neighbor, max_distance) {
                    continue;
                }
            }

            if visited.insert(to_key(neighbor)) {
                queue.push_back(neighbor);
            }
        }
    }

    trace!(
        "Scan from {} found {} blocks of {} ({} visited)",
        to_key(start_location),
        result.len(),
        target_type_id,
        visited.len()
    );
    result
}
