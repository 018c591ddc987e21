//! Node - a grid point of the plate mesh

use serde::{Deserialize, Serialize};

/// A mesh node. `z` is always zero for a flat plate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a node in the plate mid-plane
    pub fn planar(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
