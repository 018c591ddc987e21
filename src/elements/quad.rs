//! Quad element - 4-node bilinear Mindlin plate element

use serde::{Deserialize, Serialize};

use super::Node;

/// Degrees of freedom carried by each plate node: w, θx, θy
pub const DOF_PER_NODE: usize = 3;

/// A 4-node quadrilateral element.
///
/// Node indices run counter-clockwise from the corner with minimum x and y:
/// bottom-left, bottom-right, top-right, top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadElement {
    /// Indices into the mesh node sequence
    pub nodes: [usize; 4],
}

impl QuadElement {
    /// Create a new element from four node indices
    pub fn new(nodes: [usize; 4]) -> Self {
        Self { nodes }
    }

    /// Corner x and y coordinates, in element node order
    pub fn coordinates(&self, nodes: &[Node]) -> ([f64; 4], [f64; 4]) {
        let mut x = [0.0; 4];
        let mut y = [0.0; 4];
        for (p, &n) in self.nodes.iter().enumerate() {
            x[p] = nodes[n].x;
            y[p] = nodes[n].y;
        }
        (x, y)
    }

    /// Global DOF indices of the element, `3 * node + slot` for each corner
    pub fn dofs(&self) -> [usize; 12] {
        let mut dofs = [0; 12];
        for (p, &n) in self.nodes.iter().enumerate() {
            for k in 0..DOF_PER_NODE {
                dofs[p * DOF_PER_NODE + k] = DOF_PER_NODE * n + k;
            }
        }
        dofs
    }
}
