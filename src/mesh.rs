//! Structured rectangular mesh generation

use log::debug;
use serde::{Deserialize, Serialize};

use crate::elements::{Node, QuadElement, DOF_PER_NODE};
use crate::error::{PlateError, PlateResult};

/// Largest global system the dense solver accepts
///
/// Assembly, constraint application and LU each hold a full `n x n` copy, so
/// 10 000 DOFs is already about 2.4 GB of `f64`.
pub const MAX_DENSE_DOFS: usize = 10_000;

/// Nodes and elements of a plate mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Node sequence; a node's index is its position
    pub nodes: Vec<Node>,
    /// Element sequence; an element's index is its position
    pub elements: Vec<QuadElement>,
}

impl Mesh {
    /// Generate a structured `nx` by `ny` grid over `[0, length] x [0, breadth]`.
    ///
    /// Nodes are numbered row by row: node `j * (nx + 1) + i` sits at
    /// `(i * length / nx, j * breadth / ny)`. Element `(j, i)` connects grid
    /// nodes `(j, i), (j, i + 1), (j + 1, i + 1), (j + 1, i)`, which is
    /// counter-clockwise and gives a positive Jacobian.
    ///
    /// # Arguments
    /// * `length` - Plate dimension along x
    /// * `breadth` - Plate dimension along y
    /// * `nx` - Element divisions along x
    /// * `ny` - Element divisions along y
    pub fn rectangular(length: f64, breadth: f64, nx: usize, ny: usize) -> PlateResult<Self> {
        if !(length.is_finite() && length > 0.0) || !(breadth.is_finite() && breadth > 0.0) {
            return Err(PlateError::InvalidMeshParameters(format!(
                "plate dimensions must be positive and finite, got {} x {}",
                length, breadth
            )));
        }
        if nx == 0 || ny == 0 {
            return Err(PlateError::InvalidMeshParameters(format!(
                "division counts must be at least 1, got {} x {}",
                nx, ny
            )));
        }

        let node_count = Self::checked_node_count(nx, ny)?;

        let dx = length / nx as f64;
        let dy = breadth / ny as f64;

        let mut nodes = Vec::with_capacity(node_count);
        for j in 0..=ny {
            for i in 0..=nx {
                nodes.push(Node::planar(i as f64 * dx, j as f64 * dy));
            }
        }

        let mut elements = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let n1 = j * (nx + 1) + i;
                elements.push(QuadElement::new([n1, n1 + 1, n1 + nx + 2, n1 + nx + 1]));
            }
        }

        debug!(
            "Generated {}x{} mesh: {} nodes, {} elements",
            nx,
            ny,
            nodes.len(),
            elements.len()
        );

        Ok(Self { nodes, elements })
    }

    /// Node count of an `nx` by `ny` grid, refusing grids the dense solver
    /// cannot hold
    ///
    /// Fails with `InvalidMeshParameters` when the node or DOF count
    /// overflows `usize` or the DOF count exceeds [`MAX_DENSE_DOFS`].
    pub fn checked_node_count(nx: usize, ny: usize) -> PlateResult<usize> {
        let too_large = || {
            PlateError::InvalidMeshParameters(format!(
                "a {} x {} mesh exceeds the dense solver limit of {} DOFs",
                nx, ny, MAX_DENSE_DOFS
            ))
        };

        let nodes = nx
            .checked_add(1)
            .zip(ny.checked_add(1))
            .and_then(|(cols, rows)| cols.checked_mul(rows))
            .ok_or_else(too_large)?;
        let dofs = nodes.checked_mul(DOF_PER_NODE).ok_or_else(too_large)?;
        if dofs > MAX_DENSE_DOFS {
            return Err(too_large());
        }
        Ok(nodes)
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Size of the global system
    pub fn dof_count(&self) -> usize {
        DOF_PER_NODE * self.nodes.len()
    }

    /// Index of the node closest to `(x, y)`
    pub fn nearest_node(&self, x: f64, y: f64) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (i, (n.x - x).powi(2) + (n.y - y).powi(2)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        for &(nx, ny) in &[(1, 1), (2, 3), (4, 4), (7, 2)] {
            let mesh = Mesh::rectangular(3.0, 2.0, nx, ny).unwrap();
            assert_eq!(mesh.node_count(), (nx + 1) * (ny + 1));
            assert_eq!(mesh.element_count(), nx * ny);
            assert_eq!(mesh.dof_count(), 3 * (nx + 1) * (ny + 1));

            for quad in &mesh.elements {
                for (a, &n) in quad.nodes.iter().enumerate() {
                    assert!(n < mesh.node_count());
                    assert!(quad.nodes[a + 1..].iter().all(|&m| m != n));
                }
            }
        }
    }

    #[test]
    fn test_row_major_layout() {
        let mesh = Mesh::rectangular(2.0, 1.0, 2, 1).unwrap();
        assert_eq!(mesh.nodes[1], Node::planar(1.0, 0.0));
        assert_eq!(mesh.nodes[3], Node::planar(0.0, 1.0));
        assert_eq!(mesh.elements[0].nodes, [0, 1, 4, 3]);
        assert_eq!(mesh.elements[1].nodes, [1, 2, 5, 4]);
    }

    #[test]
    fn test_counter_clockwise_ordering() {
        let mesh = Mesh::rectangular(1.0, 1.0, 3, 2).unwrap();
        for quad in &mesh.elements {
            let (x, y) = quad.coordinates(&mesh.nodes);
            // Shoelace area is positive for counter-clockwise traversal
            let area: f64 = (0..4)
                .map(|k| x[k] * y[(k + 1) % 4] - x[(k + 1) % 4] * y[k])
                .sum();
            assert!(area > 0.0);
            assert!(x[0] <= x[1] && y[0] <= y[3]);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            Mesh::rectangular(0.0, 1.0, 2, 2),
            Err(PlateError::InvalidMeshParameters(_))
        ));
        assert!(matches!(
            Mesh::rectangular(1.0, f64::INFINITY, 2, 2),
            Err(PlateError::InvalidMeshParameters(_))
        ));
        assert!(matches!(
            Mesh::rectangular(1.0, 1.0, 0, 2),
            Err(PlateError::InvalidMeshParameters(_))
        ));
    }

    #[test]
    fn test_size_limits() {
        assert!(matches!(
            Mesh::rectangular(1.0, 1.0, usize::MAX, 1),
            Err(PlateError::InvalidMeshParameters(_))
        ));
        assert!(matches!(
            Mesh::checked_node_count(usize::MAX / 2, usize::MAX / 2),
            Err(PlateError::InvalidMeshParameters(_))
        ));
        assert!(matches!(
            Mesh::checked_node_count(100_000, 100_000),
            Err(PlateError::InvalidMeshParameters(_))
        ));

        // 56 x 56 -> 3249 nodes, 9747 DOFs; 57 x 57 -> 10 092 DOFs
        assert_eq!(Mesh::checked_node_count(56, 56).unwrap(), 3249);
        assert!(Mesh::checked_node_count(57, 57).is_err());
    }

    #[test]
    fn test_nearest_node() {
        let mesh = Mesh::rectangular(1.0, 1.0, 4, 4).unwrap();
        assert_eq!(mesh.nearest_node(0.5, 0.5), Some(12));
    }
}
