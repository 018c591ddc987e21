//! Boundary condition processing
//!
//! Edge nodes are found by coordinate, the constrained DOFs follow from the
//! [`BoundaryCondition`], and constraints are imposed by zeroing the
//! corresponding rows and columns of the global system.

use log::debug;

use crate::elements::{BoundaryCondition, Node, DOF_PER_NODE};
use crate::error::{PlateError, PlateResult};
use crate::math::{Mat, Vec as FEVec};

/// Absolute tolerance for matching a node to a domain edge
pub const EDGE_TOLERANCE: f64 = 1e-8;

/// Node indices lying on each edge of the rectangular domain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeNodes {
    /// y = y_min
    pub bottom: Vec<usize>,
    /// x = x_max
    pub right: Vec<usize>,
    /// y = y_max
    pub top: Vec<usize>,
    /// x = x_min
    pub left: Vec<usize>,
}

/// Find the nodes on each edge of the bounding rectangle of `nodes`
pub fn edge_nodes(nodes: &[Node]) -> EdgeNodes {
    let mut edges = EdgeNodes::default();
    if nodes.is_empty() {
        return edges;
    }

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for node in nodes {
        x_min = x_min.min(node.x);
        x_max = x_max.max(node.x);
        y_min = y_min.min(node.y);
        y_max = y_max.max(node.y);
    }

    let on = |value: f64, edge: f64| (value - edge).abs() < EDGE_TOLERANCE;
    for (i, node) in nodes.iter().enumerate() {
        if on(node.y, y_min) {
            edges.bottom.push(i);
        }
        if on(node.x, x_max) {
            edges.right.push(i);
        }
        if on(node.y, y_max) {
            edges.top.push(i);
        }
        if on(node.x, x_min) {
            edges.left.push(i);
        }
    }
    edges
}

/// Global DOF indices constrained by `condition`, sorted and de-duplicated
///
/// Edges parallel to x (bottom, top) restrain the slots given by
/// [`BoundaryCondition::horizontal_edge_slots`]; edges parallel to y
/// (left, right) restrain [`BoundaryCondition::vertical_edge_slots`].
/// Corner nodes collect the union of both.
pub fn boundary_dofs(condition: BoundaryCondition, nodes: &[Node]) -> Vec<usize> {
    let edges = edge_nodes(nodes);

    let restraints = [
        (&edges.bottom, condition.horizontal_edge_slots()),
        (&edges.top, condition.horizontal_edge_slots()),
        (&edges.left, condition.vertical_edge_slots()),
        (&edges.right, condition.vertical_edge_slots()),
    ];

    let mut dofs = Vec::new();
    for (edge, slots) in restraints {
        for &n in edge {
            dofs.extend(slots.iter().map(|&k| DOF_PER_NODE * n + k));
        }
    }

    dofs.sort_unstable();
    dofs.dedup();

    debug!("{} constrains {} DOFs", condition, dofs.len());
    dofs
}

/// Complement of `constrained` in `0..total`, sorted
pub fn free_dofs(constrained: &[usize], total: usize) -> Vec<usize> {
    let mut is_constrained = vec![false; total];
    for &c in constrained {
        if c < total {
            is_constrained[c] = true;
        }
    }
    (0..total).filter(|&i| !is_constrained[i]).collect()
}

/// Impose zero displacement at each constrained DOF, in place
///
/// Row and column `c` of `k` are zeroed, `k[c][c]` is set to 1 and `f[c]`
/// to 0. Unconstrained DOFs keep their coupling to each other.
///
/// # Arguments
/// * `k` - Square global stiffness matrix
/// * `f` - Global force vector of matching size
/// * `constrained` - Global DOF indices to fix
pub fn apply_constraints(k: &mut Mat, f: &mut FEVec, constrained: &[usize]) -> PlateResult<()> {
    let size = f.len();
    if k.nrows() != k.ncols() || k.nrows() != size {
        return Err(PlateError::DimensionMismatch(format!(
            "stiffness is {}x{} but force vector has {} entries",
            k.nrows(),
            k.ncols(),
            size
        )));
    }
    if let Some(&dof) = constrained.iter().find(|&&c| c >= size) {
        return Err(PlateError::DofOutOfBounds { dof, size });
    }

    for &c in constrained {
        k.row_mut(c).fill(0.0);
        k.column_mut(c).fill(0.0);
        k[(c, c)] = 1.0;
        f[c] = 0.0;
    }
    Ok(())
}
