//! Dense direct solution of the constrained system

use std::collections::BTreeMap;

use log::debug;

use crate::elements::DOF_PER_NODE;
use crate::error::{PlateError, PlateResult};
use crate::math::{Mat, Vec as FEVec};
use crate::results::{NodeDisplacement, Reactions};

/// Solve `k * u = f` by LU decomposition with partial pivoting
///
/// Fails with `SingularSystem` when a pivot is zero or negligible relative
/// to the largest pivot, which for a constrained plate means the model is
/// under-restrained.
pub fn solve_linear_system(k: &Mat, f: &FEVec) -> PlateResult<FEVec> {
    let n = f.len();
    if k.nrows() != n || k.ncols() != n {
        return Err(PlateError::DimensionMismatch(format!(
            "stiffness is {}x{} but force vector has {} entries",
            k.nrows(),
            k.ncols(),
            n
        )));
    }
    if n == 0 {
        return Ok(FEVec::zeros(0));
    }

    debug!("Solving dense system with {} DOFs", n);

    let lu = k.clone().lu();
    let pivots = lu.u().diagonal();
    let max_pivot = pivots.amax();
    let threshold = n as f64 * f64::EPSILON * max_pivot;
    if max_pivot == 0.0 || pivots.iter().any(|p| *p == 0.0 || p.abs() < threshold) {
        return Err(PlateError::SingularSystem);
    }

    lu.solve(f).ok_or(PlateError::SingularSystem)
}

/// Reshape a flat solution vector into per-node displacement records
pub fn displacement_map(u: &FEVec, node_count: usize) -> BTreeMap<usize, NodeDisplacement> {
    (0..node_count)
        .map(|n| {
            let base = DOF_PER_NODE * n;
            (
                n,
                NodeDisplacement::from_plate_dofs(u[base], u[base + 1], u[base + 2]),
            )
        })
        .collect()
}

/// Solve the constrained system and map the result onto the nodes
///
/// # Arguments
/// * `k` - Constrained global stiffness matrix
/// * `f` - Constrained global force vector
/// * `node_count` - Number of mesh nodes; the system must have 3 DOFs per node
pub fn solve(
    k: &Mat,
    f: &FEVec,
    node_count: usize,
) -> PlateResult<BTreeMap<usize, NodeDisplacement>> {
    if f.len() != DOF_PER_NODE * node_count {
        return Err(PlateError::DimensionMismatch(format!(
            "expected {} DOFs for {} nodes, got {}",
            DOF_PER_NODE * node_count,
            node_count,
            f.len()
        )));
    }
    let u = solve_linear_system(k, f)?;
    Ok(displacement_map(&u, node_count))
}

/// Support reactions `(k0 * u - f0)` at the constrained DOFs
///
/// # Arguments
/// * `k0` - Assembled stiffness before constraints
/// * `f0` - Assembled force vector before constraints
/// * `u` - Solved displacement vector
/// * `constrained` - Constrained global DOF indices
pub fn reactions(
    k0: &Mat,
    f0: &FEVec,
    u: &FEVec,
    constrained: &[usize],
) -> BTreeMap<usize, Reactions> {
    let residual = k0 * u - f0;

    let mut out: BTreeMap<usize, [f64; 6]> = BTreeMap::new();
    for &c in constrained {
        let node = c / DOF_PER_NODE;
        // w -> FZ, θx -> MX, θy -> MY
        let slot = 2 + c % DOF_PER_NODE;
        out.entry(node).or_insert([0.0; 6])[slot] = residual[c];
    }

    out.into_iter()
        .map(|(node, arr)| (node, Reactions::from_array(arr)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solve_small_system() {
        let k = Mat::from_row_slice(3, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
        let f = FEVec::from_vec(vec![1.0, 2.0, 3.0]);
        let u = solve_linear_system(&k, &f).unwrap();
        assert_relative_eq!(&k * &u, f, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_system() {
        let k = Mat::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let f = FEVec::from_vec(vec![1.0, 2.0]);
        assert!(matches!(
            solve_linear_system(&k, &f),
            Err(PlateError::SingularSystem)
        ));

        let k = Mat::zeros(3, 3);
        let f = FEVec::zeros(3);
        assert!(matches!(
            solve_linear_system(&k, &f),
            Err(PlateError::SingularSystem)
        ));
    }

    #[test]
    fn test_displacement_map_layout() {
        let u = FEVec::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let map = displacement_map(&u, 2);
        assert_eq!(map[&0].as_array(), [0.0, 0.0, 1.0, 2.0, 3.0, 0.0]);
        assert_eq!(map[&1].as_array(), [0.0, 0.0, 4.0, 5.0, 6.0, 0.0]);
    }

    #[test]
    fn test_solve_checks_node_count() {
        let k = Mat::identity(3, 3);
        let f = FEVec::zeros(3);
        assert!(matches!(solve(&k, &f, 2), Err(PlateError::DimensionMismatch(_))));
        assert_eq!(solve(&k, &f, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_reactions_at_constrained_dofs() {
        let k0 = Mat::from_row_slice(3, 3, &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);
        let f0 = FEVec::from_vec(vec![0.0, 1.0, 0.0]);
        let u = FEVec::from_vec(vec![0.0, 0.5, 0.0]);
        let r = reactions(&k0, &f0, &u, &[0, 2]);

        let node = r[&0];
        assert_relative_eq!(node.fz, -0.5);
        assert_relative_eq!(node.my, -0.5);
        assert_eq!(node.mx, 0.0);
    }
}
