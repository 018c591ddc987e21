//! Global stiffness and force assembly

use log::debug;
#[cfg(not(feature = "parallel"))]
use log::warn;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::elements::{PlateMaterial, QuadElement, DOF_PER_NODE};
use crate::error::{PlateError, PlateResult};
use crate::math::{element_matrices, ElementMatrices, LoadIntegration, Mat, Vec as FEVec};
use crate::mesh::Mesh;

/// Global stiffness matrix and force vector, accumulated element by element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSystem {
    /// Square stiffness matrix of size 3 * node count
    pub stiffness: Mat,
    /// Force vector of size 3 * node count
    pub force: FEVec,
}

impl GlobalSystem {
    /// Create a zero-filled system with `size` DOFs
    pub fn new(size: usize) -> Self {
        Self {
            stiffness: Mat::zeros(size, size),
            force: FEVec::zeros(size),
        }
    }

    /// Number of DOFs
    pub fn size(&self) -> usize {
        self.force.len()
    }

    /// Scatter-add one element's contribution
    ///
    /// # Arguments
    /// * `dofs` - Global index of each of the 12 element DOFs
    /// * `element` - Element stiffness and force
    pub fn add_element(&mut self, dofs: &[usize; 12], element: &ElementMatrices) {
        for (i, &gi) in dofs.iter().enumerate() {
            for (j, &gj) in dofs.iter().enumerate() {
                self.stiffness[(gi, gj)] += element.stiffness[(i, j)];
            }
            self.force[gi] += element.force[i];
        }
    }

    /// Add a nodal load `[Fz, Mx, My]` to the force vector
    pub fn add_nodal_load(&mut self, node: usize, load: &[f64; DOF_PER_NODE]) -> PlateResult<()> {
        let size = self.size();
        let base = node
            .checked_mul(DOF_PER_NODE)
            .filter(|&b| b.checked_add(DOF_PER_NODE).is_some_and(|end| end <= size))
            .ok_or(PlateError::DofOutOfBounds {
                dof: node.saturating_mul(DOF_PER_NODE),
                size,
            })?;
        for (k, value) in load.iter().enumerate() {
            self.force[base + k] += *value;
        }
        Ok(())
    }
}

/// Compute every element's stiffness and force, in element order
fn element_contributions(
    mesh: &Mesh,
    material: &PlateMaterial,
    pressure: f64,
    load_integration: LoadIntegration,
    parallel: bool,
) -> PlateResult<Vec<ElementMatrices>> {
    let compute = |(index, quad): (usize, &QuadElement)| {
        let (x, y) = quad.coordinates(&mesh.nodes);
        element_matrices(&x, &y, material, pressure, load_integration)
            .map_err(|e| e.in_element(index))
    };

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return mesh.elements.par_iter().enumerate().map(compute).collect();
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        if parallel {
            warn!("Parallel assembly requested without the `parallel` feature; assembling sequentially");
        }
    }

    mesh.elements.iter().enumerate().map(compute).collect()
}

/// Assemble the global system for a uniformly loaded plate
///
/// Element matrices may be computed in parallel; they are always scattered
/// in element order, so the result does not depend on `parallel`.
///
/// # Arguments
/// * `mesh` - Plate mesh
/// * `material` - Material constants and thickness
/// * `pressure` - Uniform transverse pressure
/// * `load_integration` - Gauss rule for the pressure load
/// * `parallel` - Compute element matrices on the rayon thread pool
pub fn assemble(
    mesh: &Mesh,
    material: &PlateMaterial,
    pressure: f64,
    load_integration: LoadIntegration,
    parallel: bool,
) -> PlateResult<GlobalSystem> {
    let contributions =
        element_contributions(mesh, material, pressure, load_integration, parallel)?;

    let mut system = GlobalSystem::new(mesh.dof_count());
    for (quad, element) in mesh.elements.iter().zip(&contributions) {
        system.add_element(&quad.dofs(), element);
    }

    debug!(
        "Assembled {} elements into a {}x{} system",
        contributions.len(),
        system.size(),
        system.size()
    );

    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Node;
    use crate::math::{Mat12, Vec12};
    use approx::assert_relative_eq;

    fn material() -> PlateMaterial {
        PlateMaterial::isotropic(10920.0, 0.3, 0.1)
    }

    #[test]
    fn test_add_element_accumulates() {
        let mut system = GlobalSystem::new(15);
        let element = ElementMatrices {
            stiffness: Mat12::from_element(1.0),
            force: Vec12::from_element(2.0),
        };
        let dofs = QuadElement::new([0, 1, 4, 3]).dofs();
        system.add_element(&dofs, &element);
        system.add_element(&dofs, &element);

        assert_eq!(system.stiffness[(0, 0)], 2.0);
        assert_eq!(system.stiffness[(12, 9)], 2.0);
        assert_eq!(system.stiffness[(6, 6)], 0.0);
        assert_eq!(system.force[14], 4.0);
        assert_eq!(system.force[7], 0.0);
    }

    #[test]
    fn test_nodal_load_slots() {
        let mut system = GlobalSystem::new(6);
        system.add_nodal_load(1, &[-2.0, 0.5, 0.25]).unwrap();
        system.add_nodal_load(1, &[-1.0, 0.0, 0.0]).unwrap();
        assert_eq!(system.force.as_slice(), &[0.0, 0.0, 0.0, -3.0, 0.5, 0.25]);

        assert!(matches!(
            system.add_nodal_load(2, &[1.0, 0.0, 0.0]),
            Err(PlateError::DofOutOfBounds { dof: 6, size: 6 })
        ));
    }

    #[test]
    fn test_shared_nodes_superpose() {
        let mesh = Mesh::rectangular(2.0, 1.0, 2, 1).unwrap();
        let system =
            assemble(&mesh, &material(), -1.0, LoadIntegration::ShearRule, false).unwrap();

        // Middle bottom node is shared by both elements
        let (x, y) = mesh.elements[0].coordinates(&mesh.nodes);
        let single =
            element_matrices(&x, &y, &material(), -1.0, LoadIntegration::ShearRule).unwrap();
        assert_relative_eq!(system.stiffness[(3, 3)], 2.0 * single.stiffness[(0, 0)]);
        assert_relative_eq!(system.force[3], 2.0 * single.force[0]);
        assert_relative_eq!(system.force[0], single.force[0]);

        // Total applied load equals pressure times area
        let total: f64 = (0..mesh.node_count()).map(|n| system.force[3 * n]).sum();
        assert_relative_eq!(total, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_assembled_stiffness_symmetric() {
        let mesh = Mesh::rectangular(1.0, 1.0, 3, 3).unwrap();
        let system = assemble(&mesh, &material(), 0.0, LoadIntegration::ShearRule, false).unwrap();
        let k = &system.stiffness;
        let tol = 1e-9 * k.amax();
        assert!((k - k.transpose()).amax() < tol);
    }

    #[test]
    fn test_degenerate_element_reports_index() {
        let mut mesh = Mesh::rectangular(1.0, 1.0, 2, 1).unwrap();
        // Collapse element 1 onto the line x = 0.5
        mesh.nodes[2] = Node::planar(0.5, 0.25);
        mesh.nodes[5] = Node::planar(0.5, 0.75);

        let err = assemble(&mesh, &material(), 0.0, LoadIntegration::ShearRule, false).unwrap_err();
        match err {
            PlateError::DegenerateGeometry { element, .. } => assert_eq!(element, Some(1)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
