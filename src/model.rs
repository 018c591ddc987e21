//! Plate model - input record and analysis pipeline

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisOptions;
use crate::assembly::assemble;
use crate::boundary::{apply_constraints, boundary_dofs};
use crate::elements::{BoundaryCondition, PlateMaterial};
use crate::error::{PlateError, PlateResult};
use crate::math::{element_resultants, Vec as FEVec, Vec12};
use crate::mesh::Mesh;
use crate::results::{AnalysisSummary, ElementResultants, NodeDisplacement, PlateResults, Reactions};
use crate::solver::{self, displacement_map, solve_linear_system};

/// A rectangular plate under uniform pressure and nodal point loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateModel {
    /// Plate dimension along x
    pub length: f64,
    /// Plate dimension along y
    pub breadth: f64,
    /// Element divisions along x
    pub nx: usize,
    /// Element divisions along y
    pub ny: usize,
    pub material: PlateMaterial,
    /// Support applied to all four edges
    #[serde(default)]
    pub boundary: BoundaryCondition,
    /// Uniform transverse pressure (positive along +z)
    #[serde(default)]
    pub pressure: f64,
    /// Nodal loads `[Fz, Mx, My]` keyed by node index
    #[serde(default)]
    pub point_loads: BTreeMap<usize, [f64; 3]>,
}

impl PlateModel {
    /// Create an unloaded, simply supported plate
    pub fn new(length: f64, breadth: f64, nx: usize, ny: usize, material: PlateMaterial) -> Self {
        Self {
            length,
            breadth,
            nx,
            ny,
            material,
            boundary: BoundaryCondition::SimplySupported,
            pressure: 0.0,
            point_loads: BTreeMap::new(),
        }
    }

    /// Set the edge support
    pub fn with_boundary(mut self, boundary: BoundaryCondition) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the uniform pressure
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    /// Add a nodal load `[Fz, Mx, My]`, summing with any load already at `node`
    pub fn with_point_load(mut self, node: usize, load: [f64; 3]) -> Self {
        let entry = self.point_loads.entry(node).or_insert([0.0; 3]);
        for (slot, value) in entry.iter_mut().zip(load) {
            *slot += value;
        }
        self
    }

    /// Check all inputs before any meshing happens
    pub fn validate(&self) -> PlateResult<()> {
        if !(self.length.is_finite() && self.length > 0.0)
            || !(self.breadth.is_finite() && self.breadth > 0.0)
        {
            return Err(PlateError::InvalidMeshParameters(format!(
                "plate dimensions must be positive and finite, got {} x {}",
                self.length, self.breadth
            )));
        }
        if self.nx == 0 || self.ny == 0 {
            return Err(PlateError::InvalidMeshParameters(format!(
                "division counts must be at least 1, got {} x {}",
                self.nx, self.ny
            )));
        }
        let node_count = Mesh::checked_node_count(self.nx, self.ny)?;
        self.material.validate()?;
        if !self.pressure.is_finite() {
            return Err(PlateError::InvalidInput(format!(
                "pressure must be finite, got {}",
                self.pressure
            )));
        }
        for (&node, load) in &self.point_loads {
            if node >= node_count {
                return Err(PlateError::InvalidInput(format!(
                    "point load on node {} but the mesh has {} nodes",
                    node, node_count
                )));
            }
            if load.iter().any(|v| !v.is_finite()) {
                return Err(PlateError::InvalidInput(format!(
                    "point load on node {} must be finite, got {:?}",
                    node, load
                )));
            }
        }
        Ok(())
    }

    /// Generate the mesh for this plate
    pub fn mesh(&self) -> PlateResult<Mesh> {
        Mesh::rectangular(self.length, self.breadth, self.nx, self.ny)
    }

    /// Run a linear static analysis with default options
    pub fn analyze_linear(&self) -> PlateResult<PlateResults> {
        self.analyze(&AnalysisOptions::default())
    }

    /// Run mesh -> assemble -> constrain -> solve -> post-process
    pub fn analyze(&self, options: &AnalysisOptions) -> PlateResult<PlateResults> {
        self.validate()?;

        let mesh = self.mesh()?;
        let mut system = assemble(
            &mesh,
            &self.material,
            self.pressure,
            options.load_integration,
            options.parallel,
        )?;
        for (&node, load) in &self.point_loads {
            system.add_nodal_load(node, load)?;
        }

        let constrained = boundary_dofs(self.boundary, &mesh.nodes);
        let mut k = system.stiffness.clone();
        let mut f = system.force.clone();
        apply_constraints(&mut k, &mut f, &constrained)?;

        let u = solve_linear_system(&k, &f)?;
        let displacements = displacement_map(&u, mesh.node_count());
        let reactions = solver::reactions(&system.stiffness, &system.force, &u, &constrained);

        let resultants = if options.compute_resultants {
            self.resultants(&mesh, &u)?
        } else {
            Vec::new()
        };

        let summary = summarize(&mesh, &constrained, &displacements, &system.force, &reactions);
        info!(
            "Plate analysis complete: {} DOFs ({} free), max |w| = {:e} at node {}",
            summary.dof_count, summary.free_dofs, summary.max_deflection, summary.max_deflection_node
        );

        Ok(PlateResults {
            mesh,
            displacements,
            reactions,
            resultants,
            summary,
            system: options.retain_system.then_some(system),
        })
    }

    /// Centroidal stress resultants of every element
    fn resultants(&self, mesh: &Mesh, u: &FEVec) -> PlateResult<Vec<ElementResultants>> {
        debug!("Recovering resultants for {} elements", mesh.element_count());
        mesh.elements
            .iter()
            .enumerate()
            .map(|(index, quad)| {
                let (x, y) = quad.coordinates(&mesh.nodes);
                let dofs = quad.dofs();
                let u_e = Vec12::from_fn(|i, _| u[dofs[i]]);
                element_resultants(&x, &y, &self.material, &u_e)
                    .map(|(m, q)| ElementResultants {
                        mx: m[0],
                        my: m[1],
                        mxy: m[2],
                        qx: q[0],
                        qy: q[1],
                    })
                    .map_err(|e| e.in_element(index))
            })
            .collect()
    }
}

fn summarize(
    mesh: &Mesh,
    constrained: &[usize],
    displacements: &BTreeMap<usize, NodeDisplacement>,
    force: &FEVec,
    reactions: &BTreeMap<usize, Reactions>,
) -> AnalysisSummary {
    let (max_deflection_node, max_deflection) = displacements
        .iter()
        .map(|(&n, d)| (n, d.dz.abs()))
        .fold((0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });

    AnalysisSummary {
        node_count: mesh.node_count(),
        element_count: mesh.element_count(),
        dof_count: mesh.dof_count(),
        constrained_dofs: constrained.len(),
        free_dofs: mesh.dof_count() - constrained.len(),
        max_deflection,
        max_deflection_node,
        total_load: force.iter().step_by(3).sum(),
        total_reaction: reactions.values().map(|r| r.fz).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_plate() -> PlateModel {
        PlateModel::new(1.0, 1.0, 4, 4, PlateMaterial::isotropic(10920.0, 0.3, 0.1))
            .with_pressure(-1.0)
    }

    #[test]
    fn test_center_deflection() {
        let results = reference_plate().analyze_linear().unwrap();
        assert_relative_eq!(
            results.displacements[&12].dz,
            -0.004207080506520302,
            epsilon = 1e-10
        );
        assert_eq!(results.summary.max_deflection_node, 12);
    }

    #[test]
    fn test_summary_counts() {
        let results = reference_plate().analyze_linear().unwrap();
        let s = &results.summary;
        assert_eq!(s.node_count, 25);
        assert_eq!(s.element_count, 16);
        assert_eq!(s.dof_count, 75);
        assert_eq!(s.constrained_dofs + s.free_dofs, 75);
        assert_relative_eq!(s.total_load, -1.0, epsilon = 1e-12);
        assert_relative_eq!(s.total_reaction, 1.0, epsilon = 1e-9);
        assert_eq!(results.resultants.len(), 16);
        assert!(results.system.is_none());
    }

    #[test]
    fn test_retained_system_is_unconstrained() {
        let options = AnalysisOptions::default().with_system().without_resultants();
        let results = reference_plate().analyze(&options).unwrap();
        let system = results.system.unwrap();
        assert_eq!(system.size(), 75);
        // Corner w is constrained, but the retained copy still holds its stiffness
        assert!(system.stiffness[(0, 0)] > 1.0);
        assert_relative_eq!(system.force[0], -1.0 / 64.0, epsilon = 1e-15);
        assert!(results.resultants.is_empty());
    }

    #[test]
    fn test_validation_errors() {
        let plate = reference_plate();
        let mut bad = plate.clone();
        bad.nx = 0;
        assert!(matches!(bad.analyze_linear(), Err(PlateError::InvalidMeshParameters(_))));

        let mut bad = plate.clone();
        bad.length = -1.0;
        assert!(matches!(bad.analyze_linear(), Err(PlateError::InvalidMeshParameters(_))));

        let bad = plate.clone().with_pressure(f64::NAN);
        assert!(matches!(bad.analyze_linear(), Err(PlateError::InvalidInput(_))));

        let mut bad = plate.clone();
        bad.material.thickness = 0.0;
        assert!(matches!(bad.analyze_linear(), Err(PlateError::InvalidInput(_))));

        let bad = plate.clone().with_point_load(25, [-1.0, 0.0, 0.0]);
        assert!(matches!(bad.validate(), Err(PlateError::InvalidInput(_))));

        let bad = plate.clone().with_point_load(12, [f64::INFINITY, 0.0, 0.0]);
        assert!(matches!(bad.validate(), Err(PlateError::InvalidInput(_))));

        let mut bad = plate;
        bad.nx = 100_000;
        bad.ny = 100_000;
        assert!(matches!(bad.validate(), Err(PlateError::InvalidMeshParameters(_))));
        bad.nx = usize::MAX;
        assert!(matches!(bad.validate(), Err(PlateError::InvalidMeshParameters(_))));
    }

    #[test]
    fn test_point_loads_reach_force_vector() {
        let plate = reference_plate()
            .with_point_load(12, [-0.5, 0.0, 0.0])
            .with_point_load(12, [-0.5, 0.1, 0.0])
            .with_point_load(6, [0.0, 0.0, 0.2]);
        assert_eq!(plate.point_loads[&12], [-1.0, 0.1, 0.0]);

        let results = plate.analyze(&AnalysisOptions::default().with_system()).unwrap();
        let force = &results.system.unwrap().force;
        // Interior node 12 also carries its share of the pressure, 4 * 1/64
        assert_relative_eq!(force[36], -1.0 - 1.0 / 16.0, epsilon = 1e-14);
        assert_relative_eq!(force[37], 0.1);
        assert_relative_eq!(force[20], 0.2);
        assert_relative_eq!(results.summary.total_load, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_model_from_json() {
        let json = r#"{
            "length": 1.0, "breadth": 1.0, "nx": 4, "ny": 4,
            "material": { "e": 10920.0, "nu": 0.3, "thickness": 0.1 },
            "boundary": "c-c-c-c",
            "pressure": -1.0
        }"#;
        let model: PlateModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.boundary, BoundaryCondition::Clamped);
        assert_eq!(model.material.g, None);
        assert!(model.point_loads.is_empty());

        let loaded = json.replace(
            r#""pressure": -1.0"#,
            r#""point_loads": { "12": [-1.0, 0.0, 0.0] }"#,
        );
        let model: PlateModel = serde_json::from_str(&loaded).unwrap();
        assert_eq!(model.pressure, 0.0);
        assert_eq!(model.point_loads[&12], [-1.0, 0.0, 0.0]);

        let json = json.replace("c-c-c-c", "free");
        let err = serde_json::from_str::<PlateModel>(&json).unwrap_err();
        assert!(err.to_string().contains("Unsupported boundary condition type"));
    }
}
