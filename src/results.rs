//! Result types for plate analysis

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assembly::GlobalSystem;
use crate::mesh::Mesh;

/// Displacement results at a node
///
/// Only the bending DOFs are solved; `dx`, `dy` and `rz` are always zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Transverse deflection w
    pub dz: f64,
    /// Rotation about X axis
    pub rx: f64,
    /// Rotation about Y axis
    pub ry: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, DZ, RX, RY, RZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
            rx: arr[3],
            ry: arr[4],
            rz: arr[5],
        }
    }

    /// Create from the plate DOFs of one node
    pub fn from_plate_dofs(w: f64, theta_x: f64, theta_y: f64) -> Self {
        Self::from_array([0.0, 0.0, w, theta_x, theta_y, 0.0])
    }

    /// As array [DX, DY, DZ, RX, RY, RZ]
    pub fn as_array(&self) -> [f64; 6] {
        [self.dx, self.dy, self.dz, self.rx, self.ry, self.rz]
    }
}

/// Reaction forces at a supported node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction force in Z direction
    pub fz: f64,
    /// Reaction moment about X axis
    pub mx: f64,
    /// Reaction moment about Y axis
    pub my: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Create from array [FX, FY, FZ, MX, MY, MZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            fz: arr[2],
            mx: arr[3],
            my: arr[4],
            mz: arr[5],
        }
    }
}

/// Stress resultants per unit width at an element centroid
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementResultants {
    /// Bending moment Mx
    pub mx: f64,
    /// Bending moment My
    pub my: f64,
    /// Twisting moment Mxy
    pub mxy: f64,
    /// Transverse shear force Qx
    pub qx: f64,
    /// Transverse shear force Qy
    pub qy: f64,
}

/// Headline numbers of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub node_count: usize,
    pub element_count: usize,
    pub dof_count: usize,
    pub constrained_dofs: usize,
    pub free_dofs: usize,
    /// Largest |w| over all nodes
    pub max_deflection: f64,
    /// Node where `max_deflection` occurs
    pub max_deflection_node: usize,
    /// Sum of the applied transverse nodal loads
    pub total_load: f64,
    /// Sum of the transverse reactions
    pub total_reaction: f64,
}

/// Everything produced by [`crate::model::PlateModel::analyze`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateResults {
    pub mesh: Mesh,
    /// Displacements keyed by node index
    pub displacements: BTreeMap<usize, NodeDisplacement>,
    /// Reactions keyed by node index, for nodes with at least one constrained DOF
    pub reactions: BTreeMap<usize, Reactions>,
    /// Stress resultants by element index; empty when not requested
    pub resultants: Vec<ElementResultants>,
    pub summary: AnalysisSummary,
    /// Assembled system before constraints, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<GlobalSystem>,
}

impl PlateResults {
    /// Displacement of one node
    pub fn displacement(&self, node: usize) -> Option<&NodeDisplacement> {
        self.displacements.get(&node)
    }

    /// Displacement of the node closest to `(x, y)`
    pub fn displacement_at(&self, x: f64, y: f64) -> Option<&NodeDisplacement> {
        self.mesh
            .nearest_node(x, y)
            .and_then(|n| self.displacements.get(&n))
    }
}
