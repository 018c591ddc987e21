//! Plate Solver - Mindlin plate-bending finite element analysis
//!
//! This library computes the static response of a thin rectangular plate
//! under uniform transverse pressure, supporting:
//! - Structured rectangular meshes of 4-node bilinear quadrilaterals
//! - Mindlin plate elements with selective reduced integration
//! - Simply supported and clamped edges
//! - Nodal displacements, support reactions and element stress resultants
//!
//! ## Example
//! ```rust
//! use plate_solver::prelude::*;
//!
//! let material = PlateMaterial::isotropic(10920.0, 0.3, 0.1);
//! let model = PlateModel::new(1.0, 1.0, 4, 4, material)
//!     .with_boundary(BoundaryCondition::SimplySupported)
//!     .with_pressure(-1.0);
//!
//! let results = model.analyze(&AnalysisOptions::default()).unwrap();
//!
//! // Centre node of the 4x4 grid
//! let centre = results.displacement(12).unwrap();
//! assert!((centre.dz + 0.0042071).abs() < 1e-6);
//! ```

pub mod analysis;
pub mod assembly;
pub mod boundary;
pub mod elements;
pub mod error;
pub mod math;
pub mod mesh;
pub mod model;
pub mod results;
pub mod solver;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, AnalysisRequest, AnalysisResponse};
    pub use crate::elements::{BoundaryCondition, Node, PlateMaterial, QuadElement};
    pub use crate::error::{PlateError, PlateResult};
    pub use crate::math::LoadIntegration;
    pub use crate::mesh::Mesh;
    pub use crate::model::PlateModel;
    pub use crate::results::{
        AnalysisSummary, ElementResultants, NodeDisplacement, PlateResults, Reactions,
    };
}

#[cfg(feature = "wasm")]
pub mod wasm;
