//! Error types for the plate solver

use thiserror::Error;

/// Main error type for plate analysis
#[derive(Error, Debug)]
pub enum PlateError {
    #[error("Invalid mesh parameters: {0}")]
    InvalidMeshParameters(String),

    #[error(
        "Degenerate geometry{}: Jacobian determinant {det_j:e}",
        .element.map(|e| format!(" in element {e}")).unwrap_or_default()
    )]
    DegenerateGeometry {
        /// Element index, known once the failure reaches the assembler
        element: Option<usize>,
        /// Offending Jacobian determinant
        det_j: f64,
    },

    #[error("Unsupported boundary condition type: {0}")]
    UnsupportedBoundaryConditionType(String),

    #[error("Singular stiffness matrix - model may be under-restrained")]
    SingularSystem,

    #[error("Constrained DOF index {dof} is out of bounds for a system of size {size}")]
    DofOutOfBounds { dof: usize, size: usize },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlateError {
    /// Attach an element index to a geometry failure
    pub fn in_element(self, index: usize) -> Self {
        match self {
            PlateError::DegenerateGeometry { det_j, .. } => PlateError::DegenerateGeometry {
                element: Some(index),
                det_j,
            },
            other => other,
        }
    }
}

/// Result type for plate operations
pub type PlateResult<T> = Result<T, PlateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_geometry_message() {
        let err = PlateError::DegenerateGeometry {
            element: None,
            det_j: 0.0,
        };
        assert!(!err.to_string().contains("element"));

        let err = err.in_element(7);
        assert!(matches!(
            err,
            PlateError::DegenerateGeometry {
                element: Some(7),
                ..
            }
        ));
        assert!(err.to_string().contains("in element 7"));
    }

    #[test]
    fn test_in_element_leaves_other_errors() {
        let err = PlateError::SingularSystem.in_element(3);
        assert!(matches!(err, PlateError::SingularSystem));
    }
}
