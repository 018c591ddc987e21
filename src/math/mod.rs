//! Mathematical utilities for plate element calculations

pub mod jacobian;
pub mod plate;
pub mod quadrature;
pub mod shape;

use nalgebra::{DMatrix, DVector, Matrix2, Matrix3, SMatrix, SVector, Vector2, Vector3};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat2 = Matrix2<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;

/// 12x12 matrix for element stiffness
pub type Mat12 = SMatrix<f64, 12, 12>;
/// 12-element vector for element forces/displacements
pub type Vec12 = SVector<f64, 12>;
/// Bending strain-displacement operator
pub type Mat3x12 = SMatrix<f64, 3, 12>;
/// Shear strain-displacement operator
pub type Mat2x12 = SMatrix<f64, 2, 12>;

pub use jacobian::Jacobian;
pub use plate::{
    bending_b_matrix, bending_rigidity_matrix, element_matrices, element_resultants,
    shear_b_matrix, shear_rigidity_matrix, ElementMatrices, SHEAR_CORRECTION,
};
pub use quadrature::{GaussRule, LoadIntegration};
pub use shape::ShapeFunctions;
