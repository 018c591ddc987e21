//! Isoparametric coordinate mapping

use super::Mat2;
use crate::error::{PlateError, PlateResult};

/// Jacobian of the reference-to-physical map at one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jacobian {
    /// J = [[∂x/∂ξ, ∂y/∂ξ], [∂x/∂η, ∂y/∂η]]
    pub matrix: Mat2,
    /// det J
    pub det: f64,
    /// J⁻¹ = adj(J) / det J
    pub inverse: Mat2,
}

impl Jacobian {
    /// Build the Jacobian from local shape derivatives and corner coordinates
    ///
    /// # Arguments
    /// * `dn_dxi` - dN/dξ at the sample point
    /// * `dn_deta` - dN/dη at the sample point
    /// * `x` - Corner x coordinates in element order
    /// * `y` - Corner y coordinates in element order
    ///
    /// Fails with `DegenerateGeometry` when |det J| is below machine epsilon.
    pub fn new(
        dn_dxi: &[f64; 4],
        dn_deta: &[f64; 4],
        x: &[f64; 4],
        y: &[f64; 4],
    ) -> PlateResult<Self> {
        let mut j = [[0.0; 2]; 2];
        for i in 0..4 {
            j[0][0] += dn_dxi[i] * x[i];
            j[0][1] += dn_dxi[i] * y[i];
            j[1][0] += dn_deta[i] * x[i];
            j[1][1] += dn_deta[i] * y[i];
        }

        let det = j[0][0] * j[1][1] - j[0][1] * j[1][0];
        if det.is_nan() || det.abs() < f64::EPSILON {
            return Err(PlateError::DegenerateGeometry {
                element: None,
                det_j: det,
            });
        }

        let matrix = Mat2::new(j[0][0], j[0][1], j[1][0], j[1][1]);
        let inverse = Mat2::new(j[1][1], -j[0][1], -j[1][0], j[0][0]) / det;

        Ok(Self {
            matrix,
            det,
            inverse,
        })
    }

    /// Map local derivatives to physical derivatives `(dN/dx, dN/dy)`
    pub fn physical_derivatives(
        &self,
        dn_dxi: &[f64; 4],
        dn_deta: &[f64; 4],
    ) -> ([f64; 4], [f64; 4]) {
        let inv = &self.inverse;
        let mut dn_dx = [0.0; 4];
        let mut dn_dy = [0.0; 4];
        for i in 0..4 {
            dn_dx[i] = inv[(0, 0)] * dn_dxi[i] + inv[(0, 1)] * dn_deta[i];
            dn_dy[i] = inv[(1, 0)] * dn_dxi[i] + inv[(1, 1)] * dn_deta[i];
        }
        (dn_dx, dn_dy)
    }
}
