//! Bilinear isoparametric shape functions

/// Natural coordinates of the four element corners
const CORNERS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Shape function values and local derivatives at one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFunctions {
    /// N1..N4
    pub n: [f64; 4],
    /// dN/dξ
    pub dn_dxi: [f64; 4],
    /// dN/dη
    pub dn_deta: [f64; 4],
}

impl ShapeFunctions {
    /// Evaluate at natural coordinates `(xi, eta)`
    ///
    /// N1 = (1-ξ)(1-η)/4, N2 = (1+ξ)(1-η)/4, N3 = (1+ξ)(1+η)/4, N4 = (1-ξ)(1+η)/4
    pub fn at(xi: f64, eta: f64) -> Self {
        let mut n = [0.0; 4];
        let mut dn_dxi = [0.0; 4];
        let mut dn_deta = [0.0; 4];
        for (i, &(xi_i, eta_i)) in CORNERS.iter().enumerate() {
            n[i] = 0.25 * (1.0 + xi * xi_i) * (1.0 + eta * eta_i);
            dn_dxi[i] = 0.25 * xi_i * (1.0 + eta * eta_i);
            dn_deta[i] = 0.25 * eta_i * (1.0 + xi * xi_i);
        }
        Self { n, dn_dxi, dn_deta }
    }
}
