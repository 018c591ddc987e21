//! Mindlin plate element math
//!
//! References:
//! - "Finite Element Procedures, 2nd Edition", Klaus-Jurgen Bathe, Section 5.4
//! - "The Finite Element Method", Zienkiewicz & Taylor, Vol. 2, Chapter 5
//!
//! The element is the 4-node bilinear isoparametric quadrilateral with
//! 3 DOFs per node (w, θx, θy), giving a 12x12 stiffness matrix.
//! Bending is integrated with the 2x2 Gauss rule and transverse shear with
//! the reduced 1-point rule (selective reduced integration), which keeps the
//! element free of shear locking in the thin limit.

use super::quadrature::{GaussRule, LoadIntegration};
use super::shape::ShapeFunctions;
use super::{Jacobian, Mat2, Mat2x12, Mat3, Mat3x12, Mat12, Vec12, Vec2, Vec3};
use crate::elements::PlateMaterial;
use crate::error::{PlateError, PlateResult};

/// Shear correction factor for a rectangular cross-section
pub const SHEAR_CORRECTION: f64 = 5.0 / 6.0;

/// Rule used for the bending stiffness
const BENDING_RULE: GaussRule = GaussRule::TwoByTwo;
/// Reduced rule used for the shear stiffness
const SHEAR_RULE: GaussRule = GaussRule::OnePoint;

/// Bending constitutive matrix [Db] = E t³ / 12(1 - ν²) · [[1, ν, 0], [ν, 1, 0], [0, 0, (1 - ν)/2]]
pub fn bending_rigidity_matrix(material: &PlateMaterial) -> Mat3 {
    let d = material.flexural_rigidity();
    let nu = material.nu;
    Mat3::new(
        d,      nu * d, 0.0,
        nu * d, d,      0.0,
        0.0,    0.0,    d * (1.0 - nu) / 2.0,
    )
}

/// Shear constitutive matrix [Ds] = κ G t · I₂
pub fn shear_rigidity_matrix(material: &PlateMaterial) -> Mat2 {
    Mat2::identity() * (SHEAR_CORRECTION * material.shear_modulus() * material.thickness)
}

/// Bending strain-displacement matrix [B_b]
///
/// Relates curvatures [κx, κy, κxy] to nodal DOFs (w, θx, θy at each node):
/// κx = -∂θy/∂x, κy = -∂θx/∂y, κxy = -∂θx/∂x - ∂θy/∂y
pub fn bending_b_matrix(dn_dx: &[f64; 4], dn_dy: &[f64; 4]) -> Mat3x12 {
    let mut b = Mat3x12::zeros();
    for i in 0..4 {
        let col_rx = 3 * i + 1;
        let col_ry = 3 * i + 2;

        b[(0, col_ry)] = -dn_dx[i];
        b[(1, col_rx)] = -dn_dy[i];
        b[(2, col_rx)] = -dn_dx[i];
        b[(2, col_ry)] = -dn_dy[i];
    }
    b
}

/// Shear strain-displacement matrix [B_s]
///
/// Relates transverse shear strains to nodal DOFs:
/// γxz = ∂w/∂x - θy, γyz = ∂w/∂y - θx
pub fn shear_b_matrix(n: &[f64; 4], dn_dx: &[f64; 4], dn_dy: &[f64; 4]) -> Mat2x12 {
    let mut b = Mat2x12::zeros();
    for i in 0..4 {
        let col_w = 3 * i;
        let col_rx = 3 * i + 1;
        let col_ry = 3 * i + 2;

        b[(0, col_w)] = dn_dx[i];
        b[(0, col_ry)] = -n[i];

        b[(1, col_w)] = dn_dy[i];
        b[(1, col_rx)] = -n[i];
    }
    b
}

/// Shape functions, Jacobian and physical derivatives at one sample point
struct SamplePoint {
    shape: ShapeFunctions,
    det_j: f64,
    dn_dx: [f64; 4],
    dn_dy: [f64; 4],
}

impl SamplePoint {
    fn new(x: &[f64; 4], y: &[f64; 4], xi: f64, eta: f64) -> PlateResult<Self> {
        let shape = ShapeFunctions::at(xi, eta);
        let jac = Jacobian::new(&shape.dn_dxi, &shape.dn_deta, x, y)?;
        // Clockwise node order maps the reference square inside out
        if jac.det < 0.0 {
            return Err(PlateError::DegenerateGeometry {
                element: None,
                det_j: jac.det,
            });
        }
        let (dn_dx, dn_dy) = jac.physical_derivatives(&shape.dn_dxi, &shape.dn_deta);
        Ok(Self {
            shape,
            det_j: jac.det,
            dn_dx,
            dn_dy,
        })
    }
}

/// Element stiffness matrix and consistent pressure load vector
#[derive(Debug, Clone, PartialEq)]
pub struct ElementMatrices {
    /// 12x12 stiffness [Ke]
    pub stiffness: Mat12,
    /// 12-element force vector {fe}; rotation slots are always zero
    pub force: Vec12,
}

/// Compute the element stiffness matrix and pressure load vector
///
/// # Arguments
/// * `x` - Corner x coordinates, counter-clockwise from the bottom-left corner
/// * `y` - Corner y coordinates in the same order
/// * `material` - Material constants and thickness
/// * `pressure` - Uniform transverse pressure (positive along +z)
/// * `load_integration` - Gauss rule at which the pressure is sampled
///
/// # Returns
/// `ElementMatrices` with [Ke] for DOFs w1, θx1, θy1, ..., w4, θx4, θy4
pub fn element_matrices(
    x: &[f64; 4],
    y: &[f64; 4],
    material: &PlateMaterial,
    pressure: f64,
    load_integration: LoadIntegration,
) -> PlateResult<ElementMatrices> {
    let db = bending_rigidity_matrix(material);
    let ds = shear_rigidity_matrix(material);

    let mut stiffness = Mat12::zeros();

    // Bending contribution (2x2 Gauss)
    for (xi, eta, weight) in BENDING_RULE.points() {
        let pt = SamplePoint::new(x, y, xi, eta)?;
        let bb = bending_b_matrix(&pt.dn_dx, &pt.dn_dy);
        stiffness += bb.transpose() * db * bb * (weight * pt.det_j);
    }

    // Shear contribution (reduced 1-point)
    for (xi, eta, weight) in SHEAR_RULE.points() {
        let pt = SamplePoint::new(x, y, xi, eta)?;
        let bs = shear_b_matrix(&pt.shape.n, &pt.dn_dx, &pt.dn_dy);
        stiffness += bs.transpose() * ds * bs * (weight * pt.det_j);
    }

    let mut force = Vec12::zeros();
    if pressure != 0.0 {
        for (xi, eta, weight) in load_integration.rule().points() {
            let pt = SamplePoint::new(x, y, xi, eta)?;
            for i in 0..4 {
                force[3 * i] += pt.shape.n[i] * pressure * weight * pt.det_j;
            }
        }
    }

    Ok(ElementMatrices { stiffness, force })
}

/// Bending moments [Mx, My, Mxy] and shear forces [Qx, Qy] per unit width
/// at the element centroid
///
/// # Arguments
/// * `x`, `y` - Corner coordinates in element order
/// * `material` - Material constants and thickness
/// * `displacements` - Element DOF vector (w, θx, θy per node)
pub fn element_resultants(
    x: &[f64; 4],
    y: &[f64; 4],
    material: &PlateMaterial,
    displacements: &Vec12,
) -> PlateResult<(Vec3, Vec2)> {
    let pt = SamplePoint::new(x, y, 0.0, 0.0)?;

    let curvature = bending_b_matrix(&pt.dn_dx, &pt.dn_dy) * displacements;
    let shear_strain = shear_b_matrix(&pt.shape.n, &pt.dn_dx, &pt.dn_dy) * displacements;

    let moments = bending_rigidity_matrix(material) * curvature;
    let shear = shear_rigidity_matrix(material) * shear_strain;

    Ok((moments, shear))
}
