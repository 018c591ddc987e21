//! Plate material properties

use serde::{Deserialize, Serialize};

use crate::error::{PlateError, PlateResult};

/// Isotropic elastic material and thickness of the plate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateMaterial {
    /// Modulus of elasticity (Young's modulus)
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Shear modulus, derived from `e` and `nu` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g: Option<f64>,
    /// Plate thickness
    pub thickness: f64,
}

impl PlateMaterial {
    /// Create a new material with an explicit shear modulus
    pub fn new(e: f64, nu: f64, g: f64, thickness: f64) -> Self {
        Self {
            e,
            nu,
            g: Some(g),
            thickness,
        }
    }

    /// Create a new isotropic material from E and nu
    /// G is calculated as E / (2 * (1 + nu))
    pub fn isotropic(e: f64, nu: f64, thickness: f64) -> Self {
        Self {
            e,
            nu,
            g: None,
            thickness,
        }
    }

    /// Shear modulus G
    pub fn shear_modulus(&self) -> f64 {
        self.g.unwrap_or_else(|| self.e / (2.0 * (1.0 + self.nu)))
    }

    /// Flexural rigidity D = E t³ / 12(1 - ν²)
    pub fn flexural_rigidity(&self) -> f64 {
        self.e * self.thickness.powi(3) / (12.0 * (1.0 - self.nu * self.nu))
    }

    /// Reject non-physical material constants
    pub fn validate(&self) -> PlateResult<()> {
        let finite = [self.e, self.nu, self.thickness]
            .iter()
            .chain(self.g.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(PlateError::InvalidInput(
                "material constants must be finite".to_string(),
            ));
        }
        if self.e <= 0.0 {
            return Err(PlateError::InvalidInput(format!(
                "elastic modulus must be positive, got {}",
                self.e
            )));
        }
        if !(0.0..0.5).contains(&self.nu) {
            return Err(PlateError::InvalidInput(format!(
                "Poisson's ratio must lie in [0, 0.5), got {}",
                self.nu
            )));
        }
        if self.thickness <= 0.0 {
            return Err(PlateError::InvalidInput(format!(
                "thickness must be positive, got {}",
                self.thickness
            )));
        }
        if let Some(g) = self.g {
            if g <= 0.0 {
                return Err(PlateError::InvalidInput(format!(
                    "shear modulus must be positive, got {}",
                    g
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_shear_modulus() {
        let mat = PlateMaterial::isotropic(10920.0, 0.3, 0.1);
        assert_relative_eq!(mat.shear_modulus(), 4200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_supplied_shear_modulus() {
        let mat = PlateMaterial::new(10920.0, 0.3, 5000.0, 0.1);
        assert_eq!(mat.shear_modulus(), 5000.0);
    }

    #[test]
    fn test_flexural_rigidity() {
        // 10920 * 0.001 / (12 * 0.91) = 1.0
        let mat = PlateMaterial::isotropic(10920.0, 0.3, 0.1);
        assert_relative_eq!(mat.flexural_rigidity(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_validation() {
        assert!(PlateMaterial::isotropic(10920.0, 0.3, 0.1).validate().is_ok());
        assert!(PlateMaterial::isotropic(0.0, 0.3, 0.1).validate().is_err());
        assert!(PlateMaterial::isotropic(10920.0, 0.5, 0.1).validate().is_err());
        assert!(PlateMaterial::isotropic(10920.0, 0.3, -0.1).validate().is_err());
        assert!(PlateMaterial::isotropic(f64::NAN, 0.3, 0.1).validate().is_err());
        assert!(PlateMaterial::new(10920.0, 0.3, 0.0, 0.1).validate().is_err());
    }
}
