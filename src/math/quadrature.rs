//! Gauss-Legendre rules on the reference square [-1, 1]²

use serde::{Deserialize, Serialize};

/// Tensor-product Gauss rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaussRule {
    /// Single point at the centroid, weight 4
    OnePoint,
    /// Points at ±1/√3, weight 1
    TwoByTwo,
}

impl GaussRule {
    /// Sample points as `(ξ, η, weight)` triples
    pub fn points(&self) -> Vec<(f64, f64, f64)> {
        match self {
            GaussRule::OnePoint => vec![(0.0, 0.0, 4.0)],
            GaussRule::TwoByTwo => {
                let gp = 1.0 / 3.0_f64.sqrt();
                vec![
                    (-gp, -gp, 1.0),
                    (gp, -gp, 1.0),
                    (gp, gp, 1.0),
                    (-gp, gp, 1.0),
                ]
            }
        }
    }
}

/// Where the uniform pressure load is sampled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadIntegration {
    /// The reduced shear rule (one point at the centroid)
    #[default]
    ShearRule,
    /// The full 2x2 bending rule
    FullRule,
}

impl LoadIntegration {
    /// Gauss rule used for the element force vector
    pub fn rule(&self) -> GaussRule {
        match self {
            LoadIntegration::ShearRule => GaussRule::OnePoint,
            LoadIntegration::FullRule => GaussRule::TwoByTwo,
        }
    }
}
