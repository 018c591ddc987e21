//! Edge support conditions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlateError;

/// Support condition applied uniformly to all four plate edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BoundaryCondition {
    /// Deflection restrained, rotation about the edge free
    SimplySupported,
    /// Deflection and both rotations restrained
    Clamped,
}

impl BoundaryCondition {
    /// Canonical name, as accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryCondition::SimplySupported => "simply-supported",
            BoundaryCondition::Clamped => "clamped",
        }
    }

    /// Local DOF slots restrained on an edge running parallel to the x axis
    /// (y_min, y_max)
    pub fn horizontal_edge_slots(&self) -> &'static [usize] {
        match self {
            BoundaryCondition::SimplySupported => &[0, 2],
            BoundaryCondition::Clamped => &[0, 1, 2],
        }
    }

    /// Local DOF slots restrained on an edge running parallel to the y axis
    /// (x_min, x_max)
    pub fn vertical_edge_slots(&self) -> &'static [usize] {
        match self {
            BoundaryCondition::SimplySupported => &[0, 1],
            BoundaryCondition::Clamped => &[0, 1, 2],
        }
    }
}

impl Default for BoundaryCondition {
    fn default() -> Self {
        Self::SimplySupported
    }
}

impl FromStr for BoundaryCondition {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simply-supported" | "ss" | "ss-ss-ss-ss" => Ok(Self::SimplySupported),
            "clamped" | "c" | "c-c-c-c" => Ok(Self::Clamped),
            _ => Err(PlateError::UnsupportedBoundaryConditionType(s.to_string())),
        }
    }
}

impl TryFrom<String> for BoundaryCondition {
    type Error = PlateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BoundaryCondition> for String {
    fn from(value: BoundaryCondition) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
