//! Plate model building blocks

mod material;
mod node;
mod quad;
mod support;

pub use material::PlateMaterial;
pub use node::Node;
pub use quad::{QuadElement, DOF_PER_NODE};
pub use support::BoundaryCondition;
