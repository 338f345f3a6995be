//! Static description of the five-joint chain.
//!
//! Descriptors are built once at startup from a `ChainConfig` and never
//! mutated afterwards; only the joint-state vector varies per tick.

use nalgebra::Vector3;

use crate::config::ChainConfig;

/// Stable identifier for each joint, also the joint-state vector's index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JointId {
    Base = 0,
    J6 = 1,
    J5 = 2,
    J4 = 3,
    J3 = 4,
}

impl JointId {
    pub const ALL: [JointId; 5] = [JointId::Base, JointId::J6, JointId::J5, JointId::J4, JointId::J3];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One of the three world-axis directions a joint can rotate about, expressed
/// in its parent's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
    NegX,
    NegY,
    NegZ,
}

impl Axis {
    /// Index into a basis's rows (0=X, 1=Y, 2=Z) that this axis is parallel to.
    pub fn row(self) -> usize {
        match self {
            Axis::X | Axis::NegX => 0,
            Axis::Y | Axis::NegY => 1,
            Axis::Z | Axis::NegZ => 2,
        }
    }

    /// +1 for a positive axis, -1 for its negation.
    pub fn sign(self) -> f64 {
        match self {
            Axis::X | Axis::Y | Axis::Z => 1.0,
            Axis::NegX | Axis::NegY | Axis::NegZ => -1.0,
        }
    }
}

/// Immutable, per-joint geometry set at construction.
#[derive(Debug, Clone)]
pub struct Joint {
    pub id: JointId,
    pub parent: Option<JointId>,
    pub axis_of_rotation: Axis,
    pub initial_direction: Vector3<f64>,
    pub length: f64,
}

/// The five-joint chain, parent-first: `Base, J6, J5, J4, J3`.
#[derive(Debug, Clone)]
pub struct Chain {
    joints: [Joint; 5],
    pub config: ChainConfig,
}

impl Chain {
    pub fn from_config(config: ChainConfig) -> Self {
        let joints = [
            Joint {
                id: JointId::Base,
                parent: None,
                axis_of_rotation: Axis::Z,
                initial_direction: Vector3::z(),
                length: config.l_base,
            },
            Joint {
                id: JointId::J6,
                parent: Some(JointId::Base),
                axis_of_rotation: Axis::Z,
                initial_direction: Vector3::z(),
                length: config.l_j6,
            },
            Joint {
                id: JointId::J5,
                parent: Some(JointId::J6),
                axis_of_rotation: Axis::Y,
                initial_direction: Vector3::z(),
                length: config.l5,
            },
            Joint {
                id: JointId::J4,
                parent: Some(JointId::J5),
                axis_of_rotation: Axis::Y,
                initial_direction: Vector3::z(),
                length: config.l4,
            },
            Joint {
                id: JointId::J3,
                parent: Some(JointId::J4),
                axis_of_rotation: Axis::Y,
                initial_direction: Vector3::z(),
                length: config.l3,
            },
        ];
        Self { joints, config }
    }

    pub fn descriptor(&self, id: JointId) -> &Joint {
        &self.joints[id.index()]
    }

    /// Total geometric reach of the three planar links, `L5 + L4 + L3`.
    pub fn r_max(&self) -> f64 {
        self.config.r_max()
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::from_config(ChainConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_are_parent_first() {
        let chain = Chain::default();
        assert_eq!(chain.descriptor(JointId::Base).parent, None);
        assert_eq!(chain.descriptor(JointId::J6).parent, Some(JointId::Base));
        assert_eq!(chain.descriptor(JointId::J5).parent, Some(JointId::J6));
        assert_eq!(chain.descriptor(JointId::J4).parent, Some(JointId::J5));
        assert_eq!(chain.descriptor(JointId::J3).parent, Some(JointId::J4));
    }

    #[test]
    fn r_max_sums_the_three_planar_links() {
        let chain = Chain::default();
        assert!((chain.r_max() - 344.0).abs() < 1e-9);
    }
}
