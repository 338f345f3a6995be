//! Forward kinematics: per-joint world-space origin and orthonormal basis
//! from the joint-angle vector.

use std::f64::consts::PI;

use nalgebra::{Matrix3, Vector3};

use crate::chain::{Chain, JointId};
use crate::error::KinematicsError;

const BASIS_ZERO_TOLERANCE: f64 = 1e-12;

/// Five joint angles in unit turns (1.0 = 360 degrees), indexed `[Base, J6, J5, J4, J3]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAngles(pub [f64; 5]);

impl JointAngles {
    /// All joints at their neutral angle (1.0 turn).
    pub fn neutral() -> Self {
        JointAngles([1.0; 5])
    }

    pub fn get(&self, id: JointId) -> f64 {
        self.0[id.index()]
    }

    pub fn set(&mut self, id: JointId, value: f64) {
        self.0[id.index()] = value;
    }

    pub fn all_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/// A joint's world-space frame: origin plus an orthonormal basis whose rows
/// are local X, Y, Z expressed in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub origin: Vector3<f64>,
    pub basis: Matrix3<f64>,
}

impl Pose {
    fn identity_at_origin() -> Self {
        Pose {
            origin: Vector3::zeros(),
            basis: Matrix3::identity(),
        }
    }

    /// Local +Z row — the direction from this joint's origin towards its child.
    pub fn forward(&self) -> Vector3<f64> {
        self.basis.row(2).transpose()
    }
}

/// Rodrigues' rotation formula: rotate `v` about unit `axis` by `angle` radians.
fn rotate_rodrigues(v: Vector3<f64>, axis: Vector3<f64>, angle: f64) -> Vector3<f64> {
    let (s, c) = angle.sin_cos();
    v * c + axis.cross(&v) * s + axis * axis.dot(&v) * (1.0 - c)
}

/// The world-space frames of all five joints plus the end-effector position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainPose {
    pub joints: [Pose; 5],
    pub end_effector: Vector3<f64>,
}

impl ChainPose {
    pub fn joint(&self, id: JointId) -> &Pose {
        &self.joints[id.index()]
    }
}

/// Forward kinematics: propagate `angles` down `chain` into world-space frames.
///
/// Total over finite inputs. Fails only if renormalisation of a rotated
/// basis row encounters a zero-length vector, which indicates upstream data
/// corruption rather than an ordinary runtime condition.
pub fn propagate(chain: &Chain, angles: &JointAngles) -> Result<ChainPose, KinematicsError> {
    let mut poses = [Pose::identity_at_origin(); 5];

    for &id in &JointId::ALL[1..] {
        let joint = chain.descriptor(id);
        let parent_id = joint.parent.expect("non-root joint always has a parent");
        let parent_pose = poses[parent_id.index()];

        let axis_row = joint.axis_of_rotation.row();
        let world_axis = (parent_pose.basis.row(axis_row).transpose() * joint.axis_of_rotation.sign())
            .normalize();

        let angle_rad = angles.get(id) * 2.0 * PI;

        let mut rows = [Vector3::zeros(); 3];
        for r in 0..3 {
            if r == axis_row {
                rows[r] = parent_pose.basis.row(r).transpose();
            } else {
                let rotated = rotate_rodrigues(parent_pose.basis.row(r).transpose(), world_axis, angle_rad);
                let norm = rotated.norm();
                if norm < BASIS_ZERO_TOLERANCE {
                    tracing::warn!(joint = ?id, "degenerate basis row during forward kinematics");
                    return Err(KinematicsError::DegenerateBasis);
                }
                rows[r] = rotated / norm;
            }
        }
        let basis = Matrix3::from_rows(&[rows[0].transpose(), rows[1].transpose(), rows[2].transpose()]);

        let lateral_offset = lateral_offset_for(chain, id, &basis);
        let parent_length = chain.descriptor(parent_id).length;
        let origin = parent_pose.origin + parent_pose.forward() * parent_length + lateral_offset;

        poses[id.index()] = Pose { origin, basis };
    }

    let tip = chain.descriptor(JointId::J3);
    let tip_pose = poses[JointId::J3.index()];
    let end_effector = tip_pose.origin + tip_pose.forward() * tip.length;

    Ok(ChainPose { joints: poses, end_effector })
}

/// The two named lateral-offset exceptions to the general FK recurrence.
fn lateral_offset_for(chain: &Chain, id: JointId, own_basis: &Matrix3<f64>) -> Vector3<f64> {
    match id {
        JointId::J6 => Vector3::new(chain.config.base_lateral_offset, 0.0, 0.0),
        JointId::J5 => {
            let local_y = own_basis.row(1).transpose();
            let rotated = rotate_rodrigues(local_y, Vector3::z(), PI / 2.0);
            rotated * chain.config.j5_lateral_offset
        }
        _ => Vector3::zeros(),
    }
}
