//! Top-level inverse-kinematics orchestration: planarize, solve the planar
//! chain, reconstruct angles, classify feasibility.

use nalgebra::{Vector2, Vector3};
use tracing::{debug, instrument};

use crate::angles::reconstruct_angles;
use crate::chain::{Chain, JointId};
use crate::error::KinematicsError;
use crate::frame::{self, ChainPose, JointAngles};
use crate::planarizer::planarize;
use crate::posture::{solve_planar_chain, PosturePolicy};

const REACH_TOLERANCE: f64 = 10.0;

/// Drives repeated `solve()` calls, retaining the commanded joint vector
/// between ticks so a bad solve leaves the arm exactly where it was.
pub struct IkSolver {
    chain: Chain,
    policy: PosturePolicy,
    last_commanded: JointAngles,
}

impl IkSolver {
    pub fn new(chain: Chain) -> Self {
        let policy = PosturePolicy::from(chain.config.posture);
        Self {
            chain,
            policy,
            last_commanded: JointAngles::neutral(),
        }
    }

    pub fn last_commanded(&self) -> JointAngles {
        self.last_commanded
    }

    /// Solve for `target`. On `Infeasible`, `last_commanded` is left
    /// untouched and the error is returned without updating any state.
    #[instrument(skip(self), fields(target = ?target))]
    pub fn solve(&mut self, target: Vector3<f64>) -> Result<JointAngles, KinematicsError> {
        // The shoulder origin used to planarize is read from the chain's
        // current (previous-tick) pose rather than re-derived from the
        // target being solved for: J5's origin depends on J6's own angle by
        // a few millimetres (the named lateral offset), and re-deriving it
        // from the yet-unknown solution would be circular. The error this
        // introduces is bounded by the lateral offset magnitude and is
        // within the solver's own closure tolerance.
        let current_pose = frame::propagate(&self.chain, &self.last_commanded)?;
        let shoulder_origin = current_pose.joint(JointId::J5).origin;

        let planar = planarize(shoulder_origin, target);

        let l3 = self.chain.descriptor(JointId::J3).length;
        let l4 = self.chain.descriptor(JointId::J4).length;
        let l5 = self.chain.descriptor(JointId::J5).length;

        let reach = self.chain.r_max();
        if planar.point.norm() > reach + REACH_TOLERANCE {
            debug!(distance = planar.point.norm(), reach, "target beyond total reach");
            return Err(KinematicsError::Infeasible);
        }

        // processed tip-inward: nearest the tip (L3) first, nearest the
        // shoulder (L5) last. The last placement should land back on J5's
        // own origin, (0, 0) in this plane.
        let solve = solve_planar_chain(planar.point, &[l3, l4, l5], &self.policy);

        let origin_closure = solve.links.last().map(|l| l.endpoint.norm()).unwrap_or(f64::INFINITY);
        if !solve.feasible || origin_closure > REACH_TOLERANCE {
            debug!(origin_closure, "planar solve failed to close onto the shoulder origin");
            return Err(KinematicsError::Infeasible);
        }

        for link in &solve.links {
            debug!(branch = ?link.branch, "posture branch selected");
        }

        let p3 = solve.links[0].endpoint;
        let p4 = solve.links[1].endpoint;
        let points_base_to_tip: [Vector2<f64>; 4] = [Vector2::new(0.0, 0.0), p4, p3, planar.point];
        let [a5, a4, a3] = reconstruct_angles(&points_base_to_tip);

        let mut joints = self.last_commanded;
        joints.set(JointId::J6, planar.yaw_turns);
        joints.set(JointId::J5, a5);
        joints.set(JointId::J4, a4);
        joints.set(JointId::J3, a3);

        if !joints.all_finite() {
            return Err(KinematicsError::NonFinite);
        }

        self.last_commanded = joints;
        Ok(joints)
    }

    /// Forward kinematics of the currently-commanded joint vector.
    pub fn current_pose(&self) -> Result<ChainPose, KinematicsError> {
        frame::propagate(&self.chain, &self.last_commanded)
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solver() -> IkSolver {
        IkSolver::new(Chain::default())
    }

    #[test]
    fn scenario_1_reachable_target_in_plane() {
        let mut solver = solver();
        let joints = solver.solve(Vector3::new(200.0, 0.0, 100.0)).expect("should be reachable");
        let pose = frame::propagate(solver.chain(), &joints).unwrap();
        let error = (pose.end_effector - Vector3::new(200.0, 0.0, 100.0)).norm();
        assert!(error < 1.0, "FK(IK(target)) error too large: {error}");
        assert!((joints.get(JointId::J6) - 0.5).abs() < 0.05);
    }

    #[test]
    fn scenario_2_target_off_the_x_axis_yaws_j6() {
        let mut solver = solver();
        let joints = solver.solve(Vector3::new(0.0, 200.0, 150.0)).expect("should be reachable");
        assert!((joints.get(JointId::J6) - 0.75).abs() < 0.05);
    }

    #[test]
    fn scenario_4_target_beyond_reach_is_infeasible() {
        let mut solver = solver();
        let before = solver.last_commanded();
        let result = solver.solve(Vector3::new(500.0, 0.0, 400.0));
        assert_eq!(result, Err(KinematicsError::Infeasible));
        assert_eq!(solver.last_commanded(), before, "commanded joints must not change on Infeasible");
    }

    #[test]
    fn scenario_5_close_target_produces_finite_joints() {
        let mut solver = solver();
        let joints = solver.solve(Vector3::new(10.0, 0.0, 60.0)).expect("should be reachable");
        assert!(joints.all_finite());
    }
}
