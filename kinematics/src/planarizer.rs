//! Reduces the 3D IK problem to 2D by choosing the base yaw (J6) so the
//! remaining chain lies in a single vertical half-plane through the target.

use std::f64::consts::PI;

use nalgebra::{Vector2, Vector3};

/// A target reduced into J5's arm plane: `x'` is horizontal reach, `z'` is height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarTarget {
    pub point: Vector2<f64>,
    pub yaw_turns: f64,
}

/// Choose J6's yaw so the shoulder-arm plane points at `target`, and project
/// `target` into that plane with `shoulder_origin` (J5's world origin) at its
/// local (0, 0).
pub fn planarize(shoulder_origin: Vector3<f64>, target: Vector3<f64>) -> PlanarTarget {
    let s = shoulder_origin.xy();
    let t = target.xy();
    let delta = t - s;
    let yaw = delta.y.atan2(delta.x);

    let yaw_turns = (yaw / PI + 1.0) / 2.0;

    // translate by -shoulder_origin, rotate about world -Z by `yaw`, drop Y.
    let relative = target - shoulder_origin;
    let (s_yaw, c_yaw) = yaw.sin_cos();
    // rotation about -Z by `yaw` is rotation about +Z by `-yaw`
    let x_prime = relative.x * c_yaw + relative.y * s_yaw;
    let z_prime = relative.z;

    PlanarTarget {
        point: Vector2::new(x_prime, z_prime),
        yaw_turns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_on_x_axis_needs_no_yaw() {
        let shoulder = Vector3::new(0.0, 0.0, 50.0);
        let target = Vector3::new(300.0, 0.0, 100.0);
        let planar = planarize(shoulder, target);
        assert!((planar.yaw_turns - 0.5).abs() < 1e-9);
        assert!((planar.point.x - 300.0).abs() < 1e-6);
        assert!((planar.point.y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn target_on_y_axis_yaws_a_quarter_turn() {
        let shoulder = Vector3::zeros();
        let target = Vector3::new(0.0, 250.0, 0.0);
        let planar = planarize(shoulder, target);
        assert!((planar.yaw_turns - 0.75).abs() < 1e-9);
        // after rotating into the plane, the full 250mm reach lands on the horizontal axis
        assert!((planar.point.x - 250.0).abs() < 1e-6);
        assert!(planar.point.y.abs() < 1e-9);
    }

    #[test]
    fn planar_reduction_preserves_distance_to_shoulder() {
        let shoulder = Vector3::new(1.0, 2.0, 3.0);
        let target = Vector3::new(120.0, -40.0, 70.0);
        let planar = planarize(shoulder, target);
        let direct = (target - shoulder).norm();
        let planar_dist = (planar.point.x.powi(2) + planar.point.y.powi(2)).sqrt();
        assert!((planar_dist - direct).abs() < 1e-6);
    }
}
