//! Converts a sequence of planar joint positions back into the chain's
//! native angle parameterisation (turns, neutral 1.0).

use std::f64::consts::PI;

use nalgebra::Vector2;

/// Reconstruct per-joint angles from consecutive planar endpoints.
///
/// `points` must be base-to-tip: `[P5=(0,0), P4, P3, P_tip]`. Returns one
/// angle per consecutive pair, in order — for this chain that assigns
/// `[J5, J4, J3]`.
pub fn reconstruct_angles(points: &[Vector2<f64>; 4]) -> [f64; 3] {
    let mut cum_rot = 0.0;
    let mut out = [0.0; 3];

    for i in 0..3 {
        let curr = points[i];
        let next = points[i + 1];
        let delta = next - curr;
        let v = delta / delta.norm();
        let rot = v.x.atan2(v.y) - cum_rot;
        out[i] = rot / PI * 0.5 + 1.0;
        cum_rot += rot;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_chain_along_z_reconstructs_neutral_angles() {
        // a fully straight arm pointing along +Z (the planar "up" axis) should
        // reconstruct to the neutral angle (1.0) for every joint.
        let points = [
            Vector2::new(0.0, 0.0),
            Vector2::new(0.0, 98.0),
            Vector2::new(0.0, 194.0),
            Vector2::new(0.0, 344.0),
        ];
        let angles = reconstruct_angles(&points);
        for a in angles {
            assert!((a - 1.0).abs() < 1e-9, "expected neutral angle, got {a}");
        }
    }

    #[test]
    fn angles_stay_within_native_half_turn_range() {
        let points = [
            Vector2::new(0.0, 0.0),
            Vector2::new(80.0, 50.0),
            Vector2::new(60.0, 140.0),
            Vector2::new(-40.0, 200.0),
        ];
        let angles = reconstruct_angles(&points);
        for a in angles {
            assert!((0.5..=1.5).contains(&a), "angle {a} outside native range");
        }
    }
}
