//! Servo mapper: converts native joint-turn angles into the transport's
//! absolute device units, rate-limiting the base joint's commanded change.

use crate::chain::JointId;
use crate::error::KinematicsError;
use crate::frame::JointAngles;

/// Flip-sign table for `[J6, J5, J4, J3]`, applied after the degree-wrap scale.
const FLIP_SIGN: [f64; 4] = [1.0, 1.0, -1.0, 1.0];

/// Device full-turn scale: `0.450 / 0.250`.
const DEVICE_SCALE: f64 = 0.450 / 0.250;

/// Maximum per-second change allowed for the base (J6) channel, in device units.
const J6_RATE_LIMIT_PER_SEC: f64 = 1.0 / 1.0; // 1 unit per 1000 ms

/// Downstream consumer of commanded servo positions. Implemented outside the
/// core; the core only calls it.
pub trait ServoSink {
    /// Command 6 channels (4 arm + wrist + gripper) to reach absolute
    /// positions, in device units, over `duration_ms`.
    fn move_all(&mut self, values: [f64; 6], duration_ms: u32) -> Result<(), KinematicsError>;

    /// Drive to a safe parked pose.
    fn rest(&mut self) -> Result<(), KinematicsError>;
}

/// Converts native joint angles (and the two passive accumulator channels)
/// into a `ServoSink::move_all` payload, rate-limiting J6.
pub struct ServoMapper {
    last_j6_device: Option<f64>,
}

impl ServoMapper {
    pub fn new() -> Self {
        Self { last_j6_device: None }
    }

    /// `angles` are the four driven joints; `wrist`/`gripper` are the two
    /// passive accumulators in `[-1, 1]`. `dt_ms` is the elapsed time since
    /// the previous call, used to rate-limit J6.
    ///
    /// Returns `NonFinite` (and leaves internal rate-limit state untouched)
    /// if any driven joint angle is non-finite; the caller must not send
    /// anything to the transport for that tick.
    pub fn map(
        &mut self,
        angles: &JointAngles,
        wrist: f64,
        gripper: f64,
        dt_ms: u32,
    ) -> Result<[f64; 6], KinematicsError> {
        if !angles.all_finite() {
            return Err(KinematicsError::NonFinite);
        }

        let driven = [JointId::J6, JointId::J5, JointId::J4, JointId::J3];
        let mut device = [0.0; 4];
        for (i, &id) in driven.iter().enumerate() {
            device[i] = native_to_device(angles.get(id)) * FLIP_SIGN[i];
        }

        let j6_limited = match self.last_j6_device {
            Some(prev) => {
                let max_delta = J6_RATE_LIMIT_PER_SEC * (dt_ms as f64 / 1000.0);
                let delta = (device[0] - prev).clamp(-max_delta, max_delta);
                prev + delta
            }
            None => device[0],
        };
        self.last_j6_device = Some(j6_limited);

        Ok([j6_limited, device[1], device[2], device[3], wrist * DEVICE_SCALE, gripper * DEVICE_SCALE])
    }
}

impl Default for ServoMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// `deg = (angle - 1) * 360 + 180`, wrapped to `[0, 360)`, then scaled into
/// the device's `[-1.8, 1.8]` full-turn units. The `+180` recentres the
/// native neutral angle (1.0) onto device zero before the wrap.
fn native_to_device(angle_turns: f64) -> f64 {
    let deg = (angle_turns - 1.0) * 360.0 + 180.0;
    let wrapped = deg.rem_euclid(360.0);
    ((wrapped / 180.0) - 1.0) * DEVICE_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_angles_map_to_zero() {
        let angles = JointAngles::neutral();
        let mut mapper = ServoMapper::new();
        let out = mapper.map(&angles, 0.0, 0.0, 20).unwrap();
        for v in &out[..4] {
            assert!(v.abs() < 1e-9, "expected zero, got {v}");
        }
    }

    #[test]
    fn j4_flip_sign_is_negative() {
        let mut angles = JointAngles::neutral();
        angles.set(JointId::J4, 1.1);
        let mut mapper = ServoMapper::new();
        let out = mapper.map(&angles, 0.0, 0.0, 20).unwrap();
        assert!(out[2] < 0.0, "J4 channel should carry the -1 flip sign");
    }

    #[test]
    fn j6_rate_limit_caps_per_tick_delta() {
        let mut mapper = ServoMapper::new();
        let mut neutral = JointAngles::neutral();
        mapper.map(&neutral, 0.0, 0.0, 1000).unwrap();

        neutral.set(JointId::J6, 1.5); // as far as the native angle can swing
        let out = mapper.map(&neutral, 0.0, 0.0, 20).unwrap();
        assert!(out[0].abs() <= 0.02 + 1e-9, "J6 moved more than the 20ms rate limit allows: {}", out[0]);
    }

    #[test]
    fn non_finite_angle_is_rejected() {
        let mut angles = JointAngles::neutral();
        angles.set(JointId::J3, f64::NAN);
        let mut mapper = ServoMapper::new();
        let result = mapper.map(&angles, 0.0, 0.0, 20);
        assert_eq!(result, Err(KinematicsError::NonFinite));
    }
}
