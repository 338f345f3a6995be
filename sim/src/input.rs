//! Operator input channels: three deadzoned axes accumulating a Cartesian
//! target, plus two passive wrist/gripper accumulators.

use nalgebra::Vector3;

const DEADZONE: f64 = 0.2;
const COORD_LIM: f64 = 500.0;
const AXIS_GAIN: f64 = 0.01;
const WRIST_GRIPPER_GAIN: f64 = 0.05;

fn deadzoned(value: f64) -> f64 {
    if value.abs() < DEADZONE {
        0.0
    } else {
        value
    }
}

/// Running operator target and the two passive accumulators.
pub struct OperatorState {
    pub target: Vector3<f64>,
    pub wrist: f64,
    pub gripper: f64,
}

impl OperatorState {
    pub fn new(initial_target: Vector3<f64>) -> Self {
        Self {
            target: initial_target,
            wrist: 0.0,
            gripper: 0.0,
        }
    }

    /// Apply one tick's raw axis input. `axes` are `(x, y, z)` in `[-1, 1]`;
    /// `wrist_axis`/`gripper_axis` are the two passive channel inputs.
    pub fn tick(&mut self, axes: (f64, f64, f64), wrist_axis: f64, gripper_axis: f64) {
        let (x, y, z) = axes;
        self.target.x += deadzoned(x) * AXIS_GAIN * COORD_LIM;
        self.target.y += deadzoned(y) * AXIS_GAIN * COORD_LIM;
        self.target.z += deadzoned(z) * AXIS_GAIN * COORD_LIM;

        self.wrist = (self.wrist + deadzoned(wrist_axis) * WRIST_GRIPPER_GAIN).clamp(-1.0, 1.0);
        self.gripper = (self.gripper + gripper_axis * WRIST_GRIPPER_GAIN).clamp(-1.0, 1.0);
    }
}
