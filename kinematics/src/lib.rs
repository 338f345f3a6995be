//! Forward/inverse kinematics for a five-segment serial-chain manipulator:
//! a 4-DOF arm on a rotating base, with a passively-carried wrist and
//! gripper. The core is a pure, single-threaded computation invoked once
//! per tick by an external driver loop — see `solver::IkSolver`.

pub mod angles;
pub mod chain;
pub mod config;
pub mod debug_stream;
pub mod error;
pub mod frame;
pub mod planarizer;
pub mod posture;
pub mod servo;
pub mod solver;

pub use chain::{Axis, Chain, Joint, JointId};
pub use config::{ArmModel, ChainConfig, PosturePolicyConfig};
pub use error::KinematicsError;
pub use frame::{propagate, ChainPose, JointAngles, Pose};
pub use posture::{PostureBranch, PosturePolicy};
pub use servo::{ServoMapper, ServoSink};
pub use solver::IkSolver;
