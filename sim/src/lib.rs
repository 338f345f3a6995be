//! Demo driver loop for the kinematics core: a fixed-period tick exercising
//! `IkSolver` + `ServoMapper` against a stub `ServoSink`, with no real
//! hardware or GUI in the loop.

pub mod input;
pub mod servo_sink;

pub use input::OperatorState;
pub use servo_sink::LoggingServoSink;
