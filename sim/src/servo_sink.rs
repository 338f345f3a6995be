//! A `ServoSink` stub for the demo loop: logs commanded values instead of
//! writing to a serial/USB transport.

use kinematics::{KinematicsError, ServoSink};
use tracing::info;

pub struct LoggingServoSink;

impl ServoSink for LoggingServoSink {
    fn move_all(&mut self, values: [f64; 6], duration_ms: u32) -> Result<(), KinematicsError> {
        info!(?values, duration_ms, "move_all");
        Ok(())
    }

    fn rest(&mut self) -> Result<(), KinematicsError> {
        info!("rest");
        Ok(())
    }
}
