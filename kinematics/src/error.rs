use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors surfaced by the kinematics core.
///
/// Each tick is independent; there is no global error state carried between
/// calls. `Infeasible` is an ordinary, expected outcome (an out-of-reach
/// target), everything else indicates a programmer error or a transport
/// failure bubbled up from outside the core.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Target was out of reach, or the planar solve failed to close onto it.
    Infeasible,
    /// Forward kinematics hit a zero-length row while renormalising a basis.
    DegenerateBasis,
    /// Bubbled up from a `ServoSink`; the core does not retry.
    TransportError(String),
    /// A NaN or infinite value appeared in the commanded joint vector.
    NonFinite,
}

impl Error for KinematicsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::Infeasible => write!(f, "target is not reachable by the chain"),
            KinematicsError::DegenerateBasis => {
                write!(f, "forward kinematics encountered a degenerate (zero-length) basis row")
            }
            KinematicsError::TransportError(msg) => write!(f, "servo transport error: {}", msg),
            KinematicsError::NonFinite => {
                write!(f, "commanded joint vector contains a non-finite value")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(
            KinematicsError::Infeasible.to_string(),
            "target is not reachable by the chain"
        );
        assert_eq!(
            KinematicsError::DegenerateBasis.to_string(),
            "forward kinematics encountered a degenerate (zero-length) basis row"
        );
        assert_eq!(
            KinematicsError::TransportError("serial port closed".into()).to_string(),
            "servo transport error: serial port closed"
        );
        assert_eq!(
            KinematicsError::NonFinite.to_string(),
            "commanded joint vector contains a non-finite value"
        );
    }

    #[test]
    fn round_trips_through_serde_json() {
        let err = KinematicsError::TransportError("timeout".into());
        let json = serde_json::to_string(&err).unwrap();
        let back: KinematicsError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
