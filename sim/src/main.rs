//! Demo driver loop: exercises the kinematics core's tick pseudocode
//! (read operator input, solve IK, propagate FK, emit to a `ServoSink`)
//! against a scripted sequence of operator targets, with no real hardware
//! or GUI involved. Useful for smoke-testing a `ChainConfig` end to end.

use std::time::Instant;

use nalgebra::Vector3;
use tracing::{info, warn};

use kinematics::{Chain, ChainConfig, IkSolver, KinematicsError, ServoMapper, ServoSink};
use sim::{LoggingServoSink, OperatorState};

/// Ticks per simulated second. The real driver targets ~1ms; the demo runs
/// at a coarser rate so a short scripted run finishes quickly.
const TICK_MS: u64 = 20;

/// One scripted operator waypoint: hold `target` for `ticks` ticks before
/// advancing, observing how the rate-limited base joint and posture policy
/// respond as the target changes.
struct Waypoint {
    label: &'static str,
    target: Vector3<f64>,
    ticks: u32,
}

fn script() -> Vec<Waypoint> {
    vec![
        Waypoint { label: "reachable, dead ahead", target: Vector3::new(200.0, 0.0, 100.0), ticks: 10 },
        Waypoint { label: "quarter-turn yaw", target: Vector3::new(0.0, 200.0, 150.0), ticks: 10 },
        Waypoint { label: "near full reach", target: Vector3::new(400.0, 0.0, 50.0), ticks: 10 },
        Waypoint { label: "beyond reach", target: Vector3::new(500.0, 0.0, 400.0), ticks: 5 },
        Waypoint { label: "inside inner reach", target: Vector3::new(10.0, 0.0, 60.0), ticks: 10 },
        Waypoint { label: "swing to the opposite side", target: Vector3::new(-200.0, 0.0, 100.0), ticks: 30 },
    ]
}

/// Tracks elapsed wall-clock time between ticks, the way an FPS counter
/// would, so the servo mapper's rate limit sees a real `Δt` instead of a
/// hardcoded tick period.
struct Chronometer {
    last_tick: Instant,
    tick_count: u64,
}

impl Chronometer {
    fn new() -> Self {
        Self { last_tick: Instant::now(), tick_count: 0 }
    }

    fn tick(&mut self) -> u32 {
        let now = Instant::now();
        let dt_ms = now.duration_since(self.last_tick).as_millis() as u32;
        self.last_tick = now;
        self.tick_count += 1;
        dt_ms.max(1)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    info!("🤖 kinematics demo driver starting");

    let chain = Chain::from_config(ChainConfig::default());
    let mut solver = IkSolver::new(chain);
    let mut mapper = ServoMapper::new();
    let mut operator = OperatorState::new(Vector3::new(200.0, 0.0, 100.0));
    let mut sink = LoggingServoSink;
    let mut clock = Chronometer::new();

    let mut interval = tokio::time::interval(std::time::Duration::from_millis(TICK_MS));
    // the first tick fires immediately; consume it so dt on tick 1 is meaningful
    interval.tick().await;

    for waypoint in script() {
        info!(label = waypoint.label, target = ?waypoint.target, "🎯 advancing to waypoint");
        operator.target = waypoint.target;

        for _ in 0..waypoint.ticks {
            interval.tick().await;
            run_tick(&mut solver, &mut mapper, &operator, &mut sink, &mut clock);
        }
    }

    info!(ticks = clock.tick_count, "✓ demo driver finished");
}

/// One iteration of the §5 tick pseudocode: solve, propagate, map, emit.
/// A `solve_ik` failure leaves `solver`'s commanded joints exactly where
/// they were; this tick then maps and sends that unchanged configuration.
fn run_tick(
    solver: &mut IkSolver,
    mapper: &mut ServoMapper,
    operator: &OperatorState,
    sink: &mut dyn ServoSink,
    clock: &mut Chronometer,
) {
    let dt_ms = clock.tick();

    match solver.solve(operator.target) {
        Ok(_) => {}
        Err(KinematicsError::Infeasible) => {
            warn!(target = ?operator.target, "target infeasible this tick; holding previous pose");
        }
        Err(err) => {
            warn!(?err, "solve_ik failed unexpectedly");
            return;
        }
    }

    let joints = solver.last_commanded();
    match mapper.map(&joints, operator.wrist, operator.gripper, dt_ms) {
        Ok(values) => {
            if let Err(err) = sink.move_all(values, dt_ms) {
                warn!(?err, "servo sink rejected move_all");
            }
        }
        Err(KinematicsError::NonFinite) => {
            warn!("non-finite joint vector this tick; transport send skipped");
        }
        Err(err) => warn!(?err, "servo mapper failed unexpectedly"),
    }
}
