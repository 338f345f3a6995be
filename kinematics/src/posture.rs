//! The planar multi-link solver: places three link endpoints on circles
//! defined by the law of cosines, shaped by a posture-shaping policy that
//! picks among the redundant family of solutions.

use nalgebra::Vector2;

use crate::config::PosturePolicyConfig;

/// Which of the five posture-shaping cases fired for a given link. Used only
/// for diagnostics (debug stream, logging); never changes the math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostureBranch {
    CloseToOrigin,
    CenterOfGravity,
    ReduceLength,
    Graded,
    Default,
}

/// Named, empirical posture-shaping constants. See `PosturePolicyConfig` for
/// the serializable form this is built from.
#[derive(Debug, Clone, Copy)]
pub struct PosturePolicy {
    pub rem_extend_coeff: f64,
    pub blend_window_coeff: f64,
    pub blend_span_coeff: f64,
    pub blend_midpoint: f64,
    pub rem_min_coeff: f64,
    pub rem_max_coeff: f64,
}

impl From<PosturePolicyConfig> for PosturePolicy {
    fn from(cfg: PosturePolicyConfig) -> Self {
        Self {
            rem_extend_coeff: cfg.rem_extend_coeff,
            blend_window_coeff: cfg.blend_window_coeff,
            blend_span_coeff: cfg.blend_span_coeff,
            blend_midpoint: cfg.blend_midpoint,
            rem_min_coeff: cfg.rem_min_coeff,
            rem_max_coeff: cfg.rem_max_coeff,
        }
    }
}

impl Default for PosturePolicy {
    fn default() -> Self {
        PosturePolicyConfig::default().into()
    }
}

impl PosturePolicy {
    /// Pick `mp` (distance from the origin to the foot of the chord) for one
    /// link, given the natural two-circle `mp`. `l_rem` is the summed length
    /// of links still to be placed further inward (zero for the innermost
    /// link, which naturally disqualifies the three `l_rem > d` cases).
    /// Returns `(mp, rem, branch, exceeded)`: `mp` is the foot-of-perpendicular
    /// distance along `prev` used for the endpoint's position, `rem = d - mp`
    /// except in the default case, where the spec keeps `mp` natural and
    /// clamps only the `rem` fed into the half-chord height `h`.
    fn shape(&self, d: f64, r: f64, l_rem: f64, natural_mp: f64) -> (f64, f64, PostureBranch, bool) {
        let rem_extend = self.rem_extend_coeff * r;
        let rem_min = self.rem_min_coeff * r;
        let rem_max = self.rem_max_coeff * r;
        let natural_rem = d - natural_mp;

        if d < r {
            let mp = d - (rem_extend - (r - d));
            return (mp, d - mp, PostureBranch::CloseToOrigin, false);
        }

        if natural_rem < rem_extend && l_rem > d {
            let mp = d - rem_extend;
            return (mp, d - mp, PostureBranch::CenterOfGravity, false);
        }

        if natural_rem < 0.0 && l_rem > d {
            return (d, 0.0, PostureBranch::ReduceLength, false);
        }

        let blend_window = self.blend_window_coeff * rem_extend;
        if natural_rem >= rem_extend && natural_rem < blend_window && l_rem > d {
            let mut v = (natural_rem - rem_extend) / (self.blend_span_coeff * r);
            if v > 0.4 {
                v -= v - self.blend_midpoint;
            }
            let mp = d - (v * r + rem_extend);
            return (mp, d - mp, PostureBranch::Graded, false);
        }

        let clamped_rem = natural_rem.clamp(rem_min, rem_max);
        let exceeded = natural_rem > rem_max;
        (natural_mp, clamped_rem, PostureBranch::Default, exceeded)
    }
}

/// One solved link: its placed endpoint and which posture branch fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedLink {
    pub endpoint: Vector2<f64>,
    pub branch: PostureBranch,
}

/// Outcome of the planar multi-link solve.
#[derive(Debug, Clone)]
pub struct PlanarSolve {
    /// Endpoints in outer-to-inner order, matching `link_lengths`: one entry
    /// per link, each nearer the origin than the last. The final entry is
    /// the innermost link's endpoint.
    pub links: Vec<SolvedLink>,
    pub feasible: bool,
}

const CHAIN_CLOSURE_TOLERANCE: f64 = 10.0;

/// Solve the planar multi-link chain: place `link_lengths.len()` endpoints
/// starting at `tip` and working inward to the origin, shaped by `policy`.
///
/// `link_lengths` is outer-to-inner, e.g. `[L5, L4, L3]` when called with
/// `tip` equal to the planarized target — see `solve_arm` for the concrete
/// J5/J4/J3 wiring, including tip-closure against the true target.
pub fn solve_planar_chain(tip: Vector2<f64>, link_lengths: &[f64], policy: &PosturePolicy) -> PlanarSolve {
    let mut prev = tip;
    let mut links = Vec::with_capacity(link_lengths.len());
    let mut feasible = true;

    for (i, &r) in link_lengths.iter().enumerate() {
        let l_rem: f64 = link_lengths[i + 1..].iter().sum();

        let placement = place_link(prev, r, l_rem, policy);
        if placement.rem_exceeded_max {
            feasible = false;
        }

        let closure_error = ((placement.next - prev).norm() - r).abs();
        if closure_error > CHAIN_CLOSURE_TOLERANCE {
            feasible = false;
        }

        links.push(SolvedLink {
            endpoint: placement.next,
            branch: placement.branch,
        });
        prev = placement.next;
    }

    PlanarSolve { links, feasible }
}

struct LinkPlacement {
    next: Vector2<f64>,
    branch: PostureBranch,
    rem_exceeded_max: bool,
}

fn place_link(prev: Vector2<f64>, r: f64, l_rem: f64, policy: &PosturePolicy) -> LinkPlacement {
    let d = prev.norm();

    if d < 1e-12 {
        // `prev` sits at the origin; any direction serves equally well.
        return LinkPlacement {
            next: Vector2::new(r, 0.0),
            branch: PostureBranch::Default,
            rem_exceeded_max: false,
        };
    }

    let natural_mp = (d * d - r * r + l_rem * l_rem) / (2.0 * d);
    let (mp, rem, branch, exceeded) = policy.shape(d, r, l_rem, natural_mp);

    let h_sq = r * r - rem.powi(2);
    let h = if h_sq > 0.0 { h_sq.sqrt() } else { 0.0 };

    let mag = prev / d;
    let perp_angle = mag.y.atan2(mag.x) - std::f64::consts::FRAC_PI_2;
    let perp = Vector2::new(perp_angle.cos(), perp_angle.sin());

    LinkPlacement {
        next: mag * mp + perp * h,
        branch,
        rem_exceeded_max: exceeded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_reach_uses_default_branch() {
        let policy = PosturePolicy::default();
        let lengths = [98.0, 96.0, 150.0];
        let tip = Vector2::new(344.0 * 0.95, 0.0);
        let solve = solve_planar_chain(tip, &lengths, &policy);
        assert!(solve.feasible);
        assert_eq!(solve.links.len(), 3);
    }

    #[test]
    fn very_close_target_triggers_close_to_origin() {
        let policy = PosturePolicy::default();
        let lengths = [98.0, 96.0, 150.0];
        let tip = Vector2::new(10.0, 60.0);
        let solve = solve_planar_chain(tip, &lengths, &policy);
        assert!(solve.links.iter().any(|l| l.branch == PostureBranch::CloseToOrigin));
    }

    #[test]
    fn unreachable_target_is_marked_infeasible() {
        let policy = PosturePolicy::default();
        let lengths = [98.0, 96.0, 150.0];
        let tip = Vector2::new(10_000.0, 0.0);
        let solve = solve_planar_chain(tip, &lengths, &policy);
        assert!(!solve.feasible);
    }

    #[test]
    fn each_link_closes_to_its_own_radius() {
        let policy = PosturePolicy::default();
        let lengths = [98.0, 96.0, 150.0];
        let tip = Vector2::new(200.0, 50.0);
        let solve = solve_planar_chain(tip, &lengths, &policy);
        let mut prev = tip;
        for (link, &r) in solve.links.iter().zip(lengths.iter()) {
            assert!(((link.endpoint - prev).norm() - r).abs() < CHAIN_CLOSURE_TOLERANCE);
            prev = link.endpoint;
        }
    }
}
