//! Optional, off-by-default per-tick visualisation stream. Not part of the
//! correctness surface — purely diagnostic, for a consumer to render.

use nalgebra::{Vector2, Vector3};

use crate::posture::PostureBranch;

/// A colour tag, matching the small fixed palette used to flag which
/// posture-shaping branch produced a given link placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugColor {
    Green,
    Black,
    Gray,
    Red,
    Orange,
    White,
}

impl From<PostureBranch> for DebugColor {
    fn from(branch: PostureBranch) -> Self {
        match branch {
            PostureBranch::CloseToOrigin => DebugColor::Orange,
            PostureBranch::CenterOfGravity => DebugColor::Green,
            PostureBranch::ReduceLength => DebugColor::Gray,
            PostureBranch::Graded => DebugColor::White,
            PostureBranch::Default => DebugColor::Black,
        }
    }
}

/// One labelled visual primitive for a single tick's solve.
#[derive(Debug, Clone)]
pub enum DebugPrimitive {
    Point { at: Vector3<f64>, color: DebugColor, label: Option<String> },
    Line { from: Vector3<f64>, to: Vector3<f64>, color: DebugColor },
    Disc { center: Vector3<f64>, radius: f64, color: DebugColor },
    Flag { at: Vector3<f64>, text: String },
}

/// An infeasible solve colour-codes the link whose closure or reach check
/// failed, per the error handling design's debug-stream note.
pub fn infeasible_marker(at: Vector3<f64>, reason: &str) -> Vec<DebugPrimitive> {
    vec![
        DebugPrimitive::Point { at, color: DebugColor::Red, label: Some(reason.to_string()) },
        DebugPrimitive::Flag { at, text: reason.to_string() },
    ]
}

/// Build the per-link primitives for a feasible planar solve: one disc
/// (the reach circle used in that link's circle-intersection construction)
/// and one line (the placed link itself), colour-coded by posture branch.
pub fn planar_solve_primitives(
    shoulder_origin: Vector3<f64>,
    yaw_cos_sin: (f64, f64),
    points_2d: &[Vector2<f64>],
    branches: &[PostureBranch],
) -> Vec<DebugPrimitive> {
    let (c, s) = yaw_cos_sin;
    let to_world = |p: Vector2<f64>| -> Vector3<f64> {
        // inverse of the planarizer's rotate-then-drop-Y step.
        shoulder_origin + Vector3::new(p.x * c, p.x * s, p.y)
    };

    let mut out = Vec::with_capacity(points_2d.len() * 2);
    for i in 1..points_2d.len() {
        let from = to_world(points_2d[i - 1]);
        let to = to_world(points_2d[i]);
        let branch = branches.get(i - 1).copied().unwrap_or(PostureBranch::Default);
        let color = DebugColor::from(branch);
        out.push(DebugPrimitive::Line { from, to, color });
        out.push(DebugPrimitive::Point { at: to, color, label: None });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_colours_are_distinct_for_shaped_cases() {
        assert_ne!(DebugColor::from(PostureBranch::CloseToOrigin), DebugColor::from(PostureBranch::Default));
        assert_ne!(DebugColor::from(PostureBranch::Graded), DebugColor::from(PostureBranch::CenterOfGravity));
    }

    #[test]
    fn infeasible_marker_carries_the_reason_text() {
        let primitives = infeasible_marker(Vector3::zeros(), "target beyond reach");
        assert_eq!(primitives.len(), 2);
    }
}
