//! Named physical constants and posture-policy tuning for the chain.
//!
//! Mirrors the role of a robot configuration table: every magic number the
//! solver needs lives here, behind `Serialize`/`Deserialize`, so a chain can
//! be built from a config file instead of hardcoded literals.

use serde::{Deserialize, Serialize};

/// Which physical arm variant a `ChainConfig` describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmModel {
    /// The measured prototype: `L_base=46.19, L_J6=35.98, L5=98, L4=96, L3=150`.
    Standard,
    /// A uniformly 1.5x-scaled variant, for a longer-reach build of the same chain.
    Reach,
}

/// Static, named constants describing one physical chain.
///
/// Lengths are in millimetres. Constructed once at startup; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub model: ArmModel,

    /// Length of the base riser, world origin to J6's origin along Z.
    pub l_base: f64,
    /// Length of the J6 yaw segment, J6's origin to J5's origin.
    pub l_j6: f64,
    /// Length of J5 (shoulder link).
    pub l5: f64,
    /// Length of J4 (elbow link).
    pub l4: f64,
    /// Length of J3 (wrist link); its tip is the end effector.
    pub l3: f64,

    /// Lateral offset contributed by the base riser: `[lateral, 0, l_base]`.
    pub base_lateral_offset: f64,
    /// Lateral offset contributed by J5, along its own local-Y rotated +90 about world Z.
    pub j5_lateral_offset: f64,

    /// Operator-commandable angle range, in turns, centred on 1.0 neutral.
    pub angle_min: f64,
    pub angle_max: f64,

    /// Empirical posture-shaping constants (see `PosturePolicy`).
    pub posture: PosturePolicyConfig,
}

/// The five-case posture-shaping policy's tunable constants, as plain data.
///
/// These read like hand-tuned constants because they are: empirical, not
/// derived. Surfacing them here documents that and keeps them testable in
/// isolation from the solver that consumes them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PosturePolicyConfig {
    /// Coefficient of `r` defining `rem_extend = rem_extend_coeff * r`.
    pub rem_extend_coeff: f64,
    /// Upper multiple of `rem_extend` bounding the "graded" blend window.
    pub blend_window_coeff: f64,
    /// Divisor (as a coefficient of `r`) for the blend ramp `v`.
    pub blend_span_coeff: f64,
    /// Blend midpoint the ramp is pulled back towards once `v > 0.4`.
    pub blend_midpoint: f64,
    /// Coefficient of `r` for the lower clamp `rem_min = rem_min_coeff * r`.
    pub rem_min_coeff: f64,
    /// Coefficient of `r` for the upper clamp `rem_max = rem_max_coeff * r`.
    pub rem_max_coeff: f64,
}

impl Default for PosturePolicyConfig {
    fn default() -> Self {
        Self {
            rem_extend_coeff: 0.5,
            blend_window_coeff: 1.75,
            blend_span_coeff: 0.75,
            blend_midpoint: 0.38,
            rem_min_coeff: -0.5,
            rem_max_coeff: 0.95,
        }
    }
}

impl ChainConfig {
    /// The measured seed configuration used throughout the test suite.
    pub fn standard() -> Self {
        Self {
            model: ArmModel::Standard,
            l_base: 46.19,
            l_j6: 35.98,
            l5: 98.0,
            l4: 96.0,
            l3: 150.0,
            base_lateral_offset: 2.54,
            j5_lateral_offset: -2.54,
            angle_min: 0.630,
            angle_max: 1.370,
            posture: PosturePolicyConfig::default(),
        }
    }

    /// A uniformly-scaled longer-reach variant of the standard chain.
    pub fn reach() -> Self {
        const SCALE: f64 = 1.5;
        let base = Self::standard();
        Self {
            model: ArmModel::Reach,
            l_base: base.l_base * SCALE,
            l_j6: base.l_j6 * SCALE,
            l5: base.l5 * SCALE,
            l4: base.l4 * SCALE,
            l3: base.l3 * SCALE,
            base_lateral_offset: base.base_lateral_offset * SCALE,
            j5_lateral_offset: base.j5_lateral_offset * SCALE,
            ..base
        }
    }

    pub fn from_model(model: ArmModel) -> Self {
        match model {
            ArmModel::Standard => Self::standard(),
            ArmModel::Reach => Self::reach(),
        }
    }

    /// Total reach of the three planar links, `L5 + L4 + L3`.
    pub fn r_max(&self) -> f64 {
        self.l5 + self.l4 + self.l3
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_matches_seed_test_data() {
        let cfg = ChainConfig::default();
        assert_eq!(cfg.l_base, 46.19);
        assert_eq!(cfg.l_j6, 35.98);
        assert_eq!(cfg.l5, 98.0);
        assert_eq!(cfg.l4, 96.0);
        assert_eq!(cfg.l3, 150.0);
        assert_eq!(cfg.base_lateral_offset, 2.54);
        assert_eq!(cfg.j5_lateral_offset, -2.54);
        assert!((cfg.r_max() - 344.0).abs() < 1e-9);
    }

    #[test]
    fn reach_variant_scales_uniformly() {
        let standard = ChainConfig::standard();
        let reach = ChainConfig::reach();
        assert!((reach.l5 / standard.l5 - 1.5).abs() < 1e-9);
        assert!((reach.r_max() / standard.r_max() - 1.5).abs() < 1e-9);
        assert_eq!(reach.model, ArmModel::Reach);
    }

    #[test]
    fn from_model_dispatches_correctly() {
        assert_eq!(ChainConfig::from_model(ArmModel::Standard).l5, 98.0);
        assert_eq!(ChainConfig::from_model(ArmModel::Reach).l5, 147.0);
    }
}
