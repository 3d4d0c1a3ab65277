//! Petrophysical relations
//!
//! Elementwise conversions used to derive one attribute column from another:
//! fixed velocity ratios and empirical density laws. Constants belong to the
//! preset that uses them and are passed in literally.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed Vp/Vs ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityRatio(pub f64);

impl VelocityRatio {
    /// Vs from Vp: `vs = vp / ratio`
    pub fn vs_from_vp(&self, vp: &[f64]) -> Vec<f64> {
        vp.iter().map(|v| v / self.0).collect()
    }

    /// Vp from Vs: `vp = vs * ratio`
    pub fn vp_from_vs(&self, vs: &[f64]) -> Vec<f64> {
        vs.iter().map(|v| v * self.0).collect()
    }
}

/// Empirical density relation driven by Vp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DensityRelation {
    /// `rho = a * (vp / 1000)^b` (Gardner-type, vp in m/s)
    PowerLaw { a: f64, b: f64 },
    /// `rho = a * vp + b`
    Linear { a: f64, b: f64 },
}

impl DensityRelation {
    /// Gardner et al. (1974) with vp in m/s: `rho = 1740 * (vp/1000)^0.25`
    pub const GARDNER: DensityRelation = DensityRelation::PowerLaw { a: 1740.0, b: 0.25 };

    /// Density for a single Vp value
    #[inline]
    pub fn density(&self, vp: f64) -> f64 {
        match *self {
            DensityRelation::PowerLaw { a, b } => a * (vp / 1000.0).powf(b),
            DensityRelation::Linear { a, b } => a * vp + b,
        }
    }

    /// Density for every Vp value, order and length preserved
    pub fn apply(&self, vp: &[f64]) -> Vec<f64> {
        vp.iter().map(|&v| self.density(v)).collect()
    }
}

impl fmt::Display for DensityRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DensityRelation::PowerLaw { a, b } => write!(f, "rho = {} * (vp / 1000)^{}", a, b),
            DensityRelation::Linear { a, b } => write!(f, "rho = {} * vp + {}", a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ratio_is_elementwise() {
        let ratio = VelocityRatio(2.0);
        assert_eq!(ratio.vs_from_vp(&[2800.0, 3000.0, 3500.0]), vec![1400.0, 1500.0, 1750.0]);
        assert_eq!(ratio.vp_from_vs(&[1300.0, 1150.0]), vec![2600.0, 2300.0]);
    }

    #[test]
    fn test_gardner_at_reference_velocity() {
        // (1000/1000)^0.25 == 1
        assert_relative_eq!(DensityRelation::GARDNER.density(1000.0), 1740.0);
        assert_relative_eq!(
            DensityRelation::GARDNER.density(2800.0),
            1740.0 * 2.8_f64.powf(0.25),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_linear_relation() {
        let relation = DensityRelation::Linear { a: 0.32, b: 770.0 };
        let rho = relation.apply(&[1000.0, 2000.0]);
        assert_relative_eq!(rho[0], 1090.0, epsilon = 1e-9);
        assert_relative_eq!(rho[1], 1410.0, epsilon = 1e-9);
    }

    #[test]
    fn test_relation_serde_tagging() {
        let json = serde_json::to_value(DensityRelation::Linear { a: 0.32, b: 0.77 }).unwrap();
        assert_eq!(json["kind"], "linear");
        let back: DensityRelation = serde_json::from_value(json).unwrap();
        assert_eq!(back, DensityRelation::Linear { a: 0.32, b: 0.77 });
    }

    #[test]
    fn test_relation_display() {
        assert_eq!(DensityRelation::GARDNER.to_string(), "rho = 1740 * (vp / 1000)^0.25");
        assert_eq!(DensityRelation::Linear { a: 0.32, b: 770.0 }.to_string(), "rho = 0.32 * vp + 770");
    }
}
