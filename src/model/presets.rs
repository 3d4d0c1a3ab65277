//! Named reference models
//!
//! Literal earth models used for synthetic tests, demonstrations and
//! "true model" overlays. Values are calibration constants and are kept
//! exactly as surveyed.
//!
//! The registry is built once on first access and is read-only afterwards.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::layer::{constant_layers, LayerListModel};
use super::relations::{DensityRelation, VelocityRatio};
use crate::error::{Result, SmapsError};

/// A named model with a one-line description
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub model: LayerListModel,
}

fn literal(thick: &[f64], vp: &[f64], vs: &[f64], rho: &[f64]) -> LayerListModel {
    LayerListModel::from_parts(
        thick.to_vec(),
        constant_layers(vp),
        constant_layers(vs),
        constant_layers(rho),
    )
}

// ============================================================================
// Gulf of Mexico sediments
// ============================================================================

const GOM_THICK: [f64; 6] = [200.0, 200.0, 200.0, 200.0, 200.0, 800.0];
const GOM_VP: [f64; 6] = [1804.65, 1881.82, 1958.98, 2036.14, 2113.31, 4480.0];
const GOM_VS: [f64; 6] = [1041.92, 1086.47, 1131.02, 1175.57, 1220.12, 2500.0];
const GOM_RHO: [f64; 6] = [2250.0, 2250.0, 2250.0, 2250.0, 2250.0, 2100.0];

/// Water depth above the Gulf of Mexico sediment package (m)
pub const GOM_WATER_DEPTH: f64 = 800.0;

/// Seafloor sediments without the water column
pub fn gom_nowater() -> LayerListModel {
    literal(&GOM_THICK, &GOM_VP, &GOM_VS, &GOM_RHO)
}

/// Seafloor sediments shifted down by the water depth, padding reuses the
/// uppermost sediment layer
pub fn gom_nowater_depthadjusted() -> LayerListModel {
    gom_nowater().with_padding(GOM_WATER_DEPTH)
}

/// Seafloor sediments beneath the water column
pub fn gom_water() -> LayerListModel {
    gom_nowater().with_water_column(GOM_WATER_DEPTH)
}

// ============================================================================
// Ice and firn
// ============================================================================

pub fn toy() -> LayerListModel {
    let vp = [2800.0, 3000.0, 3500.0, 4000.0];
    let vs = VelocityRatio(2.0).vs_from_vp(&vp);
    let rho = DensityRelation::GARDNER.apply(&vp);
    literal(&[50.0, 50.0, 100.0, 100.0], &vp, &vs, &rho)
}

pub fn ice_homo() -> LayerListModel {
    literal(
        &[50.0, 50.0, 50.0, 250.0],
        &[3500.0, 3500.0, 3500.0, 4000.0],
        &[1750.0, 1750.0, 1750.0, 2000.0],
        &[930.0, 930.0, 930.0, 2600.0],
    )
}

/// Svalbard glacier; Vs values are surveyed, not derived from Vp
pub fn svalbard() -> LayerListModel {
    literal(
        &[80.0, 60.0, 250.0],
        &[3750.0, 3630.0, 4850.0],
        &[1769.0, 1680.0, 2425.0],
        &[930.0, 930.0, 2600.0],
    )
}

pub fn lovenbreen() -> LayerListModel {
    let vp = [3750.0, 3630.0, 4850.0];
    let vs = VelocityRatio(2.12).vs_from_vp(&vp);
    literal(&[120.0, 30.0, 250.0], &vp, &vs, &[930.0, 930.0, 2600.0])
}

pub fn ice_layered() -> LayerListModel {
    literal(
        &[10.0, 20.0, 110.0, 250.0],
        &[3000.0, 3200.0, 3500.0, 4000.0],
        &[1500.0, 1600.0, 1750.0, 2000.0],
        &[930.0, 930.0, 930.0, 2600.0],
    )
}

const FIRN_VP: [f64; 4] = [2900.0, 2900.0, 3500.0, 4000.0];
const FIRN_VS: [f64; 4] = [1300.0, 1150.0, 1750.0, 2000.0];
const FIRN_RHO: [f64; 4] = [700.0, 930.0, 930.0, 2600.0];

/// Low-velocity firn over glacier ice and bedrock
pub fn firnbase() -> LayerListModel {
    literal(&[20.0, 10.0, 120.0, 250.0], &FIRN_VP, &FIRN_VS, &FIRN_RHO)
}

/// `firnbase` with Vp tied to Vs by a ratio of two
pub fn firnbasemod() -> LayerListModel {
    let vp = VelocityRatio(2.0).vp_from_vs(&FIRN_VS);
    literal(&[20.0, 10.0, 120.0, 250.0], &vp, &FIRN_VS, &FIRN_RHO)
}

pub fn firndeep() -> LayerListModel {
    literal(&[40.0, 10.0, 100.0, 250.0], &FIRN_VP, &FIRN_VS, &FIRN_RHO)
}

pub fn firnthick() -> LayerListModel {
    literal(&[20.0, 20.0, 110.0, 250.0], &FIRN_VP, &FIRN_VS, &FIRN_RHO)
}

// ============================================================================
// BayesBay examples
// ============================================================================

const BAYESBAY_VS: [f64; 9] = [3380.0, 3440.0, 3660.0, 4250.0, 4350.0, 4320.0, 4315.0, 4380.0, 4500.0];
const BAYESBAY_VP_VS: f64 = 1.77;

/// Append the halfspace with a nominal thickness equal to the layer above it
fn with_halfspace(finite: &[f64]) -> Vec<f64> {
    let mut thick = finite.to_vec();
    thick.push(finite[finite.len() - 1]);
    thick
}

/// Crustal example at 10 km scale; densities follow the literal linear law
pub fn bayesbay_ex() -> LayerListModel {
    let thick = with_halfspace(&[10000.0, 10000.0, 15000.0, 20000.0, 20000.0, 20000.0, 20000.0, 20000.0]);
    let vp = VelocityRatio(BAYESBAY_VP_VS).vp_from_vs(&BAYESBAY_VS);
    let rho = DensityRelation::Linear { a: 0.32, b: 0.77 }.apply(&vp);
    literal(&thick, &vp, &BAYESBAY_VS, &rho)
}

/// The crustal example rescaled to metre-thick layers
pub fn bayesbay_ex_meterscale() -> LayerListModel {
    let thick = with_halfspace(&[10.0, 10.0, 15.0, 20.0, 20.0, 20.0, 20.0, 20.0]);
    let vp = VelocityRatio(BAYESBAY_VP_VS).vp_from_vs(&BAYESBAY_VS);
    let rho = DensityRelation::Linear { a: 0.32, b: 770.0 }.apply(&vp);
    literal(&thick, &vp, &BAYESBAY_VS, &rho)
}

// ============================================================================
// Registry
// ============================================================================

/// Immutable lookup table of the bundled presets
#[derive(Debug)]
pub struct PresetRegistry {
    presets: BTreeMap<&'static str, Preset>,
}

impl PresetRegistry {
    /// The process-wide registry, built on first use
    pub fn global() -> &'static PresetRegistry {
        static REGISTRY: OnceLock<PresetRegistry> = OnceLock::new();
        REGISTRY.get_or_init(PresetRegistry::bundled)
    }

    fn bundled() -> Self {
        let entries: [(&'static str, &'static str, fn() -> LayerListModel); 14] = [
            ("gom_nowater", "Gulf of Mexico sediments, no water column", gom_nowater),
            (
                "gom_nowater_depthadjusted",
                "Gulf of Mexico sediments shifted below 800 m of overburden",
                gom_nowater_depthadjusted,
            ),
            ("gom_water", "Gulf of Mexico sediments beneath 800 m of water", gom_water),
            ("toy", "Four-layer toy model, Vs = Vp/2, Gardner density", toy),
            ("ice_homo", "Homogeneous ice over bedrock", ice_homo),
            ("svalbard", "Svalbard glacier with surveyed Vs", svalbard),
            ("lovenbreen", "Lovenbreen glacier, Vs = Vp/2.12", lovenbreen),
            ("ice_layered", "Layered ice over bedrock", ice_layered),
            ("firnbase", "Firn over ice over bedrock", firnbase),
            ("firnbasemod", "Firn model with Vp = 2 Vs", firnbasemod),
            ("firndeep", "Thick upper firn layer", firndeep),
            ("firnthick", "Thick firn transition layer", firnthick),
            ("bayesbay_ex", "Crustal example, Vp = 1.77 Vs", bayesbay_ex),
            (
                "bayesbay_ex_meterscale",
                "Crustal example rescaled to metre layers",
                bayesbay_ex_meterscale,
            ),
        ];

        let presets = entries
            .into_iter()
            .map(|(name, description, build)| {
                (
                    name,
                    Preset {
                        name,
                        description,
                        model: build(),
                    },
                )
            })
            .collect();

        Self { presets }
    }

    /// Look up a preset model by name
    pub fn get(&self, name: &str) -> Result<&LayerListModel> {
        self.presets
            .get(name)
            .map(|preset| &preset.model)
            .ok_or_else(|| SmapsError::PresetNotFound {
                name: name.to_string(),
            })
    }

    /// Sorted preset names
    pub fn names(&self) -> Vec<&'static str> {
        self.presets.keys().copied().collect()
    }

    /// All presets in name order
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Look up a preset in the global registry
pub fn preset(name: &str) -> Result<&'static LayerListModel> {
    PresetRegistry::global().get(name)
}
