//! Venting and Pneumatic Device Parameters

use carbonscope_core::factors::leaks;
use serde::{Deserialize, Serialize};

/// Parameters shared by the venting and pneumatic-device methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VentingParameters {
    /// Methane content of the vented gas stream
    /// unit: fraction (0-1)
    /// default: 0.86
    pub methane_content: f64,

    /// Methane density at standard conditions
    /// unit: kg/scf
    /// default: 0.0192
    pub ch4_kg_per_scf: f64,
}

impl Default for VentingParameters {
    fn default() -> Self {
        Self {
            methane_content: leaks::DEFAULT_METHANE_CONTENT,
            ch4_kg_per_scf: leaks::CH4_KG_PER_SCF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = VentingParameters::default();
        assert_eq!(params.methane_content, 0.86);
        assert_eq!(params.ch4_kg_per_scf, 0.0192);
    }
}
