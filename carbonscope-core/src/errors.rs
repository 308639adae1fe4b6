use thiserror::Error;

/// Error type for invalid inputs and reference-table lookup misses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown {category} unit: '{unit}'")]
    UnknownUnit { unit: String, category: String },
    #[error("unknown fuel type: '{0}'")]
    UnknownFuelType(String),
    #[error("unknown mobile source: '{0}'")]
    UnknownVehicleType(String),
    #[error("unknown facility type: '{0}'. Valid types: {1}")]
    UnknownFacilityType(String, String),
    #[error("unknown component type: '{0}'")]
    UnknownComponentType(String),
    #[error("unknown product type: '{0}'")]
    UnknownProductType(String),
    #[error("unknown GWP version: '{0}'. Available: AR4, AR5, AR6")]
    UnknownGwpVersion(String),
    #[error("unknown gas type: '{0}'")]
    UnknownGasType(String),
    #[error("grid factor not found for region '{region}' (subregion: {subregion:?})")]
    GridFactorNotFound {
        region: String,
        subregion: Option<String>,
    },
}

/// Convenience type for `Result<T, CalcError>`.
pub type CalcResult<T> = Result<T, CalcError>;
