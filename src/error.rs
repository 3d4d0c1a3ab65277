//! Error handling for smaps
//!
//! Every failure is reported at the point of detection. Nothing in the crate
//! retries or returns a partially built column.

use thiserror::Error;

/// Result type alias for smaps operations
pub type Result<T> = std::result::Result<T, SmapsError>;

/// Main error type for smaps operations
#[derive(Error, Debug)]
pub enum SmapsError {
    // Model Errors
    #[error("Invalid model: {reason}")]
    InvalidModel { reason: String },

    #[error("Invalid parameter: {param} = {value} ({reason})")]
    InvalidParameter {
        param: String,
        value: f64,
        reason: String,
    },

    #[error("Unknown preset: {name}")]
    PresetNotFound { name: String },

    // Collaborator Errors
    #[error("Ensemble summary misaligned: {field} has {actual} values for a depth grid of {expected}")]
    EnsembleAlignment {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Eigenfunction misaligned at {frequency} Hz: {field} has {actual} values for {expected} depths")]
    KernelAlignment {
        frequency: f64,
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("{collaborator} failed: {source}")]
    Collaborator {
        collaborator: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SmapsError {
    /// Shorthand for an `InvalidModel` error
    pub fn invalid_model(reason: impl Into<String>) -> Self {
        SmapsError::InvalidModel {
            reason: reason.into(),
        }
    }

    /// Shorthand for an `InvalidParameter` error
    pub fn invalid_parameter(param: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        SmapsError::InvalidParameter {
            param: param.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SmapsError::InvalidModel { .. } => "INVALID_MODEL",
            SmapsError::InvalidParameter { .. } => "INVALID_PARAMETER",
            SmapsError::PresetNotFound { .. } => "PRESET_NOT_FOUND",
            SmapsError::EnsembleAlignment { .. } => "ENSEMBLE_ALIGNMENT",
            SmapsError::KernelAlignment { .. } => "KERNEL_ALIGNMENT",
            SmapsError::Collaborator { .. } => "COLLABORATOR_ERROR",
            SmapsError::Io(_) => "IO_ERROR",
            SmapsError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::InvalidModel { .. } => {
                "Give thickness, Vp, Vs and density the same number of layers"
            }
            Self::InvalidParameter { .. } => {
                "Use positive thicknesses of at least one cell and a positive cell size"
            }
            Self::PresetNotFound { .. } => "Run 'smaps presets' to list the bundled models",
            Self::EnsembleAlignment { .. } => {
                "Pass the same depth grid to the statistics library and to the plot"
            }
            Self::KernelAlignment { .. } => "Check the forward solver output for truncated kernels",
            _ => "Check the error details and try again",
        }
    }
}
