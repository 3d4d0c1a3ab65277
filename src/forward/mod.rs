//! Forward-model boundary
//!
//! Types exchanged with the external dispersion / eigenfunction solver.

pub mod dispersion;
pub mod kernel;
pub mod velocity;

pub use dispersion::DispersionCurve;
pub use kernel::{sensitivity_kernels, EigenFunction, ForwardModel};
pub use velocity::VelocityModel;
