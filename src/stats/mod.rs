//! Stats module - Numeric kernels for the chart routines

mod fit;
mod spline;

pub use fit::LinearFit;
pub use spline::{CubicSpline, SplineError};
