use std::fmt;

use thiserror::Error;

/// Which axis of the sample lattice a configuration problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
	Real,
	Imaginary,
}

impl fmt::Display for Axis {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Axis::Real => write!(f, "real"),
			Axis::Imaginary => write!(f, "imaginary"),
		}
	}
}

/// Rejected before any grid cell is evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
	#[error("{0} axis has no samples")]
	EmptyAxis(Axis),

	#[error("{axis} axis sample {index} is not finite")]
	NonFiniteSample { axis: Axis, index: usize },

	#[error("{axis} axis is not strictly increasing at sample {index}")]
	NonMonotonicAxis { axis: Axis, index: usize },

	#[error("{axis} axis range [{min}, {max}) with step {step} is invalid")]
	InvalidRange {
		axis: Axis,
		min: f64,
		max: f64,
		step: f64,
	},

	#[error("{axis} axis would need more than {limit} samples")]
	TooManySamples { axis: Axis, limit: usize },

	#[error("iteration bound must not be negative, got {0}")]
	NegativeBound(i64),

	#[error("iteration bound {0} is too large")]
	BoundTooLarge(i64),

	#[error("escape radius must be positive and finite, got {0}")]
	NonPositiveRadius(f64),

	#[error("at least one colour level is required")]
	NoColourLevels,

	#[error("dpi must be positive")]
	ZeroDpi,
}

#[derive(Debug, Error)]
pub enum Error {
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(#[from] ConfigError),

	#[error("failed to write image: {0}")]
	Io(#[from] std::io::Error),

	#[error("failed to encode png: {0}")]
	Encoding(#[from] png::EncodingError),
}

pub type Result<T> = std::result::Result<T, Error>;
