use std::path::PathBuf;

use crate::error::{Axis, ConfigError};
use crate::fractal::ESCAPE_RADIUS;
use crate::grid::{EvaluationMode, GridEvaluator, SampleGrid, MAX_AXIS_SAMPLES};

/// Half-open sampling range `[min, max)` walked in `step` increments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
	pub min: f64,
	pub max: f64,
	pub step: f64,
}

impl AxisRange {
	pub fn new(min: f64, max: f64, step: f64) -> Self {
		Self { min, max, step }
	}

	#[allow(clippy::neg_cmp_op_on_partial_ord)]
	fn check(&self, axis: Axis) -> Result<(), ConfigError> {
		let finite = self.min.is_finite() && self.max.is_finite() && self.step.is_finite();
		if !finite || self.max <= self.min || self.step <= 0.0 {
			return Err(ConfigError::InvalidRange {
				axis,
				min: self.min,
				max: self.max,
				step: self.step,
			});
		}
		let count = self.count();
		if !(count.is_finite() && count <= MAX_AXIS_SAMPLES as f64) {
			return Err(ConfigError::TooManySamples {
				axis,
				limit: MAX_AXIS_SAMPLES,
			});
		}
		Ok(())
	}

	fn count(&self) -> f64 {
		((self.max - self.min) / self.step).ceil()
	}

	/// `min + k * step` for `k` in `0..ceil((max - min) / step)`.
	pub fn samples(&self, axis: Axis) -> Result<Vec<f64>, ConfigError> {
		self.check(axis)?;
		let count = self.count() as usize;
		Ok((0..count).map(|k| self.min + k as f64 * self.step).collect())
	}
}

/// Everything one evaluate-and-render pass needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
	pub real: AxisRange,
	pub imag: AxisRange,
	pub max_iterations: i64,
	pub escape_radius: f64,
	pub mode: EvaluationMode,
	pub parallel: bool,
	/// Number of discrete colour bands in the rendered image.
	pub levels: usize,
	pub dpi: u32,
	pub output: PathBuf,
	pub show: bool,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			real: AxisRange::new(-2.0, 1.0, 0.005),
			imag: AxisRange::new(-1.5, 1.5, 0.005),
			max_iterations: 100,
			escape_radius: ESCAPE_RADIUS,
			mode: EvaluationMode::Count,
			parallel: true,
			levels: 10,
			dpi: 300,
			output: PathBuf::from("mandelbrot.png"),
			show: false,
		}
	}
}

impl RenderConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.real.check(Axis::Real)?;
		self.imag.check(Axis::Imaginary)?;
		self.evaluator()?;
		if self.levels == 0 {
			return Err(ConfigError::NoColourLevels);
		}
		if self.dpi == 0 {
			return Err(ConfigError::ZeroDpi);
		}
		Ok(())
	}

	pub fn sample_grid(&self) -> Result<SampleGrid, ConfigError> {
		SampleGrid::new(
			self.real.samples(Axis::Real)?,
			self.imag.samples(Axis::Imaginary)?,
		)
	}

	pub fn evaluator(&self) -> Result<GridEvaluator, ConfigError> {
		Ok(GridEvaluator::new(self.max_iterations)?
			.with_escape_radius(self.escape_radius)?
			.with_mode(self.mode)
			.with_parallel(self.parallel))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_valid() {
		let config = RenderConfig::default();
		assert!(config.validate().is_ok());
		let grid = config.sample_grid().unwrap();
		let (rows, cols) = grid.shape();
		// 3.0 / 0.005 lands within one sample of 600 either way
		assert!((600..=601).contains(&rows));
		assert!((600..=601).contains(&cols));
		assert_eq!(grid.real()[0], -2.0);
		assert_eq!(grid.imag()[0], -1.5);
	}

	#[test]
	fn samples_are_half_open() {
		let range = AxisRange::new(0.0, 1.0, 0.25);
		assert_eq!(range.samples(Axis::Real).unwrap(), vec![0.0, 0.25, 0.5, 0.75]);
		let range = AxisRange::new(0.0, 1.0, 0.3);
		assert_eq!(range.samples(Axis::Real).unwrap().len(), 4);
	}

	#[test]
	fn bad_ranges_are_rejected() {
		for (min, max, step) in [
			(1.0, 0.0, 0.1),
			(0.0, 0.0, 0.1),
			(0.0, 1.0, 0.0),
			(0.0, 1.0, -0.1),
			(f64::NAN, 1.0, 0.1),
			(0.0, f64::INFINITY, 0.1),
		] {
			let range = AxisRange::new(min, max, step);
			assert!(matches!(
				range.samples(Axis::Imaginary),
				Err(ConfigError::InvalidRange {
					axis: Axis::Imaginary,
					..
				})
			));
		}
	}

	#[test]
	fn tiny_step_is_rejected_before_allocating() {
		let range = AxisRange::new(0.0, 1.0, 1e-300);
		assert_eq!(
			range.samples(Axis::Real),
			Err(ConfigError::TooManySamples {
				axis: Axis::Real,
				limit: MAX_AXIS_SAMPLES
			})
		);

		let config = RenderConfig {
			real: range,
			..RenderConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::TooManySamples { .. })
		));
		assert!(config.sample_grid().is_err());

		// the largest accepted axis still samples fine
		let range = AxisRange::new(0.0, MAX_AXIS_SAMPLES as f64, 1.0);
		assert_eq!(range.samples(Axis::Real).unwrap().len(), MAX_AXIS_SAMPLES);
	}

	#[test]
	fn negative_bound_fails_validation() {
		let config = RenderConfig {
			max_iterations: -5,
			..RenderConfig::default()
		};
		assert_eq!(config.validate(), Err(ConfigError::NegativeBound(-5)));
		assert!(config.evaluator().is_err());
	}

	#[test]
	fn radius_levels_and_dpi_are_checked() {
		let config = RenderConfig {
			escape_radius: 0.0,
			..RenderConfig::default()
		};
		assert_eq!(config.validate(), Err(ConfigError::NonPositiveRadius(0.0)));

		let config = RenderConfig {
			levels: 0,
			..RenderConfig::default()
		};
		assert_eq!(config.validate(), Err(ConfigError::NoColourLevels));

		let config = RenderConfig {
			dpi: 0,
			..RenderConfig::default()
		};
		assert_eq!(config.validate(), Err(ConfigError::ZeroDpi));
	}

	#[test]
	fn evaluator_carries_settings() {
		let config = RenderConfig {
			max_iterations: 42,
			mode: EvaluationMode::Membership,
			..RenderConfig::default()
		};
		let evaluator = config.evaluator().unwrap();
		assert_eq!(evaluator.bound(), 42);
		assert_eq!(evaluator.mode(), EvaluationMode::Membership);
	}
}
