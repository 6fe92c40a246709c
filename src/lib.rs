//! Escape-time evaluation of the Mandelbrot set over a sampled rectangle of
//! the complex plane, with a small grayscale PNG renderer for the result.

use std::time::Instant;

use log::info;

pub mod config;
pub mod display;
pub mod error;
pub mod fractal;
pub mod grid;
pub mod render;

pub use config::{AxisRange, RenderConfig};
pub use error::{Axis, ConfigError, Error, Result};
pub use grid::{evaluate, EvaluationMode, GridEvaluator, ResultGrid, SampleGrid};
pub use render::Heatmap;

/// Validates `config`, evaluates its lattice and writes the rendered image.
///
/// Nothing is evaluated or written if the configuration is rejected. With
/// `config.show` set, a window displaying the image is opened afterwards and
/// this call only returns once it is closed.
pub fn run(config: &RenderConfig) -> Result<ResultGrid> {
	config.validate()?;
	let samples = config.sample_grid()?;
	let evaluator = config.evaluator()?;

	let start = Instant::now();
	let result = evaluator.evaluate(&samples);
	let (rows, cols) = result.shape();
	info!(
		"evaluated {}x{} lattice ({} mode, bound {}) in {:.3}s",
		rows,
		cols,
		evaluator.mode().label(),
		evaluator.bound(),
		start.elapsed().as_secs_f64()
	);

	let heatmap = Heatmap::new(config.levels, evaluator.saturated_value());
	let image = heatmap.paint(&result);
	render::write_png(&image, config.dpi, &config.output)?;

	if config.show {
		display::show(image, "Mandelbrot");
	}

	Ok(result)
}
