//! The sample lattice, the escape-count grid built from it, and the
//! evaluator walking one into the other.
//!
//! Orientation: row `i` of a [`ResultGrid`] corresponds to imaginary sample
//! `i` and column `j` to real sample `j`, so the shape is
//! `(imag.len(), real.len())` with both indices ascending along their axis.

use log::{debug, trace};
use num_complex::Complex;
use rayon::prelude::*;

use crate::error::{Axis, ConfigError};
use crate::fractal;

/// Longest accepted axis; keeps image dimensions within `u32`.
pub const MAX_AXIS_SAMPLES: usize = 1 << 16;

const _: () = assert!(MAX_AXIS_SAMPLES <= u32::MAX as usize);

/// Real-axis and imaginary-axis samples spanning a rectangular lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
	real: Vec<f64>,
	imag: Vec<f64>,
}

impl SampleGrid {
	/// Both sequences must be non-empty, finite, strictly increasing and at
	/// most [`MAX_AXIS_SAMPLES`] long.
	pub fn new(real: Vec<f64>, imag: Vec<f64>) -> Result<Self, ConfigError> {
		check_axis(Axis::Real, &real)?;
		check_axis(Axis::Imaginary, &imag)?;
		Ok(Self { real, imag })
	}

	pub fn real(&self) -> &[f64] {
		&self.real
	}

	pub fn imag(&self) -> &[f64] {
		&self.imag
	}

	/// `(rows, cols)`, i.e. `(imag.len(), real.len())`.
	pub fn shape(&self) -> (usize, usize) {
		(self.imag.len(), self.real.len())
	}

	pub fn point(&self, row: usize, col: usize) -> Complex<f64> {
		Complex::new(self.real[col], self.imag[row])
	}
}

fn check_axis(axis: Axis, samples: &[f64]) -> Result<(), ConfigError> {
	if samples.is_empty() {
		return Err(ConfigError::EmptyAxis(axis));
	}
	if samples.len() > MAX_AXIS_SAMPLES {
		return Err(ConfigError::TooManySamples {
			axis,
			limit: MAX_AXIS_SAMPLES,
		});
	}
	if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
		return Err(ConfigError::NonFiniteSample { axis, index });
	}
	if let Some(index) = samples.windows(2).position(|w| w[1] <= w[0]) {
		return Err(ConfigError::NonMonotonicAxis {
			axis,
			index: index + 1,
		});
	}
	Ok(())
}

/// Escape results laid out row-major, one row per imaginary sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultGrid {
	rows: usize,
	cols: usize,
	cells: Vec<u32>,
}

impl ResultGrid {
	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn cols(&self) -> usize {
		self.cols
	}

	pub fn shape(&self) -> (usize, usize) {
		(self.rows, self.cols)
	}

	pub fn get(&self, row: usize, col: usize) -> Option<u32> {
		if row < self.rows && col < self.cols {
			Some(self.cells[row * self.cols + col])
		} else {
			None
		}
	}

	pub fn row(&self, row: usize) -> &[u32] {
		&self.cells[row * self.cols..(row + 1) * self.cols]
	}

	pub fn iter_rows(&self) -> impl Iterator<Item = &[u32]> {
		self.cells.chunks(self.cols)
	}

	pub fn values(&self) -> &[u32] {
		&self.cells
	}

	/// Smallest and largest value in the grid.
	pub fn range(&self) -> (u32, u32) {
		self.cells
			.iter()
			.fold((u32::MAX, u32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
	}
}

/// What a cell records about its point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvaluationMode {
	/// The escape time, saturating at the iteration bound.
	#[default]
	Count,
	/// 1 if the point stayed bounded for the whole iteration bound, else 0.
	Membership,
}

impl EvaluationMode {
	pub fn label(&self) -> &'static str {
		match self {
			EvaluationMode::Count => "Threshold",
			EvaluationMode::Membership => "Binary",
		}
	}

	fn cell_value(&self, escape: u32, bound: u32) -> u32 {
		match self {
			EvaluationMode::Count => escape,
			EvaluationMode::Membership => (escape == bound) as u32,
		}
	}
}

/// Evaluates every lattice point of a [`SampleGrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridEvaluator {
	bound: u32,
	radius: f64,
	mode: EvaluationMode,
	parallel: bool,
}

impl GridEvaluator {
	/// Rejects negative bounds and bounds that do not fit a cell value.
	pub fn new(bound: i64) -> Result<Self, ConfigError> {
		if bound < 0 {
			return Err(ConfigError::NegativeBound(bound));
		}
		let bound = u32::try_from(bound).map_err(|_| ConfigError::BoundTooLarge(bound))?;
		Ok(Self {
			bound,
			radius: fractal::ESCAPE_RADIUS,
			mode: EvaluationMode::default(),
			parallel: true,
		})
	}

	pub fn with_escape_radius(mut self, radius: f64) -> Result<Self, ConfigError> {
		if !(radius.is_finite() && radius > 0.0) {
			return Err(ConfigError::NonPositiveRadius(radius));
		}
		self.radius = radius;
		Ok(self)
	}

	pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
		self.mode = mode;
		self
	}

	/// Spread rows over the rayon pool (the default) or walk them in order.
	pub fn with_parallel(mut self, parallel: bool) -> Self {
		self.parallel = parallel;
		self
	}

	pub fn bound(&self) -> u32 {
		self.bound
	}

	pub fn mode(&self) -> EvaluationMode {
		self.mode
	}

	/// Cell value of a point that never escaped.
	pub fn saturated_value(&self) -> u32 {
		self.mode.cell_value(self.bound, self.bound)
	}

	pub fn evaluate_point(&self, c: Complex<f64>) -> u32 {
		let escape = fractal::escape_with_radius(c, self.bound, self.radius);
		self.mode.cell_value(escape, self.bound)
	}

	pub fn evaluate(&self, grid: &SampleGrid) -> ResultGrid {
		let (rows, cols) = grid.shape();
		debug!(
			"evaluating {}x{} lattice, bound {}, radius {}, mode {:?}",
			rows, cols, self.bound, self.radius, self.mode
		);

		let mut cells = vec![0; rows * cols];
		let real = grid.real();
		if self.parallel {
			cells
				.par_chunks_mut(cols)
				.zip(grid.imag().par_iter())
				.for_each(|(row, &im)| self.evaluate_row(row, real, im));
		} else {
			cells
				.chunks_mut(cols)
				.zip(grid.imag())
				.for_each(|(row, &im)| self.evaluate_row(row, real, im));
		}

		ResultGrid { rows, cols, cells }
	}

	fn evaluate_row(&self, row: &mut [u32], real: &[f64], im: f64) {
		for (cell, &re) in row.iter_mut().zip(real) {
			let value = self.evaluate_point(Complex::new(re, im));
			trace!("{} {} {} {}", self.mode.label(), re, im, value);
			*cell = value;
		}
	}
}

/// Iteration-count evaluation of `grid` with the default radius.
pub fn evaluate(grid: &SampleGrid, bound: i64) -> Result<ResultGrid, ConfigError> {
	Ok(GridEvaluator::new(bound)?.evaluate(grid))
}
