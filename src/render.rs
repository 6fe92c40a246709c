//! Turns a [`ResultGrid`] into a banded grayscale picture and writes it out
//! as a PNG.
//!
//! Values are split into `levels` equal-width bands between the grid's
//! smallest and largest value. Low bands are white and the top band is
//! black, so points treated as inside the set come out black. The top image
//! row holds the largest imaginary sample.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{GrayImage, Luma};
use log::info;

use crate::error::Result;
use crate::grid::ResultGrid;

const METERS_PER_INCH: f64 = 0.0254;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heatmap {
	levels: usize,
	saturated: u32,
}

impl Heatmap {
	/// `saturated` is the cell value meaning "did not escape"; a grid holding
	/// only that value renders black, any other constant grid white. A single
	/// level paints everything black.
	pub fn new(levels: usize, saturated: u32) -> Self {
		Self {
			levels: levels.max(1),
			saturated,
		}
	}

	pub fn levels(&self) -> usize {
		self.levels
	}

	/// Band index of `value` within `[lo, hi]`, in `0..levels`.
	pub fn band(&self, value: u32, lo: u32, hi: u32) -> usize {
		if hi == lo {
			return if value == self.saturated {
				self.levels - 1
			} else {
				0
			};
		}
		let t = (value.saturating_sub(lo)) as f64 / (hi - lo) as f64;
		((t * self.levels as f64) as usize).min(self.levels - 1)
	}

	pub fn shade(&self, band: usize) -> u8 {
		if self.levels == 1 {
			return 0;
		}
		let t = band.min(self.levels - 1) as f64 / (self.levels - 1) as f64;
		255 - (255.0 * t).round() as u8
	}

	pub fn paint(&self, grid: &ResultGrid) -> GrayImage {
		let (lo, hi) = grid.range();
		let rows = grid.rows();
		// axes never exceed MAX_AXIS_SAMPLES, which fits u32
		GrayImage::from_fn(grid.cols() as u32, rows as u32, |x, y| {
			let row = rows - 1 - y as usize;
			let value = grid.row(row)[x as usize];
			Luma([self.shade(self.band(value, lo, hi))])
		})
	}
}

/// Encodes `image` as an 8-bit grayscale PNG whose pHYs chunk records `dpi`.
pub fn encode_png<W: Write>(image: &GrayImage, dpi: u32, out: W) -> Result<()> {
	let ppm = (dpi as f64 / METERS_PER_INCH).round() as u32;
	let mut encoder = png::Encoder::new(out, image.width(), image.height());
	encoder.set_color(png::ColorType::Grayscale);
	encoder.set_depth(png::BitDepth::Eight);
	encoder.set_pixel_dims(Some(png::PixelDimensions {
		xppu: ppm,
		yppu: ppm,
		unit: png::Unit::Meter,
	}));
	let mut writer = encoder.write_header()?;
	writer.write_image_data(image.as_raw())?;
	writer.finish()?;
	Ok(())
}

pub fn write_png(image: &GrayImage, dpi: u32, path: &Path) -> Result<()> {
	let file = BufWriter::new(File::create(path)?);
	encode_png(image, dpi, file)?;
	info!(
		"wrote {}x{} image at {} dpi to {}",
		image.width(),
		image.height(),
		dpi,
		path.display()
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::grid::{GridEvaluator, SampleGrid};
	use std::io::Cursor;

	#[test]
	fn bands_cover_the_range() {
		let heatmap = Heatmap::new(10, 100);
		assert_eq!(heatmap.band(0, 0, 100), 0);
		assert_eq!(heatmap.band(9, 0, 100), 0);
		assert_eq!(heatmap.band(10, 0, 100), 1);
		assert_eq!(heatmap.band(55, 0, 100), 5);
		assert_eq!(heatmap.band(100, 0, 100), 9);
	}

	#[test]
	fn binary_colour_map() {
		let heatmap = Heatmap::new(10, 100);
		assert_eq!(heatmap.shade(0), 255);
		assert_eq!(heatmap.shade(9), 0);
		assert!(heatmap.shade(3) > heatmap.shade(4));
	}

	#[test]
	fn constant_grids() {
		let heatmap = Heatmap::new(10, 50);
		assert_eq!(heatmap.shade(heatmap.band(50, 50, 50)), 0);
		assert_eq!(heatmap.shade(heatmap.band(7, 7, 7)), 255);
	}

	#[test]
	fn single_level() {
		let heatmap = Heatmap::new(1, 1);
		assert_eq!(heatmap.band(0, 0, 1), 0);
		assert_eq!(heatmap.shade(0), 0);
	}

	#[test]
	fn top_row_is_largest_imaginary_sample() {
		// the origin row is in the set, the row at 3i escapes at once
		let grid = SampleGrid::new(vec![0.0], vec![0.0, 3.0]).unwrap();
		let result = GridEvaluator::new(20).unwrap().evaluate(&grid);
		let image = Heatmap::new(10, 20).paint(&result);
		assert_eq!(image.dimensions(), (1, 2));
		assert_eq!(image.get_pixel(0, 0), &Luma([255]));
		assert_eq!(image.get_pixel(0, 1), &Luma([0]));
	}

	#[test]
	fn image_dimensions_follow_grid_shape() {
		let real: Vec<f64> = (0..7).map(|i| -2.0 + i as f64 * 0.4).collect();
		let imag: Vec<f64> = (0..3).map(|i| -1.0 + i as f64 * 0.9).collect();
		let grid = SampleGrid::new(real, imag).unwrap();
		let result = GridEvaluator::new(10).unwrap().evaluate(&grid);
		let image = Heatmap::new(10, 10).paint(&result);
		assert_eq!(
			(image.width() as usize, image.height() as usize),
			(result.cols(), result.rows())
		);
	}

	#[test]
	fn png_carries_dpi() {
		let image = GrayImage::from_pixel(4, 3, Luma([128]));
		let mut bytes = Vec::new();
		encode_png(&image, 300, &mut bytes).unwrap();

		let reader = png::Decoder::new(Cursor::new(bytes)).read_info().unwrap();
		let info = reader.info();
		assert_eq!((info.width, info.height), (4, 3));
		assert_eq!(info.color_type, png::ColorType::Grayscale);
		let dims = info.pixel_dims.unwrap();
		assert_eq!(dims.xppu, 11811);
		assert_eq!(dims.yppu, 11811);
		assert_eq!(dims.unit, png::Unit::Meter);
	}
}
