use image::GrayImage;
use pixel_canvas::{Canvas, Color};
use rayon::prelude::*;

/// Opens a window showing `image`, nearest-neighbour scaled to the canvas.
///
/// Does not return until the window is closed.
pub fn show(image: GrayImage, title: &str) {
	let canvas = Canvas::new(image.width() as usize, image.height() as usize)
		.title(title)
		.show_ms(true);

	canvas.render(move |_, frame| {
		let width = frame.width();
		let height = frame.height();
		let src_width = image.width() as usize;
		let src_height = image.height() as usize;

		// canvas rows count upward from the bottom edge
		frame.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
			let src_y = src_height - 1 - (y * src_height / height).min(src_height - 1);
			row.iter_mut().enumerate().for_each(|(x, pixel)| {
				let src_x = (x * src_width / width).min(src_width - 1);
				let gray = image.get_pixel(src_x as u32, src_y as u32)[0];
				*pixel = gray_color(gray);
			});
		});
	});
}

fn gray_color(gray: u8) -> Color {
	Color {
		r: gray,
		g: gray,
		b: gray,
	}
}
