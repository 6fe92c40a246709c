use num_complex::Complex;

/// Magnitude beyond which an iterate is considered divergent.
pub const ESCAPE_RADIUS: f64 = 2.0;

fn compute_next(z: Complex<f64>, c: Complex<f64>) -> Complex<f64> {
	z * z + c
}

fn mod2(z: Complex<f64>) -> f64 {
	z.re * z.re + z.im * z.im
}

/// Escape time of `c` against the default radius of 2.
///
/// See [`escape_with_radius`].
pub fn escape(c: Complex<f64>, bound: u32) -> u32 {
	escape_with_radius(c, bound, ESCAPE_RADIUS)
}

/// Seeds `z = c` and iterates `z -> z^2 + c` at most `bound` times.
///
/// Returns the counter of the first update whose magnitude exceeds
/// `radius`, counting from 0, or `bound` itself if every update stayed
/// within it. The seed `z1 = c` is never tested on its own. A result equal to
/// `bound` means "treated as in the set"; with `bound == 0` no update is
/// performed and the result is always 0.
///
/// Non-finite iterates are reported as escaped.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn escape_with_radius(c: Complex<f64>, bound: u32, radius: f64) -> u32 {
	let radius2 = radius * radius;
	let mut zn = c;
	for counter in 0..bound {
		zn = compute_next(zn, c);
		// negated so that NaN lands on the escaped side
		if !(mod2(zn) <= radius2) {
			return counter;
		}
	}
	bound
}
