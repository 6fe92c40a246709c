use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use mandelbrot_grid::{AxisRange, EvaluationMode, RenderConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
struct Args {
	/// Smallest real-axis sample
	#[arg(long, default_value_t = -2.0)]
	re_min: f64,

	/// Real-axis upper bound (exclusive)
	#[arg(long, default_value_t = 1.0)]
	re_max: f64,

	/// Smallest imaginary-axis sample
	#[arg(long, default_value_t = -1.5)]
	im_min: f64,

	/// Imaginary-axis upper bound (exclusive)
	#[arg(long, default_value_t = 1.5)]
	im_max: f64,

	/// Sample spacing on both axes
	#[arg(short, long, default_value_t = 0.005)]
	step: f64,

	/// Real-axis spacing, overrides --step
	#[arg(long)]
	re_step: Option<f64>,

	/// Imaginary-axis spacing, overrides --step
	#[arg(long)]
	im_step: Option<f64>,

	/// Maximum iterations
	#[arg(short, long, default_value_t = 100)]
	max_iterations: i64,

	/// Magnitude beyond which a point has escaped
	#[arg(short, long, default_value_t = 2.0)]
	escape_radius: f64,

	/// What each cell records
	#[arg(long, value_enum, default_value_t = Mode::Count)]
	mode: Mode,

	/// Number of colour bands
	#[arg(short, long, default_value_t = 10)]
	levels: usize,

	/// Resolution recorded in the PNG
	#[arg(long, default_value_t = 300)]
	dpi: u32,

	/// Where to write the PNG
	#[arg(short, long, default_value = "mandelbrot.png")]
	output: PathBuf,

	/// Open a window with the result
	#[arg(long)]
	show: bool,

	/// Evaluate rows one after another on the current thread
	#[arg(long)]
	sequential: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
	/// Escape iteration count
	Count,
	/// 1 inside the set, 0 outside
	Membership,
}

impl From<Mode> for EvaluationMode {
	fn from(mode: Mode) -> Self {
		match mode {
			Mode::Count => EvaluationMode::Count,
			Mode::Membership => EvaluationMode::Membership,
		}
	}
}

impl From<Args> for RenderConfig {
	fn from(args: Args) -> Self {
		Self {
			real: AxisRange::new(args.re_min, args.re_max, args.re_step.unwrap_or(args.step)),
			imag: AxisRange::new(args.im_min, args.im_max, args.im_step.unwrap_or(args.step)),
			max_iterations: args.max_iterations,
			escape_radius: args.escape_radius,
			mode: args.mode.into(),
			parallel: !args.sequential,
			levels: args.levels,
			dpi: args.dpi,
			output: args.output,
			show: args.show,
		}
	}
}

fn main() -> anyhow::Result<()> {
	env_logger::init();

	let args: Args = Args::parse();
	let config = RenderConfig::from(args);
	log::debug!("{:?}", config);

	mandelbrot_grid::run(&config)
		.with_context(|| format!("rendering to {}", config.output.display()))?;
	Ok(())
}
