//! This module contains the main entrypoint to the tetris cli.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use itertools::Itertools;
use tetris_matrix::{Entry, Layout, Matrix, MatrixError, MatrixSlice, MatrixView};

#[derive(Parser)]
#[command(
	name = "tetris",
	about = "Build dense n-dimensional matrices and inspect how they are laid out.",
	disable_help_subcommand = true
)]
struct Options {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	Describe(DescribeOptions),
	Offset(OffsetOptions),
	Show(ShowOptions),
}

#[derive(Args, Debug)]
#[command(about = "print the extents, strides, and size of a matrix")]
struct DescribeOptions {
	#[arg(required = true, help = "the extent of each axis")]
	extents: Vec<usize>,
	#[arg(short, long, env = "TETRIS_LAYOUT", default_value = "row-major")]
	layout: Layout,
	#[arg(long, help = "print json instead of text")]
	json: bool,
}

#[derive(Args, Debug)]
#[command(about = "print the buffer offset of an element")]
struct OffsetOptions {
	#[arg(required = true, help = "the extent of each axis")]
	extents: Vec<usize>,
	#[arg(long, required = true, num_args = 1.., help = "the coordinates of the element")]
	at: Vec<usize>,
	#[arg(short, long, env = "TETRIS_LAYOUT", default_value = "row-major")]
	layout: Layout,
}

#[derive(Args, Debug)]
#[command(about = "print a matrix whose elements are their row-major positions")]
#[command(
	long_about = "print a matrix whose elements are their row-major positions, or the element or sub-slice at the given coordinates"
)]
struct ShowOptions {
	#[arg(required = true, help = "the extent of each axis, at most six")]
	extents: Vec<usize>,
	#[arg(long, num_args = 1.., help = "fix the leading axes to these coordinates")]
	at: Vec<usize>,
	#[arg(short, long, env = "TETRIS_LAYOUT", default_value = "row-major")]
	layout: Layout,
	#[arg(long, help = "print json instead of text")]
	json: bool,
}

fn main() {
	env_logger::init();
	let options = Options::parse();
	let result = match options.command {
		Command::Describe(options) => cli_describe(&options),
		Command::Offset(options) => cli_offset(&options),
		Command::Show(options) => cli_show(&options),
	};
	match result {
		Ok(output) => println!("{}", output),
		Err(error) => {
			eprintln!("{}: {}", "error".red().bold(), error);
			std::process::exit(1);
		}
	}
}

fn cli_describe(options: &DescribeOptions) -> Result<String> {
	let slice = MatrixSlice::with_layout(options.extents.clone(), options.layout)?;
	if options.json {
		let output = serde_json::json!({
			"layout": options.layout,
			"descriptor": slice,
		});
		return Ok(serde_json::to_string_pretty(&output)?);
	}
	let lines = vec![
		format!("rank: {}", slice.rank()),
		format!("size: {}", slice.len()),
		format!("layout: {}", options.layout),
		format!("extents: {}", slice.extents().iter().join(" ")),
		format!("strides: {}", slice.strides().iter().join(" ")),
	];
	Ok(lines.join("\n"))
}

fn cli_offset(options: &OffsetOptions) -> Result<String> {
	let slice = MatrixSlice::with_layout(options.extents.clone(), options.layout)?;
	let offset = slice.offset(&options.at)?;
	log::debug!("{:?} is stored at offset {}", options.at, offset);
	Ok(offset.to_string())
}

fn cli_show(options: &ShowOptions) -> Result<String> {
	// Matrices carry their rank in their type, so dispatch on the number of extents.
	match options.extents.len() {
		1 => show::<1>(options),
		2 => show::<2>(options),
		3 => show::<3>(options),
		4 => show::<4>(options),
		5 => show::<5>(options),
		6 => show::<6>(options),
		rank => Err(MatrixError::InvalidDimension {
			extents: options.extents.clone(),
			rank,
		}
		.into()),
	}
}

fn show<const N: usize>(options: &ShowOptions) -> Result<String> {
	let positions = MatrixSlice::new(options.extents.clone())?;
	let matrix = Matrix::<f32, N>::from_fn_with_layout(
		options.extents.as_slice(),
		options.layout,
		|coords| {
			let position: usize = coords
				.iter()
				.zip(positions.strides().iter())
				.map(|(coord, stride)| coord * stride)
				.sum();
			position as f32
		},
	)?;
	if options.at.is_empty() {
		return if options.json {
			Ok(serde_json::to_string(&matrix)?)
		} else {
			Ok(matrix.to_string())
		};
	}
	match matrix.at(&options.at)? {
		Entry::Element(element) => Ok(element.to_string()),
		Entry::Slice(view) if options.json => view_to_json(&view),
		Entry::Slice(view) => Ok(view.to_string()),
	}
}

fn view_to_json(view: &MatrixView<f32>) -> Result<String> {
	let output = serde_json::json!({
		"extents": view.extents(),
		"data": view.to_vec(),
	});
	Ok(serde_json::to_string(&output)?)
}

#[test]
fn test_describe() {
	let options = DescribeOptions {
		extents: vec![3, 4, 5],
		layout: Layout::ColumnMajor,
		json: false,
	};
	assert_eq!(
		cli_describe(&options).unwrap(),
		"rank: 3\nsize: 60\nlayout: column-major\nextents: 3 4 5\nstrides: 1 3 12"
	);
}

#[test]
fn test_offset() {
	let options = OffsetOptions {
		extents: vec![3, 4, 5],
		at: vec![2, 1, 3],
		layout: Layout::RowMajor,
	};
	assert_eq!(cli_offset(&options).unwrap(), "48");
	let options = OffsetOptions {
		extents: vec![3, 4, 5],
		at: vec![2, 1],
		layout: Layout::RowMajor,
	};
	assert!(cli_offset(&options).is_err());
}

#[test]
fn test_show() {
	let options = ShowOptions {
		extents: vec![2, 3],
		at: vec![],
		layout: Layout::ColumnMajor,
		json: false,
	};
	assert_eq!(cli_show(&options).unwrap(), "{{0 1 2} {3 4 5}}");
	let options = ShowOptions {
		extents: vec![2, 3],
		at: vec![1],
		layout: Layout::RowMajor,
		json: true,
	};
	assert_eq!(
		cli_show(&options).unwrap(),
		r#"{"data":[3.0,4.0,5.0],"extents":[3]}"#
	);
	let options = ShowOptions {
		extents: vec![2, 3],
		at: vec![1, 2],
		layout: Layout::RowMajor,
		json: false,
	};
	assert_eq!(cli_show(&options).unwrap(), "5");
}

#[test]
fn test_show_unsupported_rank() {
	let options = ShowOptions {
		extents: vec![1; 7],
		at: vec![],
		layout: Layout::RowMajor,
		json: false,
	};
	assert!(cli_show(&options).is_err());
}

#[test]
fn test_show_overflowing_extents() {
	let options = ShowOptions {
		extents: vec![usize::MAX, 2],
		at: vec![],
		layout: Layout::RowMajor,
		json: false,
	};
	let error = cli_show(&options).unwrap_err();
	assert_eq!(
		error.downcast_ref::<MatrixError>(),
		Some(&MatrixError::InvalidDimension {
			extents: vec![usize::MAX, 2],
			rank: 2,
		})
	);
}

#[test]
fn test_options() {
	use clap::CommandFactory;
	Options::command().debug_assert();
}
