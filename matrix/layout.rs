use crate::Dimension;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/**
A `Layout` decides how coordinates map onto the underlying buffer. It only affects the strides of a matrix. Iteration always visits elements in row-major order, with the last axis varying fastest.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
	RowMajor,
	ColumnMajor,
}

impl Default for Layout {
	fn default() -> Self {
		Layout::RowMajor
	}
}

impl Layout {
	/// Compute the strides of a dense buffer with the given extents. Returns `None` if the number of elements overflows `usize`.
	pub fn strides<D>(self, extents: &D) -> Option<D>
	where
		D: Dimension,
	{
		match self {
			Layout::RowMajor => extents.row_major_strides(),
			Layout::ColumnMajor => extents.col_major_strides(),
		}
	}
}

#[derive(Debug, Error)]
#[error("unknown layout `{0}`, expected `row-major` or `column-major`")]
pub struct ParseLayoutError(String);

impl FromStr for Layout {
	type Err = ParseLayoutError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"row-major" | "row_major" | "c" => Ok(Layout::RowMajor),
			"column-major" | "column_major" | "col-major" | "f" => Ok(Layout::ColumnMajor),
			_ => Err(ParseLayoutError(s.to_owned())),
		}
	}
}

impl fmt::Display for Layout {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Layout::RowMajor => write!(f, "row-major"),
			Layout::ColumnMajor => write!(f, "column-major"),
		}
	}
}

#[test]
fn test_parse() {
	assert_eq!("row-major".parse::<Layout>().unwrap(), Layout::RowMajor);
	assert_eq!("F".parse::<Layout>().unwrap(), Layout::ColumnMajor);
	assert!("diagonal".parse::<Layout>().is_err());
	assert_eq!(Layout::ColumnMajor.to_string(), "column-major");
}

#[test]
fn test_strides() {
	assert_eq!(Layout::RowMajor.strides(&[2, 3]), Some([3, 1]));
	assert_eq!(Layout::ColumnMajor.strides(&[2, 3]), Some([1, 2]));
}
