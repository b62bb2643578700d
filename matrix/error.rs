use thiserror::Error;

/// The errors produced when constructing, indexing, or slicing a matrix.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
	/// An extent was zero, the number of extents did not equal the rank, or the total size overflowed.
	#[error("invalid extents {extents:?} for a matrix of rank {rank}")]
	InvalidDimension { extents: Vec<usize>, rank: usize },
	/// A coordinate was not less than the extent of its axis.
	#[error("index {index} is out of range for axis {axis} with extent {extent}")]
	OutOfRange {
		axis: usize,
		index: usize,
		extent: usize,
	},
	/// The number of coordinates did not match the rank being indexed.
	#[error("expected {expected} coordinates but got {actual}")]
	ArityMismatch { expected: usize, actual: usize },
	/// A buffer passed to a constructor did not hold exactly one element per position.
	#[error("expected a buffer of {expected} elements but got {actual}")]
	ShapeMismatch { expected: usize, actual: usize },
}

pub type Result<T, E = MatrixError> = std::result::Result<T, E>;

#[test]
fn test_messages() {
	let error = MatrixError::OutOfRange {
		axis: 0,
		index: 5,
		extent: 3,
	};
	assert_eq!(
		error.to_string(),
		"index 5 is out of range for axis 0 with extent 3"
	);
	let error = MatrixError::InvalidDimension {
		extents: vec![3, 0],
		rank: 2,
	};
	assert_eq!(
		error.to_string(),
		"invalid extents [3, 0] for a matrix of rank 2"
	);
}
