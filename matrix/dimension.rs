use std::{fmt::Debug, hash::Hash};

/**
A `Dimension` is a list of `usize`s with one entry per axis. It is used both for the extents of a matrix and for its strides. Fixed size arrays `[usize; N]` carry their rank at compile time, while `Vec<usize>` carries it at runtime and is used for sub-slices, whose rank is smaller than their parent's.
*/
pub trait Dimension: Clone + Debug + PartialEq + Eq + Hash {
	fn slice(&self) -> &[usize];

	fn slice_mut(&mut self) -> &mut [usize];

	/// Create a dimension with `ndim` axes, all zero. Fixed size dimensions ignore `ndim`.
	fn zeros(ndim: usize) -> Self;

	fn ndim(&self) -> usize {
		self.slice().len()
	}

	fn size(&self) -> usize {
		self.slice().iter().product()
	}

	/// Compute the size, returning `None` if the product overflows.
	fn size_checked(&self) -> Option<usize> {
		self.slice()
			.iter()
			.try_fold(1usize, |size, extent| size.checked_mul(*extent))
	}

	/// The strides of a dense buffer where the last axis varies fastest, or `None` if the size overflows.
	fn row_major_strides(&self) -> Option<Self> {
		let mut strides = Self::zeros(self.ndim());
		let mut stride = 1usize;
		for (s, extent) in strides
			.slice_mut()
			.iter_mut()
			.zip(self.slice().iter())
			.rev()
		{
			*s = stride;
			stride = stride.checked_mul(*extent)?;
		}
		Some(strides)
	}

	/// The strides of a dense buffer where the first axis varies fastest, or `None` if the size overflows.
	fn col_major_strides(&self) -> Option<Self> {
		let mut strides = Self::zeros(self.ndim());
		let mut stride = 1usize;
		for (s, extent) in strides.slice_mut().iter_mut().zip(self.slice().iter()) {
			*s = stride;
			stride = stride.checked_mul(*extent)?;
		}
		Some(strides)
	}

	fn into_dyn(self) -> Vec<usize> {
		self.slice().to_vec()
	}
}

impl<const N: usize> Dimension for [usize; N] {
	fn slice(&self) -> &[usize] {
		self
	}

	fn slice_mut(&mut self) -> &mut [usize] {
		self
	}

	fn zeros(_ndim: usize) -> Self {
		[0; N]
	}
}

impl Dimension for Vec<usize> {
	fn slice(&self) -> &[usize] {
		self
	}

	fn slice_mut(&mut self) -> &mut [usize] {
		self
	}

	fn zeros(ndim: usize) -> Self {
		vec![0; ndim]
	}

	fn into_dyn(self) -> Vec<usize> {
		self
	}
}

#[test]
fn test_row_major_strides() {
	assert_eq!([3, 4, 5].row_major_strides(), Some([20, 5, 1]));
	assert_eq!([2, 2].row_major_strides(), Some([2, 1]));
	assert_eq!(vec![7].row_major_strides(), Some(vec![1]));
	assert_eq!(
		Vec::<usize>::new().row_major_strides(),
		Some(Vec::<usize>::new())
	);
}

#[test]
fn test_col_major_strides() {
	assert_eq!([3, 4, 5].col_major_strides(), Some([1, 3, 12]));
	assert_eq!(vec![2, 2].col_major_strides(), Some(vec![1, 2]));
}

#[test]
fn test_overflowing_strides() {
	assert_eq!([usize::MAX, 2].row_major_strides(), None);
	assert_eq!([2, usize::MAX].col_major_strides(), None);
	assert_eq!(vec![usize::MAX].row_major_strides(), None);
	assert_eq!([1, usize::MAX].row_major_strides(), None);
}

#[test]
fn test_size() {
	assert_eq!([3, 4, 5].size(), 60);
	assert_eq!(Vec::<usize>::new().size(), 1);
	assert_eq!([usize::MAX, 2].size_checked(), None);
}
