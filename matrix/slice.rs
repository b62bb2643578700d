use crate::{
	error::Result,
	iter::{Indices, Offsets},
	Dimension, Layout, MatrixError,
};
use itertools::izip;
use serde::Serialize;
use std::fmt;

/**
A `MatrixSlice` describes which positions of a buffer belong to a matrix or to a sub-slice of it. It is made of the offset of the first element, the number of elements, and the extents and strides of each axis. The element with coordinates `c` lives at `start + sum(c[i] * strides[i])`.

The extents and strides are computed once, when the slice is created, and never change afterward.
*/
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MatrixSlice<D>
where
	D: Dimension,
{
	start: usize,
	size: usize,
	extents: D,
	strides: D,
}

impl<D> MatrixSlice<D>
where
	D: Dimension,
{
	/// Create a slice over a dense row-major buffer with the given extents.
	pub fn new(extents: D) -> Result<Self> {
		Self::with_layout(extents, Layout::RowMajor)
	}

	/// Create a slice over a dense buffer with the given extents, laid out according to `layout`. Every extent must be at least one.
	pub fn with_layout(extents: D, layout: Layout) -> Result<Self> {
		let invalid = || MatrixError::InvalidDimension {
			extents: extents.slice().to_vec(),
			rank: extents.ndim(),
		};
		if extents.slice().iter().any(|extent| *extent == 0) {
			return Err(invalid());
		}
		let size = extents.size_checked().ok_or_else(invalid)?;
		let strides = layout.strides(&extents).ok_or_else(invalid)?;
		Ok(Self {
			start: 0,
			size,
			extents,
			strides,
		})
	}

	pub(crate) fn from_parts(start: usize, extents: D, strides: D) -> Self {
		let size = extents.size();
		Self {
			start,
			size,
			extents,
			strides,
		}
	}

	pub fn rank(&self) -> usize {
		self.extents.ndim()
	}

	/// The number of elements addressed by this slice.
	pub fn len(&self) -> usize {
		self.size
	}

	pub fn is_empty(&self) -> bool {
		self.size == 0
	}

	pub fn start(&self) -> usize {
		self.start
	}

	pub fn extents(&self) -> &D {
		&self.extents
	}

	pub fn strides(&self) -> &D {
		&self.strides
	}

	/// Compute the buffer offset of the element at `coords`. There must be exactly one coordinate per axis and each must be less than its axis's extent.
	pub fn offset(&self, coords: &[usize]) -> Result<usize> {
		if coords.len() != self.rank() {
			return Err(MatrixError::ArityMismatch {
				expected: self.rank(),
				actual: coords.len(),
			});
		}
		let mut offset = self.start;
		for (axis, (index, extent, stride)) in
			izip!(coords, self.extents.slice(), self.strides.slice()).enumerate()
		{
			if index >= extent {
				return Err(MatrixError::OutOfRange {
					axis,
					index: *index,
					extent: *extent,
				});
			}
			offset += index * stride;
		}
		Ok(offset)
	}

	/**
	Fix the leading axes to the coordinates in `prefix`, producing a slice over the remaining axes. The new slice addresses the same buffer as this one. Fixing every axis produces a slice of rank zero, which addresses exactly one element.
	*/
	pub fn fix(&self, prefix: &[usize]) -> Result<MatrixSlice<Vec<usize>>> {
		let rank = self.rank();
		if prefix.len() > rank {
			return Err(MatrixError::ArityMismatch {
				expected: rank,
				actual: prefix.len(),
			});
		}
		let mut start = self.start;
		for (axis, (index, extent, stride)) in
			izip!(prefix, self.extents.slice(), self.strides.slice()).enumerate()
		{
			if index >= extent {
				return Err(MatrixError::OutOfRange {
					axis,
					index: *index,
					extent: *extent,
				});
			}
			start += index * stride;
		}
		let extents = self.extents.slice()[prefix.len()..].to_vec();
		let strides = self.strides.slice()[prefix.len()..].to_vec();
		log::trace!(
			"fixed {:?} of {:?}, leaving extents {:?} at offset {}",
			prefix,
			self.extents,
			extents,
			start,
		);
		Ok(MatrixSlice::from_parts(start, extents, strides))
	}

	/// Find the coordinates of the element stored at `offset`, or `None` if this slice does not address that offset.
	pub fn coordinates(&self, offset: usize) -> Option<D> {
		let relative = offset.checked_sub(self.start)?;
		let coords = self.unravel(relative);
		if self.offset(coords.slice()).ok()? == offset {
			Some(coords)
		} else {
			None
		}
	}

	/// Split an offset relative to `start` into coordinates. This is only meaningful for dense slices, so callers must verify the result or guarantee density.
	pub(crate) fn unravel(&self, relative: usize) -> D {
		let mut coords = D::zeros(self.rank());
		for (coord, extent, stride) in izip!(
			coords.slice_mut(),
			self.extents.slice(),
			self.strides.slice()
		) {
			*coord = (relative / stride) % extent;
		}
		coords
	}

	/// Iterate over every coordinate tuple in row-major order.
	pub fn indices(&self) -> Indices<D> {
		Indices::new(self.extents.clone())
	}

	/// Iterate over the buffer offset of every element in row-major order.
	pub fn offsets(&self) -> Offsets {
		Offsets::new(self)
	}

	pub fn into_dyn(self) -> MatrixSlice<Vec<usize>> {
		MatrixSlice {
			start: self.start,
			size: self.size,
			extents: self.extents.into_dyn(),
			strides: self.strides.into_dyn(),
		}
	}
}

impl<D> fmt::Display for MatrixSlice<D>
where
	D: Dimension,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"start={} size={} extents={:?} strides={:?}",
			self.start,
			self.size,
			self.extents.slice(),
			self.strides.slice()
		)
	}
}

#[test]
fn test_new() {
	let slice = MatrixSlice::new([3, 4, 5]).unwrap();
	assert_eq!(slice.rank(), 3);
	assert_eq!(slice.len(), 60);
	assert_eq!(slice.start(), 0);
	assert_eq!(slice.strides(), &[20, 5, 1]);
	assert_eq!(
		slice.to_string(),
		"start=0 size=60 extents=[3, 4, 5] strides=[20, 5, 1]"
	);
}

#[test]
fn test_new_invalid() {
	assert_eq!(
		MatrixSlice::new([3, 0, 5]).unwrap_err(),
		MatrixError::InvalidDimension {
			extents: vec![3, 0, 5],
			rank: 3,
		}
	);
	assert!(MatrixSlice::new(vec![usize::MAX, 3]).is_err());
}

#[test]
fn test_offset() {
	let slice = MatrixSlice::new([2, 2]).unwrap();
	assert_eq!(slice.offset(&[0, 0]).unwrap(), 0);
	assert_eq!(slice.offset(&[0, 1]).unwrap(), 1);
	assert_eq!(slice.offset(&[1, 0]).unwrap(), 2);
	assert_eq!(slice.offset(&[1, 1]).unwrap(), 3);
	let slice = MatrixSlice::new([3, 4, 5]).unwrap();
	assert_eq!(slice.offset(&[2, 1, 3]).unwrap(), 48);
}

#[test]
fn test_offset_errors() {
	let slice = MatrixSlice::new([3, 4]).unwrap();
	assert_eq!(
		slice.offset(&[5, 0]).unwrap_err(),
		MatrixError::OutOfRange {
			axis: 0,
			index: 5,
			extent: 3,
		}
	);
	assert_eq!(
		slice.offset(&[0, 4]).unwrap_err(),
		MatrixError::OutOfRange {
			axis: 1,
			index: 4,
			extent: 4,
		}
	);
	assert_eq!(
		slice.offset(&[1]).unwrap_err(),
		MatrixError::ArityMismatch {
			expected: 2,
			actual: 1,
		}
	);
	assert_eq!(
		slice.offset(&[1, 1, 1]).unwrap_err(),
		MatrixError::ArityMismatch {
			expected: 2,
			actual: 3,
		}
	);
}

#[test]
fn test_offsets_are_distinct() {
	use std::collections::HashSet;
	for layout in [Layout::RowMajor, Layout::ColumnMajor].iter() {
		let slice = MatrixSlice::with_layout([3, 4, 5], *layout).unwrap();
		let offsets: HashSet<usize> = slice
			.indices()
			.map(|index| slice.offset(&index).unwrap())
			.collect();
		assert_eq!(offsets.len(), 60);
		assert!(offsets.iter().all(|offset| *offset < 60));
	}
}

#[test]
fn test_fix() {
	let slice = MatrixSlice::new([3, 4, 5]).unwrap();
	let row = slice.fix(&[2]).unwrap();
	assert_eq!(row.start(), 40);
	assert_eq!(row.extents(), &vec![4, 5]);
	assert_eq!(row.strides(), &vec![5, 1]);
	assert_eq!(row.len(), 20);
	assert_eq!(row.offset(&[1, 3]).unwrap(), slice.offset(&[2, 1, 3]).unwrap());

	let element = slice.fix(&[2, 1, 3]).unwrap();
	assert_eq!(element.rank(), 0);
	assert_eq!(element.len(), 1);
	assert_eq!(element.offset(&[]).unwrap(), 48);

	assert_eq!(
		slice.fix(&[0, 0, 0, 0]).unwrap_err(),
		MatrixError::ArityMismatch {
			expected: 3,
			actual: 4,
		}
	);
	assert_eq!(
		slice.fix(&[0, 9]).unwrap_err(),
		MatrixError::OutOfRange {
			axis: 1,
			index: 9,
			extent: 4,
		}
	);
}

#[test]
fn test_fix_column_major() {
	let slice = MatrixSlice::with_layout([3, 4, 5], Layout::ColumnMajor).unwrap();
	let sub = slice.fix(&[1]).unwrap();
	assert_eq!(sub.start(), 1);
	assert_eq!(sub.strides(), &vec![3, 12]);
	assert_eq!(sub.offset(&[2, 3]).unwrap(), slice.offset(&[1, 2, 3]).unwrap());
}

#[test]
fn test_coordinates() {
	let slice = MatrixSlice::new([3, 4, 5]).unwrap();
	assert_eq!(slice.coordinates(48), Some([2, 1, 3]));
	assert_eq!(slice.coordinates(60), None);
	for offset in slice.offsets() {
		let coords = slice.coordinates(offset).unwrap();
		assert_eq!(slice.offset(&coords).unwrap(), offset);
	}
	let row = slice.fix(&[1]).unwrap();
	assert_eq!(row.coordinates(26), Some(vec![1, 1]));
	assert_eq!(row.coordinates(19), None);
	assert_eq!(row.coordinates(40), None);
}
