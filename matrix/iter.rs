use crate::{Dimension, MatrixSlice};
use itertools::izip;
use std::marker::PhantomData;

/// An iterator over every coordinate tuple of a set of extents, in row-major order.
#[derive(Clone, Debug)]
pub struct Indices<D>
where
	D: Dimension,
{
	extents: D,
	index: D,
	remaining: usize,
}

impl<D> Indices<D>
where
	D: Dimension,
{
	pub(crate) fn new(extents: D) -> Self {
		let index = D::zeros(extents.ndim());
		let remaining = extents.size();
		Self {
			extents,
			index,
			remaining,
		}
	}
}

impl<D> Iterator for Indices<D>
where
	D: Dimension,
{
	type Item = D;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}
		let current = self.index.clone();
		self.remaining -= 1;
		if self.remaining > 0 {
			for (index, extent) in self
				.index
				.slice_mut()
				.iter_mut()
				.zip(self.extents.slice().iter())
				.rev()
			{
				*index += 1;
				if *index < *extent {
					break;
				}
				*index = 0;
			}
		}
		Some(current)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<D> ExactSizeIterator for Indices<D> where D: Dimension {}

/**
An iterator over the buffer offsets addressed by a [`MatrixSlice`](struct.MatrixSlice.html), in row-major order. The running offset is updated incrementally, so each step costs one addition in the common case.
*/
#[derive(Clone, Debug)]
pub struct Offsets {
	extents: Vec<usize>,
	strides: Vec<usize>,
	index: Vec<usize>,
	offset: usize,
	remaining: usize,
}

impl Offsets {
	pub(crate) fn new<D>(slice: &MatrixSlice<D>) -> Self
	where
		D: Dimension,
	{
		Self {
			extents: slice.extents().slice().to_vec(),
			strides: slice.strides().slice().to_vec(),
			index: vec![0; slice.rank()],
			offset: slice.start(),
			remaining: slice.len(),
		}
	}
}

impl Iterator for Offsets {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}
		let offset = self.offset;
		self.remaining -= 1;
		if self.remaining > 0 {
			for (index, extent, stride) in
				izip!(self.index.iter_mut(), &self.extents, &self.strides).rev()
			{
				if *index + 1 < *extent {
					*index += 1;
					self.offset += stride;
					break;
				}
				self.offset -= *index * stride;
				*index = 0;
			}
		}
		Some(offset)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl ExactSizeIterator for Offsets {}

/// An iterator over shared references to the elements of a matrix or view, in row-major order.
pub struct Iter<'a, T> {
	data: &'a [T],
	offsets: Offsets,
}

impl<'a, T> Iter<'a, T> {
	pub(crate) fn new<D>(data: &'a [T], slice: &MatrixSlice<D>) -> Self
	where
		D: Dimension,
	{
		Self {
			data,
			offsets: slice.offsets(),
		}
	}
}

impl<'a, T> Clone for Iter<'a, T> {
	fn clone(&self) -> Self {
		Self {
			data: self.data,
			offsets: self.offsets.clone(),
		}
	}
}

impl<'a, T> Iterator for Iter<'a, T> {
	type Item = &'a T;

	fn next(&mut self) -> Option<Self::Item> {
		let data = self.data;
		self.offsets.next().map(|offset| &data[offset])
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.offsets.size_hint()
	}
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// An iterator over mutable references to the elements of a matrix or view, in row-major order.
pub struct IterMut<'a, T> {
	ptr: *mut T,
	len: usize,
	offsets: Offsets,
	marker: PhantomData<&'a mut [T]>,
}

impl<'a, T> IterMut<'a, T> {
	pub(crate) fn new<D>(data: &'a mut [T], slice: &MatrixSlice<D>) -> Self
	where
		D: Dimension,
	{
		Self {
			ptr: data.as_mut_ptr(),
			len: data.len(),
			offsets: slice.offsets(),
			marker: PhantomData,
		}
	}
}

unsafe impl<'a, T> Send for IterMut<'a, T> where T: Send {}

impl<'a, T> Iterator for IterMut<'a, T> {
	type Item = &'a mut T;

	fn next(&mut self) -> Option<Self::Item> {
		let offset = self.offsets.next()?;
		assert!(offset < self.len);
		// A single traversal never yields the same offset twice, so the returned references never alias.
		Some(unsafe { &mut *self.ptr.add(offset) })
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.offsets.size_hint()
	}
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

#[test]
fn test_indices() {
	let indices: Vec<[usize; 2]> = Indices::new([2, 3]).collect();
	assert_eq!(
		indices,
		vec![[0, 0], [0, 1], [0, 2], [1, 0], [1, 1], [1, 2]]
	);
	let indices: Vec<Vec<usize>> = Indices::new(Vec::new()).collect();
	assert_eq!(indices, vec![Vec::<usize>::new()]);
	assert_eq!(Indices::new([3, 4, 5]).len(), 60);
}

#[test]
fn test_offsets() {
	let slice = MatrixSlice::new([2, 3]).unwrap();
	assert_eq!(slice.offsets().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
	let slice = MatrixSlice::with_layout([2, 3], crate::Layout::ColumnMajor).unwrap();
	assert_eq!(slice.offsets().collect::<Vec<_>>(), vec![0, 2, 4, 1, 3, 5]);
	let column = slice.fix(&[1]).unwrap();
	assert_eq!(column.offsets().collect::<Vec<_>>(), vec![1, 3, 5]);
}

#[test]
fn test_offsets_match_offset() {
	let slice = MatrixSlice::with_layout([3, 4, 5], crate::Layout::ColumnMajor).unwrap();
	let expected: Vec<usize> = slice
		.indices()
		.map(|index| slice.offset(&index).unwrap())
		.collect();
	assert_eq!(slice.offsets().collect::<Vec<_>>(), expected);
}

#[test]
fn test_restartable() {
	let data = [10, 20, 30, 40];
	let slice = MatrixSlice::new([2, 2]).unwrap();
	let iter = Iter::new(&data, &slice);
	let first: Vec<_> = iter.clone().collect();
	let second: Vec<_> = iter.collect();
	assert_eq!(first, second);
	assert_eq!(first, vec![&10, &20, &30, &40]);
}

#[test]
fn test_iter_mut() {
	let mut data = [0; 6];
	let slice = MatrixSlice::with_layout([2, 3], crate::Layout::ColumnMajor).unwrap();
	for (i, value) in IterMut::new(&mut data, &slice).enumerate() {
		*value = i;
	}
	assert_eq!(data, [0, 3, 1, 4, 2, 5]);
}
