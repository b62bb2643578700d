use crate::{
	display::write_nested,
	error::Result,
	iter::{Indices, Iter, IterMut},
	Entry, MatrixSlice,
};
use std::{fmt, iter::Zip};

/**
A `MatrixView` borrows the buffer of a [`Matrix`](struct.Matrix.html) and addresses part of it through its own [`MatrixSlice`](struct.MatrixSlice.html). Views are produced by fixing some of the leading axes of a matrix, so their rank is only known at runtime.
*/
pub struct MatrixView<'a, T> {
	data: &'a [T],
	slice: MatrixSlice<Vec<usize>>,
}

/// The mutable counterpart of [`MatrixView`](struct.MatrixView.html). It borrows its parent's buffer exclusively.
pub struct MatrixViewMut<'a, T> {
	data: &'a mut [T],
	slice: MatrixSlice<Vec<usize>>,
}

impl<'a, T> MatrixView<'a, T> {
	pub(crate) fn new(data: &'a [T], slice: MatrixSlice<Vec<usize>>) -> Self {
		Self { data, slice }
	}

	pub fn rank(&self) -> usize {
		self.slice.rank()
	}

	pub fn len(&self) -> usize {
		self.slice.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slice.is_empty()
	}

	pub fn extents(&self) -> &[usize] {
		self.slice.extents()
	}

	pub fn strides(&self) -> &[usize] {
		self.slice.strides()
	}

	pub fn descriptor(&self) -> &MatrixSlice<Vec<usize>> {
		&self.slice
	}

	pub fn get(&self, coords: &[usize]) -> Result<&'a T> {
		let offset = self.slice.offset(coords)?;
		let data = self.data;
		Ok(&data[offset])
	}

	pub fn at(&self, coords: &[usize]) -> Result<Entry<'a, T>> {
		if coords.len() == self.rank() {
			self.get(coords).map(Entry::Element)
		} else {
			self.slice(coords).map(Entry::Slice)
		}
	}

	pub fn slice(&self, prefix: &[usize]) -> Result<MatrixView<'a, T>> {
		let slice = self.slice.fix(prefix)?;
		Ok(MatrixView::new(self.data, slice))
	}

	pub fn iter(&self) -> Iter<'a, T> {
		Iter::new(self.data, &self.slice)
	}

	pub fn indexed_iter(&self) -> Zip<Indices<Vec<usize>>, Iter<'a, T>> {
		self.slice.indices().zip(self.iter())
	}

	/// Copy the elements into a new vector in row-major order.
	pub fn to_vec(&self) -> Vec<T>
	where
		T: Clone,
	{
		self.iter().cloned().collect()
	}
}

impl<'a, T> Clone for MatrixView<'a, T> {
	fn clone(&self) -> Self {
		Self {
			data: self.data,
			slice: self.slice.clone(),
		}
	}
}

impl<'a, T> fmt::Debug for MatrixView<'a, T>
where
	T: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MatrixView")
			.field("slice", &self.slice)
			.field("elements", &self.iter().collect::<Vec<_>>())
			.finish()
	}
}

impl<'a, T> IntoIterator for MatrixView<'a, T> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T>;
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, 'b, T> IntoIterator for &'b MatrixView<'a, T> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T>;
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, T> fmt::Display for MatrixView<'a, T>
where
	T: fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_nested(f, self.data, &self.slice)
	}
}

impl<'a, T> MatrixViewMut<'a, T> {
	pub(crate) fn new(data: &'a mut [T], slice: MatrixSlice<Vec<usize>>) -> Self {
		Self { data, slice }
	}

	pub fn rank(&self) -> usize {
		self.slice.rank()
	}

	pub fn len(&self) -> usize {
		self.slice.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slice.is_empty()
	}

	pub fn extents(&self) -> &[usize] {
		self.slice.extents()
	}

	pub fn strides(&self) -> &[usize] {
		self.slice.strides()
	}

	pub fn descriptor(&self) -> &MatrixSlice<Vec<usize>> {
		&self.slice
	}

	/// Reborrow this view immutably.
	pub fn view(&self) -> MatrixView<T> {
		MatrixView::new(&*self.data, self.slice.clone())
	}

	pub fn get(&self, coords: &[usize]) -> Result<&T> {
		let offset = self.slice.offset(coords)?;
		Ok(&self.data[offset])
	}

	pub fn get_mut(&mut self, coords: &[usize]) -> Result<&mut T> {
		let offset = self.slice.offset(coords)?;
		Ok(&mut self.data[offset])
	}

	pub fn slice(&self, prefix: &[usize]) -> Result<MatrixView<T>> {
		let slice = self.slice.fix(prefix)?;
		Ok(MatrixView::new(&*self.data, slice))
	}

	pub fn slice_mut(&mut self, prefix: &[usize]) -> Result<MatrixViewMut<T>> {
		let slice = self.slice.fix(prefix)?;
		Ok(MatrixViewMut::new(&mut *self.data, slice))
	}

	pub fn iter(&self) -> Iter<T> {
		Iter::new(&*self.data, &self.slice)
	}

	pub fn iter_mut(&mut self) -> IterMut<T> {
		IterMut::new(&mut *self.data, &self.slice)
	}

	pub fn fill(&mut self, value: T)
	where
		T: Clone,
	{
		for element in self.iter_mut() {
			*element = value.clone();
		}
	}
}

impl<'a, T> IntoIterator for MatrixViewMut<'a, T> {
	type Item = &'a mut T;
	type IntoIter = IterMut<'a, T>;
	fn into_iter(self) -> Self::IntoIter {
		IterMut::new(self.data, &self.slice)
	}
}

impl<'a, T> fmt::Debug for MatrixViewMut<'a, T>
where
	T: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&self.view(), f)
	}
}

impl<'a, T> fmt::Display for MatrixViewMut<'a, T>
where
	T: fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_nested(f, &*self.data, &self.slice)
	}
}

#[test]
fn test_view_shares_storage() {
	use crate::Matrix;
	let matrix = Matrix::<usize, 3>::from_fn((3, 4, 5), |[i, j, k]| 100 * i + 10 * j + k).unwrap();
	let plane = matrix.slice(&[2]).unwrap();
	assert_eq!(plane.rank(), 2);
	assert_eq!(plane.len(), 20);
	assert_eq!(plane.extents(), &[4, 5]);
	assert_eq!(plane.strides(), &[5, 1]);
	let row = plane.slice(&[1]).unwrap();
	assert_eq!(row.to_vec(), vec![210, 211, 212, 213, 214]);
	assert!(std::ptr::eq(row.get(&[3]).unwrap(), matrix.get(&[2, 1, 3]).unwrap()));
	let element = row.slice(&[3]).unwrap();
	assert_eq!(element.rank(), 0);
	assert_eq!(element.get(&[]).unwrap(), &213);
	assert_eq!(
		row.get(&[5]).unwrap_err(),
		crate::MatrixError::OutOfRange {
			axis: 0,
			index: 5,
			extent: 5,
		}
	);
}

#[test]
fn test_view_debug() {
	use crate::Matrix;
	let matrix = Matrix::<i32, 2>::from_vec((2, 2), vec![1, 2, 3, 4]).unwrap();
	let row = matrix.slice(&[1]).unwrap();
	let debug = format!("{:?}", row);
	assert!(debug.starts_with("MatrixView { slice: MatrixSlice {"));
	assert!(debug.ends_with("elements: [3, 4] }"));
}

#[test]
fn test_view_iteration_is_restartable() {
	use crate::{Layout, Matrix};
	let matrix =
		Matrix::<usize, 3>::from_fn_with_layout((2, 3, 4), Layout::ColumnMajor, |[i, j, k]| {
			100 * i + 10 * j + k
		})
		.unwrap();
	let plane = matrix.slice(&[1]).unwrap();
	let first: Vec<usize> = plane.iter().copied().collect();
	let second: Vec<usize> = plane.iter().copied().collect();
	assert_eq!(first, second);
	assert_eq!(first.len(), 12);
	assert_eq!(&first[..5], &[100, 101, 102, 103, 110]);
	let coords: Vec<Vec<usize>> = plane.indexed_iter().map(|(index, _)| index).collect();
	assert_eq!(coords[4], vec![1, 0]);
}

#[test]
fn test_view_mut() {
	use crate::{Layout, Matrix};
	let mut matrix = Matrix::<i32, 2>::with_layout((3, 3), Layout::ColumnMajor).unwrap();
	{
		let mut row = matrix.slice_mut(&[1]).unwrap();
		assert_eq!(row.strides(), &[3]);
		for (i, value) in row.iter_mut().enumerate() {
			*value = i as i32 + 1;
		}
		*row.get_mut(&[0]).unwrap() = 10;
	}
	assert_eq!(matrix[[1, 0]], 10);
	assert_eq!(matrix[[1, 2]], 3);
	let mut all = matrix.view_mut();
	all.slice_mut(&[2]).unwrap().fill(7);
	assert_eq!(all.view().to_vec(), vec![0, 0, 0, 10, 2, 3, 7, 7, 7]);
	for value in all {
		*value += 1;
	}
	assert_eq!(matrix.iter().sum::<i32>(), 9 + 10 + 2 + 3 + 21);
}
