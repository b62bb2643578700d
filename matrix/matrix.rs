use crate::{
	error::Result,
	iter::{Indices, Iter, IterMut},
	Dimension, IntoExtents, Layout, MatrixError, MatrixSlice, MatrixView, MatrixViewMut,
};
use num_traits::{One, Zero};
use serde::{
	de::{self, Deserializer},
	ser::{SerializeStruct, Serializer},
	Deserialize, Serialize,
};
use std::{fmt, iter::Zip};

/**
A `Matrix` is a dense array of elements of type `T` with `N` axes. The elements are stored in a single contiguous buffer that the matrix owns, and a [`MatrixSlice`](struct.MatrixSlice.html) maps coordinates onto positions in that buffer.

Cloning a matrix copies its buffer. Sub-slices obtained from [`slice`](#method.slice) borrow the buffer instead, so they can not outlive the matrix.
*/
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matrix<T, const N: usize> {
	data: Vec<T>,
	slice: MatrixSlice<[usize; N]>,
	layout: Layout,
}

/// The result of indexing a matrix with a possibly incomplete list of coordinates.
#[derive(Debug)]
pub enum Entry<'a, T> {
	Element(&'a T),
	Slice(MatrixView<'a, T>),
}

impl<'a, T> Entry<'a, T> {
	pub fn element(self) -> Option<&'a T> {
		match self {
			Entry::Element(element) => Some(element),
			Entry::Slice(_) => None,
		}
	}

	pub fn slice(self) -> Option<MatrixView<'a, T>> {
		match self {
			Entry::Element(_) => None,
			Entry::Slice(slice) => Some(slice),
		}
	}
}

fn layout_slice<const N: usize>(
	extents: impl IntoExtents<N>,
	layout: Layout,
) -> Result<MatrixSlice<[usize; N]>> {
	let slice = MatrixSlice::with_layout(extents.into_extents()?, layout)?;
	log::debug!(
		"allocating a {} matrix with extents {:?}",
		layout,
		slice.extents()
	);
	Ok(slice)
}

impl<T, const N: usize> Matrix<T, N> {
	/// Create a row-major matrix with the given extents whose elements are `T::default()`.
	pub fn new(extents: impl IntoExtents<N>) -> Result<Self>
	where
		T: Default,
	{
		Self::with_layout(extents, Layout::RowMajor)
	}

	pub fn with_layout(extents: impl IntoExtents<N>, layout: Layout) -> Result<Self>
	where
		T: Default,
	{
		let slice = layout_slice(extents, layout)?;
		let data = (0..slice.len()).map(|_| T::default()).collect();
		Ok(Self {
			data,
			slice,
			layout,
		})
	}

	pub fn from_elem(extents: impl IntoExtents<N>, elem: T) -> Result<Self>
	where
		T: Clone,
	{
		let slice = layout_slice(extents, Layout::RowMajor)?;
		let data = vec![elem; slice.len()];
		Ok(Self {
			data,
			slice,
			layout: Layout::RowMajor,
		})
	}

	pub fn zeros(extents: impl IntoExtents<N>) -> Result<Self>
	where
		T: Zero + Clone,
	{
		Self::from_elem(extents, T::zero())
	}

	pub fn ones(extents: impl IntoExtents<N>) -> Result<Self>
	where
		T: One + Clone,
	{
		Self::from_elem(extents, T::one())
	}

	/// Create a row-major matrix by calling `f` with the coordinates of each element.
	pub fn from_fn<F>(extents: impl IntoExtents<N>, f: F) -> Result<Self>
	where
		F: FnMut([usize; N]) -> T,
	{
		Self::from_fn_with_layout(extents, Layout::RowMajor, f)
	}

	/// Create a matrix by calling `f` with the coordinates of each element. `f` is called in storage order.
	pub fn from_fn_with_layout<F>(extents: impl IntoExtents<N>, layout: Layout, mut f: F) -> Result<Self>
	where
		F: FnMut([usize; N]) -> T,
	{
		let slice = layout_slice(extents, layout)?;
		let data = (0..slice.len())
			.map(|offset| f(slice.unravel(offset)))
			.collect();
		Ok(Self {
			data,
			slice,
			layout,
		})
	}

	/// Create a row-major matrix that takes ownership of `data`, which must hold exactly one element per position.
	pub fn from_vec(extents: impl IntoExtents<N>, data: Vec<T>) -> Result<Self> {
		Self::from_vec_with_layout(extents, Layout::RowMajor, data)
	}

	/// Create a matrix that takes ownership of `data`, whose elements are in the storage order of `layout`.
	pub fn from_vec_with_layout(
		extents: impl IntoExtents<N>,
		layout: Layout,
		data: Vec<T>,
	) -> Result<Self> {
		let slice = layout_slice(extents, layout)?;
		if data.len() != slice.len() {
			return Err(MatrixError::ShapeMismatch {
				expected: slice.len(),
				actual: data.len(),
			});
		}
		Ok(Self {
			data,
			slice,
			layout,
		})
	}

	pub fn rank(&self) -> usize {
		N
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn extents(&self) -> &[usize; N] {
		self.slice.extents()
	}

	pub fn strides(&self) -> &[usize; N] {
		self.slice.strides()
	}

	pub fn layout(&self) -> Layout {
		self.layout
	}

	pub fn descriptor(&self) -> &MatrixSlice<[usize; N]> {
		&self.slice
	}

	/// The underlying buffer, in storage order.
	pub fn as_slice(&self) -> &[T] {
		&self.data
	}

	pub fn into_vec(self) -> Vec<T> {
		self.data
	}

	/// Get the element at `coords`, which must contain exactly `N` in-range coordinates.
	pub fn get(&self, coords: &[usize]) -> Result<&T> {
		let offset = self.slice.offset(coords)?;
		Ok(&self.data[offset])
	}

	pub fn get_mut(&mut self, coords: &[usize]) -> Result<&mut T> {
		let offset = self.slice.offset(coords)?;
		Ok(&mut self.data[offset])
	}

	/**
	Index the matrix with up to `N` coordinates. With exactly `N` coordinates the result is the element they address. With fewer, the leading axes are fixed and the result is a view over the remaining axes.
	*/
	pub fn at(&self, coords: &[usize]) -> Result<Entry<T>> {
		if coords.len() == N {
			self.get(coords).map(Entry::Element)
		} else {
			self.slice(coords).map(Entry::Slice)
		}
	}

	/// Fix the leading axes to `prefix` and borrow the remaining axes as a view.
	pub fn slice(&self, prefix: &[usize]) -> Result<MatrixView<T>> {
		let slice = self.slice.fix(prefix)?;
		Ok(MatrixView::new(&self.data, slice))
	}

	pub fn slice_mut(&mut self, prefix: &[usize]) -> Result<MatrixViewMut<T>> {
		let slice = self.slice.fix(prefix)?;
		Ok(MatrixViewMut::new(&mut self.data, slice))
	}

	pub fn view(&self) -> MatrixView<T> {
		MatrixView::new(&self.data, self.slice.clone().into_dyn())
	}

	pub fn view_mut(&mut self) -> MatrixViewMut<T> {
		let slice = self.slice.clone().into_dyn();
		MatrixViewMut::new(&mut self.data, slice)
	}

	/// Iterate over the elements in row-major order, regardless of layout.
	pub fn iter(&self) -> Iter<T> {
		Iter::new(&self.data, &self.slice)
	}

	pub fn iter_mut(&mut self) -> IterMut<T> {
		IterMut::new(&mut self.data, &self.slice)
	}

	pub fn indexed_iter(&self) -> Zip<Indices<[usize; N]>, Iter<T>> {
		self.slice.indices().zip(self.iter())
	}

	pub fn fill(&mut self, value: T)
	where
		T: Clone,
	{
		for element in self.data.iter_mut() {
			*element = value.clone();
		}
	}

	/// Create a new matrix with the same extents and layout by applying `f` to every element.
	pub fn map<U, F>(&self, f: F) -> Matrix<U, N>
	where
		F: FnMut(&T) -> U,
	{
		Matrix {
			data: self.data.iter().map(f).collect(),
			slice: self.slice.clone(),
			layout: self.layout,
		}
	}

	pub fn to_ndarray(&self) -> Result<ndarray::ArrayD<T>>
	where
		T: Clone,
	{
		let data = self.iter().cloned().collect::<Vec<_>>();
		let len = data.len();
		ndarray::ArrayD::from_shape_vec(ndarray::IxDyn(self.extents()), data).map_err(|_| {
			MatrixError::ShapeMismatch {
				expected: self.len(),
				actual: len,
			}
		})
	}

	pub fn from_ndarray<S, D>(array: &ndarray::ArrayBase<S, D>) -> Result<Self>
	where
		S: ndarray::Data<Elem = T>,
		D: ndarray::Dimension,
		T: Clone,
	{
		Self::from_vec(array.shape(), array.iter().cloned().collect())
	}
}

impl<T, const N: usize> std::ops::Index<[usize; N]> for Matrix<T, N> {
	type Output = T;
	fn index(&self, index: [usize; N]) -> &Self::Output {
		match self.get(&index) {
			Ok(element) => element,
			Err(error) => panic!("{}", error),
		}
	}
}

impl<T, const N: usize> std::ops::IndexMut<[usize; N]> for Matrix<T, N> {
	fn index_mut(&mut self, index: [usize; N]) -> &mut Self::Output {
		match self.get_mut(&index) {
			Ok(element) => element,
			Err(error) => panic!("{}", error),
		}
	}
}

impl<'a, T, const N: usize> IntoIterator for &'a Matrix<T, N> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T>;
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, T, const N: usize> IntoIterator for &'a mut Matrix<T, N> {
	type Item = &'a mut T;
	type IntoIter = IterMut<'a, T>;
	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

impl<T, const N: usize> fmt::Display for Matrix<T, N>
where
	T: fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.view(), f)
	}
}

impl<T, const N: usize> Serialize for Matrix<T, N>
where
	T: Serialize,
{
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut state = serializer.serialize_struct("Matrix", 3)?;
		state.serialize_field("extents", self.extents().slice())?;
		state.serialize_field("layout", &self.layout)?;
		state.serialize_field("data", &self.data)?;
		state.end()
	}
}

impl<'de, T, const N: usize> Deserialize<'de> for Matrix<T, N>
where
	T: Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		struct MatrixRepr<E> {
			extents: Vec<usize>,
			#[serde(default)]
			layout: Layout,
			data: Vec<E>,
		}
		let repr = MatrixRepr::<T>::deserialize(deserializer)?;
		Self::from_vec_with_layout(repr.extents, repr.layout, repr.data).map_err(de::Error::custom)
	}
}

#[test]
fn test_construction_forms_agree() {
	let a = Matrix::<f32, 3>::new((3, 4, 5)).unwrap();
	let b = Matrix::<f32, 3>::new([3, 4, 5]).unwrap();
	let c = Matrix::<f32, 3>::new(vec![3, 4, 5]).unwrap();
	assert_eq!(a, b);
	assert_eq!(a, c);
	assert_eq!(a.extents(), &[3, 4, 5]);
	assert_eq!(a.strides(), &[20, 5, 1]);
	assert_eq!(a.len(), 60);
	assert_eq!(a.rank(), 3);
	assert!(a.iter().all(|x| *x == 0.0));
}

#[test]
fn test_construction_errors() {
	assert_eq!(
		Matrix::<f32, 2>::new((3, 0)).unwrap_err(),
		MatrixError::InvalidDimension {
			extents: vec![3, 0],
			rank: 2,
		}
	);
	assert_eq!(
		Matrix::<f32, 2>::new(vec![3, 4, 5]).unwrap_err(),
		MatrixError::InvalidDimension {
			extents: vec![3, 4, 5],
			rank: 2,
		}
	);
	assert_eq!(
		Matrix::<i32, 2>::from_vec((2, 2), vec![1, 2, 3]).unwrap_err(),
		MatrixError::ShapeMismatch {
			expected: 4,
			actual: 3,
		}
	);
}

#[test]
fn test_len_is_product_of_extents() {
	for extents in [[1, 1, 1], [2, 3, 4], [5, 1, 7], [3, 4, 5]].iter() {
		let matrix = Matrix::<u8, 3>::zeros(*extents).unwrap();
		assert_eq!(matrix.len(), extents.iter().product::<usize>());
		assert_eq!(matrix.iter().count(), matrix.len());
	}
}

#[test]
fn test_get() {
	let mut matrix = Matrix::<usize, 3>::from_fn((3, 4, 5), |[i, j, k]| 100 * i + 10 * j + k).unwrap();
	assert_eq!(*matrix.get(&[2, 1, 3]).unwrap(), 213);
	assert_eq!(matrix[[2, 1, 3]], 213);
	assert_eq!(matrix.get(&[2, 1, 3]), matrix.get(&[2, 1, 3]));
	*matrix.get_mut(&[0, 3, 4]).unwrap() = 7;
	matrix[[1, 1, 1]] = 8;
	assert_eq!(matrix[[0, 3, 4]], 7);
	assert_eq!(matrix[[1, 1, 1]], 8);
	assert_eq!(
		matrix.get(&[5, 0, 0]).unwrap_err(),
		MatrixError::OutOfRange {
			axis: 0,
			index: 5,
			extent: 3,
		}
	);
	assert_eq!(
		matrix.get(&[0, 0]).unwrap_err(),
		MatrixError::ArityMismatch {
			expected: 3,
			actual: 2,
		}
	);
	assert_eq!(
		matrix.get(&[0, 0, 0, 0]).unwrap_err(),
		MatrixError::ArityMismatch {
			expected: 3,
			actual: 4,
		}
	);
}

#[test]
#[should_panic(expected = "index 3 is out of range for axis 1 with extent 3")]
fn test_index_panics() {
	let matrix = Matrix::<i32, 2>::new((2, 3)).unwrap();
	let _element = matrix[[0, 3]];
}

#[test]
fn test_at() {
	let matrix = Matrix::<usize, 3>::from_fn((3, 4, 5), |[i, j, k]| 100 * i + 10 * j + k).unwrap();
	assert_eq!(matrix.at(&[2, 1, 3]).unwrap().element(), Some(&213));
	let row = matrix.at(&[2]).unwrap().slice().unwrap();
	assert_eq!(row.extents(), &[4, 5]);
	assert_eq!(row.get(&[1, 3]).unwrap(), &213);
	assert!(matrix.at(&[0, 0, 0, 0]).is_err());
	assert!(matrix.at(&[3]).is_err());
}

#[test]
fn test_iteration_is_row_major() {
	let matrix = Matrix::<usize, 2>::from_vec((2, 2), vec![0, 1, 2, 3]).unwrap();
	assert_eq!(matrix.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
	let matrix =
		Matrix::<usize, 2>::from_vec_with_layout((2, 3), Layout::ColumnMajor, vec![0, 3, 1, 4, 2, 5])
			.unwrap();
	assert_eq!(matrix.strides(), &[1, 2]);
	assert_eq!(
		matrix.iter().copied().collect::<Vec<_>>(),
		vec![0, 1, 2, 3, 4, 5]
	);
	let indices: Vec<[usize; 2]> = matrix.indexed_iter().map(|(index, _)| index).collect();
	assert_eq!(
		indices,
		vec![[0, 0], [0, 1], [0, 2], [1, 0], [1, 1], [1, 2]]
	);
}

#[test]
fn test_layouts_agree() {
	let row_major = Matrix::<usize, 3>::from_fn((3, 4, 5), |[i, j, k]| 100 * i + 10 * j + k).unwrap();
	let col_major = Matrix::<usize, 3>::from_fn_with_layout((3, 4, 5), Layout::ColumnMajor, |[i, j, k]| {
		100 * i + 10 * j + k
	})
	.unwrap();
	assert_ne!(row_major.as_slice(), col_major.as_slice());
	assert!(row_major.iter().eq(col_major.iter()));
	for (index, value) in col_major.indexed_iter() {
		assert_eq!(row_major[index], *value);
	}
}

#[test]
fn test_iter_mut() {
	let mut matrix = Matrix::<usize, 2>::with_layout((2, 3), Layout::ColumnMajor).unwrap();
	for (i, value) in matrix.iter_mut().enumerate() {
		*value = i;
	}
	assert_eq!(matrix[[1, 0]], 3);
	assert_eq!(matrix.as_slice(), &[0, 3, 1, 4, 2, 5]);
	for value in &mut matrix {
		*value *= 2;
	}
	assert_eq!((&matrix).into_iter().sum::<usize>(), 30);
}

#[test]
fn test_clone_is_deep() {
	let mut a = Matrix::<i32, 2>::ones((2, 2)).unwrap();
	let b = a.clone();
	a.fill(9);
	assert!(b.iter().all(|x| *x == 1));
	assert!(a.iter().all(|x| *x == 9));
	let c = a.map(|x| *x as f64 / 3.0);
	assert_eq!(c[[1, 1]], 3.0);
	assert_eq!(c.extents(), a.extents());
}

#[test]
fn test_slice_mut() {
	let mut matrix = Matrix::<i32, 3>::zeros((2, 3, 4)).unwrap();
	matrix.slice_mut(&[1]).unwrap().fill(1);
	*matrix.slice_mut(&[0, 2]).unwrap().get_mut(&[3]).unwrap() = 5;
	assert_eq!(matrix.iter().filter(|x| **x == 1).count(), 12);
	assert_eq!(matrix[[0, 2, 3]], 5);
	assert_eq!(matrix[[1, 2, 3]], 1);
}

#[test]
fn test_serde() {
	let matrix = Matrix::<i32, 2>::from_vec((2, 2), vec![1, 2, 3, 4]).unwrap();
	let json = serde_json::to_string(&matrix).unwrap();
	assert_eq!(
		json,
		r#"{"extents":[2,2],"layout":"row-major","data":[1,2,3,4]}"#
	);
	let parsed: Matrix<i32, 2> = serde_json::from_str(&json).unwrap();
	assert_eq!(parsed, matrix);
	let parsed: Matrix<i32, 2> =
		serde_json::from_str(r#"{"extents":[2,1],"data":[1,2]}"#).unwrap();
	assert_eq!(parsed.layout(), Layout::RowMajor);
	assert!(serde_json::from_str::<Matrix<i32, 2>>(r#"{"extents":[2,0],"data":[]}"#).is_err());
	assert!(serde_json::from_str::<Matrix<i32, 3>>(r#"{"extents":[2,2],"data":[1,2,3,4]}"#).is_err());
	assert!(serde_json::from_str::<Matrix<i32, 2>>(r#"{"extents":[2,2],"data":[1,2,3]}"#).is_err());
}

#[test]
fn test_ndarray() {
	let matrix = Matrix::<usize, 3>::from_fn_with_layout((2, 3, 4), Layout::ColumnMajor, |[i, j, k]| {
		100 * i + 10 * j + k
	})
	.unwrap();
	let array = matrix.to_ndarray().unwrap();
	assert_eq!(array.shape(), &[2, 3, 4]);
	assert_eq!(array[&[1, 2, 3][..]], 123);
	assert!(array.iter().eq(matrix.iter()));
	let back = Matrix::<usize, 3>::from_ndarray(&array).unwrap();
	assert_eq!(back[[1, 2, 3]], 123);
	assert_eq!(back.layout(), Layout::RowMajor);
	let transposed = array.t();
	let transposed = Matrix::<usize, 3>::from_ndarray(&transposed).unwrap();
	assert_eq!(transposed.extents(), &[4, 3, 2]);
	assert_eq!(transposed[[3, 2, 1]], 123);
}
