use crate::{error::Result, MatrixError};
use std::convert::TryInto;

/**
`IntoExtents` is implemented by everything a [`Matrix`](struct.Matrix.html) of rank `N` can be constructed from. An array `[3, 4, 5]` and a tuple `(3, 4, 5)` describe the same extents and produce identical matrices. Slices and vectors are accepted too, in which case their length is checked at runtime.
*/
pub trait IntoExtents<const N: usize> {
	fn into_extents(self) -> Result<[usize; N]>;
}

impl<const N: usize> IntoExtents<N> for [usize; N] {
	fn into_extents(self) -> Result<[usize; N]> {
		Ok(self)
	}
}

impl<'a, const N: usize> IntoExtents<N> for &'a [usize] {
	fn into_extents(self) -> Result<[usize; N]> {
		self.try_into()
			.map_err(|_| MatrixError::InvalidDimension {
				extents: self.to_vec(),
				rank: N,
			})
	}
}

impl<const N: usize> IntoExtents<N> for Vec<usize> {
	fn into_extents(self) -> Result<[usize; N]> {
		self.as_slice().into_extents()
	}
}

impl IntoExtents<1> for usize {
	fn into_extents(self) -> Result<[usize; 1]> {
		Ok([self])
	}
}

macro_rules! tuple_into_extents {
	(@usize $name:ident) => {
		usize
	};
	($n:literal; $($name:ident),+) => {
		impl IntoExtents<$n> for ($(tuple_into_extents!(@usize $name),)+) {
			fn into_extents(self) -> Result<[usize; $n]> {
				let ($($name,)+) = self;
				Ok([$($name),+])
			}
		}
	};
}

tuple_into_extents!(1; a);
tuple_into_extents!(2; a, b);
tuple_into_extents!(3; a, b, c);
tuple_into_extents!(4; a, b, c, d);
tuple_into_extents!(5; a, b, c, d, e);
tuple_into_extents!(6; a, b, c, d, e, f);

#[test]
fn test_forms_agree() {
	let a: [usize; 3] = [3, 4, 5].into_extents().unwrap();
	let b: [usize; 3] = (3, 4, 5).into_extents().unwrap();
	let c: [usize; 3] = vec![3, 4, 5].into_extents().unwrap();
	assert_eq!(a, b);
	assert_eq!(a, c);
}

#[test]
fn test_wrong_count() {
	let result: Result<[usize; 3]> = vec![3, 4].into_extents();
	assert_eq!(
		result.unwrap_err(),
		MatrixError::InvalidDimension {
			extents: vec![3, 4],
			rank: 3,
		}
	);
}
