use crate::MatrixSlice;
use std::fmt;

/**
Write the elements addressed by `slice` as nested braces, one level per axis, with elements separated by a single space. A rank two slice with extents `[2, 2]` is written as `{{0 1} {2 3}}`, and a slice of rank zero is written as its only element.
*/
pub(crate) fn write_nested<T>(
	f: &mut fmt::Formatter<'_>,
	data: &[T],
	slice: &MatrixSlice<Vec<usize>>,
) -> fmt::Result
where
	T: fmt::Display,
{
	if slice.rank() == 0 {
		return fmt::Display::fmt(&data[slice.start()], f);
	}
	write!(f, "{{")?;
	for index in 0..slice.extents()[0] {
		if index > 0 {
			write!(f, " ")?;
		}
		let inner = slice.fix(&[index]).map_err(|_| fmt::Error)?;
		write_nested(f, data, &inner)?;
	}
	write!(f, "}}")
}

#[test]
fn test_display() {
	use crate::Matrix;
	let matrix = Matrix::<usize, 2>::from_vec((2, 2), vec![0, 1, 2, 3]).unwrap();
	insta::assert_snapshot!(matrix.to_string(), @"{{0 1} {2 3}}");
	let matrix = Matrix::<usize, 3>::from_fn((2, 2, 3), |[i, j, k]| 100 * i + 10 * j + k).unwrap();
	insta::assert_snapshot!(matrix.to_string(), @"{{{0 1 2} {10 11 12}} {{100 101 102} {110 111 112}}}");
	insta::assert_snapshot!(matrix.slice(&[1]).unwrap().to_string(), @"{{100 101 102} {110 111 112}}");
	insta::assert_snapshot!(matrix.slice(&[1, 0, 2]).unwrap().to_string(), @"102");
}

#[test]
fn test_display_precision() {
	use crate::{Layout, Matrix};
	let matrix =
		Matrix::<f32, 2>::from_vec_with_layout((2, 3), Layout::ColumnMajor, vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0])
			.unwrap();
	insta::assert_snapshot!(format!("{:.1}", matrix), @"{{0.0 1.0 2.0} {3.0 4.0 5.0}}");
	let matrix = Matrix::<i32, 1>::from_vec(4, vec![1, 2, 3, 4]).unwrap();
	insta::assert_snapshot!(matrix.to_string(), @"{1 2 3 4}");
}
