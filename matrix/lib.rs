/*!
This crate provides [`Matrix`](struct.Matrix.html), a dense *n*-dimensional array whose rank is fixed at compile time, along with [`MatrixSlice`](struct.MatrixSlice.html), the descriptor that maps coordinates to positions in the matrix's buffer, and [`MatrixView`](struct.MatrixView.html), a borrowed sub-slice of lower rank.

# Example

```
use tetris_matrix::{Entry, Matrix};

let mut matrix = Matrix::<f32, 3>::new((3, 4, 5)).unwrap();
assert_eq!(matrix.len(), 60);
assert_eq!(matrix.strides(), &[20, 5, 1]);

matrix[[2, 1, 3]] = 1.0;
assert_eq!(matrix.descriptor().offset(&[2, 1, 3]).unwrap(), 48);

// Indexing with fewer coordinates than the rank produces a view over the remaining axes.
match matrix.at(&[2]).unwrap() {
	Entry::Slice(plane) => assert_eq!(plane.get(&[1, 3]).unwrap(), &1.0),
	Entry::Element(_) => unreachable!(),
}
```
*/

#![allow(clippy::tabs_in_doc_comments)]

mod dimension;
mod display;
mod error;
mod extents;
mod iter;
mod layout;
mod matrix;
mod slice;
mod view;

pub use self::dimension::Dimension;
pub use self::error::{MatrixError, Result};
pub use self::extents::IntoExtents;
pub use self::iter::{Indices, Iter, IterMut, Offsets};
pub use self::layout::{Layout, ParseLayoutError};
pub use self::matrix::{Entry, Matrix};
pub use self::slice::MatrixSlice;
pub use self::view::{MatrixView, MatrixViewMut};
