//! Tensor alias and the axis-0 helpers used by batching.
//!
//! Axis 0 is always the entity axis: nodes for node features, bonds for
//! edge features, graph rows for graph features.

use ndarray::{ArrayD, ArrayViewD, Axis, ShapeError, Slice};
use std::ops::Range;

/// Dense feature tensor.
pub type Tensor = ArrayD<f32>;

/// Length of the entity axis, or `None` for a 0-d tensor.
#[inline]
pub fn leading_dim(tensor: &Tensor) -> Option<usize> {
    tensor.shape().first().copied()
}

/// Shape without the entity axis.
#[inline]
pub fn trailing_shape(tensor: &Tensor) -> &[usize] {
    tensor.shape().get(1..).unwrap_or(&[])
}

/// Concatenates tensors along the entity axis, in slice order.
pub fn concat_rows(tensors: &[&Tensor]) -> Result<Tensor, ShapeError> {
    let views: Vec<ArrayViewD<'_, f32>> = tensors.iter().map(|t| t.view()).collect();
    ndarray::concatenate(Axis(0), &views)
}

/// Copies the rows `range` of `tensor`.
///
/// The caller guarantees `range.end <= leading_dim(tensor)`.
pub fn slice_rows(tensor: &Tensor, range: Range<usize>) -> Tensor {
    tensor.slice_axis(Axis(0), Slice::from(range)).to_owned()
}
