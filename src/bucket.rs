//! Grouping of key-aligned data by discrete key.
//!
//! [`bucket`] sorts a 1-D key array once and returns the sorted unique keys
//! together with a [`Bucketor`] that splits any array aligned with those keys
//! into one group per key. Rows keep their original relative order within a
//! group. A typical use is grouping per-atom data by element.
//!
//! ```
//! use nagl_batch::bucket;
//! use ndarray::{arr1, arr2};
//!
//! let elements = arr1(&[8u8, 1, 6, 1]);
//! let (keys, bucketor) = bucket(elements.view())?;
//! assert_eq!(keys, vec![1, 6, 8]);
//!
//! let coords = arr2(&[[0.0f32, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
//! let groups = bucketor.split(coords.view())?;
//! assert_eq!(groups[0], arr2(&[[1.0f32, 0.0], [3.0, 0.0]]));
//! assert_eq!(groups[2], arr2(&[[0.0f32, 0.0]]));
//! # Ok::<(), nagl_batch::BatchError>(())
//! ```

use crate::batch::Error;
use ndarray::{Array, ArrayView, ArrayView1, Axis, RemoveAxis};
use std::cmp::Ordering;

/// Splits key-aligned arrays into per-key groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucketor {
    len: usize,
    groups: Vec<Vec<usize>>,
}

impl Bucketor {
    /// Number of keys the bucketor was built from.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Original row indices of each group, in unique-key order.
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Selects the rows of `data` belonging to each group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BucketLengthMismatch`] if `data` does not have one
    /// row per key.
    pub fn split<A, D>(&self, data: ArrayView<'_, A, D>) -> Result<Vec<Array<A, D>>, Error>
    where
        A: Clone,
        D: RemoveAxis,
    {
        let rows = data.shape().first().copied().unwrap_or(0);
        if data.ndim() == 0 || rows != self.len {
            return Err(Error::BucketLengthMismatch {
                expected: self.len,
                found: rows,
            });
        }
        Ok(self
            .groups
            .iter()
            .map(|indices| data.select(Axis(0), indices))
            .collect())
    }
}

/// Groups positions of `values` by value.
///
/// Returns the sorted unique values and a [`Bucketor`] whose groups follow
/// the same order.
///
/// # Errors
///
/// Returns [`Error::UnorderedKey`] if a value cannot be compared with the
/// others (a NaN float, for example).
pub fn bucket<T>(values: ArrayView1<'_, T>) -> Result<(Vec<T>, Bucketor), Error>
where
    T: Copy + PartialOrd,
{
    if let Some(index) = values.iter().position(|v| v.partial_cmp(v).is_none()) {
        return Err(Error::UnorderedKey { index });
    }

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut unique: Vec<T> = Vec::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for idx in order {
        let value = values[idx];
        match (unique.last(), groups.last_mut()) {
            (Some(last), Some(group)) if *last == value => group.push(idx),
            _ => {
                unique.push(value);
                groups.push(vec![idx]);
            }
        }
    }

    Ok((
        unique,
        Bucketor {
            len: values.len(),
            groups,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, arr1, arr2};

    #[test]
    fn unique_values_are_sorted() {
        let (unique, bucketor) = bucket(arr1(&[3i64, 1, 2, 3, 1]).view()).unwrap();
        assert_eq!(unique, vec![1, 2, 3]);
        assert_eq!(bucketor.len(), 5);
        assert_eq!(bucketor.groups(), &[vec![1, 4], vec![2], vec![0, 3]]);
    }

    #[test]
    fn split_keeps_relative_order() {
        let (_, bucketor) = bucket(arr1(&[2.0f32, 1.0, 2.0, 1.0]).view()).unwrap();
        let data = arr1(&[10i32, 20, 30, 40]);
        let groups = bucketor.split(data.view()).unwrap();
        assert_eq!(groups, vec![arr1(&[20, 40]), arr1(&[10, 30])]);
    }

    #[test]
    fn split_works_on_matrices() {
        let (_, bucketor) = bucket(arr1(&[1u8, 0]).view()).unwrap();
        let data = arr2(&[[1.0f32, 2.0], [3.0, 4.0]]);
        let groups = bucketor.split(data.view()).unwrap();
        assert_eq!(groups[0], arr2(&[[3.0f32, 4.0]]));
        assert_eq!(groups[1], arr2(&[[1.0f32, 2.0]]));
    }

    #[test]
    fn split_rejects_misaligned_data() {
        let (_, bucketor) = bucket(arr1(&[1u8, 2, 3]).view()).unwrap();
        let err = bucketor.split(arr1(&[1.0f32, 2.0]).view()).unwrap_err();
        assert!(matches!(
            err,
            Error::BucketLengthMismatch {
                expected: 3,
                found: 2
            }
        ));

        let scalar = arr0(1.0f32).into_dyn();
        assert!(bucketor.split(scalar.view()).is_err());
    }

    #[test]
    fn nan_keys_are_rejected() {
        let err = bucket(arr1(&[1.0f64, f64::NAN]).view()).unwrap_err();
        assert!(matches!(err, Error::UnorderedKey { index: 1 }));
    }

    #[test]
    fn empty_keys_give_no_groups() {
        let (unique, bucketor) = bucket(arr1::<u8>(&[]).view()).unwrap();
        assert!(unique.is_empty());
        assert!(bucketor.is_empty());
        assert!(bucketor.split(arr1::<f32>(&[]).view()).unwrap().is_empty());
    }
}
