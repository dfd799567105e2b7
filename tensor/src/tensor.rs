use std::ops::{Index, IndexMut};

use crate::{Result, TensorError};

/// A dense, n-dimensional tensor of `f32` backed by a flat contiguous buffer.
///
/// Elements are laid out row-major: the last axis is contiguous and
/// `strides[i] == strides[i + 1] * shape[i + 1]`. A rank-0 tensor has an empty
/// shape, an empty buffer and can't be indexed.
///
/// Every tensor exclusively owns its buffer, `row` and `set_row` copy instead
/// of returning views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tensor {
    shape: Vec<usize>,
    strides: Vec<usize>,
    data: Vec<f32>,
}

impl Tensor {
    /// Creates a new zero-filled `Tensor`.
    ///
    /// # Arguments
    /// * `shape` - The extent of each axis, the amount of extents is the rank.
    ///
    /// # Returns
    /// A new `Tensor` or `TensorError::Alloc` if the buffer couldn't be allocated.
    pub fn new<S>(shape: S) -> Result<Self>
    where
        S: AsRef<[usize]>,
    {
        let shape = shape.as_ref().to_vec();
        let data = zeroed(num_elements(&shape)?)?;

        Ok(Self {
            strides: strides_for(&shape),
            shape,
            data,
        })
    }

    /// Creates a rank-1 `Tensor` holding a copy of `values`.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(values.len())
            .map_err(|e| TensorError::alloc(values.len(), e))?;
        data.extend_from_slice(values);
        Ok(Self::from(data))
    }

    /// Creates a `Tensor` of an arbitrary shape from a row-major buffer.
    ///
    /// # Arguments
    /// * `shape` - The extent of each axis.
    /// * `values` - The elements, its length must be the product of `shape`.
    ///
    /// # Returns
    /// The new tensor or `TensorError::SizeMismatch` if the lengths don't agree.
    pub fn from_shape_vec<S>(shape: S, values: Vec<f32>) -> Result<Self>
    where
        S: AsRef<[usize]>,
    {
        let shape = shape.as_ref().to_vec();
        let expected = num_elements(&shape)?;

        if values.len() != expected {
            return Err(TensorError::SizeMismatch {
                what: "buffer",
                got: values.len(),
                expected,
            });
        }

        Ok(Self {
            strides: strides_for(&shape),
            shape,
            data: values,
        })
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the extent of `axis`, or `None` if the tensor has no such axis.
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.shape.get(axis).copied()
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Returns the amount of elements in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f32> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, f32> {
        self.data.iter_mut()
    }

    /// Replaces the whole shape and reallocates the buffer.
    ///
    /// The previous contents are discarded: after a resize every element is `0.0`.
    ///
    /// # Arguments
    /// * `shape` - The new extent of each axis.
    pub fn resize<S>(&mut self, shape: S) -> Result<()>
    where
        S: AsRef<[usize]>,
    {
        let shape = shape.as_ref().to_vec();
        let len = num_elements(&shape)?;

        self.data.clear();
        self.data
            .try_reserve_exact(len)
            .map_err(|e| TensorError::alloc(len, e))?;
        self.data.resize(len, 0.0);

        self.strides = strides_for(&shape);
        self.shape = shape;
        Ok(())
    }

    /// Replaces the extent of a single axis, discarding the contents like `resize`.
    ///
    /// # Arguments
    /// * `axis` - The axis to change, must be lower than the rank.
    /// * `extent` - Its new extent.
    pub fn set_dimension(&mut self, axis: usize, extent: usize) -> Result<()> {
        if axis >= self.rank() {
            return Err(TensorError::AxisOutOfRange {
                axis,
                rank: self.rank(),
            });
        }

        let mut shape = self.shape.clone();
        shape[axis] = extent;
        self.resize(shape)
    }

    /// Inserts a leading axis of extent 1, keeping the buffer untouched.
    ///
    /// A rank-0 tensor has no elements, so it becomes a zeroed tensor of shape `[1]`.
    pub fn unsqueeze(&mut self) -> Result<()> {
        if self.rank() == 0 {
            return self.resize([1]);
        }

        self.shape.insert(0, 1);
        self.strides = strides_for(&self.shape);
        Ok(())
    }

    /// Changes the shape without touching the buffer.
    ///
    /// # Arguments
    /// * `shape` - The new shape, its element count must equal `self.len()`.
    ///
    /// # Returns
    /// `TensorError::SizeMismatch` if the element counts differ, the tensor is left
    /// untouched in that case.
    pub fn reshape<S>(&mut self, shape: S) -> Result<()>
    where
        S: AsRef<[usize]>,
    {
        let shape = shape.as_ref();
        let count = num_elements(shape)?;

        if count != self.data.len() {
            return Err(TensorError::SizeMismatch {
                what: "reshape",
                got: count,
                expected: self.data.len(),
            });
        }

        self.shape = shape.to_vec();
        self.strides = strides_for(&self.shape);
        Ok(())
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Returns a new tensor of the same shape with `f` applied to every element.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f32) -> f32,
    {
        Self {
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Computes the linear buffer offset of a multi-index.
    ///
    /// # Arguments
    /// * `indices` - One index per axis.
    ///
    /// # Returns
    /// The dot product of `indices` and the strides, or an error if the amount of
    /// indices isn't the rank or any index exceeds its axis extent.
    pub fn offset(&self, indices: &[usize]) -> Result<usize> {
        if self.rank() == 0 || indices.len() != self.rank() {
            return Err(TensorError::RankMismatch {
                what: "indices",
                got: indices.len(),
                expected: self.rank(),
            });
        }

        indices
            .iter()
            .zip(&self.shape)
            .zip(&self.strides)
            .enumerate()
            .try_fold(0, |acc, (axis, ((&index, &extent), &stride))| {
                if index >= extent {
                    return Err(TensorError::IndexOutOfRange {
                        axis,
                        index,
                        extent,
                    });
                }

                Ok(acc + index * stride)
            })
    }

    pub fn get<I>(&self, indices: I) -> Result<&f32>
    where
        I: AsRef<[usize]>,
    {
        let offset = self.offset(indices.as_ref())?;
        Ok(&self.data[offset])
    }

    pub fn get_mut<I>(&mut self, indices: I) -> Result<&mut f32>
    where
        I: AsRef<[usize]>,
    {
        let offset = self.offset(indices.as_ref())?;
        Ok(&mut self.data[offset])
    }

    /// Copies a row of a rank-2 tensor into a new rank-1 tensor.
    ///
    /// # Arguments
    /// * `r` - The row index.
    ///
    /// # Returns
    /// A tensor of length `shape[1]`.
    pub fn row(&self, r: usize) -> Result<Self> {
        let range = self.row_range(r)?;
        Self::from_slice(&self.data[range])
    }

    /// Overwrites row `r` of a rank-2 tensor with the elements of `row`.
    ///
    /// # Arguments
    /// * `r` - The row index.
    /// * `row` - A rank-1 tensor of length `shape[1]`.
    pub fn set_row(&mut self, r: usize, row: &Tensor) -> Result<()> {
        let range = self.row_range(r)?;

        if row.rank() != 1 {
            return Err(TensorError::RankMismatch {
                what: "row",
                got: row.rank(),
                expected: 1,
            });
        }

        if row.len() != range.len() {
            return Err(TensorError::SizeMismatch {
                what: "row length",
                got: row.len(),
                expected: range.len(),
            });
        }

        self.data[range].copy_from_slice(&row.data);
        Ok(())
    }

    fn row_range(&self, r: usize) -> Result<std::ops::Range<usize>> {
        if self.rank() != 2 {
            return Err(TensorError::RankMismatch {
                what: "row access",
                got: self.rank(),
                expected: 2,
            });
        }

        let rows = self.shape[0];
        if r >= rows {
            return Err(TensorError::IndexOutOfRange {
                axis: 0,
                index: r,
                extent: rows,
            });
        }

        let start = r * self.strides[0];
        Ok(start..start + self.shape[1])
    }
}

impl From<Vec<f32>> for Tensor {
    fn from(values: Vec<f32>) -> Self {
        Self {
            shape: vec![values.len()],
            strides: vec![1],
            data: values,
        }
    }
}

impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f32;

    fn index(&self, indices: [usize; N]) -> &f32 {
        match self.get(indices) {
            Ok(x) => x,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<const N: usize> IndexMut<[usize; N]> for Tensor {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut f32 {
        match self.get_mut(indices) {
            Ok(x) => x,
            Err(e) => panic!("{e}"),
        }
    }
}

/// Returns the amount of elements a shape holds, a rank-0 shape holds none.
fn num_elements(shape: &[usize]) -> Result<usize> {
    if shape.is_empty() {
        return Ok(0);
    }

    shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or(TensorError::Alloc {
            requested: usize::MAX,
        })
}

fn strides_for(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];

    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }

    strides
}

fn zeroed(len: usize) -> Result<Vec<f32>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|e| TensorError::alloc(len, e))?;
    data.resize(len, 0.0);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn assert_row_major(t: &Tensor) {
        let (shape, strides) = (t.shape(), t.strides());
        assert_eq!(strides.len(), shape.len());

        if let Some(&last) = strides.last() {
            assert_eq!(last, 1);
        }

        for i in 0..shape.len().saturating_sub(1) {
            assert_eq!(strides[i], strides[i + 1] * shape[i + 1], "shape: {shape:?}");
        }

        assert_eq!(t.len(), num_elements(shape).unwrap());
    }

    fn arange(shape: &[usize]) -> Tensor {
        let n = num_elements(shape).unwrap();
        Tensor::from_shape_vec(shape, (0..n).map(|x| x as f32).collect()).unwrap()
    }

    #[test]
    fn test_new_computes_row_major_strides() {
        let t = Tensor::new([2, 3, 4]).unwrap();
        assert_eq!(t.rank(), 3);
        assert_eq!(t.strides(), &[12, 4, 1]);
        assert_eq!(t.len(), 24);
        assert!(t.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_rank_zero_is_empty_and_not_indexable() {
        let scalar: [usize; 0] = [];
        let t = Tensor::new(scalar).unwrap();
        assert_eq!(t, Tensor::default());
        assert!(t.is_empty());
        assert!(t.strides().is_empty());
        assert_eq!(
            t.get(scalar),
            Err(TensorError::RankMismatch {
                what: "indices",
                got: 0,
                expected: 0
            })
        );
    }

    #[test]
    fn test_from_vec_is_rank_one() {
        let t = Tensor::from(vec![1., 2., 3.]);
        assert_eq!(t.shape(), &[3]);
        assert_eq!(t.strides(), &[1]);
        assert_eq!(t[[2]], 3.);
        assert_eq!(Tensor::from_slice(&[1., 2., 3.]).unwrap(), t);
    }

    #[test]
    fn test_from_shape_vec_rejects_wrong_length() {
        let err = Tensor::from_shape_vec([2, 2], vec![1., 2., 3.]).unwrap_err();
        assert_eq!(
            err,
            TensorError::SizeMismatch {
                what: "buffer",
                got: 3,
                expected: 4
            }
        );
    }

    #[test]
    fn test_stride_invariant_after_shape_mutations() {
        let mut rng = rand::rng();
        let mut t = Tensor::new([3]).unwrap();

        for _ in 0..50 {
            let rank = rng.random_range(1..5);
            let shape: Vec<usize> = (0..rank).map(|_| rng.random_range(1..5)).collect();

            t.resize(&shape).unwrap();
            assert_row_major(&t);

            let axis = rng.random_range(0..rank);
            t.set_dimension(axis, rng.random_range(1..5)).unwrap();
            assert_row_major(&t);

            t.unsqueeze().unwrap();
            assert_row_major(&t);

            let flat = [t.len()];
            t.reshape(flat).unwrap();
            assert_row_major(&t);
        }
    }

    #[test]
    fn test_indexing_uses_strides() {
        let t = arange(&[2, 3, 4]);
        assert_eq!(t[[0, 0, 0]], 0.);
        assert_eq!(t[[0, 1, 2]], 6.);
        assert_eq!(t[[1, 2, 3]], 23.);
        assert_eq!(t.offset(&[1, 0, 1]), Ok(13));
    }

    #[test]
    fn test_index_mut_writes_in_place() {
        let mut t = Tensor::new([2, 2]).unwrap();
        t[[1, 0]] = 5.;
        *t.get_mut([0, 1]).unwrap() = 3.;
        assert_eq!(t.as_slice(), &[0., 3., 5., 0.]);
    }

    #[test]
    fn test_wrong_index_arity_is_an_error() {
        let t = Tensor::new([2, 3]).unwrap();
        assert_eq!(
            t.get([1]),
            Err(TensorError::RankMismatch {
                what: "indices",
                got: 1,
                expected: 2
            })
        );
        assert!(t.get([0, 0, 0]).is_err());
    }

    #[test]
    fn test_index_past_extent_is_an_error() {
        let t = Tensor::new([2, 3]).unwrap();
        assert_eq!(
            t.get([0, 3]),
            Err(TensorError::IndexOutOfRange {
                axis: 1,
                index: 3,
                extent: 3
            })
        );
    }

    #[test]
    #[should_panic(expected = "rank mismatch")]
    fn test_index_operator_panics_on_arity() {
        let t = Tensor::new([2, 3]).unwrap();
        let _ = t[[1]];
    }

    #[test]
    fn test_resize_zeroes_contents() {
        let mut t = arange(&[2, 2]);
        t.resize([3, 2]).unwrap();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.as_slice(), &[0.; 6]);
    }

    #[test]
    fn test_set_dimension() {
        let mut t = arange(&[2, 3]);
        t.set_dimension(0, 4).unwrap();
        assert_eq!(t.shape(), &[4, 3]);
        assert_eq!(t.strides(), &[3, 1]);
        assert_eq!(t.len(), 12);

        assert_eq!(
            t.set_dimension(2, 1),
            Err(TensorError::AxisOutOfRange { axis: 2, rank: 2 })
        );
    }

    #[test]
    fn test_unsqueeze_preserves_data() {
        let mut t = arange(&[2, 3]);
        let before = t.as_slice().to_vec();

        t.unsqueeze().unwrap();
        assert_eq!(t.shape(), &[1, 2, 3]);
        assert_eq!(t.strides(), &[6, 3, 1]);
        assert_eq!(t.as_slice(), before.as_slice());
    }

    #[test]
    fn test_unsqueeze_rank_zero() {
        let mut t = Tensor::default();
        t.unsqueeze().unwrap();
        assert_eq!(t.shape(), &[1]);
        assert_eq!(t.as_slice(), &[0.]);
    }

    #[test]
    fn test_reshape_preserves_buffer() {
        let mut t = arange(&[2, 6]);
        let before = t.as_slice().to_vec();

        t.reshape([3, 2, 2]).unwrap();
        assert_eq!(t.shape(), &[3, 2, 2]);
        assert_eq!(t.as_slice(), before.as_slice());
        assert_eq!(t[[2, 1, 0]], 10.);
    }

    #[test]
    fn test_reshape_rejects_different_count() {
        let mut t = arange(&[2, 3]);
        assert_eq!(
            t.reshape([4, 2]),
            Err(TensorError::SizeMismatch {
                what: "reshape",
                got: 8,
                expected: 6
            })
        );
        assert_eq!(t.shape(), &[2, 3]);
    }

    #[test]
    fn test_fill_and_map() {
        let mut t = Tensor::new([2, 2]).unwrap();
        t.fill(-2.);
        let u = t.map(f32::abs);
        assert_eq!(u.shape(), t.shape());
        assert_eq!(u.as_slice(), &[2.; 4]);
    }

    #[test]
    fn test_row_is_a_copy() {
        let mut m = arange(&[3, 2]);
        let row = m.row(1).unwrap();
        assert_eq!(row.shape(), &[2]);
        assert_eq!(row.as_slice(), &[2., 3.]);

        m.fill(0.);
        assert_eq!(row.as_slice(), &[2., 3.]);
    }

    #[test]
    fn test_row_round_trip_leaves_matrix_unchanged() {
        let mut m = arange(&[4, 3]);
        let before = m.clone();

        for r in 0..4 {
            let row = m.row(r).unwrap();
            m.set_row(r, &row).unwrap();
        }

        assert_eq!(m, before);
    }

    #[test]
    fn test_set_row_writes_in_place() {
        let mut m = Tensor::new([2, 3]).unwrap();
        m.set_row(1, &Tensor::from(vec![7., 8., 9.])).unwrap();
        assert_eq!(m.as_slice(), &[0., 0., 0., 7., 8., 9.]);
    }

    #[test]
    fn test_row_operations_validate_shapes() {
        let mut m = Tensor::new([2, 3]).unwrap();
        let v = Tensor::new([3]).unwrap();

        assert!(matches!(
            v.row(0),
            Err(TensorError::RankMismatch { expected: 2, .. })
        ));
        assert!(matches!(
            m.row(2),
            Err(TensorError::IndexOutOfRange { axis: 0, .. })
        ));
        assert_eq!(
            m.set_row(0, &Tensor::from(vec![1., 2.])),
            Err(TensorError::SizeMismatch {
                what: "row length",
                got: 2,
                expected: 3
            })
        );
        assert!(matches!(
            m.set_row(0, &Tensor::new([1, 3]).unwrap()),
            Err(TensorError::RankMismatch { what: "row", .. })
        ));
    }

    #[test]
    fn test_shape_overflow_is_reported() {
        assert!(matches!(
            Tensor::new([usize::MAX, 2]),
            Err(TensorError::Alloc { .. })
        ));
    }
}
