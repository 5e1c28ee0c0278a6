use anyhow::{bail, Result};
use num_traits::{One, Zero};
use std::{borrow::Cow, cmp::Ordering, iter::successors, ops::Add, sync::Arc};

use crate::core::{errors::*, iters::Indexer, shape::Shape};

/// Dense N-dimensional array.
///
/// Storage is shared between a tensor and the views derived from it
/// (`view`, `permute`, `transpose`); operations that produce new values
/// allocate new storage.
pub struct Tensor<T> {
    pub(crate) data: Arc<Vec<T>>,
    pub(crate) shape: Shape,
}

impl<T: Copy> Tensor<T> {
    pub(crate) fn init(data: Vec<T>, sizes: &[usize]) -> Result<Tensor<T>> {
        let shape = Shape::new(sizes);
        shape.valid_data_length(data.len())?;

        Ok(Tensor {
            data: Arc::new(data),
            shape,
        })
    }

    pub fn new(data: &[T], sizes: &[usize]) -> Result<Tensor<T>> {
        let data_length = data.len();
        let tensor_size = sizes.iter().product();

        if data_length != tensor_size {
            bail!(InvalidDataLengthError {
                data_length,
                tensor_size
            });
        }

        Tensor::init(data.to_vec(), sizes)
    }

    pub fn new_1d(data: &[T]) -> Result<Tensor<T>> {
        Tensor::init(data.to_vec(), &[data.len()])
    }

    pub fn scalar(data: T) -> Result<Tensor<T>> {
        Ok(Tensor {
            data: Arc::new(vec![data]),
            shape: Shape::scalar(),
        })
    }

    pub fn same(element: T, sizes: &[usize]) -> Result<Tensor<T>> {
        Tensor::init(vec![element; sizes.iter().product()], sizes)
    }

    pub fn zeros(sizes: &[usize]) -> Result<Tensor<T>>
    where
        T: Zero,
    {
        Tensor::same(T::zero(), sizes)
    }

    pub fn ones(sizes: &[usize]) -> Result<Tensor<T>>
    where
        T: One,
    {
        Tensor::same(T::one(), sizes)
    }

    pub fn arange(start: T, end: T, step: T) -> Result<Tensor<T>>
    where
        T: Add<Output = T> + PartialOrd + Zero,
    {
        let ascending = match step
            .partial_cmp(&T::zero())
            .ok_or(ArangeError::Comparison)?
        {
            Ordering::Equal => Err(ArangeError::Zero),
            Ordering::Greater if start > end => Err(ArangeError::Positive),
            Ordering::Less if end > start => Err(ArangeError::Negative),
            ordering => Ok(ordering == Ordering::Greater),
        }?;

        // `end` is exclusive in both directions; `start == end` is empty.
        let in_range = |value: &T| {
            if ascending {
                end > *value
            } else {
                *value > end
            }
        };

        let data: Vec<T> = successors(Some(start).filter(in_range), |&prev| {
            Some(prev + step).filter(in_range)
        })
        .collect();

        Tensor::new_1d(&data)
    }

    // --- Data ---

    pub fn to_contiguous(&self) -> Result<Tensor<T>> {
        Tensor::init(self.data_non_contiguous(), &self.shape.sizes)
    }

    fn data_contiguous(&self) -> &[T] {
        let start = self.offset();
        let end = start + self.numel();
        &self.data[start..end]
    }

    fn data_non_contiguous(&self) -> Vec<T> {
        Indexer::new(&self.shape.sizes)
            .map(|index| self.idx(&index))
            .collect()
    }

    /// Elements in row-major order of the logical shape.
    pub fn data(&self) -> Cow<[T]> {
        if self.is_contiguous() {
            Cow::Borrowed(self.data_contiguous())
        } else {
            Cow::Owned(self.data_non_contiguous())
        }
    }

    pub(crate) fn idx(&self, indices: &[usize]) -> T {
        self.data[self.shape.idx(indices)]
    }

    pub fn index(&self, indices: &[usize]) -> Result<T> {
        Ok(self.data[self.shape.index(indices)?])
    }

    // --- New Data, New Shape ---

    pub fn reshape(&self, sizes: &[usize]) -> Result<Tensor<T>> {
        self.shape.valid_reshape(sizes)?;

        Tensor::init(self.data().into_owned(), sizes)
    }

    // --- Maps and Zips ---

    pub fn unary_map<R>(&self, f: impl Fn(T) -> R) -> Result<Tensor<R>> {
        let data = self.data().iter().map(|&elem| f(elem)).collect();

        Ok(Tensor {
            data: Arc::new(data),
            shape: Shape::new(self.sizes()),
        })
    }

    /// Element-wise combination of two tensors of equal sizes.
    pub fn zip<R>(&self, rhs: &Tensor<T>, f: impl Fn(T, T) -> R) -> Result<Tensor<R>> {
        if self.sizes() != rhs.sizes() {
            bail!(ZipShapeError {
                lhs_sizes: self.sizes().to_vec(),
                rhs_sizes: rhs.sizes().to_vec(),
            });
        }

        let data = self
            .data()
            .iter()
            .zip(rhs.data().iter())
            .map(|(&lhs_elem, &rhs_elem)| f(lhs_elem, rhs_elem))
            .collect();

        Ok(Tensor {
            data: Arc::new(data),
            shape: Shape::new(self.sizes()),
        })
    }
}

impl<T> Tensor<T> {
    // --- Same Data, Different Shape ---

    pub(crate) fn with_shape(&self, shape: Shape) -> Result<Tensor<T>> {
        Ok(Tensor {
            data: Arc::clone(&self.data),
            shape,
        })
    }

    pub fn view(&self, sizes: &[usize]) -> Result<Tensor<T>> {
        self.with_shape(self.shape.view(sizes)?)
    }

    pub fn permute(&self, permutation: &[usize]) -> Result<Tensor<T>> {
        self.with_shape(self.shape.permute(permutation)?)
    }

    pub fn transpose(&self, dim_1: usize, dim_2: usize) -> Result<Tensor<T>> {
        self.with_shape(self.shape.transpose(dim_1, dim_2)?)
    }

    /// Reverses all axes, like `.T` on a NumPy array.
    pub fn t(&self) -> Result<Tensor<T>> {
        let permutation = (0..self.rank()).rev().collect::<Vec<usize>>();
        self.permute(&permutation)
    }

    // --- Shape Attributes ---

    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn sizes(&self) -> &[usize] {
        &self.shape.sizes
    }

    pub fn strides(&self) -> &[usize] {
        &self.shape.strides
    }

    pub fn offset(&self) -> usize {
        self.shape.offset
    }

    pub fn is_contiguous(&self) -> bool {
        self.shape.is_contiguous()
    }

    /// Sizes formatted as a tuple: `(2, 4, 3)`, `(5,)` or `()`.
    pub fn shape_tuple(&self) -> String {
        match self.sizes() {
            [size] => format!("({size},)"),
            sizes => {
                let sizes = sizes
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<String>>()
                    .join(", ");
                format!("({sizes})")
            }
        }
    }
}

impl<T: Copy + PartialEq> PartialEq for Tensor<T> {
    fn eq(&self, rhs: &Tensor<T>) -> bool {
        self.sizes() == rhs.sizes() && self.data() == rhs.data()
    }
}

impl<T> Clone for Tensor<T> {
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
            shape: self.shape.clone(),
        }
    }
}
