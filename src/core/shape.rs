use crate::core::errors::*;
use anyhow::Result;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub(crate) struct Shape {
    pub sizes: Vec<usize>,
    pub strides: Vec<usize>,
    pub offset: usize,
}

impl Shape {
    pub fn new(sizes: &[usize]) -> Shape {
        Shape {
            sizes: sizes.to_vec(),
            strides: contiguous_strides(sizes),
            offset: 0,
        }
    }

    pub fn scalar() -> Shape {
        Shape::new(&[])
    }

    pub(crate) fn rank(&self) -> usize {
        self.sizes.len()
    }

    pub(crate) fn numel(&self) -> usize {
        self.sizes.iter().product()
    }

    // --- Shape operations ---

    pub(crate) fn view(&self, sizes: &[usize]) -> Result<Shape> {
        self.valid_contiguity()?;
        self.valid_reshape(sizes)?;

        Ok(Shape {
            sizes: sizes.to_vec(),
            strides: contiguous_strides(sizes),
            offset: self.offset,
        })
    }

    pub(crate) fn permute(&self, permutation: &[usize]) -> Result<Shape> {
        self.valid_rank(permutation.len())?;
        self.valid_dimensions(permutation)?;

        let (sizes, strides) = permutation
            .iter()
            .map(|&d| (self.sizes[d], self.strides[d]))
            .unzip();

        Ok(Shape {
            sizes,
            strides,
            offset: self.offset,
        })
    }

    pub(crate) fn transpose(&self, dim_1: usize, dim_2: usize) -> Result<Shape> {
        let rank = self.rank();
        if rank < 2 {
            return Err(TransposeError.into());
        }
        self.valid_dimensions(&[dim_1])?;
        self.valid_dimensions(&[dim_2])?;

        let mut permutation = Vec::from_iter(0..rank);
        permutation.swap(dim_1, dim_2);

        self.permute(&permutation)
    }

    // --- Index ---

    /// Storage offset of `indices`, without bounds checks.
    pub(crate) fn idx(&self, indices: &[usize]) -> usize {
        self.strides
            .iter()
            .zip(indices)
            .map(|(stride, index)| stride * index)
            .sum::<usize>()
            + self.offset
    }

    pub(crate) fn index(&self, indices: &[usize]) -> Result<usize, IndexError> {
        self.valid_rank(indices.len())?;
        self.valid_indices(indices)?;

        Ok(self.idx(indices))
    }

    // --- Validation ---

    pub(crate) fn is_contiguous(&self) -> bool {
        self.strides == contiguous_strides(&self.sizes)
    }

    pub(crate) fn valid_contiguity(&self) -> Result<(), NonContiguousError> {
        if self.is_contiguous() {
            Ok(())
        } else {
            Err(NonContiguousError)
        }
    }

    pub(crate) fn valid_reshape(&self, sizes: &[usize]) -> Result<(), ReshapeError> {
        if self.numel() != sizes.iter().product::<usize>() {
            return Err(ReshapeError {
                current_shape: self.sizes.to_vec(),
                new_shape: sizes.to_vec(),
            });
        }

        Ok(())
    }

    fn valid_indices(&self, indices: &[usize]) -> Result<(), IndexError> {
        for (dimension, (&index, &size)) in indices.iter().zip(&self.sizes).enumerate() {
            if index >= size {
                return Err(IndexError::OutOfRange {
                    index,
                    dimension,
                    size,
                });
            }
        }

        Ok(())
    }

    pub(crate) fn valid_dimensions(&self, dimensions: &[usize]) -> Result<(), DimensionError> {
        let dim_range = self.rank().saturating_sub(1);
        let mut set = HashSet::with_capacity(dimensions.len());

        for &dimension in dimensions {
            if dimension >= self.rank() {
                return Err(DimensionError::OutOfRange {
                    dimension,
                    dim_range,
                });
            } else if !set.insert(dimension) {
                return Err(DimensionError::Repetition(dimension));
            }
        }

        Ok(())
    }

    fn valid_rank(&self, num_indices: usize) -> Result<(), IndexError> {
        let num_dimensions = self.rank();

        if num_indices != num_dimensions {
            Err(IndexError::IndicesLength {
                num_indices,
                num_dimensions,
            })
        } else {
            Ok(())
        }
    }

    pub(crate) fn valid_data_length(
        &self,
        data_length: usize,
    ) -> Result<(), InvalidDataLengthError> {
        let numel = self.numel();

        if data_length != numel {
            Err(InvalidDataLengthError {
                data_length,
                tensor_size: numel,
            })
        } else {
            Ok(())
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, rhs: &Shape) -> bool {
        self.sizes == rhs.sizes && self.strides == rhs.strides
    }
}

fn contiguous_strides(sizes: &[usize]) -> Vec<usize> {
    let mut current = 1;
    let mut strides = sizes
        .iter()
        .rev()
        .map(|size| {
            let stride = current;
            current *= size;
            stride
        })
        .collect::<Vec<usize>>();
    strides.reverse();
    strides
}
