//! Einstein summation.
//!
//! `"ijk,il->jkl"` multiplies `A[i, j, k]` with `B[i, l]` and sums over
//! `i`, the one label missing from the output.

mod expression;
mod plan;

pub use expression::LabelExpression;
pub use plan::ContractionPlan;

use anyhow::Result;
use num_traits::Zero;
use std::ops::Mul;
use tracing::{debug, trace};

use crate::core::{iters::Indexer, Tensor};

/// Contracts `operands` according to `expression`.
///
/// ```
/// use vein::{einsum, Tensor};
///
/// let m = Tensor::arange(0, 9, 1)?.view(&[3, 3])?;
/// assert_eq!(einsum("ii->", &[&m])?.index(&[])?, 12);
/// assert_eq!(einsum("ii->i", &[&m])?.data().as_ref(), &[0, 4, 8]);
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Panics
///
/// Integer products and sums use the element type's own arithmetic, so an
/// overflowing contraction panics in debug builds. Cast to a wider type
/// with [`Tensor::cast`] first when the result may not fit.
pub fn einsum<T>(expression: &str, operands: &[&Tensor<T>]) -> Result<Tensor<T>>
where
    T: Copy + Zero + Mul<Output = T>,
{
    let expression = LabelExpression::parse(expression)?;
    einsum_with(&expression, operands)
}

pub fn einsum_with<T>(expression: &LabelExpression, operands: &[&Tensor<T>]) -> Result<Tensor<T>>
where
    T: Copy + Zero + Mul<Output = T>,
{
    let operand_sizes = operands
        .iter()
        .map(|operand| operand.sizes())
        .collect::<Vec<&[usize]>>();
    let plan = ContractionPlan::new(expression, &operand_sizes)?;

    debug!(
        expression = %expression,
        operands = ?operand_sizes,
        output = ?plan.output_sizes(),
        summed = ?plan.summed_labels(),
        "contraction planned"
    );

    let strides = operands
        .iter()
        .enumerate()
        .map(|(operand, tensor)| plan.operand_strides(operand, tensor.strides()))
        .collect::<Vec<_>>();

    // Per operand, the storage offset of every summed multi-index.
    let summed_offsets = strides
        .iter()
        .map(|(_, summed_strides)| {
            Indexer::new(plan.summed_sizes())
                .map(|index| dot(&index, summed_strides))
                .collect::<Vec<usize>>()
        })
        .collect::<Vec<_>>();
    let summed_count = plan.summed_sizes().iter().product::<usize>();

    let data = Indexer::new(plan.output_sizes())
        .map(|index| {
            let bases = operands
                .iter()
                .zip(&strides)
                .map(|(tensor, (output_strides, _))| tensor.offset() + dot(&index, output_strides))
                .collect::<Vec<usize>>();

            (0..summed_count).fold(T::zero(), |acc, s| {
                let product = operands
                    .iter()
                    .zip(&bases)
                    .zip(&summed_offsets)
                    .map(|((tensor, base), offsets)| tensor.data[base + offsets[s]])
                    .reduce(|lhs, rhs| lhs * rhs);

                product.map_or(acc, |product| acc + product)
            })
        })
        .collect::<Vec<T>>();

    trace!(elements = data.len(), steps = plan.cost(), "contraction done");

    Tensor::init(data, plan.output_sizes())
}

fn dot(index: &[usize], strides: &[usize]) -> usize {
    index.iter().zip(strides).map(|(i, stride)| i * stride).sum()
}

impl<T> Tensor<T>
where
    T: Copy + Zero + Mul<Output = T>,
{
    /// Two-operand [`einsum`] with `self` as the first operand.
    pub fn contract(&self, rhs: &Tensor<T>, expression: &str) -> Result<Tensor<T>> {
        einsum(expression, &[self, rhs])
    }
}
