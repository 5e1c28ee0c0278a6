use crate::Tensor;
use anyhow::Result;
use std::iter::Sum;

impl<T> Tensor<T>
where
    T: Copy,
{
    pub fn sum(&self) -> Result<T>
    where
        T: Sum<T>,
    {
        Ok(self.data().iter().copied().sum())
    }

    pub fn all(&self, f: impl Fn(T) -> bool) -> bool {
        self.data().iter().all(|&elem| f(elem))
    }
}
