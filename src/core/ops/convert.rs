use crate::{
    core::{shape::Shape, utils::cast_element},
    Tensor,
};
use anyhow::Result;
use num_traits::{NumCast, ToPrimitive};
use std::{fmt::Debug, sync::Arc};

impl<T> Tensor<T>
where
    T: Copy + ToPrimitive + Debug,
{
    /// Converts every element to `U`, failing on the first element `U`
    /// cannot represent.
    pub fn cast<U>(&self) -> Result<Tensor<U>>
    where
        U: NumCast,
    {
        let data = self
            .data()
            .iter()
            .map(|&elem| cast_element(elem))
            .collect::<Result<Vec<U>, _>>()?;

        Ok(Tensor {
            data: Arc::new(data),
            shape: Shape::new(self.sizes()),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::Tensor;

    #[test]
    fn widening_cast_keeps_values() -> anyhow::Result<()> {
        let a = Tensor::new(&[1i32, -2, 3, 4], &[2, 2])?.t()?;
        let b = a.cast::<f64>()?;
        assert_eq!(b.sizes(), &[2, 2]);
        assert_eq!(b.data().as_ref(), &[1.0, 3.0, -2.0, 4.0]);
        Ok(())
    }

    #[test]
    fn narrowing_cast_fails() -> anyhow::Result<()> {
        let a = Tensor::new_1d(&[1i32, -2])?;
        assert!(a.cast::<u8>().is_err());
        Ok(())
    }
}
