use prettytable::{format::consts::FORMAT_BOX_CHARS, Row, Table};
use std::{
    any::type_name,
    fmt::{Debug, Display, Formatter, Result},
};

use crate::Tensor;

impl<T> Debug for Tensor<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("Tensor")
            .field("dtype", &type_name::<T>())
            .field("dims", &self.rank())
            .field("elems", &self.numel())
            .field("shape", &self.sizes())
            .finish()
    }
}

// Odd ranks render as a single row of nested tables, even ranks as a
// column of rows, so the innermost axis always reads left to right.
// Empty tensors and ranks above 8 print only the `Debug` summary.
impl<T: Display + Copy> Display for Tensor<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let n = self.rank();

        if n == 0 {
            writeln!(f, "{}", self.data[self.offset()])?;
        } else if (1..=8).contains(&n) && self.numel() > 0 {
            let table = if n % 2 == 1 {
                let row = odd_dimensions(self, n, 0);
                set_style(Table::init(vec![row]))
            } else {
                even_dimensions(self, n, 0)
            };

            write!(f, "{}", table)?;
        }

        writeln!(f, "{:?}", self)
    }
}

fn odd_dimensions<T>(tensor: &Tensor<T>, n: usize, stride_offset: usize) -> Row
where
    T: Copy + Display,
{
    let dim = tensor.rank() - n;
    let size = tensor.shape.sizes[dim];
    let stride = tensor.shape.strides[dim];

    if n == 1 {
        let offset = tensor.offset() + stride_offset;
        Row::from((0..size).map(|index| tensor.data[index * stride + offset]))
    } else {
        Row::from(
            (0..size).map(|index| even_dimensions(tensor, n - 1, index * stride + stride_offset)),
        )
    }
}

fn even_dimensions<T>(tensor: &Tensor<T>, n: usize, stride_offset: usize) -> Table
where
    T: Copy + Display,
{
    let dim = tensor.rank() - n;
    let size = tensor.shape.sizes[dim];
    let stride = tensor.shape.strides[dim];

    let rows = (0..size)
        .map(|index| odd_dimensions(tensor, n - 1, index * stride + stride_offset))
        .collect();

    set_style(Table::init(rows))
}

fn set_style(mut table: Table) -> Table {
    table.set_format(*FORMAT_BOX_CHARS);
    table
}

#[cfg(test)]
mod tests {
    use crate::Tensor;

    #[test]
    fn debug_summarises() -> anyhow::Result<()> {
        let tensor = Tensor::<i32>::zeros(&[4, 3, 5])?;
        let debug = format!("{:?}", tensor);
        assert!(debug.contains("dims: 3"));
        assert!(debug.contains("elems: 60"));
        assert!(debug.contains("shape: [4, 3, 5]"));
        Ok(())
    }

    #[test]
    fn display_follows_views() -> anyhow::Result<()> {
        let b = Tensor::new(&[1, -2, -1, 0, 3, -3], &[3, 2])?;
        let rendered = b.t()?.to_string();
        let first_row = rendered.lines().nth(1).unwrap_or_default();
        let cells = first_row
            .split(|c: char| !(c.is_ascii_digit() || c == '-'))
            .filter(|cell| !cell.is_empty())
            .collect::<Vec<_>>();
        assert_eq!(cells, vec!["1", "-1", "3"]);
        Ok(())
    }

    #[test]
    fn empty_prints_summary_only() -> anyhow::Result<()> {
        let rendered = Tensor::<i32>::zeros(&[4, 0])?.to_string();
        assert!(rendered.starts_with("Tensor {"));
        assert_eq!(rendered.lines().count(), 1);
        Ok(())
    }

    #[test]
    fn display_scalar() -> anyhow::Result<()> {
        let rendered = Tensor::scalar(22)?.to_string();
        assert!(rendered.starts_with("22\n"));
        Ok(())
    }
}
