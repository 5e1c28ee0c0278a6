use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vein::Tensor;

fn tensor_a() -> Result<Tensor<i32>> {
    #[rustfmt::skip]
    let data = [
        1, 1, 0,   4, 3, 2,   1, 5, -1,   2, 2, -3,
        2, 1, 2,   1, 1, 1,   0, 0, -3,   2, 1, -3,
    ];
    Tensor::new(&data, &[2, 4, 3])
}

fn tensor_b() -> Result<Tensor<i32>> {
    #[rustfmt::skip]
    let data = [
        1, -2,
        -1, 0,
        3, -3,
        -2, 3,
        -2, 4,
    ];
    Tensor::new(&data, &[5, 2])
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let a = tensor_a()?;
    let b = tensor_b()?;
    println!("{}", a.shape_tuple());
    println!("{}", b.shape_tuple());

    let result = a.contract(&b.t()?, "ijk,il->jkl")?;
    info!(shape = %result.shape_tuple(), "contracted A with B transposed");

    println!("{}", result);
    println!("{}", result.shape_tuple());

    Ok(())
}
