/*!
```console
            _
__   _____ (_)_ __
\ \ / / _ \| | '_ \
 \ V /  __/| | | | |
  \_/ \___||_|_| |_|
```

Vectorized Einstein summation over N-dimensional numerical arrays.

```
use vein::{einsum, Tensor};

let a = Tensor::arange(0, 6, 1)?.view(&[2, 3])?;
let b = Tensor::arange(0, 6, 1)?.view(&[3, 2])?;

let c = einsum("ij,jk->ik", &[&a, &b])?;
assert_eq!(c.sizes(), &[2, 2]);
assert_eq!(c.data().as_ref(), &[10, 13, 28, 40]);
# Ok::<(), anyhow::Error>(())
```
*/

mod core;
pub use crate::core::einsum::{einsum, einsum_with, ContractionPlan, LabelExpression};
pub use crate::core::errors::{EinsumError, LabelError};
pub use crate::core::Tensor;
