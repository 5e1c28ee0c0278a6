mod convert;
mod reduce_ops;
