use thiserror::Error;

// --- Einsum ---

/// Failure of a contraction. Returned inside [`anyhow::Error`]; recover it
/// with `err.downcast_ref::<EinsumError>()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EinsumError {
    #[error("Label '{label}' has size {expected} in one axis and size {found} in another.")]
    ShapeMismatch {
        label: char,
        expected: usize,
        found: usize,
    },

    #[error("Invalid label expression {expression:?}. {reason}")]
    InvalidLabelExpression {
        expression: String,
        reason: LabelError,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("Character {0:?} is not a label. Labels are ASCII letters.")]
    InvalidCharacter(char),

    #[error("Expression contains more than one '->'.")]
    MultipleArrows,

    #[error("Output label '{0}' repeats.")]
    RepeatedOutput(char),

    #[error("Output label '{0}' does not appear in any operand.")]
    UnknownOutput(char),

    #[error("Expression has {groups} operand label groups, but {operands} operands were given.")]
    OperandCount { groups: usize, operands: usize },

    #[error("Operand {operand} is labelled with {labels} labels, but has rank {rank}.")]
    RankMismatch {
        operand: usize,
        labels: usize,
        rank: usize,
    },
}

// --- Shape ---

#[derive(Error, Debug)]
#[error("Data length ({data_length}) does not match size of tensor ({tensor_size}).")]
pub(crate) struct InvalidDataLengthError {
    pub data_length: usize,
    pub tensor_size: usize,
}

#[derive(Error, Debug)]
#[error("Tensor of shape {current_shape:?} cannot be viewed/reshaped to {new_shape:?}.")]
pub(crate) struct ReshapeError {
    pub current_shape: Vec<usize>,
    pub new_shape: Vec<usize>,
}

#[derive(Error, Debug)]
#[error("Shape is not contiguous. Use `to_contiguous()` or `reshape()`.")]
pub(crate) struct NonContiguousError;

#[derive(Error, Debug)]
#[error("Transpose requires at least two dimensions.")]
pub(crate) struct TransposeError;

#[derive(Error, Debug)]
#[error("Shapes {lhs_sizes:?} and {rhs_sizes:?} are not equal.")]
pub(crate) struct ZipShapeError {
    pub lhs_sizes: Vec<usize>,
    pub rhs_sizes: Vec<usize>,
}

// --- Index, Dims ---

#[derive(Error, Debug)]
pub(crate) enum IndexError {
    #[error("Index {index} is out of range for dimension {dimension}, of size {size}.")]
    OutOfRange {
        index: usize,
        dimension: usize,
        size: usize,
    },

    #[error("Number of indices ({num_indices}) does not match the number of dimensions ({num_dimensions}).")]
    IndicesLength {
        num_indices: usize,
        num_dimensions: usize,
    },
}

#[derive(Error, Debug)]
pub(crate) enum DimensionError {
    #[error("Dimension {dimension} is greater than max range of dimensions, {dim_range}.")]
    OutOfRange { dimension: usize, dim_range: usize },

    #[error("Dimension {0} repeats.")]
    Repetition(usize),
}

// --- Misc ---

#[derive(Error, Debug)]
#[error("Element {value} of type {from} cannot be represented as {to}.")]
pub(crate) struct ElementCastError {
    pub value: String,
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Error, Debug)]
pub(crate) enum ArangeError {
    #[error("Step size cannot be zero.")]
    Zero,

    #[error("Step size is positive, but start > end.")]
    Positive,

    #[error("Step size is negative, but end > start.")]
    Negative,

    #[error("Step size cannot compared with zero.")]
    Comparison,
}
