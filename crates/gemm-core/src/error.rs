use thiserror::Error;

use crate::layout::Operand;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GemmError {
    #[error("invalid leading dimension for {operand}: ld={ld} but at least {min} is required")]
    InvalidDimension {
        operand: Operand,
        ld: usize,
        min: usize,
    },
    #[error("buffer for {operand} too small: len={len} but {required} elements are addressed")]
    BufferTooSmall {
        operand: Operand,
        len: usize,
        required: usize,
    },
    #[error("span addressed by {operand} with ld={ld} overflows usize")]
    SpanOverflow { operand: Operand, ld: usize },
    #[error("missing buffer for {0}")]
    NullBuffer(Operand),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("gemm shape mismatch: C is [{c_rows}x{c_cols}], op(A) is [{a_rows}x{a_cols}], op(B) is [{b_rows}x{b_cols}]")]
    ShapeMismatch {
        c_rows: usize,
        c_cols: usize,
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },
    #[error("all operands must share one layout")]
    LayoutMismatch,
    #[error("matrix size {rows}x{cols} overflows usize")]
    SizeOverflow { rows: usize, cols: usize },
    #[error("data length {got} does not match matrix size {expected}")]
    BufferLength { expected: usize, got: usize },
    #[error("rows have differing lengths")]
    RaggedRows,
}

pub type Result<T> = std::result::Result<T, GemmError>;
