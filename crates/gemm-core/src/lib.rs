//! `gemm-core` - Dense general matrix-multiply with pluggable compute backends.
//!
//! This crate provides:
//! - CBLAS-compatible `Layout` and `Transpose` enumerations
//! - A `GemmShape` descriptor with leading-dimension and buffer validation
//! - A `GemmBackend` trait for pluggable GEMM providers
//! - A reference `CpuBackend` implementation
//! - An owned `Matrix` type for building operands and printing results
//!
//! The operation computed everywhere is `C := alpha * op(A) * op(B) + beta * C`.

pub mod backend;
pub mod cpu;
pub mod error;
pub mod layout;
pub mod matrix;
pub mod shape;

// Re-export primary types at the crate root for convenience.
pub use backend::{GemmBackend, GemmParams};
pub use cpu::CpuBackend;
pub use error::{GemmError, Result};
pub use layout::{Layout, Operand, Transpose};
pub use matrix::Matrix;
pub use shape::GemmShape;

/// Double-precision GEMM on the reference CPU backend.
///
/// Computes `C := alpha * op(A) * op(B) + beta * C` where op(A) is `m x k`,
/// op(B) is `k x n` and C is `m x n`, all stored in `layout` with the given
/// leading dimensions. When `beta == 0` the prior contents of C are never read.
///
/// # Errors
/// Returns [`GemmError::InvalidDimension`] if a leading dimension is smaller
/// than its operand's stored shape allows, or [`GemmError::BufferTooSmall`] if
/// a slice cannot hold the region addressed by its shape and stride. C is left
/// untouched on error.
#[allow(clippy::too_many_arguments)]
pub fn dgemm(
    layout: Layout,
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
    beta: f64,
    c: &mut [f64],
    ldc: usize,
) -> Result<()> {
    let params = GemmParams::new(layout, trans_a, trans_b, alpha, beta);
    CpuBackend::new().gemm(&params, GemmShape::new(m, n, k), a, lda, b, ldb, c, ldc)
}
