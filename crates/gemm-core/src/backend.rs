use std::fmt::Debug;

use crate::error::Result;
use crate::layout::{Layout, Transpose};
use crate::shape::GemmShape;

/// Per-call GEMM parameters other than the shape and the buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GemmParams {
    pub layout: Layout,
    pub trans_a: Transpose,
    pub trans_b: Transpose,
    pub alpha: f64,
    pub beta: f64,
}

impl GemmParams {
    pub fn new(
        layout: Layout,
        trans_a: Transpose,
        trans_b: Transpose,
        alpha: f64,
        beta: f64,
    ) -> Self {
        Self {
            layout,
            trans_a,
            trans_b,
            alpha,
            beta,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_trans_a(mut self, trans: Transpose) -> Self {
        self.trans_a = trans;
        self
    }

    pub fn with_trans_b(mut self, trans: Transpose) -> Self {
        self.trans_b = trans;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }
}

impl Default for GemmParams {
    /// Plain product `C := A * B` on row-major operands.
    fn default() -> Self {
        Self {
            layout: Layout::RowMajor,
            trans_a: Transpose::NoTrans,
            trans_b: Transpose::NoTrans,
            alpha: 1.0,
            beta: 0.0,
        }
    }
}

/// Trait for pluggable GEMM providers (reference CPU loops, an optimized
/// BLAS, a GPU, etc.).
///
/// Buffers are borrowed from the caller; a backend never allocates, copies
/// or frees the operands. Implementations must call [`GemmShape::validate`]
/// before reading A or B or writing C.
pub trait GemmBackend: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "cpu").
    fn name(&self) -> &str;

    /// General matrix multiply: `C := alpha * op(A) * op(B) + beta * C`.
    ///
    /// - `a`: stored `m x k` (or `k x m` when `trans_a` is `Trans`), stride `lda`
    /// - `b`: stored `k x n` (or `n x k` when `trans_b` is `Trans`), stride `ldb`
    /// - `c`: stored `m x n`, stride `ldc`, updated in place
    ///
    /// When `beta == 0` the prior contents of C must not be read.
    #[allow(clippy::too_many_arguments)]
    fn gemm(
        &self,
        params: &GemmParams,
        shape: GemmShape,
        a: &[f64],
        lda: usize,
        b: &[f64],
        ldb: usize,
        c: &mut [f64],
        ldc: usize,
    ) -> Result<()>;
}
