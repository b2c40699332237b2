mod gemm;

use crate::backend::{GemmBackend, GemmParams};
use crate::error::Result;
use crate::shape::GemmShape;

/// Pure-Rust CPU GEMM backend.
///
/// Implements the operation with straightforward loops optimized for
/// correctness rather than peak performance. Intended as a reference
/// implementation and fallback for other providers.
#[derive(Debug, Clone)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        CpuBackend
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GemmBackend for CpuBackend {
    fn name(&self) -> &str {
        "cpu"
    }

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
    ) -> Result<()> {
        let GemmParams {
            layout,
            trans_a,
            trans_b,
            alpha,
            beta,
        } = *params;

        shape.validate(
            layout,
            trans_a,
            trans_b,
            a.len(),
            lda,
            b.len(),
            ldb,
            c.len(),
            ldc,
        )?;

        log::debug!(
            "cpu gemm {} {}{} alpha={} beta={} lda={} ldb={} ldc={}",
            shape,
            trans_a,
            trans_b,
            alpha,
            beta,
            lda,
            ldb,
            ldc
        );

        gemm::scale_c(layout, shape.m, shape.n, beta, c, ldc);

        if alpha == 0.0 || shape.is_degenerate() {
            log::trace!("cpu gemm: product term skipped (alpha={}, shape {})", alpha, shape);
            return Ok(());
        }

        gemm::accumulate(
            layout, trans_a, trans_b, shape, alpha, a, lda, b, ldb, c, ldc,
        );
        Ok(())
    }
}
