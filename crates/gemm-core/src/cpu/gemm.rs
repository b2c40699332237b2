// Scalar GEMM kernels used by CpuBackend.
//
// Callers validate strides and lengths first; these loops index freely.

use crate::layout::{Layout, Transpose};
use crate::shape::GemmShape;

/// Scales the logical `m x n` region of C by beta.
///
/// beta == 0 stores zeros without reading, so NaN in C does not survive.
pub(crate) fn scale_c(layout: Layout, m: usize, n: usize, beta: f64, c: &mut [f64], ldc: usize) {
    if beta == 1.0 {
        return;
    }
    for j in 0..n {
        for i in 0..m {
            let idx = layout.index(i, j, ldc);
            c[idx] = if beta == 0.0 { 0.0 } else { c[idx] * beta };
        }
    }
}

/// Adds `alpha * op(A) * op(B)` into C.
///
/// Each cell sums over p in ascending order before scaling by alpha, so
/// results are reproducible for a given input.
#[allow(clippy::too_many_arguments)]
pub(crate) fn accumulate(
    layout: Layout,
    trans_a: Transpose,
    trans_b: Transpose,
    shape: GemmShape,
    alpha: f64,
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
    c: &mut [f64],
    ldc: usize,
) {
    let GemmShape { m, n, k } = shape;
    for j in 0..n {
        for i in 0..m {
            let mut sum = 0.0f64;
            for p in 0..k {
                sum += a[trans_a.op_index(layout, i, p, lda)] * b[trans_b.op_index(layout, p, j, ldb)];
            }
            c[layout.index(i, j, ldc)] += alpha * sum;
        }
    }
}
