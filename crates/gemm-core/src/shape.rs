use crate::error::{GemmError, Result};
use crate::layout::{Layout, Operand, Transpose};
use std::fmt;

/// The (M, N, K) triple of a GEMM call.
///
/// op(A) is `m x k`, op(B) is `k x n` and C is `m x n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GemmShape {
    pub m: usize,
    pub n: usize,
    pub k: usize,
}

impl GemmShape {
    pub fn new(m: usize, n: usize, k: usize) -> Self {
        GemmShape { m, n, k }
    }

    /// True when the product term contributes nothing to C.
    pub fn is_degenerate(&self) -> bool {
        self.m == 0 || self.n == 0 || self.k == 0
    }

    /// Stored `(rows, cols)` of A under `trans`.
    pub fn a_dims(&self, trans: Transpose) -> (usize, usize) {
        trans.stored_dims(self.m, self.k)
    }

    /// Stored `(rows, cols)` of B under `trans`.
    pub fn b_dims(&self, trans: Transpose) -> (usize, usize) {
        trans.stored_dims(self.k, self.n)
    }

    /// `(rows, cols)` of C.
    pub fn c_dims(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// Checks every leading dimension and buffer length for this shape.
    ///
    /// Runs before any backend touches memory, so a failed call leaves C as it was.
    #[allow(clippy::too_many_arguments)]
    pub fn validate(
        &self,
        layout: Layout,
        trans_a: Transpose,
        trans_b: Transpose,
        a_len: usize,
        lda: usize,
        b_len: usize,
        ldb: usize,
        c_len: usize,
        ldc: usize,
    ) -> Result<()> {
        let (a_rows, a_cols) = self.a_dims(trans_a);
        let (b_rows, b_cols) = self.b_dims(trans_b);
        let (c_rows, c_cols) = self.c_dims();

        check_operand(Operand::A, layout, a_rows, a_cols, lda, a_len)?;
        check_operand(Operand::B, layout, b_rows, b_cols, ldb, b_len)?;
        check_operand(Operand::C, layout, c_rows, c_cols, ldc, c_len)
    }
}

/// Smallest legal leading dimension of a stored `rows x cols` matrix.
///
/// Never below 1, following the reference BLAS argument checks.
pub fn min_leading_dim(layout: Layout, rows: usize, cols: usize) -> usize {
    layout.packed_ld(rows, cols).max(1)
}

/// Number of elements a stored `rows x cols` matrix with stride `ld` spans.
///
/// The last row (or column) only needs its logical extent, so a sub-view at
/// the end of a larger allocation does not need trailing padding.
/// Returns `None` if the span does not fit in `usize`.
pub fn required_len(layout: Layout, rows: usize, cols: usize, ld: usize) -> Option<usize> {
    if rows == 0 || cols == 0 {
        return Some(0);
    }
    let (outer, inner) = match layout {
        Layout::RowMajor => (rows, cols),
        Layout::ColMajor => (cols, rows),
    };
    (outer - 1).checked_mul(ld)?.checked_add(inner)
}

/// [`required_len`] for a named operand, reporting overflow as an error.
pub fn operand_span(
    operand: Operand,
    layout: Layout,
    rows: usize,
    cols: usize,
    ld: usize,
) -> Result<usize> {
    required_len(layout, rows, cols, ld).ok_or(GemmError::SpanOverflow { operand, ld })
}

fn check_operand(
    operand: Operand,
    layout: Layout,
    rows: usize,
    cols: usize,
    ld: usize,
    len: usize,
) -> Result<()> {
    let min = min_leading_dim(layout, rows, cols);
    if ld < min {
        return Err(GemmError::InvalidDimension { operand, ld, min });
    }
    let required = operand_span(operand, layout, rows, cols, ld)?;
    if len < required {
        return Err(GemmError::BufferTooSmall {
            operand,
            len,
            required,
        });
    }
    Ok(())
}

impl fmt::Display for GemmShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}x{}] @ [{}x{}]", self.m, self.k, self.k, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_dims() {
        let s = GemmShape::new(3, 4, 2);
        assert_eq!(s.a_dims(Transpose::NoTrans), (3, 2));
        assert_eq!(s.a_dims(Transpose::Trans), (2, 3));
        assert_eq!(s.b_dims(Transpose::NoTrans), (2, 4));
        assert_eq!(s.b_dims(Transpose::Trans), (4, 2));
        assert_eq!(s.c_dims(), (3, 4));
    }

    #[test]
    fn test_min_leading_dim() {
        assert_eq!(min_leading_dim(Layout::RowMajor, 3, 2), 2);
        assert_eq!(min_leading_dim(Layout::ColMajor, 3, 2), 3);
        assert_eq!(min_leading_dim(Layout::ColMajor, 0, 2), 1);
    }

    #[test]
    fn test_required_len() {
        assert_eq!(required_len(Layout::RowMajor, 3, 2, 2), Some(6));
        assert_eq!(required_len(Layout::RowMajor, 3, 2, 5), Some(12));
        assert_eq!(required_len(Layout::ColMajor, 3, 2, 4), Some(7));
        assert_eq!(required_len(Layout::ColMajor, 0, 2, 4), Some(0));
    }

    #[test]
    fn test_required_len_overflow() {
        assert_eq!(required_len(Layout::RowMajor, 2, 2, usize::MAX), None);
        assert_eq!(required_len(Layout::ColMajor, 2, 3, usize::MAX / 2 + 1), None);
        // a single row never multiplies by ld
        assert_eq!(required_len(Layout::RowMajor, 1, 2, usize::MAX), Some(2));
    }

    #[test]
    fn test_validate_huge_ld() {
        let s = GemmShape::new(2, 2, 2);
        let err = s
            .validate(
                Layout::RowMajor,
                Transpose::NoTrans,
                Transpose::NoTrans,
                4,
                usize::MAX,
                4,
                2,
                4,
                2,
            )
            .unwrap_err();
        assert_eq!(
            err,
            GemmError::SpanOverflow {
                operand: Operand::A,
                ld: usize::MAX
            }
        );
    }

    #[test]
    fn test_validate_ok() {
        let s = GemmShape::new(3, 3, 2);
        s.validate(
            Layout::ColMajor,
            Transpose::NoTrans,
            Transpose::Trans,
            6,
            3,
            6,
            3,
            9,
            3,
        )
        .unwrap();
    }

    #[test]
    fn test_validate_transposed_ld() {
        // A is read transposed, so it is stored 2x3 and needs lda >= 3 row-major.
        let s = GemmShape::new(3, 3, 2);
        let err = s
            .validate(
                Layout::RowMajor,
                Transpose::Trans,
                Transpose::NoTrans,
                6,
                2,
                6,
                3,
                9,
                3,
            )
            .unwrap_err();
        assert_eq!(
            err,
            GemmError::InvalidDimension {
                operand: Operand::A,
                ld: 2,
                min: 3
            }
        );
    }

    #[test]
    fn test_validate_short_buffer() {
        let s = GemmShape::new(2, 2, 2);
        let err = s
            .validate(
                Layout::RowMajor,
                Transpose::NoTrans,
                Transpose::NoTrans,
                4,
                2,
                4,
                2,
                3,
                2,
            )
            .unwrap_err();
        assert_eq!(
            err,
            GemmError::BufferTooSmall {
                operand: Operand::C,
                len: 3,
                required: 4
            }
        );
    }

    #[test]
    fn test_validate_zero_ld_rejected() {
        let s = GemmShape::new(0, 0, 0);
        assert!(s
            .validate(
                Layout::RowMajor,
                Transpose::NoTrans,
                Transpose::NoTrans,
                0,
                0,
                0,
                1,
                0,
                1
            )
            .is_err());
        s.validate(
            Layout::RowMajor,
            Transpose::NoTrans,
            Transpose::NoTrans,
            0,
            1,
            0,
            1,
            0,
            1,
        )
        .unwrap();
    }

    #[test]
    fn test_display() {
        assert_eq!(GemmShape::new(3, 4, 2).to_string(), "[3x2] @ [2x4]");
    }
}
