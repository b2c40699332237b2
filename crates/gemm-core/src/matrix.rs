use std::fmt;

use crate::backend::{GemmBackend, GemmParams};
use crate::error::{GemmError, Result};
use crate::layout::{Layout, Transpose};
use crate::shape::GemmShape;

/// A densely packed, owned f64 matrix.
///
/// The leading dimension is always the packed one for its layout. GEMM on
/// strided sub-views goes through [`GemmBackend::gemm`] directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    layout: Layout,
}

impl Matrix {
    /// Wraps `data` already stored in `layout` as a `rows x cols` matrix.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize, layout: Layout) -> Result<Self> {
        let expected = element_count(rows, cols)?;
        if data.len() != expected {
            return Err(GemmError::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix {
            data,
            rows,
            cols,
            layout,
        })
    }

    /// Builds a matrix from logical rows, storing it in `layout`.
    pub fn from_rows(rows: &[&[f64]], layout: Layout) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != n_cols) {
            return Err(GemmError::RaggedRows);
        }
        let mut m = Matrix::zeros(n_rows, n_cols, layout);
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                m.set(i, j, v);
            }
        }
        Ok(m)
    }

    /// Create a zero-filled matrix.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows `usize`.
    pub fn zeros(rows: usize, cols: usize, layout: Layout) -> Self {
        Self::filled(rows, cols, layout, 0.0)
    }

    /// Create a matrix with every element set to `value`.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows `usize`.
    pub fn filled(rows: usize, cols: usize, layout: Layout, value: f64) -> Self {
        let len = match element_count(rows, cols) {
            Ok(len) => len,
            Err(e) => panic!("{}", e),
        };
        Matrix {
            data: vec![value; len],
            rows,
            cols,
            layout,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Leading dimension, never below 1 so it is always a legal BLAS stride.
    pub fn ld(&self) -> usize {
        self.layout.packed_ld(self.rows, self.cols).max(1)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Element at logical row `i`, column `j`.
    ///
    /// # Panics
    /// Panics if `(i, j)` is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "index ({}, {}) out of bounds", i, j);
        self.data[self.layout.index(i, j, self.ld())]
    }

    /// Sets the element at logical row `i`, column `j`.
    ///
    /// # Panics
    /// Panics if `(i, j)` is out of bounds.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert!(i < self.rows && j < self.cols, "index ({}, {}) out of bounds", i, j);
        let idx = self.layout.index(i, j, self.ld());
        self.data[idx] = value;
    }

    /// Returns the materialized transpose, stored in the same layout.
    pub fn transposed(&self) -> Matrix {
        let mut t = Matrix::zeros(self.cols, self.rows, self.layout);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t.set(j, i, self.get(i, j));
            }
        }
        t
    }

    /// Returns the same logical matrix stored in `layout`.
    pub fn to_layout(&self, layout: Layout) -> Matrix {
        if layout == self.layout {
            return self.clone();
        }
        let mut out = Matrix::zeros(self.rows, self.cols, layout);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(i, j, self.get(i, j));
            }
        }
        out
    }

    /// In-place GEMM: `self := alpha * op(a) * op(b) + beta * self`.
    ///
    /// `params.layout` is ignored; all three matrices must share one layout,
    /// which is used for the call.
    pub fn gemm(
        &mut self,
        params: &GemmParams,
        a: &Matrix,
        b: &Matrix,
        backend: &dyn GemmBackend,
    ) -> Result<()> {
        if a.layout != self.layout || b.layout != self.layout {
            return Err(GemmError::LayoutMismatch);
        }

        let (a_rows, a_cols) = op_dims(params.trans_a, a);
        let (b_rows, b_cols) = op_dims(params.trans_b, b);
        if a_rows != self.rows || b_cols != self.cols || a_cols != b_rows {
            return Err(GemmError::ShapeMismatch {
                c_rows: self.rows,
                c_cols: self.cols,
                a_rows,
                a_cols,
                b_rows,
                b_cols,
            });
        }

        let params = params.with_layout(self.layout);
        let shape = GemmShape::new(self.rows, self.cols, a_cols);
        let ldc = self.ld();
        backend.gemm(
            &params,
            shape,
            &a.data,
            a.ld(),
            &b.data,
            b.ld(),
            &mut self.data,
            ldc,
        )
    }

    /// Matrix product `self * other` into a new matrix.
    pub fn matmul(&self, other: &Matrix, backend: &dyn GemmBackend) -> Result<Matrix> {
        let mut out = Matrix::zeros(self.rows, other.cols, self.layout);
        out.gemm(&GemmParams::default(), self, other, backend)?;
        Ok(out)
    }
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(GemmError::SizeOverflow { rows, cols })
}

fn op_dims(trans: Transpose, m: &Matrix) -> (usize, usize) {
    // stored_dims is its own inverse
    trans.stored_dims(m.rows, m.cols)
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:.6}", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
