use std::fmt;

/// Memory layout shared by all three GEMM operands.
///
/// Discriminants match the CBLAS `CBLAS_ORDER` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum Layout {
    /// Elements of a row are contiguous; the leading dimension strides rows.
    #[default]
    RowMajor = 101,
    /// Elements of a column are contiguous; the leading dimension strides columns.
    ColMajor = 102,
}

impl Layout {
    /// Converts a CBLAS order code (101 / 102) to a `Layout`.
    pub fn from_cblas(code: i32) -> Option<Layout> {
        match code {
            101 => Some(Layout::RowMajor),
            102 => Some(Layout::ColMajor),
            _ => None,
        }
    }

    /// Returns the CBLAS order code for this layout.
    pub fn to_cblas(self) -> i32 {
        self as i32
    }

    /// Packed leading dimension of a `rows x cols` matrix in this layout.
    #[inline]
    pub fn packed_ld(self, rows: usize, cols: usize) -> usize {
        match self {
            Layout::RowMajor => cols,
            Layout::ColMajor => rows,
        }
    }

    /// Flat index of element (i, j) given the leading dimension `ld`.
    #[inline]
    pub fn index(self, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Layout::RowMajor => i * ld + j,
            Layout::ColMajor => j * ld + i,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::RowMajor => write!(f, "row-major"),
            Layout::ColMajor => write!(f, "col-major"),
        }
    }
}

/// Whether an operand is read as stored or as its transpose.
///
/// Discriminants match the CBLAS `CBLAS_TRANSPOSE` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum Transpose {
    #[default]
    NoTrans = 111,
    Trans = 112,
}

impl Transpose {
    /// Converts a CBLAS transpose code (111 / 112) to a `Transpose`.
    ///
    /// The conjugate-transpose code 113 is accepted as `Trans`, which is
    /// equivalent for real operands.
    pub fn from_cblas(code: i32) -> Option<Transpose> {
        match code {
            111 => Some(Transpose::NoTrans),
            112 | 113 => Some(Transpose::Trans),
            _ => None,
        }
    }

    /// Returns the CBLAS transpose code.
    pub fn to_cblas(self) -> i32 {
        self as i32
    }

    /// Stored `(rows, cols)` of an operand whose op() is `rows x cols`.
    #[inline]
    pub fn stored_dims(self, rows: usize, cols: usize) -> (usize, usize) {
        match self {
            Transpose::NoTrans => (rows, cols),
            Transpose::Trans => (cols, rows),
        }
    }

    /// Flat index of op(X)[i][j] for an operand stored in `layout` with stride `ld`.
    #[inline]
    pub fn op_index(self, layout: Layout, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Transpose::NoTrans => layout.index(i, j, ld),
            Transpose::Trans => layout.index(j, i, ld),
        }
    }
}

impl fmt::Display for Transpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transpose::NoTrans => write!(f, "N"),
            Transpose::Trans => write!(f, "T"),
        }
    }
}

/// Names a GEMM operand in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    A,
    B,
    C,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::A => write!(f, "A"),
            Operand::B => write!(f, "B"),
            Operand::C => write!(f, "C"),
        }
    }
}
