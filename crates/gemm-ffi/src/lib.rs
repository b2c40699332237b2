//! `gemm-ffi` - CBLAS-style C ABI over `gemm-core`.
//!
//! Lets existing C call sites written against `cblas_dgemm` link against the
//! Rust implementation. Arguments use CBLAS order and enum codes; every
//! function returns a [`GemmStatus`] and leaves a readable message behind on
//! failure (see [`gemm_last_error`]).

mod error;
mod types;

pub use error::*;
pub use types::*;

use std::os::raw::{c_char, c_int};

use gemm_core::shape::operand_span;
use gemm_core::{
    CpuBackend, GemmBackend, GemmError, GemmParams, GemmShape, Layout, Operand, Transpose,
};

/// Execute a closure that returns a `GemmStatus`, catching any panics
/// and converting them into `GemmStatus::ErrorInternal`.
fn catch_panic<F: FnOnce() -> GemmStatus + std::panic::UnwindSafe>(f: F) -> GemmStatus {
    match std::panic::catch_unwind(f) {
        Ok(status) => status,
        Err(_) => {
            set_last_error("internal panic".to_string());
            GemmStatus::ErrorInternal
        }
    }
}

fn fail(err: GemmError) -> GemmStatus {
    let status = GemmStatus::from(&err);
    set_last_error(err.to_string());
    status
}

fn to_usize(name: &str, value: c_int) -> Result<usize, GemmError> {
    usize::try_from(value).map_err(|_| {
        GemmError::InvalidArgument(format!("{} must be non-negative, got {}", name, value))
    })
}

/// m, n, k, lda, ldb, ldc
type Sizes = (usize, usize, usize, usize, usize, usize);

fn sizes(args: [(&str, c_int); 6]) -> Result<Sizes, GemmError> {
    let [m, n, k, lda, ldb, ldc] = args.map(|(name, v)| to_usize(name, v));
    Ok((m?, n?, k?, lda?, ldb?, ldc?))
}

/// Element spans of A, B and C, after the stride checks.
fn spans(
    shape: &GemmShape,
    layout: Layout,
    trans_a: Transpose,
    trans_b: Transpose,
    lda: usize,
    ldb: usize,
    ldc: usize,
) -> Result<(usize, usize, usize), GemmError> {
    // Lengths are unknown behind raw pointers; only strides and spans are checked here.
    shape.validate(
        layout,
        trans_a,
        trans_b,
        usize::MAX,
        lda,
        usize::MAX,
        ldb,
        usize::MAX,
        ldc,
    )?;
    let (a_rows, a_cols) = shape.a_dims(trans_a);
    let (b_rows, b_cols) = shape.b_dims(trans_b);
    Ok((
        operand_span(Operand::A, layout, a_rows, a_cols, lda)?,
        operand_span(Operand::B, layout, b_rows, b_cols, ldb)?,
        operand_span(Operand::C, layout, shape.m, shape.n, ldc)?,
    ))
}

/// Borrows `len` elements at `ptr`, or an empty slice when nothing is addressed.
///
/// # Safety
/// When `len > 0` and `ptr` is non-null, `ptr` must be valid for `len` reads.
unsafe fn borrow<'a>(
    operand: Operand,
    ptr: *const f64,
    len: usize,
) -> Result<&'a [f64], GemmError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(GemmError::NullBuffer(operand));
    }
    Ok(std::slice::from_raw_parts(ptr, len))
}

/// Double-precision GEMM: `C := alpha * op(A) * op(B) + beta * C`.
///
/// Mirrors `cblas_dgemm`. `layout` is 101 (row-major) or 102 (column-major);
/// `trans_a` / `trans_b` are 111 (no transpose), 112 or 113 (transpose).
/// Leading dimensions are validated before any memory is touched; on failure
/// C is left unchanged and the message is available via `gemm_last_error`.
///
/// A buffer may be null only if its shape addresses no elements.
///
/// # Safety
/// `a`, `b` and `c` must point to at least as many elements as their shape
/// and leading dimension address, and `c` must not alias `a` or `b`.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn gemm_dgemm(
    layout: c_int,
    trans_a: c_int,
    trans_b: c_int,
    m: c_int,
    n: c_int,
    k: c_int,
    alpha: f64,
    a: *const f64,
    lda: c_int,
    b: *const f64,
    ldb: c_int,
    beta: f64,
    c: *mut f64,
    ldc: c_int,
) -> GemmStatus {
    catch_panic(|| {
        clear_last_error();

        let Some(layout) = Layout::from_cblas(layout) else {
            return fail(GemmError::InvalidArgument(format!("unknown layout code {}", layout)));
        };
        let Some(trans_a) = Transpose::from_cblas(trans_a) else {
            return fail(GemmError::InvalidArgument(format!("unknown trans_a code {}", trans_a)));
        };
        let Some(trans_b) = Transpose::from_cblas(trans_b) else {
            return fail(GemmError::InvalidArgument(format!("unknown trans_b code {}", trans_b)));
        };

        let (m, n, k, lda, ldb, ldc) = match sizes([
            ("m", m),
            ("n", n),
            ("k", k),
            ("lda", lda),
            ("ldb", ldb),
            ("ldc", ldc),
        ]) {
            Ok(d) => d,
            Err(e) => return fail(e),
        };

        let shape = GemmShape::new(m, n, k);
        let (a_len, b_len, c_len) =
            match spans(&shape, layout, trans_a, trans_b, lda, ldb, ldc) {
                Ok(lens) => lens,
                Err(e) => return fail(e),
            };

        let a = match unsafe { borrow(Operand::A, a, a_len) } {
            Ok(s) => s,
            Err(e) => return fail(e),
        };
        let b = match unsafe { borrow(Operand::B, b, b_len) } {
            Ok(s) => s,
            Err(e) => return fail(e),
        };
        let c: &mut [f64] = if c_len == 0 {
            &mut []
        } else if c.is_null() {
            return fail(GemmError::NullBuffer(Operand::C));
        } else {
            unsafe { std::slice::from_raw_parts_mut(c, c_len) }
        };

        let params = GemmParams::new(layout, trans_a, trans_b, alpha, beta);
        match CpuBackend::new().gemm(&params, shape, a, lda, b, ldb, c, ldc) {
            Ok(()) => GemmStatus::Ok,
            Err(e) => fail(e),
        }
    })
}

/// Take the message describing the last failed call on this thread.
///
/// Returns null if there is none. The returned string must be released with
/// `gemm_free_string`.
#[no_mangle]
pub extern "C" fn gemm_last_error() -> *mut c_char {
    match take_last_error() {
        Some(msg) => msg.into_raw(),
        None => std::ptr::null_mut(),
    }
}

/// Free a string returned by `gemm_last_error`. Null is a no-op.
///
/// # Safety
/// `s` must be null or a pointer obtained from `gemm_last_error` that has not
/// been freed yet.
#[no_mangle]
pub unsafe extern "C" fn gemm_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    drop(std::ffi::CString::from_raw(s));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    fn last_error() -> Option<String> {
        let ptr = gemm_last_error();
        if ptr.is_null() {
            return None;
        }
        let msg = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
        unsafe { gemm_free_string(ptr) };
        Some(msg)
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_dgemm_cblas_example() {
        init_logging();
        let a = [1.0, 2.0, 1.0, -3.0, 4.0, -1.0];
        let b = [1.0, 2.0, 1.0, -3.0, 4.0, -1.0];
        let mut c = [0.5; 9];
        let status = unsafe {
            gemm_dgemm(
                GEMM_COL_MAJOR,
                GEMM_NO_TRANS,
                GEMM_TRANS,
                3,
                3,
                2,
                1.0,
                a.as_ptr(),
                3,
                b.as_ptr(),
                3,
                2.0,
                c.as_mut_ptr(),
                3,
            )
        };
        assert_eq!(status, GemmStatus::Ok);
        assert_eq!(c, [11.0, -9.0, 5.0, -9.0, 21.0, -1.0, 5.0, -1.0, 3.0]);
        assert!(last_error().is_none());
    }

    #[test]
    fn test_dgemm_unknown_layout() {
        init_logging();
        let mut c = [0.0; 1];
        let status = unsafe {
            gemm_dgemm(
                100,
                GEMM_NO_TRANS,
                GEMM_NO_TRANS,
                1,
                1,
                1,
                1.0,
                [1.0].as_ptr(),
                1,
                [1.0].as_ptr(),
                1,
                0.0,
                c.as_mut_ptr(),
                1,
            )
        };
        assert_eq!(status, GemmStatus::ErrorInvalidArgument);
        assert!(last_error().unwrap().contains("layout"));
    }

    #[test]
    fn test_dgemm_negative_size() {
        init_logging();
        let status = unsafe {
            gemm_dgemm(
                GEMM_ROW_MAJOR,
                GEMM_NO_TRANS,
                GEMM_NO_TRANS,
                -1,
                1,
                1,
                1.0,
                std::ptr::null(),
                1,
                std::ptr::null(),
                1,
                0.0,
                std::ptr::null_mut(),
                1,
            )
        };
        assert_eq!(status, GemmStatus::ErrorInvalidArgument);
        assert!(last_error().unwrap().contains("m must be non-negative"));
    }

    #[test]
    fn test_dgemm_null_c() {
        init_logging();
        let a = [1.0; 4];
        let b = [1.0; 4];
        let status = unsafe {
            gemm_dgemm(
                GEMM_ROW_MAJOR,
                GEMM_NO_TRANS,
                GEMM_NO_TRANS,
                2,
                2,
                2,
                1.0,
                a.as_ptr(),
                2,
                b.as_ptr(),
                2,
                0.0,
                std::ptr::null_mut(),
                2,
            )
        };
        assert_eq!(status, GemmStatus::ErrorNullBuffer);
        assert_eq!(last_error().unwrap(), "missing buffer for C");
    }

    #[test]
    fn test_dgemm_null_operands_allowed_when_k_is_zero() {
        init_logging();
        let mut c = [2.0; 4];
        let status = unsafe {
            gemm_dgemm(
                GEMM_ROW_MAJOR,
                GEMM_NO_TRANS,
                GEMM_NO_TRANS,
                2,
                2,
                0,
                1.0,
                std::ptr::null(),
                1,
                std::ptr::null(),
                2,
                0.5,
                c.as_mut_ptr(),
                2,
            )
        };
        assert_eq!(status, GemmStatus::Ok);
        assert_eq!(c, [1.0; 4]);
    }

    #[test]
    fn test_dgemm_short_ldc() {
        init_logging();
        let a = [1.0; 6];
        let b = [1.0; 6];
        let mut c = [3.0; 9];
        let status = unsafe {
            gemm_dgemm(
                GEMM_COL_MAJOR,
                GEMM_NO_TRANS,
                GEMM_TRANS,
                3,
                3,
                2,
                1.0,
                a.as_ptr(),
                3,
                b.as_ptr(),
                3,
                1.0,
                c.as_mut_ptr(),
                2,
            )
        };
        assert_eq!(status, GemmStatus::ErrorInvalidDimension);
        assert_eq!(c, [3.0; 9]);
        assert!(last_error().unwrap().contains("C"));
    }

    #[test]
    fn test_dgemm_null_a_rejected_even_with_alpha_zero() {
        init_logging();
        let b = [1.0; 4];
        let mut c = [4.0; 4];
        let status = unsafe {
            gemm_dgemm(
                GEMM_ROW_MAJOR,
                GEMM_NO_TRANS,
                GEMM_NO_TRANS,
                2,
                2,
                2,
                0.0,
                std::ptr::null(),
                2,
                b.as_ptr(),
                2,
                0.5,
                c.as_mut_ptr(),
                2,
            )
        };
        assert_eq!(status, GemmStatus::ErrorNullBuffer);
        assert_eq!(last_error().unwrap(), "missing buffer for A");
        assert_eq!(c, [4.0; 4]);
    }

    #[test]
    fn test_dgemm_null_b() {
        init_logging();
        let a = [1.0; 6];
        let mut c = [4.0; 9];
        let status = unsafe {
            gemm_dgemm(
                GEMM_COL_MAJOR,
                GEMM_NO_TRANS,
                GEMM_TRANS,
                3,
                3,
                2,
                1.0,
                a.as_ptr(),
                3,
                std::ptr::null(),
                3,
                1.0,
                c.as_mut_ptr(),
                3,
            )
        };
        assert_eq!(status, GemmStatus::ErrorNullBuffer);
        assert_eq!(last_error().unwrap(), "missing buffer for B");
        assert_eq!(c, [4.0; 9]);
    }

    #[test]
    fn test_catch_panic_reports_internal() {
        init_logging();
        let status = catch_panic(|| panic!("kernel failure"));
        assert_eq!(status, GemmStatus::ErrorInternal);
        assert_eq!(last_error().unwrap(), "internal panic");
    }

    #[test]
    fn test_free_null_string() {
        unsafe { gemm_free_string(std::ptr::null_mut()) };
    }
}
