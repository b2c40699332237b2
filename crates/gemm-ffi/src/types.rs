use gemm_core::GemmError;

/// Status codes returned by all FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GemmStatus {
    Ok = 0,
    ErrorInvalidArgument = 1,
    ErrorInvalidDimension = 2,
    ErrorNullBuffer = 3,
    ErrorInternal = 4,
}

impl From<&GemmError> for GemmStatus {
    fn from(err: &GemmError) -> Self {
        match err {
            GemmError::InvalidDimension { .. }
            | GemmError::BufferTooSmall { .. }
            | GemmError::SpanOverflow { .. } => GemmStatus::ErrorInvalidDimension,
            GemmError::NullBuffer(_) => GemmStatus::ErrorNullBuffer,
            GemmError::InvalidArgument(_) => GemmStatus::ErrorInvalidArgument,
            _ => GemmStatus::ErrorInternal,
        }
    }
}

/// CBLAS order codes accepted by `gemm_dgemm`.
pub const GEMM_ROW_MAJOR: i32 = 101;
pub const GEMM_COL_MAJOR: i32 = 102;

/// CBLAS transpose codes accepted by `gemm_dgemm`.
pub const GEMM_NO_TRANS: i32 = 111;
pub const GEMM_TRANS: i32 = 112;
pub const GEMM_CONJ_TRANS: i32 = 113;
