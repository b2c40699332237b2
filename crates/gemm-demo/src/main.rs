//! Runs one column-major `dgemm` call and prints the 3x3 result.
//!
//! ```text
//! A = B = [1 -3]        C = 0.5 everywhere
//!         [2  4]
//!         [1 -1]
//!
//! C := 1 * A * B^T + 2 * C
//! ```

use std::process::ExitCode;

use gemm_core::{dgemm, Layout, Matrix, Transpose};

fn run() -> gemm_core::Result<Matrix> {
    // Column-major (3, 2)
    let a = [1.0, 2.0, 1.0, -3.0, 4.0, -1.0];
    let b = [1.0, 2.0, 1.0, -3.0, 4.0, -1.0];
    // Column-major (3, 3)
    let mut c = vec![0.5; 9];

    dgemm(
        Layout::ColMajor,
        Transpose::NoTrans,
        Transpose::Trans,
        3,
        3,
        2,
        1.0,
        &a,
        3,
        &b,
        3,
        2.0,
        &mut c,
        3,
    )?;

    Matrix::new(c, 3, 3, Layout::ColMajor)
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(c) => {
            log::info!("computed {}x{} result", c.rows(), c.cols());
            print!("{}", c);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gemm-demo: {}", e);
            ExitCode::FAILURE
        }
    }
}
