//! Basic example demonstrating cached inversion
//!
//! This example shows how to:
//! 1. Wrap a matrix in a `CachedMatrix`
//! 2. Invert it twice, the second time from the cache
//! 3. Replace the matrix and watch the cache reset
//! 4. Handle a singular matrix
//!
//! Run with: RUST_LOG=debug cargo run --example cached_inverse

use cached_matrix::{solve_cached, CachedMatrix, InverseConfig, LinalgResult, Matrix};
use tracing_subscriber::EnvFilter;

fn main() -> LinalgResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = InverseConfig::default();

    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
    println!("Original matrix A:");
    print!("{}", a);

    let mut x = CachedMatrix::new(a);

    println!("\nFirst solve (computes):");
    print!("{}", solve_cached(&mut x, &config)?);

    println!("\nSecond solve (cached):");
    print!("{}", solve_cached(&mut x, &config)?);

    // Verify A * A^-1 = I
    let product = {
        let inv = solve_cached(&mut x, &config)?.clone();
        x.get().matmul(&inv)?
    };
    println!("\nA * A^-1:");
    print!("{}", product);

    x.set(Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]])?);
    println!("\nAfter set(): cached inverse present = {}", x.has_cached_inverse());
    print!("{}", solve_cached(&mut x, &config)?);

    x.set(Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]])?);
    match solve_cached(&mut x, &config) {
        Ok(inv) => print!("{}", inv),
        Err(e) => println!("\n✗ {}", e),
    }

    Ok(())
}
