//! Shared test utilities for the frost-probe profile workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Observation series and grid generators
//! - Reference grids and probe layouts
//! - An approximate-equality assertion for rows of optional values
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, uniform_series};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use generators::*;

/// Compare two rows of optional values: absent cells must line up exactly,
/// present cells must agree within 1e-9.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_row_approx_eq;
///
/// assert_row_approx_eq!(grid.rows()[0], [Some(1.0), None, Some(1.5)]);
/// ```
#[macro_export]
macro_rules! assert_row_approx_eq {
    ($left:expr, $right:expr) => {{
        let left: &[Option<f64>] = &$left;
        let right: &[Option<f64>] = &$right;
        assert_eq!(
            left.len(),
            right.len(),
            "row lengths differ: {:?} vs {:?}",
            left,
            right
        );
        for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            match (l, r) {
                (Some(l), Some(r)) => {
                    if (l - r).abs() > 1e-9 {
                        panic!(
                            "assertion failed: cell {} differs: {:?} vs {:?}",
                            i, left, right
                        );
                    }
                }
                (None, None) => {}
                _ => panic!(
                    "assertion failed: cell {} presence differs: {:?} vs {:?}",
                    i, left, right
                ),
            }
        }
    }};
}
