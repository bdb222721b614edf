//! Shared test utilities for the WMS workspace.
//!
//! - [`fixtures`]: a GetMap parameter set that validates against
//!   [`WEB_MERCATOR_SRID`], with helpers to replace or drop one parameter, plus
//!   BBOX and CQL filter strings
//! - [`assert_approx_eq!`]: approximate float assertion

pub mod fixtures;

pub use fixtures::*;

/// Assert two numbers differ by at most `epsilon`, comparing as f64.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}
