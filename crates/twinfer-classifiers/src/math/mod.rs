//! Minimal dense matrix used as model input.
//!
//! Feature vectors are small (one row per request), so a flat row-major
//! `Vec` is all the models need.
pub mod matrix;

pub use matrix::{Array2, ShapeError};
