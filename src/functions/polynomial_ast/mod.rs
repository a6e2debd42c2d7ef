//! AST-native polynomial functions.
//!
//! Expand, Simplify, Solve and univariate polynomial arithmetic.

pub mod expand;
pub mod simplify;
pub mod solve;
pub mod univariate;

pub use expand::*;
pub use simplify::*;
pub use solve::*;
pub use univariate::*;
