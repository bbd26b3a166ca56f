//! Error type for the number theory primitives

use thiserror::Error;

/// Inputs rejected by the number theory primitives.
///
/// These never indicate an internal fault: the caller recovers by retrying
/// with a valid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    /// `mod_pow` has no modular-inverse support
    #[error("negative exponent {exponent} is not supported")]
    NegativeExponent { exponent: String },

    /// Modulus of zero or below
    #[error("modulus must be positive, got {modulus}")]
    NonPositiveModulus { modulus: String },

    /// `integer_root` with k = 0
    #[error("root degree must be at least 1")]
    ZeroRootDegree,

    /// Division or remainder by zero
    #[error("divisor must be non-zero")]
    ZeroDivisor,
}
