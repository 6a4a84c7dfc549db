//! Error types for the arithmetic synthesis crate.

use thiserror::Error;

/// Errors produced while synthesizing arithmetic or initialization circuits.
///
/// All of these are detected before the first gate of the offending call is
/// emitted; no partial circuit is ever returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArithError {
    /// Register widths cannot form the requested circuit.
    #[error("Unusable register widths: a_len = {a_len}, b_len = {b_len}")]
    Configuration {
        /// Width of operand register A.
        a_len: usize,
        /// Width of operand / result register B.
        b_len: usize,
    },

    /// A literal contained something other than 0 or 1.
    #[error("Literal contains non-binary value {value} at position {position}")]
    InvalidBit {
        /// The offending value, as written.
        value: String,
        /// Index of the offending value in the literal.
        position: usize,
    },

    /// Integer does not fit in the requested number of bits.
    #[error("Value {value} does not fit in {width} bits")]
    InvalidWidth {
        /// The integer.
        value: u64,
        /// The requested width.
        width: usize,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] ripple_ir::IrError),
}

/// Result type for arithmetic synthesis operations.
pub type ArithResult<T> = Result<T, ArithError>;
