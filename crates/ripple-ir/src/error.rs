//! Error types for the IR crate.

use crate::line::LineId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Line not found in circuit.
    #[error("Line {line} not found in circuit{}", format_gate_context(.gate_name))]
    LineNotFound {
        /// The line that was not found.
        line: LineId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Same line used twice by one gate.
    #[error("Duplicate line {line} in operation{}", format_gate_context(.gate_name))]
    DuplicateLine {
        /// The duplicate line.
        line: LineId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires a different number of lines.
    #[error("Gate '{gate_name}' requires {expected} lines, got {got}")]
    ArityMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of lines.
        expected: usize,
        /// Actual number of lines provided.
        got: usize,
    },

    /// Control count does not fit a gate's `u32` control field.
    #[error("A NOT gate cannot take {controls} controls")]
    TooManyControls {
        /// Requested number of controls.
        controls: usize,
    },

    /// Line mapping used to compose circuits has the wrong length.
    #[error("Line mapping has {got} entries but the sub-circuit has {expected} lines")]
    MappingMismatch {
        /// Number of lines in the sub-circuit.
        expected: usize,
        /// Number of entries in the mapping.
        got: usize,
    },

    /// Executor state is too small for the referenced line.
    #[error("Line {line} is out of range for a state of {width} bits")]
    LineOutOfRange {
        /// The offending line.
        line: LineId,
        /// Width of the bit state.
        width: usize,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
