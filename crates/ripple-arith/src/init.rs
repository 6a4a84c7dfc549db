//! Register initialization from literal values.
//!
//! Each function builds a circuit over a fresh `target` register (and an
//! optional `ctrl` register) that flips exactly the target lines whose digit
//! is 1, guarded by every control line. Literals are written most significant
//! digit first; with `little_endian` the last digit lands on target line 0.

use ripple_ir::{Circuit, LineId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bits::{bitstring_from_int, negate_bits, parse_bitstring, validate_bits};
use crate::error::{ArithError, ArithResult};
use crate::observer::{Emitter, TracingObserver};

/// An initialization circuit and its line roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitCircuit {
    /// The gate sequence.
    pub circuit: Circuit,
    /// Lines receiving the literal.
    pub targets: Vec<LineId>,
    /// Lines guarding every flip.
    pub controls: Vec<LineId>,
    /// Whether target line 0 holds the least significant digit.
    pub little_endian: bool,
}

impl InitCircuit {
    /// The inverse circuit over the same lines.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        Self {
            circuit: self.circuit.adjoint(),
            ..self.clone()
        }
    }
}

/// Write `bits` into a fresh register, guarded by `controls` control lines.
pub fn initialize_from_bits(
    bits: &[u8],
    controls: usize,
    little_endian: bool,
) -> ArithResult<InitCircuit> {
    validate_bits(bits)?;
    let width = |n: usize| {
        u32::try_from(n).map_err(|_| ArithError::Configuration {
            a_len: bits.len(),
            b_len: controls,
        })
    };
    let (n_targets, n_controls) = (width(bits.len())?, width(controls)?);

    let mut circuit = Circuit::new(format!("init_{}", bits.len()));
    let targets = circuit.add_register("target", n_targets);
    let ctrl = circuit.add_register("ctrl", n_controls);

    let mut observer = TracingObserver;
    let mut em = Emitter::new(circuit, &mut observer);
    let n = bits.len();
    for (i, &target) in targets.iter().enumerate() {
        let digit = if little_endian { bits[n - 1 - i] } else { bits[i] };
        if digit == 1 {
            em.controlled_not(&ctrl, target)?;
        }
    }
    let circuit = em.finish();
    debug!(
        width = n,
        controls,
        little_endian,
        gates = circuit.num_ops(),
        "synthesized register initialization"
    );

    Ok(InitCircuit {
        circuit,
        targets,
        controls: ctrl,
        little_endian,
    })
}

/// [`initialize_from_bits`] for a literal such as `"1011"`.
pub fn initialize_from_bitstring(
    literal: &str,
    controls: usize,
    little_endian: bool,
) -> ArithResult<InitCircuit> {
    initialize_from_bits(&parse_bitstring(literal)?, controls, little_endian)
}

/// Write the complement of `bits`.
pub fn initialize_complement_of_bits(
    bits: &[u8],
    controls: usize,
    little_endian: bool,
) -> ArithResult<InitCircuit> {
    initialize_from_bits(&negate_bits(bits)?, controls, little_endian)
}

/// Write the complement of a literal such as `"1011"`.
pub fn initialize_complement_of_bitstring(
    literal: &str,
    controls: usize,
    little_endian: bool,
) -> ArithResult<InitCircuit> {
    initialize_complement_of_bits(&parse_bitstring(literal)?, controls, little_endian)
}

/// Write `value` into a fresh `width`-line register.
pub fn initialize_from_int(
    value: u64,
    width: usize,
    controls: usize,
    little_endian: bool,
) -> ArithResult<InitCircuit> {
    initialize_from_bits(&bitstring_from_int(value, width)?, controls, little_endian)
}

/// Write the `width`-bit complement of `value`.
pub fn initialize_complement_of_int(
    value: u64,
    width: usize,
    controls: usize,
    little_endian: bool,
) -> ArithResult<InitCircuit> {
    initialize_complement_of_bits(&bitstring_from_int(value, width)?, controls, little_endian)
}
