//! Line allocation for two-register arithmetic.
//!
//! The synthesizers always work least significant bit first: the majority
//! chain starts at bit 0 together with the carry-in. When the caller asks for
//! big-endian registers (index 0 = most significant bit), the working views
//! are the caller's registers reversed.

use ripple_ir::{Circuit, LineId};
use serde::{Deserialize, Serialize};

use crate::error::{ArithError, ArithResult};

/// Line roles of a two-register arithmetic circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterLayout {
    /// Operand A, in caller order.
    pub a: Vec<LineId>,
    /// Operand / result B, in caller order.
    pub b: Vec<LineId>,
    /// Borrowed carry-in ancilla (present iff `b.len() > 1`).
    pub carry_in: Option<LineId>,
    /// Carry-out line (present iff overflow was requested).
    pub carry_out: Option<LineId>,
    /// Width of the overlapping region, `min(a_len, b_len)`.
    pub bits: usize,
    /// Whether B is strictly wider than A.
    pub b_is_bigger: bool,
    /// Whether caller registers are little endian.
    pub little_endian: bool,
}

impl RegisterLayout {
    /// Width of register A.
    pub fn a_len(&self) -> usize {
        self.a.len()
    }

    /// Width of register B.
    pub fn b_len(&self) -> usize {
        self.b.len()
    }

    /// Register A, least significant bit first.
    pub fn a_lsb_first(&self) -> Vec<LineId> {
        lsb_first(&self.a, self.little_endian)
    }

    /// Register B, least significant bit first.
    pub fn b_lsb_first(&self) -> Vec<LineId> {
        lsb_first(&self.b, self.little_endian)
    }

    /// The lines holding the result, most significant first: carry-out (if
    /// any) followed by B from its most significant bit down.
    pub fn output_msb_first(&self) -> Vec<LineId> {
        let mut out: Vec<_> = self.carry_out.into_iter().collect();
        out.extend(self.b_lsb_first().into_iter().rev());
        out
    }
}

fn lsb_first(lines: &[LineId], little_endian: bool) -> Vec<LineId> {
    if little_endian {
        lines.to_vec()
    } else {
        lines.iter().rev().copied().collect()
    }
}

/// Allocate A, B, carry-in and carry-out lines in `circuit`.
///
/// Lines are allocated in that order. No gates are emitted. Fails only when
/// both registers are empty.
pub fn allocate(
    circuit: &mut Circuit,
    a_len: usize,
    b_len: usize,
    want_overflow: bool,
    little_endian: bool,
) -> ArithResult<RegisterLayout> {
    if a_len == 0 && b_len == 0 {
        return Err(ArithError::Configuration { a_len, b_len });
    }
    let width = |n: usize| u32::try_from(n).map_err(|_| ArithError::Configuration { a_len, b_len });

    let (a_width, b_width) = (width(a_len)?, width(b_len)?);

    let bits = a_len.min(b_len);
    let a = circuit.add_register("a", a_width);
    let b = circuit.add_register("b", b_width);

    let carry_in = if b_len > 1 {
        let cin = circuit.add_register("cin", 1)[0];
        circuit.set_ancilla(cin)?;
        Some(cin)
    } else {
        None
    };

    let carry_out = want_overflow.then(|| circuit.add_register("cout", 1)[0]);

    Ok(RegisterLayout {
        a,
        b,
        carry_in,
        carry_out,
        bits,
        b_is_bigger: b_len > bits,
        little_endian,
    })
}
