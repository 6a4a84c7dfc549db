//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind};
use crate::line::LineId;

/// A gate applied to concrete lines.
///
/// Operand order follows the gate's convention: controls first, target last
/// for the NOT family; `(c, b, a)` for the majority primitives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: Gate,
    /// Lines this instruction operates on.
    pub lines: Vec<LineId>,
}

impl Instruction {
    /// Create a gate instruction, checking arity and operand uniqueness.
    pub fn new(gate: impl Into<Gate>, lines: impl IntoIterator<Item = LineId>) -> IrResult<Self> {
        let gate = gate.into();
        let lines: Vec<_> = lines.into_iter().collect();
        if lines.len() != gate.num_lines() {
            return Err(IrError::ArityMismatch {
                gate_name: gate.name(),
                expected: gate.num_lines(),
                got: lines.len(),
            });
        }
        for (i, line) in lines.iter().enumerate() {
            if lines[..i].contains(line) {
                return Err(IrError::DuplicateLine {
                    line: *line,
                    gate_name: Some(gate.name()),
                });
            }
        }
        Ok(Self { gate, lines })
    }

    /// Create a NOT instruction.
    pub fn x(target: LineId) -> Self {
        Self {
            gate: Gate::new(GateKind::X),
            lines: vec![target],
        }
    }

    /// Create a NOT instruction guarded by every line in `controls`.
    pub fn controlled_not(controls: &[LineId], target: LineId) -> IrResult<Self> {
        let mut lines = controls.to_vec();
        lines.push(target);
        Self::new(GateKind::controlled_not(controls.len())?, lines)
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> String {
        self.gate.name()
    }

    /// Check if this instruction is a compound gate.
    pub fn is_compound(&self) -> bool {
        self.gate.kind.is_compound()
    }

    /// The target line (last operand) for the NOT family.
    pub fn target(&self) -> Option<LineId> {
        match self.gate.kind {
            GateKind::X | GateKind::CX | GateKind::CCX | GateKind::MCX { .. } => {
                self.lines.last().copied()
            }
            GateKind::Maj | GateKind::Uma => None,
        }
    }

    /// Return the adjoint instruction on the same lines.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        Self {
            gate: self.gate.adjoint(),
            lines: self.lines.clone(),
        }
    }

    /// Expand into elementary instructions, in application order.
    pub fn expand(&self) -> Vec<Instruction> {
        self.gate
            .expansion()
            .into_iter()
            .map(|(kind, operands)| Instruction {
                gate: Gate::new(kind),
                lines: operands.iter().map(|&i| self.lines[i]).collect(),
            })
            .collect()
    }
}
