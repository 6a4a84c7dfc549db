//! Classical basis-state execution.
//!
//! Every gate in the IR maps a definite bit assignment to another definite
//! bit assignment, so a circuit can be executed exactly on a plain vector of
//! bits. This is how synthesized arithmetic is checked against integer
//! arithmetic.

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::GateKind;
use crate::instruction::Instruction;
use crate::line::LineId;

/// A definite assignment of one bit per line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitState {
    bits: Vec<bool>,
}

impl BitState {
    /// Create a state of `width` lines, all 0.
    pub fn zeros(width: usize) -> Self {
        Self {
            bits: vec![false; width],
        }
    }

    /// Create an all-zero state sized for `circuit`.
    pub fn for_circuit(circuit: &Circuit) -> Self {
        Self::zeros(circuit.num_lines())
    }

    fn slot(&self, line: LineId) -> IrResult<usize> {
        let idx = line.index();
        if idx < self.bits.len() {
            Ok(idx)
        } else {
            Err(IrError::LineOutOfRange {
                line,
                width: self.bits.len(),
            })
        }
    }

    /// Read one line.
    pub fn get(&self, line: LineId) -> IrResult<bool> {
        Ok(self.bits[self.slot(line)?])
    }

    /// Write one line.
    pub fn set(&mut self, line: LineId, value: bool) -> IrResult<()> {
        let idx = self.slot(line)?;
        self.bits[idx] = value;
        Ok(())
    }

    /// Write an unsigned integer over `lines`.
    ///
    /// With `little_endian`, `lines[0]` receives the least significant bit;
    /// otherwise `lines[0]` receives the most significant bit. Bits of `value`
    /// above the register width are dropped.
    pub fn write_uint(
        &mut self,
        lines: &[LineId],
        value: u64,
        little_endian: bool,
    ) -> IrResult<()> {
        let n = lines.len();
        for (i, &line) in lines.iter().enumerate() {
            let bit = if little_endian { i } else { n - 1 - i };
            let set = bit < 64 && (value >> bit) & 1 == 1;
            self.set(line, set)?;
        }
        Ok(())
    }

    /// Read an unsigned integer from `lines`, using the same convention as
    /// [`BitState::write_uint`].
    pub fn read_uint(&self, lines: &[LineId], little_endian: bool) -> IrResult<u64> {
        let n = lines.len();
        let mut value = 0u64;
        for (i, &line) in lines.iter().enumerate() {
            let bit = if little_endian { i } else { n - 1 - i };
            if self.get(line)? && bit < 64 {
                value |= 1 << bit;
            }
        }
        Ok(value)
    }

    /// Apply one instruction.
    pub fn apply(&mut self, instruction: &Instruction) -> IrResult<()> {
        match instruction.gate.kind {
            GateKind::Maj | GateKind::Uma => {
                for step in instruction.expand() {
                    self.apply(&step)?;
                }
            }
            GateKind::X | GateKind::CX | GateKind::CCX | GateKind::MCX { .. } => {
                let slots = instruction
                    .lines
                    .iter()
                    .map(|&l| self.slot(l))
                    .collect::<IrResult<Vec<_>>>()?;
                let (target, controls) =
                    slots.split_last().ok_or_else(|| IrError::ArityMismatch {
                        gate_name: instruction.name(),
                        expected: instruction.gate.num_lines(),
                        got: 0,
                    })?;
                if controls.iter().all(|&c| self.bits[c]) {
                    self.bits[*target] = !self.bits[*target];
                }
            }
        }
        Ok(())
    }

    /// Apply every instruction of `circuit` in order.
    pub fn run(&mut self, circuit: &Circuit) -> IrResult<()> {
        for inst in circuit.instructions() {
            self.apply(inst)?;
        }
        Ok(())
    }
}
