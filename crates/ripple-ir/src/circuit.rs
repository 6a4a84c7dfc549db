//! High-level circuit builder API.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind};
use crate::instruction::Instruction;
use crate::line::{Line, LineId};
use crate::lowering::lower_mcx;

/// A reversible circuit: an ordered gate sequence over a fixed set of lines.
///
/// Lines are numbered densely from zero in allocation order. Every
/// instruction is validated against the line set when it is applied, so a
/// finished circuit never references a line it does not own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Lines in the circuit.
    lines: Vec<Line>,
    /// Instructions in application order.
    ops: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: vec![],
            ops: vec![],
        }
    }

    /// Create a circuit with a given number of anonymous lines.
    pub fn with_size(name: impl Into<String>, num_lines: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_lines {
            circuit.add_line();
        }
        circuit
    }

    fn next_line_id(&self) -> LineId {
        LineId(self.lines.len() as u32)
    }

    /// Add a single line to the circuit.
    pub fn add_line(&mut self) -> LineId {
        let id = self.next_line_id();
        self.lines.push(Line::new(id));
        id
    }

    /// Add a named register with multiple lines.
    pub fn add_register(&mut self, name: impl Into<String>, size: u32) -> Vec<LineId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = self.next_line_id();
            self.lines.push(Line::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    /// Mark a line as a borrowed ancilla.
    pub fn set_ancilla(&mut self, line: LineId) -> IrResult<()> {
        let entry = self
            .lines
            .get_mut(line.index())
            .ok_or(IrError::LineNotFound {
                line,
                gate_name: None,
            })?;
        entry.ancilla = true;
        Ok(())
    }

    /// Check whether the circuit owns `line`.
    pub fn contains(&self, line: LineId) -> bool {
        line.index() < self.lines.len()
    }

    /// Append an instruction after checking that its lines exist.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        if let Some(&line) = instruction.lines.iter().find(|l| !self.contains(**l)) {
            return Err(IrError::LineNotFound {
                line,
                gate_name: Some(instruction.name()),
            });
        }
        self.ops.push(instruction);
        Ok(self)
    }

    fn gate(&mut self, gate: impl Into<Gate>, lines: &[LineId]) -> IrResult<&mut Self> {
        let instruction = Instruction::new(gate, lines.iter().copied())?;
        self.apply(instruction)
    }

    // =========================================================================
    // Elementary gates
    // =========================================================================

    /// Apply NOT.
    pub fn x(&mut self, target: LineId) -> IrResult<&mut Self> {
        self.gate(GateKind::X, &[target])
    }

    /// Apply CNOT.
    pub fn cx(&mut self, control: LineId, target: LineId) -> IrResult<&mut Self> {
        self.gate(GateKind::CX, &[control, target])
    }

    /// Apply Toffoli.
    pub fn ccx(&mut self, c1: LineId, c2: LineId, target: LineId) -> IrResult<&mut Self> {
        self.gate(GateKind::CCX, &[c1, c2, target])
    }

    /// Apply NOT guarded by all of `controls`.
    ///
    /// Uses X, CX or CCX for up to two controls and MCX beyond.
    pub fn controlled_not(&mut self, controls: &[LineId], target: LineId) -> IrResult<&mut Self> {
        let instruction = Instruction::controlled_not(controls, target)?;
        self.apply(instruction)
    }

    // =========================================================================
    // Cuccaro primitives
    // =========================================================================

    /// Apply MAJ on `(c, b, a)`.
    pub fn maj(&mut self, c: LineId, b: LineId, a: LineId) -> IrResult<&mut Self> {
        self.gate(GateKind::Maj, &[c, b, a])
    }

    /// Apply MAJ-dagger on `(c, b, a)`.
    pub fn maj_dg(&mut self, c: LineId, b: LineId, a: LineId) -> IrResult<&mut Self> {
        self.gate(Gate::new(GateKind::Maj).adjoint(), &[c, b, a])
    }

    /// Apply UMA on `(c, b, a)`.
    pub fn uma(&mut self, c: LineId, b: LineId, a: LineId) -> IrResult<&mut Self> {
        self.gate(GateKind::Uma, &[c, b, a])
    }

    // =========================================================================
    // Whole-circuit transformations
    // =========================================================================

    /// Append every instruction of `sub`, wiring its line `i` onto `mapping[i]`.
    pub fn append_circuit(&mut self, sub: &Circuit, mapping: &[LineId]) -> IrResult<&mut Self> {
        if mapping.len() != sub.num_lines() {
            return Err(IrError::MappingMismatch {
                expected: sub.num_lines(),
                got: mapping.len(),
            });
        }
        for inst in &sub.ops {
            let lines = inst.lines.iter().map(|l| mapping[l.index()]);
            let mapped = Instruction::new(inst.gate.clone(), lines)?;
            self.apply(mapped)?;
        }
        Ok(self)
    }

    /// Build the adjoint circuit: reversed order, every gate adjointed.
    #[must_use]
    pub fn adjoint(&self) -> Circuit {
        let name = match self.name.strip_suffix("_dg") {
            Some(base) => base.to_string(),
            None => format!("{}_dg", self.name),
        };
        Circuit {
            name,
            lines: self.lines.clone(),
            ops: self.ops.iter().rev().map(Instruction::adjoint).collect(),
        }
    }

    /// Rewrite the circuit over `X`, `CX` and `CCX` only.
    ///
    /// Compound gates are expanded, then every `MCX` is lowered to Toffoli
    /// gates that borrow idle lines of this circuit. An `MCX` spanning every
    /// line has nothing to borrow and is kept.
    #[must_use]
    pub fn decompose(&self) -> Circuit {
        let all: Vec<LineId> = self.lines.iter().map(|l| l.id).collect();
        let mut ops = Vec::with_capacity(self.ops.len());
        for inst in self.ops.iter().flat_map(Instruction::expand) {
            lower_mcx(&inst, &all, &mut ops);
        }
        Circuit {
            name: self.name.clone(),
            lines: self.lines.clone(),
            ops,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of lines.
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Get the number of instructions.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Get the lines in the circuit.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Get the instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.ops
    }

    /// Lines marked as ancilla.
    pub fn ancillas(&self) -> impl Iterator<Item = LineId> + '_ {
        self.lines.iter().filter(|l| l.ancilla).map(|l| l.id)
    }

    /// Count instructions by gate name.
    pub fn gate_counts(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.ops {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of instructions with the given gate name.
    pub fn count(&self, name: &str) -> usize {
        self.ops.iter().filter(|i| i.gate.name() == name).count()
    }

    /// Circuit depth: length of the longest chain of instructions sharing lines.
    pub fn depth(&self) -> usize {
        let mut level = vec![0usize; self.lines.len()];
        let mut depth = 0;
        for inst in &self.ops {
            let next = inst
                .lines
                .iter()
                .map(|l| level[l.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for l in &inst.lines {
                level[l.index()] = next;
            }
            depth = depth.max(next);
        }
        depth
    }

    fn line_label(&self, line: LineId) -> String {
        self.lines
            .get(line.index())
            .map_or_else(|| line.to_string(), ToString::to_string)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "circuit {} ({} lines, {} ops)",
            self.name,
            self.lines.len(),
            self.ops.len()
        )?;
        for inst in &self.ops {
            let operands: Vec<_> = inst.lines.iter().map(|l| self.line_label(*l)).collect();
            writeln!(f, "  {} {}", inst.name(), operands.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classical::BitState;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_lines(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let a = circuit.add_register("a", 3);
        let b = circuit.add_register("b", 2);

        assert_eq!(a, vec![LineId(0), LineId(1), LineId(2)]);
        assert_eq!(b, vec![LineId(3), LineId(4)]);
        assert_eq!(circuit.lines()[4].to_string(), "b[1]");
    }

    #[test]
    fn test_unknown_line_rejected() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit.cx(LineId(0), LineId(5)).unwrap_err();
        assert!(matches!(err, IrError::LineNotFound { line: LineId(5), .. }));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit
            .x(LineId(0))
            .unwrap()
            .cx(LineId(0), LineId(1))
            .unwrap()
            .maj(LineId(0), LineId(1), LineId(2))
            .unwrap();

        assert_eq!(circuit.num_ops(), 3);
        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.count("maj"), 1);
    }

    #[test]
    fn test_adjoint_reverses_and_flips() {
        let mut circuit = Circuit::with_size("add", 3);
        circuit.x(LineId(1)).unwrap();
        circuit.maj(LineId(0), LineId(1), LineId(2)).unwrap();

        let dg = circuit.adjoint();
        assert_eq!(dg.name(), "add_dg");
        assert_eq!(dg.instructions()[0].name(), "maj_dg");
        assert_eq!(dg.instructions()[1].name(), "x");
        assert_eq!(dg.adjoint(), circuit);
    }

    #[test]
    fn test_decompose_counts() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit.maj(LineId(0), LineId(1), LineId(2)).unwrap();
        circuit.uma(LineId(0), LineId(1), LineId(2)).unwrap();

        let flat = circuit.decompose();
        assert_eq!(flat.num_ops(), 9);
        assert!(flat.instructions().iter().all(|i| !i.is_compound()));
        assert_eq!(flat.count("ccx"), 2);
    }

    #[test]
    fn test_decompose_lowers_mcx() {
        let mut circuit = Circuit::with_size("wide", 6);
        let controls = [LineId(0), LineId(1), LineId(2), LineId(3)];
        circuit.controlled_not(&controls, LineId(4)).unwrap();

        let flat = circuit.decompose();
        assert_eq!(flat.count("mcx"), 0);
        assert_eq!(flat.num_ops(), flat.count("ccx"));

        let lines: Vec<_> = (0..6).map(LineId).collect();
        for input in 0..64u64 {
            let mut want = BitState::for_circuit(&circuit);
            want.write_uint(&lines, input, true).unwrap();
            let mut got = want.clone();
            want.run(&circuit).unwrap();
            got.run(&flat).unwrap();
            assert_eq!(got, want, "input {input:06b}");
        }
    }

    #[test]
    fn test_append_circuit_mapping() {
        let mut sub = Circuit::with_size("sub", 2);
        sub.cx(LineId(0), LineId(1)).unwrap();

        let mut host = Circuit::with_size("host", 4);
        host.append_circuit(&sub, &[LineId(3), LineId(1)]).unwrap();
        assert_eq!(host.instructions()[0].lines, vec![LineId(3), LineId(1)]);

        let err = host.append_circuit(&sub, &[LineId(0)]).unwrap_err();
        assert!(matches!(err, IrError::MappingMismatch { expected: 2, got: 1 }));
    }

    #[test]
    fn test_display_listing() {
        let mut circuit = Circuit::new("show");
        let a = circuit.add_register("a", 1);
        let b = circuit.add_register("b", 1);
        circuit.cx(a[0], b[0]).unwrap();
        let text = circuit.to_string();
        assert!(text.contains("cx a[0], b[0]"));
    }
}
