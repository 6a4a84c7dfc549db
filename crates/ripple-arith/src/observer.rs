//! Emission observers.
//!
//! Synthesis reports every gate it appends through an [`EmitObserver`].
//! The default, [`TracingObserver`], forwards each emission to `tracing` at
//! `TRACE` level; [`RecordingObserver`] keeps them for inspection.

use ripple_ir::{Circuit, GateKind, Instruction, LineId};
use tracing::trace;

use crate::error::ArithResult;

/// Receives every instruction a synthesizer emits, in emission order.
pub trait EmitObserver {
    /// Called after `instruction` has been appended to the circuit `circuit`.
    fn on_emit(&mut self, circuit: &str, instruction: &Instruction);
}

/// Forwards emissions to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl EmitObserver for TracingObserver {
    fn on_emit(&mut self, circuit: &str, instruction: &Instruction) {
        trace!(
            circuit,
            gate = %instruction.name(),
            lines = ?instruction.lines,
            "emitted gate"
        );
    }
}

/// Collects emissions in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    emitted: Vec<Instruction>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instructions seen so far.
    pub fn emitted(&self) -> &[Instruction] {
        &self.emitted
    }
}

impl EmitObserver for RecordingObserver {
    fn on_emit(&mut self, _circuit: &str, instruction: &Instruction) {
        self.emitted.push(instruction.clone());
    }
}

/// Circuit buffer that reports every appended gate to an observer.
pub(crate) struct Emitter<'o> {
    circuit: Circuit,
    observer: &'o mut dyn EmitObserver,
}

impl<'o> Emitter<'o> {
    pub(crate) fn new(circuit: Circuit, observer: &'o mut dyn EmitObserver) -> Self {
        Self { circuit, observer }
    }

    fn emit(&mut self, instruction: Instruction) -> ArithResult<()> {
        self.circuit.apply(instruction.clone())?;
        self.observer.on_emit(self.circuit.name(), &instruction);
        Ok(())
    }

    pub(crate) fn x(&mut self, target: LineId) -> ArithResult<()> {
        self.emit(Instruction::x(target))
    }

    pub(crate) fn cx(&mut self, control: LineId, target: LineId) -> ArithResult<()> {
        self.controlled_not(&[control], target)
    }

    pub(crate) fn ccx(&mut self, c1: LineId, c2: LineId, target: LineId) -> ArithResult<()> {
        self.controlled_not(&[c1, c2], target)
    }

    /// NOT on `target` guarded by every line in `controls`.
    pub(crate) fn controlled_not(
        &mut self,
        controls: &[LineId],
        target: LineId,
    ) -> ArithResult<()> {
        self.emit(Instruction::controlled_not(controls, target)?)
    }

    /// NOT on every line of `lines`.
    pub(crate) fn negate(&mut self, lines: &[LineId]) -> ArithResult<()> {
        for &line in lines {
            self.x(line)?;
        }
        Ok(())
    }

    pub(crate) fn maj(&mut self, c: LineId, b: LineId, a: LineId) -> ArithResult<()> {
        self.emit(Instruction::new(GateKind::Maj, [c, b, a])?)
    }

    pub(crate) fn maj_dg(&mut self, c: LineId, b: LineId, a: LineId) -> ArithResult<()> {
        self.emit(Instruction::new(GateKind::Maj, [c, b, a])?.adjoint())
    }

    pub(crate) fn uma(&mut self, c: LineId, b: LineId, a: LineId) -> ArithResult<()> {
        self.emit(Instruction::new(GateKind::Uma, [c, b, a])?)
    }

    pub(crate) fn finish(self) -> Circuit {
        self.circuit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_reports_in_order() {
        let mut recorder = RecordingObserver::new();
        let circuit = Circuit::with_size("obs", 3);
        let mut em = Emitter::new(circuit, &mut recorder);
        em.x(LineId(0)).unwrap();
        em.maj(LineId(0), LineId(1), LineId(2)).unwrap();
        em.controlled_not(&[LineId(0), LineId(1)], LineId(2)).unwrap();
        let circuit = em.finish();

        assert_eq!(circuit.num_ops(), 3);
        let names: Vec<_> = recorder.emitted().iter().map(Instruction::name).collect();
        assert_eq!(names, vec!["x", "maj", "ccx"]);
    }

    #[test]
    fn test_emitter_rejects_foreign_line() {
        let mut observer = TracingObserver;
        let mut em = Emitter::new(Circuit::with_size("obs", 1), &mut observer);
        assert!(em.cx(LineId(0), LineId(3)).is_err());
        assert!(em.finish().is_empty());
    }
}
