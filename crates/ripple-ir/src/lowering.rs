//! Lowering of multi-controlled NOT gates to Toffoli gates.
//!
//! A NOT with `k > 2` controls is rebuilt from `CCX` gates by borrowing lines
//! the gate does not touch. Borrowed lines may hold any value and are
//! returned to it (Barenco et al., "Elementary gates for quantum
//! computation", 1995):
//!
//! - with `k - 2` borrowed lines, a Toffoli ladder of `4 (k - 2)` gates
//!   (Lemma 7.2);
//! - with fewer, one borrowed line `d` splits the controls into two halves
//!   and the gate becomes `C1 -> d`, `C2 + d -> t`, applied twice
//!   (Lemma 7.3). Each half then has enough borrowed lines for the ladder.
//!
//! A gate that touches every line of its circuit has nothing to borrow and
//! is left as it is.

use crate::gate::{Gate, GateKind};
use crate::instruction::Instruction;
use crate::line::LineId;

/// Lower one `MCX` instruction into `out`, borrowing from `lines`.
///
/// Anything that is not an `MCX` with a free line to borrow is copied as is.
pub(crate) fn lower_mcx(inst: &Instruction, lines: &[LineId], out: &mut Vec<Instruction>) {
    let (target, controls) = match (inst.gate.kind, inst.lines.split_last()) {
        (GateKind::MCX { .. }, Some((&target, controls))) if controls.len() > 2 => {
            (target, controls)
        }
        _ => {
            out.push(inst.clone());
            return;
        }
    };
    let k = controls.len();
    let borrowed = free_lines(controls, target, lines);

    match borrowed.first() {
        None => out.push(inst.clone()),
        Some(_) if borrowed.len() >= k - 2 => {
            toffoli_ladder(controls, target, &borrowed[..k - 2], out);
        }
        Some(&spare) => {
            let (low, high) = controls.split_at(k.div_ceil(2));
            let mut high = high.to_vec();
            high.push(spare);
            for _ in 0..2 {
                ladder_over(low, spare, lines, out);
                ladder_over(&high, target, lines, out);
            }
        }
    }
}

/// Each half of a split leaves at least `k - 2` lines free for its ladder.
fn ladder_over(controls: &[LineId], target: LineId, lines: &[LineId], out: &mut Vec<Instruction>) {
    if let [c1, c2] = controls {
        out.push(ccx(*c1, *c2, target));
    } else {
        let borrowed = free_lines(controls, target, lines);
        toffoli_ladder(controls, target, &borrowed[..controls.len() - 2], out);
    }
}

fn free_lines(controls: &[LineId], target: LineId, lines: &[LineId]) -> Vec<LineId> {
    lines
        .iter()
        .copied()
        .filter(|l| *l != target && !controls.contains(l))
        .collect()
}

/// Lemma 7.2 ladder over `k` controls and `k - 2` borrowed lines.
///
/// The descending half walks from the target down to the first Toffoli on
/// `(controls[0], controls[1])`, then climbs back. The whole walk is repeated
/// without the target gate so the borrowed lines are restored.
fn toffoli_ladder(
    controls: &[LineId],
    target: LineId,
    borrowed: &[LineId],
    out: &mut Vec<Instruction>,
) {
    let k = controls.len();
    let rung = |i: usize| {
        let onto = if i == k - 1 { target } else { borrowed[i - 1] };
        ccx(controls[i], borrowed[i - 2], onto)
    };
    let base = ccx(controls[0], controls[1], borrowed[0]);

    let down: Vec<Instruction> = (2..k).rev().map(rung).collect();
    let up = down.iter().rev();

    out.extend(down.iter().cloned());
    out.push(base.clone());
    out.extend(up.clone().cloned());

    out.extend(down.iter().skip(1).cloned());
    out.push(base);
    out.extend(up.take(k - 3).cloned());
}

fn ccx(c1: LineId, c2: LineId, target: LineId) -> Instruction {
    Instruction {
        gate: Gate::new(GateKind::CCX),
        lines: vec![c1, c2, target],
    }
}
