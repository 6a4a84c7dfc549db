//! Majority chains.
//!
//! The forward chain ripples the carry upward through register A. Each MAJ
//! leaves the carry out of its bit on its `a` line, and the next MAJ folds
//! that line back, so once the chain ends only its top `a` line still holds
//! a carry. Both closers walk the same triples in exactly the reverse order,
//! which is what makes the whole circuit reversible.
//!
//! All slices are least significant bit first.

use std::ops::Range;

use ripple_ir::LineId;

use crate::error::ArithResult;
use crate::observer::Emitter;

/// `MAJ(cin, b0, a0)`, then `MAJ(a[j], b[j+1], a[j+1])` for `j` ascending.
pub(crate) fn majority_chain(
    em: &mut Emitter<'_>,
    cin: LineId,
    a: &[LineId],
    b: &[LineId],
    mrange: Range<usize>,
) -> ArithResult<()> {
    em.maj(cin, b[0], a[0])?;
    for j in mrange {
        em.maj(a[j], b[j + 1], a[j + 1])?;
    }
    Ok(())
}

/// Exact inverse of [`majority_chain`]: `MAJ†` triples, `j` descending.
pub(crate) fn majority_chain_dagger(
    em: &mut Emitter<'_>,
    cin: LineId,
    a: &[LineId],
    b: &[LineId],
    mrange: Range<usize>,
) -> ArithResult<()> {
    for j in mrange.rev() {
        em.maj_dg(a[j], b[j + 1], a[j + 1])?;
    }
    em.maj_dg(cin, b[0], a[0])
}

/// Uncompute the carries while writing each sum bit into B: `UMA` triples,
/// `j` descending.
pub(crate) fn unmajority_chain(
    em: &mut Emitter<'_>,
    cin: LineId,
    a: &[LineId],
    b: &[LineId],
    mrange: Range<usize>,
) -> ArithResult<()> {
    for j in mrange.rev() {
        em.uma(a[j], b[j + 1], a[j + 1])?;
    }
    em.uma(cin, b[0], a[0])
}

#[cfg(test)]
mod tests {
    use ripple_ir::{BitState, Circuit, Instruction};

    use super::*;
    use crate::observer::RecordingObserver;

    fn lines(range: Range<u32>) -> Vec<LineId> {
        range.map(LineId).collect()
    }

    #[test]
    fn test_chain_orders() {
        let (a, b, cin) = (lines(0..3), lines(3..6), LineId(6));
        let mut recorder = RecordingObserver::new();
        let mut em = Emitter::new(Circuit::with_size("chain", 7), &mut recorder);
        majority_chain(&mut em, cin, &a, &b, 0..2).unwrap();
        majority_chain_dagger(&mut em, cin, &a, &b, 0..2).unwrap();
        drop(em);

        let emitted: Vec<(String, Vec<LineId>)> = recorder
            .emitted()
            .iter()
            .map(|i: &Instruction| (i.name(), i.lines.clone()))
            .collect();
        assert_eq!(
            emitted,
            vec![
                ("maj".into(), vec![cin, b[0], a[0]]),
                ("maj".into(), vec![a[0], b[1], a[1]]),
                ("maj".into(), vec![a[1], b[2], a[2]]),
                ("maj_dg".into(), vec![a[1], b[2], a[2]]),
                ("maj_dg".into(), vec![a[0], b[1], a[1]]),
                ("maj_dg".into(), vec![cin, b[0], a[0]]),
            ]
        );
    }

    #[test]
    fn test_majority_chain_top_line_holds_carry() {
        let (a, b, cin) = (lines(0..3), lines(3..6), LineId(6));
        // A chain over `0..top` ends with the carry out of bit `top` on a[top].
        for top in 0..a.len() {
            let mut observer = crate::observer::TracingObserver;
            let mut em = Emitter::new(Circuit::with_size("chain", 7), &mut observer);
            majority_chain(&mut em, cin, &a, &b, 0..top).unwrap();
            let circuit = em.finish();

            let mask = (1u64 << (top + 1)) - 1;
            for x in 0..8u64 {
                for y in 0..8u64 {
                    let mut state = BitState::for_circuit(&circuit);
                    state.write_uint(&a, x, true).unwrap();
                    state.write_uint(&b, y, true).unwrap();
                    state.run(&circuit).unwrap();
                    let carry = (x & mask) + (y & mask) > mask;
                    assert_eq!(state.get(a[top]).unwrap(), carry, "x={x} y={y} top={top}");
                }
            }
        }
    }

    #[test]
    fn test_empty_range_uses_single_triple() {
        let (a, b, cin) = (lines(0..1), lines(1..3), LineId(3));
        let mut recorder = RecordingObserver::new();
        let mut em = Emitter::new(Circuit::with_size("chain", 4), &mut recorder);
        majority_chain(&mut em, cin, &a, &b, 0..0).unwrap();
        unmajority_chain(&mut em, cin, &a, &b, 0..0).unwrap();
        let circuit = em.finish();
        assert_eq!(circuit.count("maj"), 1);
        assert_eq!(circuit.count("uma"), 1);
    }
}
