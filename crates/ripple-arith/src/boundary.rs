//! Middle logic between the majority chain and its closer.
//!
//! After the forward chain, `a[ends]` holds the carry into the top of the
//! overlapping region. What happens next depends on which register is wider
//! and whether a carry-out line exists: the carry is folded into the top bit
//! of B, into the carry-out, or rippled into the part of B above the overlap.
//!
//! All slices are least significant bit first.

use std::ops::Range;

use ripple_ir::LineId;

use crate::error::ArithResult;
use crate::observer::Emitter;

/// Chain extent for a pair of register widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainBounds {
    /// Index of the top bit of the overlapping region.
    pub end: usize,
    /// Index of the A line holding the carry handed to the middle logic.
    pub ends: usize,
}

impl ChainBounds {
    /// Resolve the chain extent, or `None` when B is a single line (no chain
    /// is built then).
    ///
    /// The top overlapping bit is left out of the chain only when its carry
    /// has nowhere to go: no carry-out line and B no wider than A.
    pub fn resolve(a_len: usize, b_len: usize, overflow: bool) -> Option<Self> {
        if b_len <= 1 || a_len == 0 {
            return None;
        }
        let bits = a_len.min(b_len);
        let sub = usize::from(!(overflow || b_len > a_len));
        let end = bits - 1;
        let ends = end.checked_sub(sub)?;
        Some(Self { end, ends })
    }

    /// Indices `j` for which the chain emits `MAJ(a[j], b[j+1], a[j+1])`.
    pub fn mrange(&self) -> Range<usize> {
        0..self.ends
    }
}

/// How the middle logic treats the extension of B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MiddleMode {
    /// A holds the operand itself.
    Add,
    /// A holds the complement of the operand.
    Subtract,
}

/// Logic for a one-line B: `b0 ^= a0`, plus the carry into `cout`.
pub(crate) fn single_bit(
    em: &mut Emitter<'_>,
    a: &[LineId],
    b0: LineId,
    cout: Option<LineId>,
    mode: MiddleMode,
) -> ArithResult<()> {
    em.cx(a[0], b0)?;
    let Some(out) = cout else {
        return Ok(());
    };
    em.x(b0)?;
    em.ccx(a[0], b0, out)?;
    em.x(b0)?;
    if let Some(&next) = a.get(1) {
        em.cx(next, out)?;
        if mode == MiddleMode::Subtract {
            em.x(out)?;
        }
    }
    Ok(())
}

/// Fold the carry held by `a[bounds.ends]` into the output.
pub(crate) fn middle(
    em: &mut Emitter<'_>,
    a: &[LineId],
    b: &[LineId],
    cout: Option<LineId>,
    bounds: ChainBounds,
    mode: MiddleMode,
) -> ArithResult<()> {
    let ChainBounds { end, ends } = bounds;
    let carry = a[ends];

    if b.len() <= a.len() {
        let out = cout.unwrap_or(b[end]);
        em.cx(carry, out)?;
        if cout.is_none() && a.len() == b.len() {
            em.cx(a[end], out)?;
        } else if a.len() > b.len() {
            em.cx(a[ends + 1], out)?;
            if mode == MiddleMode::Subtract && cout.is_some() {
                em.x(out)?;
            }
        }
        return Ok(());
    }

    let mut extension = b[end + 1..].to_vec();
    extension.extend(cout);
    match mode {
        MiddleMode::Add => controlled_increment(em, carry, &extension),
        MiddleMode::Subtract => {
            // The complemented A extends with ones, so the extension receives
            // `carry - 1`, computed as the complement of an increment by !carry.
            em.x(carry)?;
            em.negate(&extension)?;
            controlled_increment(em, carry, &extension)?;
            em.negate(&extension)?;
            em.x(carry)?;
            if let Some(out) = cout {
                em.x(out)?;
            }
            Ok(())
        }
    }
}

/// Add `control` into the counter `lines` (LSB first), modulo its width.
pub(crate) fn controlled_increment(
    em: &mut Emitter<'_>,
    control: LineId,
    lines: &[LineId],
) -> ArithResult<()> {
    for i in (1..lines.len()).rev() {
        let mut controls = Vec::with_capacity(i + 1);
        controls.push(control);
        controls.extend_from_slice(&lines[..i]);
        em.controlled_not(&controls, lines[i])?;
    }
    if let Some(&low) = lines.first() {
        em.cx(control, low)?;
    }
    Ok(())
}

/// Write `[a < b]` into `out`, given a complemented A and, when B has more
/// than one line, the chain extent.
///
/// Neither register is written.
pub(crate) fn comparison(
    em: &mut Emitter<'_>,
    a: &[LineId],
    b: &[LineId],
    out: LineId,
    bounds: Option<ChainBounds>,
) -> ArithResult<()> {
    let bits = a.len().min(b.len());
    let Some(bounds) = bounds else {
        let mut controls = vec![a[0], b[0]];
        controls.extend_from_slice(&a[1..]);
        return em.controlled_not(&controls, out);
    };
    let carry = a[bounds.ends];

    if a.len() == b.len() {
        return em.cx(carry, out);
    }

    if b.len() > a.len() {
        // out = carry OR any high bit of B
        let high = &b[bits..];
        let mut controls = Vec::with_capacity(high.len() + 1);
        controls.push(carry);
        controls.extend_from_slice(high);
        em.negate(&controls)?;
        em.controlled_not(&controls, out)?;
        em.negate(&controls)?;
        em.x(out)
    } else {
        let mut controls = vec![carry];
        controls.extend_from_slice(&a[bits..]);
        em.controlled_not(&controls, out)
    }
}
