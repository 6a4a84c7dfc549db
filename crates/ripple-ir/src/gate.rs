//! Reversible gate types.
//!
//! Every gate in this model is a permutation of classical basis states. The
//! elementary gates (`X`, `CX`, `CCX`, `MCX`) are self-inverse; the compound
//! Cuccaro primitives (`MAJ`, `UMA`) expand to a fixed sequence of elementary
//! gates, and their adjoint expands to the same sequence in reverse order.
//! `MCX` needs free lines to reach Toffoli form, so it is lowered at circuit
//! level by [`Circuit::decompose`](crate::circuit::Circuit::decompose).

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// The kind of a reversible gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// NOT (bit flip).
    X,
    /// Controlled-NOT: `(control, target)`.
    CX,
    /// Toffoli: `(control1, control2, target)`.
    CCX,
    /// NOT controlled by `controls` lines: `(c1, ..., ck, target)`.
    MCX {
        /// Number of control lines.
        controls: u32,
    },
    /// Majority: `(c, b, a)`, sets `a` to `maj(c, b, a)`.
    Maj,
    /// Unmajority-and-add: `(c, b, a)`, restores `a` and writes the sum to `b`.
    Uma,
}

impl GateKind {
    /// Get the name of this gate kind.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::X => "x",
            GateKind::CX => "cx",
            GateKind::CCX => "ccx",
            GateKind::MCX { .. } => "mcx",
            GateKind::Maj => "maj",
            GateKind::Uma => "uma",
        }
    }

    /// Get the number of lines this gate operates on.
    #[inline]
    pub fn num_lines(&self) -> usize {
        match self {
            GateKind::X => 1,
            GateKind::CX => 2,
            GateKind::CCX | GateKind::Maj | GateKind::Uma => 3,
            GateKind::MCX { controls } => *controls as usize + 1,
        }
    }

    /// Whether this gate is its own inverse.
    #[inline]
    pub fn is_self_inverse(&self) -> bool {
        !self.is_compound()
    }

    /// Whether this gate expands into a sequence of elementary gates.
    #[inline]
    pub fn is_compound(&self) -> bool {
        matches!(self, GateKind::Maj | GateKind::Uma)
    }

    /// The NOT gate controlled by `controls` lines, using the smallest
    /// elementary kind that fits.
    pub fn controlled_not(controls: usize) -> IrResult<Self> {
        Ok(match controls {
            0 => GateKind::X,
            1 => GateKind::CX,
            2 => GateKind::CCX,
            n => {
                let controls =
                    u32::try_from(n).map_err(|_| IrError::TooManyControls { controls: n })?;
                GateKind::MCX { controls }
            }
        })
    }
}

/// One step of a compound gate expansion: an elementary kind applied to
/// operand positions of the enclosing gate.
pub type ExpansionStep = (GateKind, &'static [usize]);

// Operand order is (c, b, a) = (0, 1, 2).
const MAJ_EXPANSION: &[ExpansionStep] = &[
    (GateKind::CX, &[2, 1]),
    (GateKind::CX, &[2, 0]),
    (GateKind::CCX, &[0, 1, 2]),
];

const UMA_EXPANSION: &[ExpansionStep] = &[
    (GateKind::X, &[1]),
    (GateKind::CX, &[0, 1]),
    (GateKind::CCX, &[0, 1, 2]),
    (GateKind::X, &[1]),
    (GateKind::CX, &[2, 0]),
    (GateKind::CX, &[2, 1]),
];

/// A gate with its adjoint flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Whether this is the adjoint (dagger) of `kind`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dagger: bool,
}

impl Gate {
    /// Create a new gate of the given kind.
    pub fn new(kind: GateKind) -> Self {
        Self {
            kind,
            dagger: false,
        }
    }

    /// Return the adjoint of this gate.
    ///
    /// Self-inverse gates are returned unchanged.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        let mut gate = self.clone();
        if !self.kind.is_self_inverse() {
            gate.dagger = !gate.dagger;
        }
        gate
    }

    /// Get the name of this gate, with a `_dg` suffix for adjoints.
    pub fn name(&self) -> String {
        if self.dagger {
            format!("{}_dg", self.kind.name())
        } else {
            self.kind.name().to_string()
        }
    }

    /// Get the number of lines.
    pub fn num_lines(&self) -> usize {
        self.kind.num_lines()
    }

    /// Elementary expansion of this gate, in application order.
    ///
    /// Elementary gates, `MCX` included, expand to themselves over all of
    /// their operands.
    pub fn expansion(&self) -> Vec<(GateKind, Vec<usize>)> {
        let steps = match self.kind {
            GateKind::Maj => MAJ_EXPANSION,
            GateKind::Uma => UMA_EXPANSION,
            kind => return vec![(kind, (0..kind.num_lines()).collect())],
        };
        let mut expanded: Vec<_> = steps
            .iter()
            .map(|(kind, operands)| (*kind, operands.to_vec()))
            .collect();
        if self.dagger {
            expanded.reverse();
        }
        expanded
    }
}

impl From<GateKind> for Gate {
    fn from(kind: GateKind) -> Self {
        Gate::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_kind_properties() {
        assert_eq!(GateKind::X.num_lines(), 1);
        assert_eq!(GateKind::CX.num_lines(), 2);
        assert_eq!(GateKind::Maj.num_lines(), 3);
        assert_eq!(GateKind::MCX { controls: 4 }.num_lines(), 5);

        assert!(GateKind::CCX.is_self_inverse());
        assert!(!GateKind::Uma.is_self_inverse());
    }

    #[test]
    fn test_controlled_not_selection() {
        assert_eq!(GateKind::controlled_not(0).unwrap(), GateKind::X);
        assert_eq!(GateKind::controlled_not(1).unwrap(), GateKind::CX);
        assert_eq!(GateKind::controlled_not(2).unwrap(), GateKind::CCX);
        assert_eq!(
            GateKind::controlled_not(5).unwrap(),
            GateKind::MCX { controls: 5 }
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_control_count_overflow_rejected() {
        let too_many = u32::MAX as usize + 1;
        let err = GateKind::controlled_not(too_many).unwrap_err();
        assert!(matches!(err, IrError::TooManyControls { controls } if controls == too_many));
    }

    #[test]
    fn test_adjoint_flags() {
        let maj = Gate::new(GateKind::Maj);
        assert_eq!(maj.adjoint().name(), "maj_dg");
        assert_eq!(maj.adjoint().adjoint(), maj);

        let cx = Gate::new(GateKind::CX);
        assert_eq!(cx.adjoint(), cx);
    }

    #[test]
    fn test_majority_expansion_order() {
        let forward = Gate::new(GateKind::Maj).expansion();
        assert_eq!(
            forward,
            vec![
                (GateKind::CX, vec![2, 1]),
                (GateKind::CX, vec![2, 0]),
                (GateKind::CCX, vec![0, 1, 2]),
            ]
        );

        let mut backward = Gate::new(GateKind::Maj).adjoint().expansion();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_elementary_expansion_is_identity() {
        let gate = Gate::new(GateKind::MCX { controls: 3 });
        assert_eq!(
            gate.expansion(),
            vec![(GateKind::MCX { controls: 3 }, vec![0, 1, 2, 3])]
        );
    }
}
