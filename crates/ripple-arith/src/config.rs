//! Synthesis configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which ripple-carry circuit to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithKind {
    /// `B <- A + B`.
    Adder,
    /// `B <- A - B`.
    Subtractor,
    /// `cout <- [A < B]`, operands untouched.
    Comparator,
}

impl ArithKind {
    /// Short name used for circuit names and cache keys.
    pub fn name(&self) -> &'static str {
        match self {
            ArithKind::Adder => "madd",
            ArithKind::Subtractor => "msub",
            ArithKind::Comparator => "mcomp",
        }
    }

    /// Whether the kind always writes a carry-out line.
    pub fn forces_overflow(&self) -> bool {
        matches!(self, ArithKind::Comparator)
    }
}

impl fmt::Display for ArithKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flags shared by every ripple-carry circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArithConfig {
    /// Allocate a carry-out line receiving the final carry (or borrow).
    pub overflow: bool,
    /// Index 0 of each caller register holds the least significant bit.
    pub little_endian: bool,
}

impl ArithConfig {
    /// Default flags: no overflow line, little endian.
    pub fn new() -> Self {
        Self {
            overflow: false,
            little_endian: true,
        }
    }

    /// Set the overflow flag.
    #[must_use]
    pub fn with_overflow(mut self, overflow: bool) -> Self {
        self.overflow = overflow;
        self
    }

    /// Set the endianness flag.
    #[must_use]
    pub fn with_little_endian(mut self, little_endian: bool) -> Self {
        self.little_endian = little_endian;
        self
    }

    /// The flags actually used for `kind` (the comparator forces overflow).
    #[must_use]
    pub fn effective(self, kind: ArithKind) -> Self {
        Self {
            overflow: self.overflow || kind.forces_overflow(),
            ..self
        }
    }
}

impl Default for ArithConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache key identifying one synthesized circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SynthesisKey {
    /// Circuit kind.
    pub kind: ArithKind,
    /// Width of register A.
    pub a_len: usize,
    /// Width of register B.
    pub b_len: usize,
    /// Effective flags.
    pub config: ArithConfig,
}

impl SynthesisKey {
    /// Build a key, normalizing flags the kind ignores.
    pub fn new(kind: ArithKind, a_len: usize, b_len: usize, config: ArithConfig) -> Self {
        Self {
            kind,
            a_len,
            b_len,
            config: config.effective(kind),
        }
    }
}
