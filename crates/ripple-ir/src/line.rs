//! State line types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a binary state line within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineId(pub u32);

impl LineId {
    /// Position of this line in a dense per-circuit state vector.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}

impl From<u32> for LineId {
    fn from(id: u32) -> Self {
        LineId(id)
    }
}

/// A state line with optional register membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    /// The unique identifier.
    pub id: LineId,
    /// The name of the register this line belongs to, if any.
    pub register: Option<String>,
    /// The index within the register, if any.
    pub index: Option<u32>,
    /// Whether the line is a borrowed ancilla that must start and end at 0.
    #[serde(default)]
    pub ancilla: bool,
}

impl Line {
    /// Create a new line with just an id.
    pub fn new(id: LineId) -> Self {
        Self {
            id,
            register: None,
            index: None,
            ancilla: false,
        }
    }

    /// Create a new line with register membership.
    pub fn with_register(id: LineId, register: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: Some(register.into()),
            index: Some(index),
            ancilla: false,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.register, self.index) {
            (Some(reg), Some(idx)) => write!(f, "{reg}[{idx}]"),
            _ => write!(f, "{}", self.id),
        }
    }
}
