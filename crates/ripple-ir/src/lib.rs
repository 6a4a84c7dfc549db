//! Ripple Reversible Circuit Intermediate Representation
//!
//! This crate provides the data structures the Ripple arithmetic synthesizers
//! emit into: state lines, reversible gates, instructions, and the ordered
//! [`Circuit`] container. It also ships a classical executor, [`BitState`],
//! which runs a circuit on definite bit assignments.
//!
//! # Core Components
//!
//! - **Lines**: [`LineId`] and [`Line`] for addressing binary state lines
//! - **Gates**: [`GateKind`] for the elementary NOT family and the compound
//!   Cuccaro primitives, [`Gate`] adding the adjoint flag
//! - **Instructions**: [`Instruction`] combining a gate with its lines
//! - **Circuit**: [`Circuit`] builder with adjoint and decomposition down to
//!   `X` / `CX` / `CCX`
//! - **Execution**: [`BitState`] for exact classical simulation
//!
//! # Example: a majority gate and its inverse
//!
//! ```rust
//! use ripple_ir::{BitState, Circuit, LineId};
//!
//! let mut circuit = Circuit::with_size("maj", 3);
//! circuit.maj(LineId(0), LineId(1), LineId(2)).unwrap();
//!
//! let mut state = BitState::for_circuit(&circuit);
//! state.set(LineId(0), true).unwrap();
//! state.set(LineId(1), true).unwrap();
//! state.run(&circuit).unwrap();
//! assert!(state.get(LineId(2)).unwrap());
//!
//! state.run(&circuit.adjoint()).unwrap();
//! assert!(!state.get(LineId(2)).unwrap());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Lines | Description |
//! |------|-------|-------------|
//! | `X` | 1 | NOT |
//! | `CX` | 2 | Controlled-NOT |
//! | `CCX` | 3 | Toffoli |
//! | `MCX` | k+1 | NOT with k controls |
//! | `MAJ` | 3 | Majority (carry) |
//! | `UMA` | 3 | Unmajority-and-add |

pub mod circuit;
pub mod classical;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod line;
mod lowering;

pub use circuit::Circuit;
pub use classical::BitState;
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind};
pub use instruction::Instruction;
pub use line::{Line, LineId};
