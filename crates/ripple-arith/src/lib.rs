//! Reversible ripple-carry arithmetic synthesis.
//!
//! This crate builds Cuccaro-style ripple-carry circuits over two operand
//! registers A and B, in place and with a single borrowed ancilla:
//!
//! - **Adder**: `B <- a + b`
//! - **Subtractor**: `B <- a - b`
//! - **Comparator**: `cout <- [a < b]`, operands untouched
//!
//! Registers may have different widths, may be little or big endian, and may
//! carry an extra carry-out line. Every circuit is made of NOT, CNOT, Toffoli,
//! multi-controlled NOT and the compound `MAJ` / `UMA` gates from
//! [`ripple_ir`], and has an exact adjoint.
//!
//! # Example
//!
//! ```rust
//! use ripple_arith::RippleCarry;
//!
//! let sub = RippleCarry::new(3, 3).with_overflow(true).subtractor().unwrap();
//! let eval = sub.evaluate(2, 5).unwrap();
//! assert_eq!(eval.b, 5);                 // (2 - 5) mod 8
//! assert_eq!(eval.carry_out, Some(true)); // borrow
//! assert!(eval.ancilla_clean);
//! ```
//!
//! Register initialization from literals lives in [`init`], and
//! [`SynthesisCache`] memoizes circuits by [`SynthesisKey`].

pub mod assemble;
pub mod bits;
pub mod boundary;
pub mod cache;
mod chain;
pub mod config;
pub mod error;
pub mod init;
pub mod layout;
pub mod observer;

pub use assemble::{ArithCircuit, Evaluation, RippleCarry, bit_comparator, half_adder};
pub use boundary::ChainBounds;
pub use cache::SynthesisCache;
pub use config::{ArithConfig, ArithKind, SynthesisKey};
pub use error::{ArithError, ArithResult};
pub use init::InitCircuit;
pub use layout::RegisterLayout;
pub use observer::{EmitObserver, RecordingObserver, TracingObserver};
