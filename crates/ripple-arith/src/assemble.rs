//! Circuit assemblers.
//!
//! All three ripple-carry circuits share one core: the forward majority
//! chain, the middle logic, and a closer. The subtractor runs the core on a
//! complemented A and complements the result; the comparator runs it on a
//! complemented A and closes with the exact inverse of the chain so that only
//! the carry-out changes.

use ripple_ir::{BitState, Circuit, LineId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::boundary::{self, ChainBounds, MiddleMode};
use crate::chain;
use crate::config::{ArithConfig, ArithKind, SynthesisKey};
use crate::error::{ArithError, ArithResult};
use crate::layout::{self, RegisterLayout};
use crate::observer::{EmitObserver, Emitter, TracingObserver};

/// A synthesized arithmetic circuit and the roles of its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithCircuit {
    /// The gate sequence.
    pub circuit: Circuit,
    /// Operand, carry-in and carry-out lines, in caller order.
    pub layout: RegisterLayout,
}

/// Register contents after running an [`ArithCircuit`] on definite inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Final value of register A.
    pub a: u64,
    /// Final value of register B.
    pub b: u64,
    /// Final carry-out bit, if the circuit has one.
    pub carry_out: Option<bool>,
    /// Carry-out (if any) followed by B, read as one unsigned integer.
    pub output: u64,
    /// Whether the carry-in ancilla ended at 0.
    pub ancilla_clean: bool,
}

impl ArithCircuit {
    /// The inverse circuit over the same lines.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        Self {
            circuit: self.circuit.adjoint(),
            layout: self.layout.clone(),
        }
    }

    /// The same circuit with every compound gate expanded.
    #[must_use]
    pub fn decompose(&self) -> Self {
        Self {
            circuit: self.circuit.decompose(),
            layout: self.layout.clone(),
        }
    }

    /// Run the circuit on `a` and `b` (all other lines 0).
    ///
    /// Operands are written in the layout's endianness; bits above a
    /// register's width are dropped.
    pub fn evaluate(&self, a: u64, b: u64) -> ArithResult<Evaluation> {
        let layout = &self.layout;
        let le = layout.little_endian;
        let mut state = BitState::for_circuit(&self.circuit);
        state.write_uint(&layout.a, a, le)?;
        state.write_uint(&layout.b, b, le)?;
        state.run(&self.circuit)?;

        let carry_out = layout.carry_out.map(|l| state.get(l)).transpose()?;
        let ancilla_clean = match layout.carry_in {
            Some(cin) => !state.get(cin)?,
            None => true,
        };
        Ok(Evaluation {
            a: state.read_uint(&layout.a, le)?,
            b: state.read_uint(&layout.b, le)?,
            carry_out,
            output: state.read_uint(&layout.output_msb_first(), false)?,
            ancilla_clean,
        })
    }
}

/// Ripple-carry synthesizer for one pair of register widths.
///
/// # Example
///
/// ```
/// use ripple_arith::RippleCarry;
///
/// let adder = RippleCarry::new(2, 2).with_overflow(true).adder().unwrap();
/// assert_eq!(adder.evaluate(3, 2).unwrap().output, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RippleCarry {
    a_len: usize,
    b_len: usize,
    config: ArithConfig,
}

impl RippleCarry {
    /// Synthesizer for an `a_len`-line A and a `b_len`-line B, with default
    /// flags.
    pub fn new(a_len: usize, b_len: usize) -> Self {
        Self {
            a_len,
            b_len,
            config: ArithConfig::default(),
        }
    }

    /// Synthesizer for a cache key.
    pub fn from_key(key: &SynthesisKey) -> Self {
        Self::new(key.a_len, key.b_len).with_config(key.config)
    }

    /// Request a carry-out line.
    #[must_use]
    pub fn with_overflow(mut self, overflow: bool) -> Self {
        self.config.overflow = overflow;
        self
    }

    /// Choose the register bit order.
    #[must_use]
    pub fn with_little_endian(mut self, little_endian: bool) -> Self {
        self.config.little_endian = little_endian;
        self
    }

    /// Replace all flags.
    #[must_use]
    pub fn with_config(mut self, config: ArithConfig) -> Self {
        self.config = config;
        self
    }

    /// The configured flags.
    pub fn config(&self) -> ArithConfig {
        self.config
    }

    /// Cache key of the circuit `kind` would produce.
    pub fn key(&self, kind: ArithKind) -> SynthesisKey {
        SynthesisKey::new(kind, self.a_len, self.b_len, self.config)
    }

    /// `B <- (a + b) mod 2^b_len`, or `(cout, B) <- a + b` with overflow.
    pub fn adder(&self) -> ArithResult<ArithCircuit> {
        self.synthesize(ArithKind::Adder, &mut TracingObserver)
    }

    /// `B <- (a - b) mod 2^b_len`; with overflow the carry-out holds the
    /// borrow.
    pub fn subtractor(&self) -> ArithResult<ArithCircuit> {
        self.synthesize(ArithKind::Subtractor, &mut TracingObserver)
    }

    /// `cout <- [a < b]`; A and B are left unchanged.
    pub fn comparator(&self) -> ArithResult<ArithCircuit> {
        self.synthesize(ArithKind::Comparator, &mut TracingObserver)
    }

    /// Build the circuit `kind`, reporting each gate to `observer`.
    #[instrument(skip(self, observer), fields(a_len = self.a_len, b_len = self.b_len))]
    pub fn synthesize(
        &self,
        kind: ArithKind,
        observer: &mut dyn EmitObserver,
    ) -> ArithResult<ArithCircuit> {
        let (a_len, b_len) = (self.a_len, self.b_len);
        if a_len == 0 || b_len == 0 {
            return Err(ArithError::Configuration { a_len, b_len });
        }
        let config = self.config.effective(kind);
        debug!(
            kind = %kind,
            overflow = config.overflow,
            little_endian = config.little_endian,
            "synthesizing ripple-carry circuit"
        );

        let mut circuit = Circuit::new(format!("{}_{}x{}", kind.name(), a_len, b_len));
        let mut layout = layout::allocate(
            &mut circuit,
            a_len,
            b_len,
            config.overflow,
            config.little_endian,
        )?;
        if kind == ArithKind::Comparator && b_len == 1 && a_len > 1 {
            // The one-line-B comparison is an MCX over every other line. An idle
            // carry-in gives `decompose` a line to borrow.
            let spare = circuit.add_register("cin", 1)[0];
            circuit.set_ancilla(spare)?;
            layout.carry_in = Some(spare);
        }
        let a = layout.a_lsb_first();
        let b = layout.b_lsb_first();
        let bounds = ChainBounds::resolve(a_len, b_len, config.overflow);

        let mut em = Emitter::new(circuit, observer);
        match kind {
            ArithKind::Adder => {
                ripple_core(&mut em, &layout, &a, &b, bounds, MiddleMode::Add)?;
            }
            ArithKind::Subtractor => {
                em.negate(&a)?;
                ripple_core(&mut em, &layout, &a, &b, bounds, MiddleMode::Subtract)?;
                em.negate(&a)?;
                em.negate(&b)?;
            }
            ArithKind::Comparator => {
                let out = layout
                    .carry_out
                    .ok_or(ArithError::Configuration { a_len, b_len })?;
                em.negate(&a)?;
                match (bounds, layout.carry_in) {
                    (Some(bounds), Some(cin)) => {
                        chain::majority_chain(&mut em, cin, &a, &b, bounds.mrange())?;
                        boundary::comparison(&mut em, &a, &b, out, Some(bounds))?;
                        chain::majority_chain_dagger(&mut em, cin, &a, &b, bounds.mrange())?;
                    }
                    _ => boundary::comparison(&mut em, &a, &b, out, None)?,
                }
                em.negate(&a)?;
            }
        }

        let circuit = em.finish();
        debug!(
            kind = %kind,
            lines = circuit.num_lines(),
            gates = circuit.num_ops(),
            "synthesized ripple-carry circuit"
        );
        Ok(ArithCircuit { circuit, layout })
    }
}

/// Majority chain, middle logic, unmajority chain.
fn ripple_core(
    em: &mut Emitter<'_>,
    layout: &RegisterLayout,
    a: &[LineId],
    b: &[LineId],
    bounds: Option<ChainBounds>,
    mode: MiddleMode,
) -> ArithResult<()> {
    let cout = layout.carry_out;
    match (bounds, layout.carry_in) {
        (Some(bounds), Some(cin)) => {
            chain::majority_chain(em, cin, a, b, bounds.mrange())?;
            boundary::middle(em, a, b, cout, bounds, mode)?;
            chain::unmajority_chain(em, cin, a, b, bounds.mrange())
        }
        _ => boundary::single_bit(em, a, b[0], cout, mode),
    }
}

/// One-bit half adder over lines `a`, `b`, `cout`: `(cout, b) <- a + b`.
pub fn half_adder() -> ArithResult<ArithCircuit> {
    one_bit("half_adder", |em, a, b, out| {
        em.cx(a, b)?;
        em.x(b)?;
        em.ccx(a, b, out)?;
        em.x(b)
    })
}

/// One-bit comparator over lines `a`, `b`, `cout`: `cout <- [a > b]`.
pub fn bit_comparator() -> ArithResult<ArithCircuit> {
    one_bit("bit_comparator", |em, a, b, out| {
        em.x(b)?;
        em.ccx(a, b, out)?;
        em.x(b)
    })
}

fn one_bit(
    name: &str,
    body: impl FnOnce(&mut Emitter<'_>, LineId, LineId, LineId) -> ArithResult<()>,
) -> ArithResult<ArithCircuit> {
    let mut circuit = Circuit::new(name);
    let layout = layout::allocate(&mut circuit, 1, 1, true, true)?;
    let out = layout.carry_out.ok_or(ArithError::Configuration {
        a_len: 1,
        b_len: 1,
    })?;

    let mut observer = TracingObserver;
    let mut em = Emitter::new(circuit, &mut observer);
    body(&mut em, layout.a[0], layout.b[0], out)?;
    debug!(name, "synthesized one-bit primitive");
    Ok(ArithCircuit {
        circuit: em.finish(),
        layout,
    })
}
