//! Synth command implementation.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::info;

use ripple_arith::{ArithCircuit, ArithKind, Evaluation, RippleCarry};

use super::common::{Format, print_json};

/// Parsed arguments of the synth command.
pub struct SynthArgs {
    pub kind: ArithKind,
    pub a_len: usize,
    pub b_len: usize,
    pub overflow: bool,
    pub little_endian: bool,
    pub adjoint: bool,
    pub decompose: bool,
    pub format: Format,
    pub operands: Option<(u64, u64)>,
}

#[derive(Serialize)]
struct Report<'a> {
    circuit: &'a ArithCircuit,
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluation: Option<Evaluation>,
}

/// Execute the synth command.
pub fn execute(args: &SynthArgs) -> Result<()> {
    let mut circuit = RippleCarry::new(args.a_len, args.b_len)
        .with_overflow(args.overflow)
        .with_little_endian(args.little_endian)
        .synthesize(args.kind, &mut ripple_arith::TracingObserver)
        .with_context(|| {
            format!(
                "Failed to synthesize {} for widths {}x{}",
                args.kind, args.a_len, args.b_len
            )
        })?;
    if args.adjoint {
        circuit = circuit.adjoint();
    }
    if args.decompose {
        circuit = circuit.decompose();
    }
    info!(
        gates = circuit.circuit.num_ops(),
        depth = circuit.circuit.depth(),
        "circuit ready"
    );

    let evaluation = args
        .operands
        .map(|(a, b)| circuit.evaluate(a, b))
        .transpose()
        .context("Failed to evaluate circuit")?;

    match args.format {
        Format::Json => print_json(&Report {
            circuit: &circuit,
            evaluation,
        }),
        Format::Text => {
            print_text(&circuit, args.operands, evaluation.as_ref());
            Ok(())
        }
    }
}

fn print_text(
    circuit: &ArithCircuit,
    operands: Option<(u64, u64)>,
    evaluation: Option<&Evaluation>,
) {
    println!(
        "{} {}",
        style("→").cyan().bold(),
        style(circuit.circuit.name()).green()
    );
    print!("{}", circuit.circuit);

    let mut counts: Vec<_> = circuit.circuit.gate_counts().into_iter().collect();
    counts.sort();
    let summary: Vec<_> = counts.iter().map(|(name, n)| format!("{name}: {n}")).collect();
    println!("  Gates: {}", summary.join(", "));
    println!("  Depth: {}", circuit.circuit.depth());

    if let (Some((a, b)), Some(eval)) = (operands, evaluation) {
        println!(
            "{} a = {}, b = {} → a = {}, b = {}, output = {}",
            style("✓").green().bold(),
            a,
            b,
            eval.a,
            eval.b,
            style(eval.output).yellow()
        );
        if let Some(carry) = eval.carry_out {
            println!("  Carry-out: {}", u8::from(carry));
        }
        if !eval.ancilla_clean {
            println!("  {} carry-in ancilla left dirty", style("!").red().bold());
        }
    }
}
