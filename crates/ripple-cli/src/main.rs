//! Ripple Command-Line Interface
//!
//! Synthesizes reversible ripple-carry arithmetic and register
//! initialization circuits and prints them as text or JSON.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{Format, KindArg};
use commands::{init, synth};

/// Ripple - reversible ripple-carry arithmetic synthesis
#[derive(Parser)]
#[command(name = "ripple")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize an adder, subtractor or comparator
    Synth {
        /// Circuit kind
        #[arg(value_enum)]
        kind: KindArg,

        /// Width of operand register A
        #[arg(long)]
        a_len: usize,

        /// Width of operand / result register B
        #[arg(long)]
        b_len: usize,

        /// Add a carry-out line
        #[arg(long)]
        overflow: bool,

        /// Index 0 of each register is the most significant bit
        #[arg(long)]
        big_endian: bool,

        /// Emit the inverse circuit
        #[arg(long)]
        adjoint: bool,

        /// Expand MAJ / UMA into elementary gates
        #[arg(long)]
        decompose: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Run the circuit on operands A and B
        #[arg(long, num_args = 2, value_names = ["A", "B"])]
        eval: Option<Vec<u64>>,
    },

    /// Synthesize a register initialization from a literal such as 1011
    Init {
        /// Bit literal, most significant digit first
        bits: String,

        /// Number of control lines guarding every flip
        #[arg(short, long, default_value = "0")]
        controls: usize,

        /// Write the complement of the literal
        #[arg(long)]
        complement: bool,

        /// Target line 0 receives the first digit
        #[arg(long)]
        big_endian: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // RUST_LOG wins over -v
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Synth {
            kind,
            a_len,
            b_len,
            overflow,
            big_endian,
            adjoint,
            decompose,
            format,
            eval,
        } => synth::execute(&synth::SynthArgs {
            kind: kind.into(),
            a_len,
            b_len,
            overflow,
            little_endian: !big_endian,
            adjoint,
            decompose,
            format,
            operands: eval.map(|v| (v[0], v[1])),
        }),

        Commands::Init {
            bits,
            controls,
            complement,
            big_endian,
            format,
        } => init::execute(&bits, controls, complement, !big_endian, format),
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_synth() {
        let cli = Cli::try_parse_from([
            "ripple", "synth", "subtractor", "--a-len", "3", "--b-len", "4", "--overflow",
            "--eval", "5", "2", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Synth {
            kind,
            a_len,
            b_len,
            overflow,
            big_endian,
            eval,
            format,
            ..
        } = cli.command
        else {
            panic!("expected synth");
        };
        assert!(matches!(kind, KindArg::Subtractor));
        assert_eq!((a_len, b_len), (3, 4));
        assert!(overflow && !big_endian);
        assert_eq!(eval, Some(vec![5, 2]));
        assert_eq!(format, Format::Text);
    }

    #[test]
    fn test_parse_init() {
        let cli =
            Cli::try_parse_from(["ripple", "init", "1011", "--controls", "2", "--format", "json"])
                .unwrap();
        let Commands::Init {
            bits,
            controls,
            format,
            ..
        } = cli.command
        else {
            panic!("expected init");
        };
        assert_eq!(bits, "1011");
        assert_eq!(controls, 2);
        assert_eq!(format, Format::Json);
    }

    #[test]
    fn test_eval_needs_two_operands() {
        assert!(
            Cli::try_parse_from([
                "ripple", "synth", "adder", "--a-len", "2", "--b-len", "2", "--eval", "1",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_synth_command_runs() {
        let args = synth::SynthArgs {
            kind: ripple_arith::ArithKind::Comparator,
            a_len: 2,
            b_len: 3,
            overflow: false,
            little_endian: false,
            adjoint: true,
            decompose: true,
            format: Format::Json,
            operands: Some((1, 6)),
        };
        synth::execute(&args).unwrap();

        let bad = synth::SynthArgs { a_len: 0, ..args };
        assert!(synth::execute(&bad).is_err());
    }

    #[test]
    fn test_init_command_rejects_bad_literal() {
        assert!(init::execute("10", 0, false, true, Format::Text).is_ok());
        assert!(init::execute("1a", 0, false, true, Format::Text).is_err());
    }
}
