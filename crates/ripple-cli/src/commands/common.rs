//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use clap::ValueEnum;
use ripple_arith::ArithKind;
use serde::Serialize;

/// Circuit kinds accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Adder,
    Subtractor,
    Comparator,
}

impl From<KindArg> for ArithKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Adder => ArithKind::Adder,
            KindArg::Subtractor => ArithKind::Subtractor,
            KindArg::Comparator => ArithKind::Comparator,
        }
    }
}

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One gate per line
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
