//! Init command implementation.

use anyhow::{Context, Result};
use console::style;

use ripple_arith::init::{initialize_complement_of_bitstring, initialize_from_bitstring};

use super::common::{Format, print_json};

/// Execute the init command.
pub fn execute(
    bits: &str,
    controls: usize,
    complement: bool,
    little_endian: bool,
    format: Format,
) -> Result<()> {
    let init = if complement {
        initialize_complement_of_bitstring(bits, controls, little_endian)
    } else {
        initialize_from_bitstring(bits, controls, little_endian)
    }
    .with_context(|| format!("Failed to initialize register from '{bits}'"))?;

    match format {
        Format::Json => print_json(&init),
        Format::Text => {
            println!(
                "{} Initializing {} target lines with {} controls",
                style("→").cyan().bold(),
                style(init.targets.len()).green(),
                style(init.controls.len()).yellow()
            );
            print!("{}", init.circuit);
            Ok(())
        }
    }
}
