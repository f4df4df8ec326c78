// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Serialize;

use adder_lower::cell::Constants;
use adder_lower::chain::{lower, ArithOp, OpDescriptor};
use adder_lower::emit_netlist::emit_netlist;
use adder_lower::gate_sim;
use adder_lower::get_summary_stats::get_summary_stats;
use adder_lower::integrity::{check_lowered, IntegritySummary};
use adder_lower::lower_config::{LowerConfig, OutputFormat};
use adder_lower::network::{Network, SignalAllocator};
use adder_lower::operand::Operand;
use adder_lower::report_cli_error::report_cli_error_and_exit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OpArg {
    Add,
    Sub,
    Inc,
}

/// Lowers a single add/sub/increment to a half-adder/OR2/INV network.
#[derive(Parser, Debug)]
struct Args {
    /// The operation to lower.
    #[arg(long, value_enum)]
    op: OpArg,

    /// Width of operand A in bits.
    #[arg(long)]
    a_width: usize,

    /// Whether operand A is signed (sign extended past its width).
    #[arg(long, default_value_t = false)]
    #[arg(action = clap::ArgAction::Set)]
    a_signed: bool,

    /// Width of operand B in bits (required for add and sub).
    #[arg(long)]
    b_width: Option<usize>,

    /// Whether operand B is signed.
    #[arg(long, default_value_t = false)]
    #[arg(action = clap::ArgAction::Set)]
    b_signed: bool,

    /// Width of the result in bits.
    #[arg(long)]
    result_width: usize,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// What to print; defaults to the config's output_format, else verilog.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Verilog module name; defaults to the config's, else e.g. `add8`.
    #[arg(long)]
    module_name: Option<String>,

    /// Instead of emitting, simulate on `A,B` (decimal, 0x or 0b; negative
    /// values allowed) and print the result.
    #[arg(long)]
    eval: Option<String>,
}

#[derive(Serialize)]
struct LoweredJson<'a> {
    descriptor: &'a OpDescriptor,
    constants: &'a Constants,
    network: &'a Network,
}

fn parse_value(text: &str) -> anyhow::Result<u64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let parsed = if let Some(hex) = digits.strip_prefix("0x") {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        u64::from_str_radix(bin, 2)
    } else {
        digits.parse::<u64>()
    };
    let magnitude = parsed.with_context(|| format!("invalid operand value {:?}", text))?;
    Ok(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

fn parse_eval_pair(text: &str) -> anyhow::Result<(u64, u64)> {
    let mut parts = text.split(',');
    let a = parse_value(parts.next().unwrap_or(""))?;
    let b = match parts.next() {
        Some(b) => parse_value(b)?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(anyhow!("--eval takes at most two comma-separated values"));
    }
    Ok((a, b))
}

fn build_descriptor(args: &Args, allocator: &SignalAllocator) -> anyhow::Result<OpDescriptor> {
    let a = Operand::fresh(allocator, args.a_width, args.a_signed);
    let op = match args.op {
        OpArg::Inc => ArithOp::Increment { a, literal: None },
        OpArg::Add | OpArg::Sub => {
            let b_width = args
                .b_width
                .ok_or_else(|| anyhow!("--b-width is required for add and sub"))?;
            let b = Operand::fresh(allocator, b_width, args.b_signed);
            if args.op == OpArg::Add {
                ArithOp::Add { a, b }
            } else {
                ArithOp::Subtract { a, b }
            }
        }
    };
    Ok(OpDescriptor {
        op,
        result_width: args.result_width,
    })
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => LowerConfig::from_path(path)?,
        None => LowerConfig::default(),
    };

    let allocator = SignalAllocator::new();
    let constants = allocator.fresh_constants();
    let descriptor = build_descriptor(args, &allocator)?;
    let network = lower(&descriptor, &constants, &allocator)?;

    if let IntegritySummary::Findings(findings) = check_lowered(&descriptor, &network, &constants)
    {
        return Err(anyhow!("lowered network failed integrity check: {:?}", findings));
    }

    if let Some(eval) = &args.eval {
        let (a, b) = parse_eval_pair(eval)?;
        let y = gate_sim::simulate(&descriptor, &network, &constants, a, b)?;
        println!("{}", y);
        return Ok(());
    }

    let format = args
        .format
        .or(config.output_format)
        .unwrap_or(OutputFormat::Verilog);
    match format {
        OutputFormat::Verilog => {
            let module_name = args
                .module_name
                .clone()
                .or_else(|| config.module_name.clone())
                .unwrap_or_else(|| format!("{}{}", descriptor.op.kind(), args.result_width));
            print!(
                "{}",
                emit_netlist(
                    &module_name,
                    &descriptor,
                    &network,
                    &constants,
                    &config.cell_names()
                )
            );
        }
        OutputFormat::Json => {
            let lowered = LoweredJson {
                descriptor: &descriptor,
                constants: &constants,
                network: &network,
            };
            println!("{}", serde_json::to_string_pretty(&lowered)?);
        }
        OutputFormat::Stats => {
            println!("{}", serde_json::to_string_pretty(&get_summary_stats(&network))?);
        }
    }
    Ok(())
}

fn main() {
    let _ = env_logger::builder().try_init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        let op = format!("{:?}", args.op).to_lowercase();
        report_cli_error_and_exit(&format!("{:#}", e), Some(&op), vec![]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("5", 5)]
    #[test_case("0x1f", 31)]
    #[test_case("0b101", 5)]
    #[test_case("-1", u64::MAX)]
    #[test_case(" 12 ", 12)]
    fn test_parse_value(text: &str, want: u64) {
        assert_eq!(parse_value(text).unwrap(), want);
    }

    #[test]
    fn test_parse_eval_pair() {
        assert_eq!(parse_eval_pair("5,3").unwrap(), (5, 3));
        assert_eq!(parse_eval_pair("15").unwrap(), (15, 0));
        assert!(parse_eval_pair("1,2,3").is_err());
        assert!(parse_eval_pair("x,2").is_err());
    }
}
