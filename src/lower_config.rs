// SPDX-License-Identifier: Apache-2.0

//! Optional TOML configuration for the `adder-lower` driver.
//!
//! Example:
//!
//! ```toml
//! module_name = "alu_add"
//! output_format = "verilog"
//!
//! [cells]
//! half_adder = "HAX1"
//! or2 = "OR2X1"
//! not = "INVX1"
//! ```
//!
//! Every field is optional; command line flags take precedence over anything
//! given here.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::cell::CellKind;

/// Library cell names used when emitting a netlist.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CellNames {
    pub half_adder: String,
    pub or2: String,
    pub not: String,
}

impl Default for CellNames {
    fn default() -> Self {
        Self {
            half_adder: "HA".to_string(),
            or2: "OR2".to_string(),
            not: "INV".to_string(),
        }
    }
}

impl CellNames {
    pub fn name_for(&self, kind: CellKind) -> &str {
        match kind {
            CellKind::HalfAdder => &self.half_adder,
            CellKind::Or2 => &self.or2,
            CellKind::Not => &self.not,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structural Verilog netlist.
    Verilog,
    /// The lowered network as JSON.
    Json,
    /// Summary statistics as JSON.
    Stats,
}

#[derive(Debug, Default, Deserialize)]
pub struct LowerConfig {
    /// Library cell names for netlist emission.
    pub cells: Option<CellNames>,

    /// Default module name for netlist emission.
    pub module_name: Option<String>,

    /// Default output format when `--format` is not given.
    pub output_format: Option<OutputFormat>,
}

impl LowerConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: LowerConfig = toml::from_str(text)?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        log::info!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn cell_names(&self) -> CellNames {
        self.cells.clone().unwrap_or_default()
    }
}
