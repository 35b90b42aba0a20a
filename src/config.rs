use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level eofrot configuration (`eofrot.toml`).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct EofrotConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Rotation settings.
    #[serde(default)]
    pub rotation: RotationToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Output format, "json" or "text"; detected from the path if unset.
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotationToml {
    /// Unset means: take the flag stored in the input, else 366 days.
    #[serde(default)]
    pub no_leap: Option<bool>,
    #[serde(default)]
    pub projection_weight: WeightToml,
    #[serde(default = "default_true")]
    pub align_signs: bool,
    #[serde(default = "default_degeneracy_tol")]
    pub degeneracy_tol: f64,
    #[serde(default)]
    pub reference: Option<PathBuf>,
}

impl Default for RotationToml {
    fn default() -> Self {
        Self {
            no_leap: None,
            projection_weight: WeightToml::default(),
            align_signs: true,
            degeneracy_tol: default_degeneracy_tol(),
            reference: None,
        }
    }
}

/// `projection_weight = "per-day"` or `projection_weight = 0.5`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WeightToml {
    Value(f64),
    Name(String),
}

impl Default for WeightToml {
    fn default() -> Self {
        Self::Name("per-day".to_string())
    }
}

fn default_true() -> bool {
    true
}
fn default_degeneracy_tol() -> f64 {
    1e-12
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<EofrotConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
