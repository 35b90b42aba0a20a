//! Pure conversion functions: TOML config structs and CLI strings -> crate API types.

use anyhow::{Context, Result, bail};

use eofrot_eof::EofData;
use eofrot_io::EofFormat;
use eofrot_rotation::{ProjectionWeight, RotationConfig};

use crate::config::{RotationToml, WeightToml};

/// Parses a projection weight given by name or as a number.
pub fn parse_projection_weight(s: &str) -> Result<ProjectionWeight> {
    match s.trim().to_lowercase().as_str() {
        "per-day" | "perday" | "per_day" => Ok(ProjectionWeight::PerDay),
        other => match other.parse::<f64>() {
            Ok(w) => Ok(ProjectionWeight::Fixed(w)),
            Err(_) => bail!("unknown projection weight: {other:?} (expected \"per-day\" or a number)"),
        },
    }
}

/// Converts the TOML projection weight.
pub fn build_projection_weight(w: &WeightToml) -> Result<ProjectionWeight> {
    match w {
        WeightToml::Value(v) => Ok(ProjectionWeight::Fixed(*v)),
        WeightToml::Name(name) => parse_projection_weight(name),
    }
}

/// Parses an optional output format name.
pub fn parse_format(s: Option<&str>) -> Result<Option<EofFormat>> {
    s.map(|name| name.parse::<EofFormat>())
        .transpose()
        .context("invalid [io].format")
}

/// Resolves the calendar: `--no-leap`/`--leap`, then `[rotation].no_leap`,
/// then the flag stored with the input, then 366 days.
pub fn resolve_no_leap(cli: Option<bool>, config: Option<bool>, input: Option<bool>) -> bool {
    cli.or(config).or(input).unwrap_or(false)
}

/// Builds a validated [`RotationConfig`].
///
/// `no_leap` and `weight` are the already resolved values; the TOML table
/// supplies the rest.
pub fn build_rotation_config(
    rotation: &RotationToml,
    no_leap: bool,
    weight: ProjectionWeight,
    reference: Option<EofData>,
) -> Result<RotationConfig> {
    let mut cfg = RotationConfig::new()
        .with_no_leap(no_leap)
        .with_projection_weight(weight)
        .with_align_signs(rotation.align_signs)
        .with_degeneracy_tol(rotation.degeneracy_tol);
    if let Some(r) = reference {
        cfg = cfg.with_doy1_reference(r);
    }
    cfg.validate().context("invalid rotation configuration")?;
    Ok(cfg)
}
