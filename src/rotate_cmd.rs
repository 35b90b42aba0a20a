//! Rotate command: sign-align and rotate a year of EOFs.

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{info, info_span};

use eofrot_io::{read_eofs, read_reference, write_eofs};
use eofrot_rotation::{ContinuityReport, SubspaceProjector, post_process_rotation};

use crate::cli::RotateArgs;
use crate::config::{self, EofrotConfig};
use crate::convert;

/// Report written by `--report`.
#[derive(Debug, Serialize)]
struct RotateReport {
    closure_angle: f64,
    delta: f64,
    residual_angle: f64,
    projection_weight: f64,
    n_sign_flips: usize,
    input: ContinuityReport,
    output: ContinuityReport,
}

/// Run the rotation pipeline.
pub fn run(args: RotateArgs) -> Result<()> {
    let _cmd = info_span!("rotate").entered();

    // 1. Load optional TOML config
    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => EofrotConfig::default(),
    };

    // 2. Resolve paths and settings; CLI flags override the config file
    let input = args
        .input
        .as_ref()
        .or(config.io.input.as_ref())
        .ok_or_else(|| anyhow!("no input path: use --input or set [io].input"))?;
    let output = args
        .output
        .as_ref()
        .or(config.io.output.as_ref())
        .ok_or_else(|| anyhow!("no output path: use --output or set [io].output"))?;
    let output_format = convert::parse_format(config.io.format.as_deref())?;
    let weight = match &args.projection_weight {
        Some(s) => convert::parse_projection_weight(s)?,
        None => convert::build_projection_weight(&config.rotation.projection_weight)?,
    };

    // 3. Read EOFs
    info!(path = %input.display(), "reading EOFs");
    let loaded =
        read_eofs(input, None).with_context(|| format!("failed to read EOFs: {}", input.display()))?;
    info!(
        n_days = loaded.sequence.n_days(),
        n_points = loaded.sequence.n_points(),
        "EOFs loaded"
    );

    let no_leap = convert::resolve_no_leap(
        args.no_leap_flag(),
        config.rotation.no_leap,
        loaded.no_leap,
    );

    let reference = args
        .reference
        .as_ref()
        .or(config.rotation.reference.as_ref())
        .map(|path| {
            info!(path = %path.display(), "reading DOY 1 sign reference");
            read_reference(path)
                .with_context(|| format!("failed to read reference EOFs: {}", path.display()))
        })
        .transpose()?;

    let rotation_cfg =
        convert::build_rotation_config(&config.rotation, no_leap, weight, reference)?;

    // 4. Rotate
    let result = post_process_rotation(&loaded.sequence, &SubspaceProjector, &rotation_cfg)
        .context("rotation failed")?;
    info!(
        closure_angle_deg = result.closure_angle().to_degrees(),
        delta_deg = result.delta().to_degrees(),
        residual_deg = result.residual_angle().to_degrees(),
        n_sign_flips = result.n_sign_flips(),
        "rotation complete"
    );

    // 5. Write rotated EOFs
    info!(path = %output.display(), "writing rotated EOFs");
    write_eofs(output, result.sequence(), output_format, Some(no_leap))
        .with_context(|| format!("failed to write EOFs: {}", output.display()))?;

    // 6. Optional report
    if let Some(report_path) = &args.report {
        let report = RotateReport {
            closure_angle: result.closure_angle(),
            delta: result.delta(),
            residual_angle: result.residual_angle(),
            projection_weight: result.weight(),
            n_sign_flips: result.n_sign_flips(),
            input: ContinuityReport::compute(&loaded.sequence),
            output: ContinuityReport::compute(result.sequence()),
        };
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        std::fs::write(report_path, json)
            .with_context(|| format!("failed to write report: {}", report_path.display()))?;
        info!(path = %report_path.display(), "report written");
    }

    Ok(())
}
