//! Diagnose command: day-to-day continuity of an EOF sequence.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span};

use eofrot_calendar::Doy;
use eofrot_eof::mean_eof;
use eofrot_io::read_eofs;
use eofrot_rotation::ContinuityReport;

use crate::cli::DiagnoseArgs;

#[derive(Debug, Serialize)]
struct DiagnoseOutput {
    continuity: ContinuityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    window_mean: Option<WindowMean>,
}

/// Grid-point mean over a DOY window.
#[derive(Debug, Serialize)]
struct WindowMean {
    start: u16,
    end: u16,
    eof1: Vec<f64>,
    eof2: Vec<f64>,
}

/// Run the diagnostics.
pub fn run(args: DiagnoseArgs) -> Result<()> {
    let _cmd = info_span!("diagnose").entered();

    info!(path = %args.input.display(), "reading EOFs");
    let loaded = read_eofs(&args.input, None)
        .with_context(|| format!("failed to read EOFs: {}", args.input.display()))?;
    let sequence = &loaded.sequence;

    let continuity = ContinuityReport::compute(sequence);
    info!(
        max_angle_deg = continuity.max_angle.to_degrees(),
        min_inner_product = continuity.min_inner_product,
        sign_continuous = continuity.is_sign_continuous(),
        "continuity computed"
    );

    let window_mean = match args.window.as_deref() {
        None => None,
        Some(&[start, end]) => {
            let mean = mean_eof(sequence, Doy::new(start)?, Doy::new(end)?)
                .with_context(|| format!("failed to average DOYs {start}..{end}"))?;
            Some(WindowMean {
                start,
                end,
                eof1: mean.eof1().to_vec(),
                eof2: mean.eof2().to_vec(),
            })
        }
        Some(other) => bail!("--window takes two DOYs, got {}", other.len()),
    };

    let json = serde_json::to_string_pretty(&DiagnoseOutput {
        continuity,
        window_mean,
    })
    .context("failed to serialize report")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
