//! `dsbench plot`

use anyhow::{Context, Result};
use dsbench_core::{FigureSummary, Plotter, RenderConfig};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Plot `results` into `output`
///
/// Files that fail to parse only leave an empty panel; the command still
/// succeeds as long as the figure itself is written.
pub fn plot_results(
    render: &RenderConfig,
    output: &Path,
    results: &[PathBuf],
) -> Result<FigureSummary> {
    println!("Writing {}", output.display());

    let summary = Plotter::new(render.clone())
        .plot(results, output)
        .with_context(|| format!("failed to plot {}", output.display()))?;

    for panel in summary.failed() {
        warn!(
            path = %panel.path.display(),
            cell = panel.cell,
            error = panel.error.as_deref().unwrap_or_default(),
            "Panel left empty"
        );
    }
    Ok(summary)
}
