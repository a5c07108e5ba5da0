//! `dsbench run`

use crate::config::DsbenchConfig;
use anyhow::{Context, Result};
use dsbench_core::{Pipeline, PipelineReport, Plotter};
use std::path::Path;

/// Run every configured benchmark from `workdir` and print the report
pub fn run_suite(config: &DsbenchConfig, workdir: &Path) -> Result<PipelineReport> {
    let pipeline = Pipeline::new(
        workdir,
        config.corpus.clone(),
        config.benchmarks.clone(),
        Plotter::new(config.render.clone()),
    )
    .context("invalid benchmark suite")?;

    let report = pipeline.run();
    print!("{}", report.summary());
    Ok(report)
}
