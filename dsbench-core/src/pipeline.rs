//! End-to-end benchmark suite runs
//!
//! For every configured benchmark: make sure the corpus exists if the
//! benchmark reads it, run the executable, then plot whichever of its result
//! files are present. Every stage is best effort; a failure is recorded in
//! the report and the run moves on.

use crate::corpus::{self, CorpusConfig, CorpusOutcome};
use crate::error::{PipelineError, PipelineResult};
use crate::invoke::BenchmarkInvoker;
use crate::plot::{FigureSummary, Plotter};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Placeholder replaced by the corpus path in benchmark arguments
pub const CORPUS_PLACEHOLDER: &str = "{corpus}";

/// One benchmark executable and the files it produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSpec {
    pub name: String,
    /// Executable, relative to the working directory or found on PATH
    pub executable: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    /// Result files written by the executable, in panel order
    pub results: Vec<PathBuf>,
    /// Figure the results are plotted into
    pub figure: PathBuf,
}

impl BenchmarkSpec {
    /// Whether any argument refers to the corpus
    #[must_use]
    pub fn needs_corpus(&self) -> bool {
        self.args.iter().any(|a| a.contains(CORPUS_PLACEHOLDER))
    }

    /// Arguments with the corpus placeholder substituted
    #[must_use]
    pub fn expand_args(&self, corpus: &Path) -> Vec<String> {
        let corpus = corpus.to_string_lossy();
        self.args
            .iter()
            .map(|a| a.replace(CORPUS_PLACEHOLDER, &corpus))
            .collect()
    }

    fn validate(&self) -> PipelineResult<()> {
        let invalid = |reason: &str| PipelineError::InvalidBenchmark {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.executable.as_os_str().is_empty() {
            return Err(invalid("executable is empty"));
        }
        if self.results.is_empty() {
            return Err(invalid("no result files listed"));
        }
        Ok(())
    }
}

/// How the benchmark executable fared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    Failed(String),
    /// Not run because a prerequisite was missing
    Skipped(String),
}

/// Per-benchmark outcome
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub name: String,
    pub status: RunStatus,
    /// Result files that did not exist and were left out of the figure
    pub missing_results: Vec<PathBuf>,
    pub figure: Option<FigureSummary>,
    /// Why no figure was written, if none was
    pub plot_error: Option<String>,
}

/// Outcome of a whole suite run
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// `None` when no benchmark needed the corpus
    pub corpus: Option<Result<CorpusOutcome, String>>,
    pub benchmarks: Vec<BenchmarkReport>,
}

impl PipelineReport {
    /// Whether every benchmark ran and every panel was drawn
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.benchmarks.iter().all(|b| {
            b.status == RunStatus::Succeeded
                && b.missing_results.is_empty()
                && b.figure.as_ref().is_some_and(|f| f.failed().next().is_none())
        })
    }

    #[must_use]
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str("Benchmark Suite Report\n");
        s.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

        match &self.corpus {
            Some(Ok(CorpusOutcome::Reused)) => s.push_str("Corpus: reused\n"),
            Some(Ok(CorpusOutcome::Generated { tokens })) => {
                let _ = writeln!(s, "Corpus: generated {tokens} tokens");
            }
            Some(Err(err)) => {
                let _ = writeln!(s, "Corpus: unavailable ({err})");
            }
            None => {}
        }

        for bench in &self.benchmarks {
            let _ = writeln!(s, "\n{}:", bench.name);
            match &bench.status {
                RunStatus::Succeeded => s.push_str("  Run: ok\n"),
                RunStatus::Failed(reason) => {
                    let _ = writeln!(s, "  Run: failed ({reason})");
                }
                RunStatus::Skipped(reason) => {
                    let _ = writeln!(s, "  Run: skipped ({reason})");
                }
            }
            for missing in &bench.missing_results {
                let _ = writeln!(s, "  Missing: {}", missing.display());
            }
            if let Some(figure) = &bench.figure {
                let _ = writeln!(
                    s,
                    "  Figure: {} ({}x{} grid, {} panels)",
                    figure.output.display(),
                    figure.layout.rows(),
                    figure.layout.cols(),
                    figure.panels.len()
                );
                for panel in figure.failed() {
                    let _ = writeln!(
                        s,
                        "    Empty panel {}: {}",
                        panel.cell,
                        panel.error.as_deref().unwrap_or_default()
                    );
                }
            }
            if let Some(err) = &bench.plot_error {
                let _ = writeln!(s, "  Figure: not written ({err})");
            }
        }

        s
    }
}

/// Runs a benchmark suite from one working directory
#[derive(Debug, Clone)]
pub struct Pipeline {
    workdir: PathBuf,
    corpus: CorpusConfig,
    benchmarks: Vec<BenchmarkSpec>,
    invoker: BenchmarkInvoker,
    plotter: Plotter,
}

impl Pipeline {
    /// Create a pipeline; corpus, result and figure paths are relative to `workdir`
    pub fn new(
        workdir: impl Into<PathBuf>,
        corpus: CorpusConfig,
        benchmarks: Vec<BenchmarkSpec>,
        plotter: Plotter,
    ) -> PipelineResult<Self> {
        let workdir = workdir.into();
        if !workdir.is_dir() {
            return Err(PipelineError::MissingWorkdir(workdir));
        }
        for bench in &benchmarks {
            bench.validate()?;
        }

        Ok(Self {
            invoker: BenchmarkInvoker::in_dir(&workdir),
            workdir,
            corpus,
            benchmarks,
            plotter,
        })
    }

    #[must_use]
    pub fn benchmarks(&self) -> &[BenchmarkSpec] {
        &self.benchmarks
    }

    /// Run every benchmark and plot its results
    #[must_use]
    pub fn run(&self) -> PipelineReport {
        let mut report = PipelineReport::default();

        if self.benchmarks.iter().any(BenchmarkSpec::needs_corpus) {
            report.corpus = Some(self.prepare_corpus());
        }
        let corpus_ready = !matches!(report.corpus, Some(Err(_)));

        for bench in &self.benchmarks {
            let status = if bench.needs_corpus() && !corpus_ready {
                RunStatus::Skipped("corpus unavailable".to_string())
            } else {
                self.run_benchmark(bench)
            };
            report.benchmarks.push(self.plot_benchmark(bench, status));
        }

        report
    }

    fn prepare_corpus(&self) -> Result<CorpusOutcome, String> {
        let mut config = self.corpus.clone();
        config.path = self.resolve(&config.path);
        corpus::ensure_corpus(&config).map_err(|err| {
            warn!(error = %err, "Corpus unavailable, skipping benchmarks that need it");
            err.to_string()
        })
    }

    fn run_benchmark(&self, bench: &BenchmarkSpec) -> RunStatus {
        let args = bench.expand_args(&self.corpus.path);
        match self.invoker.run(&bench.executable, &args) {
            Ok(_) => RunStatus::Succeeded,
            Err(err) => {
                warn!(benchmark = %bench.name, error = %err, "Benchmark failed, continuing");
                RunStatus::Failed(err.to_string())
            }
        }
    }

    fn plot_benchmark(&self, bench: &BenchmarkSpec, status: RunStatus) -> BenchmarkReport {
        let (present, missing): (Vec<PathBuf>, Vec<PathBuf>) = bench
            .results
            .iter()
            .map(|p| self.resolve(p))
            .partition(|p| p.exists());

        for path in &missing {
            warn!(benchmark = %bench.name, path = %path.display(), "Result file missing");
        }

        let mut report = BenchmarkReport {
            name: bench.name.clone(),
            status,
            missing_results: missing,
            figure: None,
            plot_error: None,
        };

        if present.is_empty() {
            report.plot_error = Some("no result files".to_string());
            return report;
        }

        let figure = self.resolve(&bench.figure);
        info!(benchmark = %bench.name, figure = %figure.display(), "Plotting results");
        match self.plotter.plot(&present, &figure) {
            Ok(summary) => report.figure = Some(summary),
            Err(err) => {
                warn!(benchmark = %bench.name, error = %err, "Could not write figure");
                report.plot_error = Some(err.to_string());
            }
        }
        report
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bench_spec(args: &[&str]) -> BenchmarkSpec {
        BenchmarkSpec {
            name: "dict".to_string(),
            executable: PathBuf::from("benchmark/dict_bench"),
            args: args.iter().map(ToString::to_string).collect(),
            results: vec![PathBuf::from("dict_insert.txt")],
            figure: PathBuf::from("dict_bench.svg"),
        }
    }

    #[test]
    fn corpus_placeholder_is_expanded() {
        let bench = bench_spec(&["--input", "{corpus}"]);
        assert!(bench.needs_corpus());
        assert_eq!(
            bench.expand_args(Path::new("corpus.txt")),
            vec!["--input", "corpus.txt"]
        );
    }

    #[test]
    fn size_range_benchmarks_do_not_need_corpus() {
        assert!(!bench_spec(&["40000", "640000"]).needs_corpus());
    }

    #[test]
    fn benchmarks_without_results_are_rejected() {
        let mut bench = bench_spec(&[]);
        bench.results.clear();
        assert!(matches!(
            bench.validate(),
            Err(PipelineError::InvalidBenchmark { .. })
        ));
    }

    #[test]
    fn missing_workdir_is_rejected() {
        let err = Pipeline::new(
            "/definitely/not/a/workdir",
            CorpusConfig::default(),
            Vec::new(),
            Plotter::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::MissingWorkdir(_)));
    }
}
