//! Error types for every pipeline stage
//!
//! Each stage has its own error so failures stay scoped to the file or stage
//! that produced them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating a corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The word list backing word-salad tokens is missing or empty
    #[error("word list unavailable at {path}: {reason}")]
    ResourceUnavailable {
        /// Location that was probed
        path: PathBuf,
        /// Why it could not be used
        reason: String,
    },

    /// Every token strategy has zero weight
    #[error("invalid token strategy weights: {0}")]
    InvalidWeights(String),

    /// Failure writing the corpus file
    #[error("failed to write corpus {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while reading a result file
#[derive(Error, Debug)]
pub enum ResultFileError {
    /// The file could not be opened or read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file has no usable header
    #[error("malformed result file {path}: {reason}")]
    MalformedFile { path: PathBuf, reason: String },

    /// A data line does not match the header
    #[error("malformed row at {path}:{line}: {reason}")]
    MalformedRow {
        path: PathBuf,
        /// 1-based line number
        line: usize,
        reason: String,
    },
}

/// Errors raised by the benchmark invoker
#[derive(Error, Debug)]
pub enum InvokeError {
    /// The executable could not be started at all
    #[error("failed to launch {executable}: {source}")]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The executable ran but did not succeed
    #[error("{executable} failed: {outcome}")]
    ExternalProcessFailure {
        executable: PathBuf,
        outcome: crate::invoke::ExitOutcome,
    },
}

/// Errors raised while composing a figure
#[derive(Error, Debug)]
pub enum PlotError {
    /// No result files were given
    #[error("no result files to plot")]
    NoInputs,

    /// The output extension does not map to a drawing backend
    #[error("unsupported output format for {0} (expected .svg)")]
    UnsupportedFormat(PathBuf),

    /// The drawing backend reported an error
    #[error("failed to draw {path}: {reason}")]
    Drawing { path: PathBuf, reason: String },
}

/// Errors raised by the suite pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The working directory does not exist
    #[error("working directory {0} does not exist")]
    MissingWorkdir(PathBuf),

    /// A benchmark entry is unusable
    #[error("invalid benchmark '{name}': {reason}")]
    InvalidBenchmark { name: String, reason: String },
}

/// Result type for corpus generation
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Result type for result-file parsing
pub type ResultFileResult<T> = Result<T, ResultFileError>;

/// Result type for process invocation
pub type InvokeResult<T> = Result<T, InvokeError>;

/// Result type for plotting
pub type PlotResult<T> = Result<T, PlotError>;

/// Result type for the pipeline
pub type PipelineResult<T> = Result<T, PipelineError>;
