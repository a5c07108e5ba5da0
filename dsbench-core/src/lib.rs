//! dsbench core: corpora, benchmark runs, result ingestion and plotting
//!
//! The pipeline is strictly sequential:
//!
//! 1. [`corpus`] writes a synthetic token corpus (reused if already present)
//! 2. [`invoke`] runs an external benchmark executable that writes one result
//!    file per measured operation
//! 3. [`results`] parses those files into column tables
//! 4. [`plot`] lays the tables out as one panel each, with tick labels scaled
//!    by [`axis`]
//!
//! [`pipeline`] strings the stages together for a configured suite.

pub mod axis;
pub mod corpus;
pub mod error;
pub mod invoke;
pub mod pipeline;
pub mod plot;
pub mod results;

pub use axis::{AxisScale, AxisScaler};
pub use corpus::{CorpusConfig, CorpusGenerator, CorpusOutcome, StrategyWeights, TokenStrategy};
pub use error::{CorpusError, InvokeError, PipelineError, PlotError, ResultFileError};
pub use invoke::{BenchmarkInvoker, ExitOutcome};
pub use pipeline::{BenchmarkSpec, Pipeline, PipelineReport, RunStatus};
pub use plot::{FigureSummary, GridLayout, Plotter, RenderConfig};
pub use results::{ColumnTable, ResultTable};
