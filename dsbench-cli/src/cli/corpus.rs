//! `dsbench corpus`

use anyhow::{Context, Result};
use dsbench_core::corpus::{self, CorpusConfig, CorpusOutcome};

/// Generate the corpus described by `config`, or keep the existing file
pub fn generate_corpus(config: &CorpusConfig) -> Result<CorpusOutcome> {
    let outcome = corpus::ensure_corpus(config)
        .with_context(|| format!("failed to prepare corpus {}", config.path.display()))?;

    match outcome {
        CorpusOutcome::Reused => println!("Using existing corpus {}", config.path.display()),
        CorpusOutcome::Generated { tokens } => {
            println!("Generated {tokens} tokens into {}", config.path.display());
        }
    }
    Ok(outcome)
}
