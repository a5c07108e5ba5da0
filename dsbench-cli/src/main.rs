//! dsbench CLI - corpora, benchmark runs and comparison plots

use anyhow::{Context, Result};
use clap::Parser;
use dsbench_cli::cli::{self, Cli, Commands, ConfigAction};
use dsbench_cli::config::ConfigManager;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level: Level = cli
        .log_level
        .parse()
        .with_context(|| format!("invalid log level '{}'", cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let mut manager = ConfigManager::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Plot { output, results } => {
            cli::plot_results(&manager.config().render, &output, &results)?;
        }
        Commands::Corpus {
            output,
            count,
            word_list,
            seed,
        } => {
            let corpus = &mut manager.config_mut().corpus;
            if let Some(output) = output {
                corpus.path = output;
            }
            if let Some(count) = count {
                corpus.count = count;
            }
            if let Some(word_list) = word_list {
                corpus.word_list = word_list;
            }
            if seed.is_some() {
                corpus.seed = seed;
            }
            cli::generate_corpus(corpus)?;
        }
        Commands::Run { workdir } => {
            cli::run_suite(manager.config(), &workdir)?;
        }
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            if let Some(path) = manager.path() {
                println!("# merged from {}", path.display());
            }
            print!("{}", manager.to_toml()?);
        }
    }

    Ok(())
}
