//! CLI module organization

pub mod commands;
pub mod corpus;
pub mod plot;
pub mod suite;

pub use commands::{Cli, Commands, ConfigAction};
pub use corpus::generate_corpus;
pub use plot::plot_results;
pub use suite::run_suite;
