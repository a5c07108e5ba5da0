//! dsbench CLI library functions for testing

pub mod cli;
pub mod config;
