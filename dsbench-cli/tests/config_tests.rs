#![allow(missing_docs)]
use dsbench_cli::config::{ConfigManager, DsbenchConfig, merged_with_defaults};
use std::fs;

#[test]
fn default_suite_matches_benchmark_script() {
    let config = DsbenchConfig::default();
    let names: Vec<&str> = config.benchmarks.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["tree", "dict"]);

    assert_eq!(config.benchmarks[0].args, vec!["40000", "640000"]);
    assert_eq!(config.benchmarks[0].results.len(), 4);
    assert!(!config.benchmarks[0].needs_corpus());
    assert!(config.benchmarks[1].needs_corpus());
}

#[test]
fn user_values_override_single_fields() {
    let config = merged_with_defaults("[render]\nmath_text = false\n\n[corpus]\ncount = 128\n")
        .expect("merge config");

    assert!(!config.render.math_text);
    assert_eq!(config.render.font_family, "serif");
    assert_eq!(config.corpus.count, 128);
    assert_eq!(config.corpus.word_list.to_str(), Some("/usr/share/dict/words"));
    assert_eq!(config.benchmarks.len(), 2);
}

#[test]
fn user_benchmarks_replace_default_suite() {
    let config = merged_with_defaults(
        "[[benchmarks]]\nname = \"ring\"\nexecutable = \"benchmark/ring_bench\"\nresults = [\"ring.txt\"]\nfigure = \"ring.svg\"\n",
    )
    .expect("merge config");

    assert_eq!(config.benchmarks.len(), 1);
    assert_eq!(config.benchmarks[0].name, "ring");
    assert!(config.benchmarks[0].args.is_empty());
}

#[test]
fn load_with_path_reads_file() {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let path = temp_dir.path().join("dsbench.toml");
    fs::write(&path, "[corpus]\nseed = 7\n").expect("write config");

    let manager = ConfigManager::load_with_path(&path).expect("load config");
    assert_eq!(manager.path(), Some(path.as_path()));
    assert_eq!(manager.config().corpus.seed, Some(7));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let absent = temp_dir.path().join("absent.toml");
    assert!(ConfigManager::load(Some(absent.as_path())).is_err());
}

#[test]
fn invalid_config_is_an_error() {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let path = temp_dir.path().join("dsbench.toml");
    fs::write(&path, "[render]\nfont_size = \"large\"\n").expect("write config");

    assert!(ConfigManager::load_with_path(&path).is_err());
}

#[test]
fn effective_config_round_trips_through_toml() {
    let manager = ConfigManager::load_with_path("/definitely/not/here.toml").expect("defaults");
    let rendered = manager.to_toml().expect("serialize");
    let reparsed = merged_with_defaults(&rendered).expect("reparse");

    assert_eq!(reparsed.render, manager.config().render);
    assert_eq!(reparsed.benchmarks, manager.config().benchmarks);
}
