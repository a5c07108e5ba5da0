#![allow(missing_docs)]
#![cfg(unix)]
use dsbench_core::corpus::{CorpusConfig, CorpusOutcome, StrategyWeights};
use dsbench_core::pipeline::{BenchmarkSpec, Pipeline, RunStatus};
use dsbench_core::plot::Plotter;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
    PathBuf::from(format!("./{name}"))
}

fn corpus_config(word_list: PathBuf) -> CorpusConfig {
    CorpusConfig {
        path: PathBuf::from("corpus.txt"),
        count: 64,
        word_list,
        seed: Some(3),
        weights: StrategyWeights::default(),
    }
}

#[test]
fn suite_runs_benchmarks_and_plots_results() {
    let dir = tempfile::tempdir().expect("temp dir");
    let words = dir.path().join("words");
    fs::write(&words, "red\ngreen\nblue\n").expect("write words");

    let tree = write_script(
        dir.path(),
        "tree_bench",
        "for op in insert search; do printf '# n\\tZixTree\\n%s\\t0.5\\n%s\\t1.0\\n' \"$1\" \"$2\" > tree_$op.txt; done",
    );
    let dict = write_script(
        dir.path(),
        "dict_bench",
        "test -s \"$1\" || exit 4\nprintf '# n\\tZixHash\\n1\\t0.1\\n' > dict_insert.txt",
    );

    let benchmarks = vec![
        BenchmarkSpec {
            name: "tree".into(),
            executable: tree,
            args: vec!["100".into(), "200".into()],
            results: vec!["tree_insert.txt".into(), "tree_search.txt".into()],
            figure: "tree_bench.svg".into(),
        },
        BenchmarkSpec {
            name: "dict".into(),
            executable: dict,
            args: vec!["{corpus}".into()],
            results: vec!["dict_insert.txt".into(), "dict_search.txt".into()],
            figure: "dict_bench.svg".into(),
        },
    ];

    let pipeline = Pipeline::new(
        dir.path(),
        corpus_config(words),
        benchmarks,
        Plotter::default(),
    )
    .expect("pipeline");
    let report = pipeline.run();

    assert_eq!(
        report.corpus,
        Some(Ok(CorpusOutcome::Generated { tokens: 64 }))
    );
    assert!(dir.path().join("corpus.txt").exists());

    let tree = &report.benchmarks[0];
    assert_eq!(tree.status, RunStatus::Succeeded);
    assert!(tree.missing_results.is_empty());
    assert!(dir.path().join("tree_bench.svg").exists());

    let dict = &report.benchmarks[1];
    assert_eq!(dict.status, RunStatus::Succeeded);
    assert_eq!(dict.missing_results, vec![dir.path().join("dict_search.txt")]);
    assert_eq!(dict.figure.as_ref().map(|f| f.panels.len()), Some(1));

    assert!(!report.all_succeeded());
    assert!(report.summary().contains("Missing:"));
}

#[test]
fn failing_benchmark_still_plots_existing_results() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("old_insert.txt"), "# n a\n1 2\n").expect("stale result");
    let crash = write_script(dir.path(), "crash_bench", "exit 7");

    let pipeline = Pipeline::new(
        dir.path(),
        CorpusConfig::default(),
        vec![BenchmarkSpec {
            name: "crash".into(),
            executable: crash,
            args: Vec::new(),
            results: vec!["old_insert.txt".into()],
            figure: "crash.svg".into(),
        }],
        Plotter::default(),
    )
    .expect("pipeline");
    let report = pipeline.run();

    assert!(report.corpus.is_none());
    let bench = &report.benchmarks[0];
    assert!(matches!(bench.status, RunStatus::Failed(ref reason) if reason.contains("exit code 7")));
    assert!(bench.figure.is_some());
    assert!(dir.path().join("crash.svg").exists());
}

#[test]
fn missing_word_list_skips_only_corpus_benchmarks() {
    let dir = tempfile::tempdir().expect("temp dir");
    let ok = write_script(
        dir.path(),
        "ok_bench",
        "printf '# n\\tt\\n1\\t1\\n' > ok.txt",
    );

    let benchmarks = vec![
        BenchmarkSpec {
            name: "needs-corpus".into(),
            executable: PathBuf::from("./never_run"),
            args: vec!["{corpus}".into()],
            results: vec!["dict.txt".into()],
            figure: "dict.svg".into(),
        },
        BenchmarkSpec {
            name: "standalone".into(),
            executable: ok,
            args: Vec::new(),
            results: vec!["ok.txt".into()],
            figure: "ok.svg".into(),
        },
    ];

    let pipeline = Pipeline::new(
        dir.path(),
        corpus_config(dir.path().join("no-words")),
        benchmarks,
        Plotter::default(),
    )
    .expect("pipeline");
    let report = pipeline.run();

    assert!(matches!(report.corpus, Some(Err(_))));
    assert!(matches!(report.benchmarks[0].status, RunStatus::Skipped(_)));
    assert!(report.benchmarks[0].figure.is_none());
    assert_eq!(report.benchmarks[1].status, RunStatus::Succeeded);
    assert!(dir.path().join("ok.svg").exists());
    assert!(!dir.path().join("corpus.txt").exists());
}
