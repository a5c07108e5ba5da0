#![allow(missing_docs)]
use dsbench_core::error::PlotError;
use dsbench_core::plot::{Plotter, RenderConfig};
use std::fs;
use std::path::{Path, PathBuf};

fn write_result(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write result file");
    path
}

fn tree_results(dir: &Path) -> Vec<PathBuf> {
    ["insert", "search", "iterate", "delete", "rank"]
        .iter()
        .map(|op| {
            write_result(
                dir,
                &format!("tree_{op}.txt"),
                "# n\tZixTree\tGSequence\tZixBTree\n\
                 40000\t0.010\t0.020\t0.008\n\
                 80000\t0.021\t0.043\t0.017\n\
                 160000\t0.045\t0.090\t0.036\n",
            )
        })
        .collect()
}

#[test]
fn five_files_fill_a_three_by_three_grid() {
    let dir = tempfile::tempdir().expect("temp dir");
    let files = tree_results(dir.path());
    let output = dir.path().join("tree_bench.svg");

    let summary = Plotter::default().plot(&files, &output).expect("plot");

    assert_eq!((summary.layout.rows(), summary.layout.cols()), (3, 3));
    let cells: Vec<usize> = summary.panels.iter().map(|p| p.cell).collect();
    assert_eq!(cells, vec![1, 2, 3, 4, 5]);
    let titles: Vec<&str> = summary.panels.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Insert", "Search", "Iterate", "Delete", "Rank"]);
    assert!(summary.panels.iter().all(|p| p.series == 3));

    let svg = fs::read_to_string(&output).expect("read figure");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("ZixBTree"));
    assert!(svg.contains("Iterate"));
}

#[test]
fn unreadable_file_leaves_empty_panel() {
    let dir = tempfile::tempdir().expect("temp dir");
    let good = write_result(dir.path(), "dict_insert.txt", "# n a\n1 0.5\n2 0.9\n");
    let bad = write_result(dir.path(), "dict_search.txt", "# n a b\n1 0.5\n");
    let output = dir.path().join("dict_bench.svg");

    let summary = Plotter::default()
        .plot(&[good, bad], &output)
        .expect("figure is still written");

    let failed: Vec<_> = summary.failed().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].title, "Search");
    assert_eq!(failed[0].cell, 2);

    let svg = fs::read_to_string(&output).expect("read figure");
    assert!(svg.contains("Search"));
}

#[test]
fn existing_output_is_overwritten() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = write_result(dir.path(), "hash.txt", "# n t\n10 1\n20 2\n");
    let output = dir.path().join("hash.svg");
    fs::write(&output, "stale").expect("seed output");

    Plotter::default().plot(&[file], &output).expect("plot");
    assert_ne!(fs::read_to_string(&output).expect("read figure"), "stale");
}

#[test]
fn large_values_are_labelled_with_snapped_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = write_result(
        dir.path(),
        "sweep.txt",
        "# n t\n10000000 0.5\n20000000 1.0\n40000000 2.0\n",
    );
    let output = dir.path().join("sweep.svg");
    let config = RenderConfig {
        math_text: false,
        ..RenderConfig::default()
    };

    Plotter::new(config).plot(&[file], &output).expect("plot");
    let svg = fs::read_to_string(&output).expect("read figure");
    assert!(svg.contains("Elements [1e6]"));
}

#[test]
fn no_inputs_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = Plotter::default().plot::<PathBuf>(&[], &dir.path().join("empty.svg"));
    assert!(matches!(result, Err(PlotError::NoInputs)));
}

#[test]
fn unsupported_extension_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = write_result(dir.path(), "hash.txt", "# n t\n10 1\n");
    let result = Plotter::default().plot(&[file], &dir.path().join("hash.pdf"));
    assert!(matches!(result, Err(PlotError::UnsupportedFormat(_))));
}
