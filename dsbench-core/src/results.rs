//! Result file parsing
//!
//! Benchmarks write one table per measured operation:
//!
//! ```text
//! # n	GHashTable	ZixHash
//! # comment lines start with the marker as well
//! 40000	0.004501	0.002630
//! 80000	0.009871	0.005512
//! ```
//!
//! The first column is the swept independent variable; every other column is
//! one series.

use crate::error::{ResultFileError, ResultFileResult};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Marker that starts the header and comment lines
pub const MARKER: char = '#';

/// Parsed columns of a result file, one buffer per column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTable {
    columns: Vec<Vec<f64>>,
}

impl ColumnTable {
    /// Create an empty table with `width` independent columns
    #[must_use]
    pub fn with_width(width: usize) -> Self {
        Self {
            columns: (0..width).map(|_| Vec::new()).collect(),
        }
    }

    /// Build a table from owned columns
    ///
    /// Returns `None` when the columns have different lengths.
    #[must_use]
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Option<Self> {
        let rows = columns.first().map_or(0, Vec::len);
        columns
            .iter()
            .all(|c| c.len() == rows)
            .then_some(Self { columns })
    }

    /// Number of columns, including the independent one
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Values of the independent variable
    #[must_use]
    pub fn x(&self) -> &[f64] {
        self.column(0).unwrap_or(&[])
    }

    /// `(column index, (x, y) points)` for every series column
    pub fn series(&self) -> impl Iterator<Item = (usize, Vec<(f64, f64)>)> + '_ {
        let x = self.x();
        self.columns.iter().enumerate().skip(1).map(move |(i, ys)| {
            let points = x.iter().copied().zip(ys.iter().copied()).collect();
            (i, points)
        })
    }

    fn push_row(&mut self, values: Vec<f64>) {
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.push(value);
        }
    }
}

/// A fully parsed result file
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub names: Vec<String>,
    pub table: ColumnTable,
}

impl ResultTable {
    /// Read and parse the file at `path`
    pub fn read(path: &Path) -> ResultFileResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ResultFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    /// Parse result-file text; `path` is only used in error reports
    pub fn parse(path: &Path, contents: &str) -> ResultFileResult<Self> {
        let mut lines = contents.lines().enumerate();

        let Some((_, header)) = lines.next() else {
            return Err(malformed_file(path, "file is empty"));
        };
        let Some(header) = header.strip_prefix(MARKER) else {
            return Err(malformed_file(
                path,
                format!("header must start with '{MARKER}'"),
            ));
        };

        let names: Vec<String> = header.split_whitespace().map(str::to_string).collect();
        if names.is_empty() {
            return Err(malformed_file(path, "header names no columns"));
        }

        let mut table = ColumnTable::with_width(names.len());
        for (index, line) in lines {
            if line.starts_with(MARKER) || line.trim().is_empty() {
                continue;
            }

            let row = parse_row(line, names.len()).map_err(|reason| {
                ResultFileError::MalformedRow {
                    path: path.to_path_buf(),
                    line: index + 1,
                    reason,
                }
            })?;
            table.push_row(row);
        }

        Ok(Self { names, table })
    }

    /// Label of column `index`
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Serialize in the format [`ResultTable::parse`] accepts
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{self}")?;
        out.flush()
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{MARKER} {}", self.names.join("\t"))?;
        for row in 0..self.table.rows() {
            for (i, column) in self.table.columns.iter().enumerate() {
                if i > 0 {
                    f.write_str("\t")?;
                }
                write!(f, "{}", column[row])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn parse_row(line: &str, width: usize) -> Result<Vec<f64>, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != width {
        return Err(format!(
            "expected {width} fields, found {}",
            fields.len()
        ));
    }

    fields
        .into_iter()
        .map(|field| {
            field
                .parse::<f64>()
                .map_err(|_| format!("'{field}' is not a number"))
        })
        .collect()
}

fn malformed_file(path: &Path, reason: impl Into<String>) -> ResultFileError {
    ResultFileError::MalformedFile {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}
