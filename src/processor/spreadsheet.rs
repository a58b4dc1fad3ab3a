//! Spreadsheet loading and descriptive summary
//!
//! The first worksheet is loaded into a [`Table`]: the first row names the columns and every
//! following row is data. A column is numeric when it holds at least one number and nothing
//! but numbers and blanks; only numeric columns appear in the statistics grid.

use crate::error::{DecodeError, Result};
use crate::stats::Describe;
use crate::utils::{format_float, quote_str};
use calamine::{Data, Reader, open_workbook_auto};
use std::fmt;
use std::path::Path;

/// A typed cell value
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// Integer or floating point value
    Number(f64),
    /// String value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Dates, durations and error cells, kept in display form
    Other(String),
    /// Blank cell
    Empty,
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Bool(*b),
            Data::Empty => Cell::Empty,
            other => Cell::Other(other.to_string()),
        }
    }
}

/// Column label taken from the header cell
///
/// Numbers and booleans keep their type, so they are listed unquoted.
#[derive(Clone, Debug, PartialEq)]
pub enum Label {
    /// Header text, or `Unnamed: <index>` for a blank header cell
    Name(String),
    /// Numeric header; integral values display without a fraction
    Number(f64),
    /// Boolean header
    Bool(bool),
}

impl Label {
    /// Label as it appears in the column list: names quoted, other labels bare
    pub fn repr(&self) -> String {
        match self {
            Label::Name(name) => quote_str(name),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Name(name) => f.write_str(name),
            Label::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Label::Number(n) => f.write_str(&format_float(*n)),
            Label::Bool(true) => f.write_str("True"),
            Label::Bool(false) => f.write_str("False"),
        }
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::Name(name.to_string())
    }
}

/// A labelled column of cells
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Label from the header row
    pub name: Label,
    /// Cells below the header, one per data row
    pub cells: Vec<Cell>,
}

impl Column {
    /// Numeric values if this column is numeric
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        let mut values = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            match cell {
                Cell::Number(v) => values.push(*v),
                Cell::Empty => values.push(f64::NAN),
                _ => return None,
            }
        }
        values.iter().any(|v| !v.is_nan()).then_some(values)
    }
}

/// A rectangular table with typed columns
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Columns in sheet order
    pub columns: Vec<Column>,
    /// Number of data rows (header excluded)
    pub rows: usize,
}

impl Table {
    /// Build a table from raw rows; the first row is the header
    pub fn from_rows(mut rows: impl Iterator<Item = Vec<Cell>>) -> Self {
        let Some(header) = rows.next() else {
            return Table::default();
        };
        let data: Vec<Vec<Cell>> = rows.collect();
        let width = data
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);

        let columns = (0..width)
            .map(|i| Column {
                name: header_label(header.get(i), i),
                cells: data
                    .iter()
                    .map(|row| row.get(i).cloned().unwrap_or(Cell::Empty))
                    .collect(),
            })
            .collect();

        Table {
            columns,
            rows: data.len(),
        }
    }

    /// Column labels in order, as displayed
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.to_string()).collect()
    }

    /// Column list such as `['breed', 2020]`
    pub fn columns_repr(&self) -> String {
        let labels: Vec<String> = self.columns.iter().map(|c| c.name.repr()).collect();
        format!("[{}]", labels.join(", "))
    }

    /// Statistics for every numeric column
    pub fn describe(&self) -> Vec<(String, Describe)> {
        self.columns
            .iter()
            .filter_map(|c| {
                let values = c.numeric_values()?;
                Some((c.name.to_string(), Describe::of(&values)?))
            })
            .collect()
    }
}

fn header_label(cell: Option<&Cell>, index: usize) -> Label {
    match cell {
        Some(Cell::Text(s) | Cell::Other(s)) if !s.is_empty() => Label::Name(s.clone()),
        Some(Cell::Number(n)) => Label::Number(*n),
        Some(Cell::Bool(b)) => Label::Bool(*b),
        _ => Label::Name(format!("Unnamed: {index}")),
    }
}

/// Load the first worksheet of the workbook at `path`
///
/// The workbook type is picked from the file extension (xls, xlsx, xlsb, ods). Any failure
/// to open or parse the file is a decode error.
pub fn load_table(path: &Path) -> Result<Table> {
    let spreadsheet_error = |reason: String| DecodeError::Spreadsheet {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| spreadsheet_error("workbook has no worksheets".to_string()))?
        .map_err(|e| spreadsheet_error(e.to_string()))?;

    Ok(Table::from_rows(
        range
            .rows()
            .map(|row| row.iter().map(Cell::from).collect::<Vec<_>>()),
    ))
}

/// Render the describe grid: one column per numeric column, one row per statistic
pub fn render_describe(stats: &[(String, Describe)]) -> String {
    if stats.is_empty() {
        return "No numeric columns".to_string();
    }

    const LABEL_WIDTH: usize = 5;
    let cells: Vec<Vec<String>> = stats
        .iter()
        .map(|(_, d)| d.rows().iter().map(|(_, v)| format_stat(*v)).collect())
        .collect();
    let widths: Vec<usize> = stats
        .iter()
        .zip(&cells)
        .map(|((name, _), values)| {
            values
                .iter()
                .map(|v| v.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(9);

    let mut header = " ".repeat(LABEL_WIDTH);
    for ((name, _), &width) in stats.iter().zip(&widths) {
        header.push_str(&format!("  {name:>width$}"));
    }
    lines.push(header);

    let labels = stats[0].1.rows().map(|(label, _)| label);
    for (row, label) in labels.iter().enumerate() {
        let mut line = format!("{label:<LABEL_WIDTH$}");
        for (values, &width) in cells.iter().zip(&widths) {
            line.push_str(&format!("  {:>width$}", values[row]));
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.6}")
    }
}

/// Row count, column list and describe grid for a loaded table
pub fn summarize_table(table: &Table) -> String {
    format!(
        "Number of rows: {}\nColumns: {}\n{}",
        table.rows,
        table.columns_repr(),
        render_describe(&table.describe())
    )
}

/// Load the workbook at `path` and summarize it
pub fn summarize(path: &Path) -> Result<String> {
    Ok(summarize_table(&load_table(path)?))
}
