use std::fmt;

use crate::error::{AnalysisError, Result};
use crate::optics::model::{AcquisitionMode, SpectralSeries};

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Guess the type of a text field: empty → null, numeric → number.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        match s.parse::<f64>() {
            Ok(v) => CellValue::Number(v),
            Err(_) => CellValue::Text(s.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// DataTable – the complete loaded file
// ---------------------------------------------------------------------------

/// Column-oriented table as read from disk.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    /// Column names in file order.
    pub column_names: Vec<String>,
    /// One vector per column, all of length [`DataTable::len`].
    pub columns: Vec<Vec<CellValue>>,
}

impl DataTable {
    /// Build a table from rows; short rows are padded with nulls.
    pub fn from_rows(column_names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut columns: Vec<Vec<CellValue>> = vec![Vec::with_capacity(rows.len()); column_names.len()];
        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.push(cells.next().unwrap_or(CellValue::Null));
            }
        }
        Self {
            column_names,
            columns,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.column_names
            .iter()
            .position(|c| c == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Names of columns holding no text cells, usable as wavelength or signal.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.column_names
            .iter()
            .zip(&self.columns)
            .filter(|(_, cells)| cells.iter().all(|c| !matches!(c, CellValue::Text(_))))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// A column as numbers. Nulls become NaN; any text cell is a validation error.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let cells = self
            .column(name)
            .ok_or_else(|| AnalysisError::Validation(format!("column '{name}' not found")))?;

        cells
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                CellValue::Number(v) => Ok(*v),
                CellValue::Null => Ok(f64::NAN),
                CellValue::Text(s) => Err(AnalysisError::Validation(format!(
                    "column '{name}', row {row}: '{s}' is not a number"
                ))),
            })
            .collect()
    }

    /// Pick the wavelength and signal columns and form a spectral series.
    pub fn spectral_series(
        &self,
        wavelength_column: &str,
        signal_column: &str,
        mode: AcquisitionMode,
    ) -> Result<SpectralSeries> {
        let wavelength = self.numeric_column(wavelength_column)?;
        let signal = self.numeric_column(signal_column)?;
        SpectralSeries::new(wavelength, signal, mode)
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.len().min(n)).map(move |row| self.columns.iter().map(|c| &c[row]).collect())
    }
}
