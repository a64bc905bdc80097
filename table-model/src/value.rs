//! FILENAME: table-model/src/value.rs
//! PURPOSE: Defines the cell value type flowing through the presentation engine.
//! CONTEXT: Column accessors produce `CellValue`s; comparators order them and
//! renderers turn them into display strings. The enum is deliberately small —
//! the engine never interprets values beyond what sorting, type inference and
//! default rendering require.

use serde::{Deserialize, Serialize};

/// A single cell value as produced by a column's value accessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Returns the numeric content, if any. Non-numeric variants yield `None`;
    /// `Number` yields its payload even when non-finite.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True for `Number` values that are finite.
    pub fn is_finite_number(&self) -> bool {
        matches!(self, CellValue::Number(n) if n.is_finite())
    }

    /// True for `Number` values that are finite and have no fractional part.
    pub fn is_finite_integer(&self) -> bool {
        matches!(self, CellValue::Number(n) if n.is_finite() && n.fract() == 0.0)
    }

    /// Generic stringification, used as the fallback renderer.
    /// Numbers format without unnecessary decimal places.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => {
                if *b { "true" } else { "false" }.to_string()
            }
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}
