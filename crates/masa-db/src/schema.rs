//! # Schema Identifiers and Values
//!
//! Typed table/column names and the values bound to statements.
//!
//! ## Identifiers vs. Values
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INSERT INTO invoices (company_name, quantity) VALUES (?, ?)            │
//! │              ────────  ────────────  ────────          ─  ─             │
//! │                 │           │            │             │  │             │
//! │          Table::NAME   Column::name()  (same)       Value (bound)       │
//! │                                                                         │
//! │  Identifiers cannot be bound by SQLite, so they are interpolated.      │
//! │  They only ever come from `&'static str` compiled into this binary:    │
//! │  a table is a type, a column is an enum variant.                       │
//! │  Everything else is a Value and travels as a bound parameter.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// A column of some table, named by a compile-time string.
pub trait Column: Copy + fmt::Debug + Send + Sync + 'static {
    fn name(&self) -> &'static str;
}

/// A table the data access layer can build statements for.
///
/// ## Example
/// ```rust
/// use masa_db::{Column, Table};
///
/// #[derive(Debug, Clone, Copy)]
/// enum NoteColumn { Id, Body }
///
/// impl Column for NoteColumn {
///     fn name(&self) -> &'static str {
///         match self {
///             NoteColumn::Id => "id",
///             NoteColumn::Body => "body",
///         }
///     }
/// }
///
/// struct Notes;
///
/// impl Table for Notes {
///     const NAME: &'static str = "notes";
///     type Column = NoteColumn;
/// }
/// ```
pub trait Table {
    const NAME: &'static str;
    type Column: Column;
}

// =============================================================================
// Values
// =============================================================================

/// A single SQLite value, either bound as a parameter or read from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// One result row, values in column order.
pub type Row = Vec<Value>;

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Reals, and integers widened to f64 (SQLite may hand either back for
    /// a REAL column).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// SQLite storage class name, for logs and decode errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Blob(_) => "BLOB",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "'{v}'"),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

// =============================================================================
// Statement Builders
// =============================================================================

/// `a, b, c`
pub(crate) fn column_list<C: Column>(columns: &[(C, Value)]) -> String {
    columns
        .iter()
        .map(|(column, _)| column.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `?, ?, ?`
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// `a = ?<sep>b = ?`
pub(crate) fn assignments<C: Column>(columns: &[(C, Value)], separator: &str) -> String {
    columns
        .iter()
        .map(|(column, _)| format!("{} = ?", column.name()))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Values in binding order.
pub(crate) fn values<C: Column>(columns: &[(C, Value)]) -> impl Iterator<Item = Value> + '_ {
    columns.iter().map(|(_, value)| value.clone())
}

// =============================================================================
// Unit Tests
// =============================================================================
