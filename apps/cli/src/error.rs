//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in MASA POS                               │
//! │                                                                         │
//! │  Command (list / create / menu)                                        │
//! │       │                                                                 │
//! │       ├── CoreError   (bad phone type, option, quantity) ──┐           │
//! │       ├── DbError     (file, SQL, decode)                 ─┤           │
//! │       ├── Rejected    (company already invoiced)          ─┼─► CliError │
//! │       ├── dialoguer   (terminal went away)                ─┤           │
//! │       └── serde_json  (--json output)                     ─┘           │
//! │                                                                         │
//! │  main() prints "✗ <message>" and exits with exit_code().               │
//! │  The interactive menu prints action errors and keeps looping.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use masa_core::{CoreError, ValidationError};
use masa_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    /// The database refused the invoice (duplicate company).
    #[error("Error inserting {0}")]
    Rejected(ValidationError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Could not write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code.
    ///
    /// - 2: the operator's input was refused
    /// - 3: the database failed
    /// - 1: anything else
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Core(_) | CliError::Rejected(_) => 2,
            CliError::Db(_) => 3,
            CliError::Prompt(_) | CliError::Json(_) => 1,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_exit_codes() {
        let err = CliError::Rejected(ValidationError::Duplicate {
            field: "company_name".to_string(),
            value: "Acme Ltd".to_string(),
        });
        assert_eq!(err.to_string(), "Error inserting company_name 'Acme Ltd' already exists");
        assert_eq!(err.exit_code(), 2);

        let err: CliError = CoreError::InvalidProductType("Premium".to_string()).into();
        assert_eq!(err.to_string(), "Invalid phone type selected: Premium");
        assert_eq!(err.exit_code(), 2);

        let err: CliError = DbError::NotConnected.into();
        assert_eq!(err.exit_code(), 3);
    }
}
