//! # masa-db: Database Layer for MASA POS
//!
//! This crate provides database access for the MASA POS counter.
//! It uses a single SQLite connection driven by sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MASA POS Data Flow                               │
//! │                                                                         │
//! │  CLI command (create invoice)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     masa-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Repository   │    │   Database    │    │    Schema    │  │   │
//! │  │   │ (invoice.rs)  │───►│(connection.rs)│◄───│ (schema.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ bootstrap     │    │ open / close  │    │ Table/Column │  │   │
//! │  │   │ save / list   │    │ insert/search │    │ Value        │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                     ./customers.db                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`connection`] - `Database` handle, lifecycle and CRUD statements
//! - [`schema`] - Typed table/column identifiers and bound values
//! - [`error`] - Database error types
//! - [`repository`] - Invoice persistence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use masa_db::{DbConfig, InvoiceRepository, SaveOutcome};
//!
//! let invoices = InvoiceRepository::new(DbConfig::new("customers.db"));
//! invoices.bootstrap_schema().await?;
//!
//! match invoices.save_invoice(&new_invoice).await? {
//!     SaveOutcome::Saved(invoice) => println!("Saved #{}", invoice.id),
//!     SaveOutcome::Rejected(reason) => println!("Error inserting {reason}"),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use connection::{Database, DbConfig, ScopeFuture};
pub use error::{DbError, DbResult};
pub use schema::{Column, Row, Table, Value};

pub use repository::invoice::{InvoiceColumn, InvoiceRepository, Invoices, SaveOutcome};
