//! # Repository Module
//!
//! Domain-level persistence built on the generic [`Database`](crate::Database).
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  repo.save_invoice(&new_invoice)                               │
//! │       ▼                                                                 │
//! │  InvoiceRepository                                                     │
//! │  ├── bootstrap_schema(&self)                                           │
//! │  ├── save_invoice(&self, invoice)                                      │
//! │  ├── list_invoices(&self)                                              │
//! │  └── find_by_company(&self, name)                                      │
//! │       │                                                                 │
//! │       │  Database::scoped(..) ─► insert / search                        │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  The repository knows invoices; the Database knows nothing but tables, │
//! │  columns and values.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`InvoiceRepository`](invoice::InvoiceRepository) - Invoice schema, save and listing

pub mod invoice;
