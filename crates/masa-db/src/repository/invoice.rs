//! # Invoice Repository
//!
//! Persists invoices through the generic [`Database`] statements.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        save_invoice()                                   │
//! │                                                                         │
//! │  NewInvoice (validated + costed by masa-core)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  invoice_row() ── typed (InvoiceColumn, Value) pairs, money as pounds  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::scoped ─► insert::<Invoices> ─► COMMIT ─► close             │
//! │       │                                                                 │
//! │       ├── Ok(id)              ─► SaveOutcome::Saved(Invoice)            │
//! │       ├── UniqueViolation     ─► SaveOutcome::Rejected(Duplicate)       │
//! │       └── anything else       ─► Err(DbError)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation opens and closes its own connection.

use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::connection::{Database, DbConfig};
use crate::error::{DbError, DbResult};
use crate::schema::{Column, Row, Table, Value};
use masa_core::{Invoice, Money, NewInvoice, PhoneOption, PhoneType, ValidationError};

// =============================================================================
// Table Definition
// =============================================================================

/// Column order matches `SELECT *` on tables created by
/// [`InvoiceRepository::bootstrap_schema`] and by earlier versions of the counter,
/// so existing `customers.db` files keep working.
pub const CREATE_INVOICES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS invoices (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_name TEXT NOT NULL UNIQUE,
    company_num TEXT NOT NULL,
    phone_type TEXT NOT NULL,
    phone_opt INTEGER NOT NULL,
    quantity INTEGER NOT NULL,
    vat REAL NOT NULL,
    total_cost REAL NOT NULL,
    total_cost_vat REAL NOT NULL
)
"#;

/// The `invoices` table.
#[derive(Debug, Clone, Copy)]
pub struct Invoices;

impl Table for Invoices {
    const NAME: &'static str = "invoices";
    type Column = InvoiceColumn;
}

/// Columns of `invoices`, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceColumn {
    Id,
    CompanyName,
    CompanyNum,
    PhoneType,
    PhoneOpt,
    Quantity,
    Vat,
    TotalCost,
    TotalCostVat,
}

impl InvoiceColumn {
    pub const ALL: [InvoiceColumn; 9] = [
        InvoiceColumn::Id,
        InvoiceColumn::CompanyName,
        InvoiceColumn::CompanyNum,
        InvoiceColumn::PhoneType,
        InvoiceColumn::PhoneOpt,
        InvoiceColumn::Quantity,
        InvoiceColumn::Vat,
        InvoiceColumn::TotalCost,
        InvoiceColumn::TotalCostVat,
    ];

    /// Position in a `SELECT *` row.
    const fn index(self) -> usize {
        self as usize
    }
}

impl Column for InvoiceColumn {
    fn name(&self) -> &'static str {
        match self {
            InvoiceColumn::Id => "id",
            InvoiceColumn::CompanyName => "company_name",
            InvoiceColumn::CompanyNum => "company_num",
            InvoiceColumn::PhoneType => "phone_type",
            InvoiceColumn::PhoneOpt => "phone_opt",
            InvoiceColumn::Quantity => "quantity",
            InvoiceColumn::Vat => "vat",
            InvoiceColumn::TotalCost => "total_cost",
            InvoiceColumn::TotalCostVat => "total_cost_vat",
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Result of [`InvoiceRepository::save_invoice`].
///
/// A rejected save is an expected outcome at the counter (the company
/// already has an invoice), so it is not an `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(Invoice),
    Rejected(ValidationError),
}

/// Repository for invoice persistence.
///
/// ## Usage
/// ```rust,ignore
/// let repo = InvoiceRepository::new(DbConfig::new("customers.db"));
/// repo.bootstrap_schema().await?;
///
/// for invoice in repo.list_invoices().await? {
///     println!("{} {}", invoice.id, invoice.details.company_name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    config: DbConfig,
}

impl InvoiceRepository {
    pub fn new(config: DbConfig) -> Self {
        InvoiceRepository { config }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Creates the `invoices` table if it does not exist.
    pub async fn bootstrap_schema(&self) -> DbResult<()> {
        Database::scoped(self.config.clone(), |db| {
            Box::pin(async move {
                db.execute(CREATE_INVOICES_TABLE, &[]).await?;
                Ok(())
            })
        })
        .await?;

        debug!("Invoice schema ready");
        Ok(())
    }

    /// Stores a new invoice and commits it.
    pub async fn save_invoice(&self, invoice: &NewInvoice) -> DbResult<SaveOutcome> {
        let row = invoice_row(invoice);

        let inserted = Database::scoped(self.config.clone(), move |db| {
            Box::pin(async move { db.insert::<Invoices>(&row).await })
        })
        .await;

        match inserted {
            Ok(id) => {
                info!(id, company = %invoice.company_name, "Invoice saved");
                Ok(SaveOutcome::Saved(Invoice {
                    id,
                    details: invoice.clone(),
                }))
            }
            Err(DbError::UniqueViolation { field, .. }) => {
                let field = field
                    .rsplit('.')
                    .next()
                    .unwrap_or(field.as_str())
                    .to_string();
                let value = match field.as_str() {
                    "company_num" => invoice.company_num.clone(),
                    _ => invoice.company_name.clone(),
                };

                warn!(field = %field, value = %value, "Invoice rejected: duplicate");
                Ok(SaveOutcome::Rejected(ValidationError::Duplicate { field, value }))
            }
            Err(e) => Err(e),
        }
    }

    /// Every stored invoice, in id order.
    pub async fn list_invoices(&self) -> DbResult<Vec<Invoice>> {
        let rows = Database::scoped(self.config.clone(), |db| {
            Box::pin(async move { db.search::<Invoices>(&[]).await })
        })
        .await?;

        let mut invoices = rows.iter().map(decode_invoice).collect::<DbResult<Vec<_>>>()?;
        invoices.sort_by_key(|invoice| invoice.id);

        debug!(count = invoices.len(), "Listed invoices");
        Ok(invoices)
    }

    /// The invoice for a company, matched exactly after trimming.
    pub async fn find_by_company(&self, company_name: &str) -> DbResult<Option<Invoice>> {
        let filter = [(InvoiceColumn::CompanyName, Value::from(company_name.trim()))];

        let rows = Database::scoped(self.config.clone(), move |db| {
            Box::pin(async move { db.search::<Invoices>(&filter).await })
        })
        .await?;

        rows.first().map(decode_invoice).transpose()
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

fn invoice_row(invoice: &NewInvoice) -> Vec<(InvoiceColumn, Value)> {
    vec![
        (InvoiceColumn::CompanyName, invoice.company_name.as_str().into()),
        (InvoiceColumn::CompanyNum, invoice.company_num.as_str().into()),
        (InvoiceColumn::PhoneType, invoice.phone_type.as_str().into()),
        (InvoiceColumn::PhoneOpt, invoice.phone_opt.code().into()),
        (InvoiceColumn::Quantity, invoice.quantity.into()),
        (InvoiceColumn::Vat, invoice.vat.to_pounds_f64().into()),
        (InvoiceColumn::TotalCost, invoice.total_cost.to_pounds_f64().into()),
        (InvoiceColumn::TotalCostVat, invoice.total_cost_vat.to_pounds_f64().into()),
    ]
}

fn decode_invoice(row: &Row) -> DbResult<Invoice> {
    if row.len() < InvoiceColumn::ALL.len() {
        return Err(DbError::decode(
            Invoices::NAME,
            format!(
                "expected {} columns, found {}",
                InvoiceColumn::ALL.len(),
                row.len()
            ),
        ));
    }

    let phone_type = PhoneType::from_str(text(row, InvoiceColumn::PhoneType)?)
        .map_err(|e| DbError::decode(InvoiceColumn::PhoneType.name(), e.to_string()))?;

    let phone_opt = u8::try_from(integer(row, InvoiceColumn::PhoneOpt)?)
        .ok()
        .map(PhoneOption::from_code)
        .transpose()
        .map_err(|e| DbError::decode(InvoiceColumn::PhoneOpt.name(), e.to_string()))?
        .ok_or_else(|| DbError::decode(InvoiceColumn::PhoneOpt.name(), "out of range"))?;

    let quantity = u32::try_from(integer(row, InvoiceColumn::Quantity)?)
        .map_err(|e| DbError::decode(InvoiceColumn::Quantity.name(), e.to_string()))?;

    Ok(Invoice {
        id: integer(row, InvoiceColumn::Id)?,
        details: NewInvoice {
            company_name: text(row, InvoiceColumn::CompanyName)?.to_string(),
            company_num: text(row, InvoiceColumn::CompanyNum)?.to_string(),
            phone_type,
            phone_opt,
            quantity,
            vat: money(row, InvoiceColumn::Vat)?,
            total_cost: money(row, InvoiceColumn::TotalCost)?,
            total_cost_vat: money(row, InvoiceColumn::TotalCostVat)?,
        },
    })
}

fn mismatch(column: InvoiceColumn, expected: &str, found: &Value) -> DbError {
    DbError::decode(
        column.name(),
        format!("expected {expected}, found {}", found.kind()),
    )
}

fn text(row: &Row, column: InvoiceColumn) -> DbResult<&str> {
    let value = &row[column.index()];
    value.as_str().ok_or_else(|| mismatch(column, "TEXT", value))
}

fn integer(row: &Row, column: InvoiceColumn) -> DbResult<i64> {
    let value = &row[column.index()];
    value.as_i64().ok_or_else(|| mismatch(column, "INTEGER", value))
}

fn money(row: &Row, column: InvoiceColumn) -> DbResult<Money> {
    let value = &row[column.index()];
    value
        .as_f64()
        .map(Money::from_pounds_f64)
        .ok_or_else(|| mismatch(column, "REAL", value))
}

// =============================================================================
// Unit Tests
// =============================================================================
