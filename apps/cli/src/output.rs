//! Operator-facing output: status lines, the invoice table and the printed
//! invoice summary.

use masa_core::{Invoice, Money, NewInvoice, PhoneType};
use tabled::{Table, Tabled};

pub const BANNER: &str = "====== MASA Telecommunications =====";

#[derive(Tabled)]
pub struct InvoiceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Company Name")]
    company_name: String,
    #[tabled(rename = "Company Num")]
    company_num: String,
    #[tabled(rename = "Phone Type")]
    phone_type: PhoneType,
    #[tabled(rename = "Phone Option")]
    phone_opt: &'static str,
    #[tabled(rename = "Quantity")]
    quantity: u32,
    #[tabled(rename = "VAT")]
    vat: Money,
    #[tabled(rename = "Total Cost")]
    total_cost: Money,
    #[tabled(rename = "Total Cost with VAT")]
    total_cost_vat: Money,
}

impl From<&Invoice> for InvoiceRow {
    fn from(invoice: &Invoice) -> Self {
        let details = &invoice.details;
        InvoiceRow {
            id: invoice.id,
            company_name: details.company_name.clone(),
            company_num: details.company_num.clone(),
            phone_type: details.phone_type,
            phone_opt: details.phone_opt.label(),
            quantity: details.quantity,
            vat: details.vat,
            total_cost: details.total_cost,
            total_cost_vat: details.total_cost_vat,
        }
    }
}

/// Renders invoices as a table, or a notice when there are none.
pub fn invoice_table(invoices: &[Invoice]) -> String {
    if invoices.is_empty() {
        return "No invoices found.".to_string();
    }
    Table::new(invoices.iter().map(InvoiceRow::from)).to_string()
}

/// The block printed after the operator fills in the form.
pub fn invoice_summary(invoice: &NewInvoice) -> String {
    [
        "=[NEW INVOICE]=".to_string(),
        format!("Company Name: {}", invoice.company_name),
        format!("Company Num: {}", invoice.company_num),
        format!("Smart Phone Type: {}", invoice.phone_type),
        format!("Smart Phone Option: {}", invoice.phone_opt.label()),
        format!("Quantity: {}", invoice.quantity),
        format!("Total Cost: {}", invoice.total_cost),
        format!("VAT: {}", invoice.vat),
        format!("Total Cost including VAT: {}", invoice.total_cost_vat),
    ]
    .join("\n")
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("✓ {message}");
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!("✗ {message}");
}
