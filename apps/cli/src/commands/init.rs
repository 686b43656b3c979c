//! Handler for the `init` command.

use masa_db::InvoiceRepository;

use crate::error::CliResult;
use crate::output;

/// Creates the invoice table. Safe to run against an existing database.
pub async fn execute(repo: &InvoiceRepository) -> CliResult<()> {
    repo.bootstrap_schema().await?;

    output::ok(&format!(
        "Invoice table ready in {}",
        repo.config().database_path.display()
    ));
    Ok(())
}
