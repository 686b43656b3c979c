//! Handler for the `list` command and the menu's "Read all invoices".

use masa_db::InvoiceRepository;

use crate::cli::ListArgs;
use crate::error::CliResult;
use crate::output;

pub async fn execute(repo: &InvoiceRepository, args: &ListArgs) -> CliResult<()> {
    let invoices = repo.list_invoices().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&invoices)?);
    } else {
        println!("{}", output::invoice_table(&invoices));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use masa_db::{DbConfig, DbError};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_both_formats() {
        let dir = TempDir::new().unwrap();
        let repo = InvoiceRepository::new(DbConfig::new(dir.path().join("customers.db")));
        repo.bootstrap_schema().await.unwrap();

        execute(&repo, &ListArgs { json: false }).await.unwrap();
        execute(&repo, &ListArgs { json: true }).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_without_schema_is_a_db_error() {
        let dir = TempDir::new().unwrap();
        let repo = InvoiceRepository::new(DbConfig::new(dir.path().join("customers.db")));

        let err = execute(&repo, &ListArgs { json: false }).await.unwrap_err();
        assert!(matches!(err, crate::error::CliError::Db(DbError::QueryFailed(_))));
    }
}
