//! Handler for the `create` command, plus the interactive invoice form used
//! by the menu.

use dialoguer::{theme::ColorfulTheme, Input, Select};
use masa_core::validation::{validate_company_name, validate_company_number, validate_quantity};
use masa_core::{Invoice, NewInvoice, PhoneOption, PhoneType, PriceTable, MIN_QUANTITY};
use masa_db::{InvoiceRepository, SaveOutcome};
use tracing::info;

use crate::cli::CreateArgs;
use crate::error::{CliError, CliResult};
use crate::output;

/// Creates an invoice from flags. A duplicate company is an error here,
/// since there is nobody to show it to and carry on.
pub async fn execute(repo: &InvoiceRepository, args: &CreateArgs) -> CliResult<Invoice> {
    let option = PhoneOption::from_code(args.option)?;
    let invoice = NewInvoice::new(
        &PriceTable::standard(),
        &args.company,
        &args.number,
        args.phone,
        option,
        args.quantity,
    )?;

    println!("{}", output::invoice_summary(&invoice));

    match repo.save_invoice(&invoice).await? {
        SaveOutcome::Saved(saved) => {
            output::ok(&format!("Invoice #{} saved", saved.id));
            Ok(saved)
        }
        SaveOutcome::Rejected(reason) => Err(CliError::Rejected(reason)),
    }
}

/// Asks for every field, re-asking until each answer is valid.
pub fn prompt_invoice(theme: &ColorfulTheme, table: &PriceTable) -> CliResult<NewInvoice> {
    let company_name: String = Input::with_theme(theme)
        .with_prompt("Company Name")
        .validate_with(|input: &String| validate_company_name(input))
        .interact_text()?;

    let company_num: String = Input::with_theme(theme)
        .with_prompt("Company phone number")
        .validate_with(|input: &String| validate_company_number(input))
        .interact_text()?;

    let phone_type = PhoneType::ALL[Select::with_theme(theme)
        .with_prompt("Select phone type")
        .items(&phone_type_labels(table))
        .default(0)
        .interact()?];

    let option_labels: Vec<&str> = PhoneOption::ALL.iter().map(|o| o.label()).collect();
    let phone_opt = PhoneOption::ALL[Select::with_theme(theme)
        .with_prompt("Smartphone options")
        .items(&option_labels)
        .default(PhoneOption::ALL.len() - 1)
        .interact()?];

    let quantity: u32 = Input::with_theme(theme)
        .with_prompt("Quantity of phones (min=5, max=100)")
        .default(MIN_QUANTITY)
        .validate_with(|input: &u32| validate_quantity(*input))
        .interact_text()?;

    info!(company = %company_name, %phone_type, quantity, "Invoice form completed");

    Ok(NewInvoice::new(
        table,
        &company_name,
        &company_num,
        phone_type,
        phone_opt,
        quantity,
    )?)
}

/// `Basic £250.00`, … in [`PhoneType::ALL`] order.
fn phone_type_labels(table: &PriceTable) -> Vec<String> {
    PhoneType::ALL
        .iter()
        .map(|phone_type| match table.base_price(phone_type.as_str()) {
            Some(price) => format!("{phone_type} {price}"),
            None => phone_type.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use masa_core::{CoreError, Money, ValidationError};
    use masa_db::DbConfig;
    use tempfile::TempDir;

    async fn repo(dir: &TempDir) -> InvoiceRepository {
        let repo = InvoiceRepository::new(DbConfig::new(dir.path().join("customers.db")));
        repo.bootstrap_schema().await.unwrap();
        repo
    }

    fn args(company: &str, option: u8, quantity: u32) -> CreateArgs {
        CreateArgs {
            company: company.to_string(),
            number: "447123456789".to_string(),
            phone: PhoneType::Basic,
            option,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_saves_priced_invoice() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        let saved = execute(&repo, &args("Acme Ltd", 3, 10)).await.unwrap();

        assert_eq!(saved.id, 1);
        assert_eq!(saved.details.total_cost, Money::from_pounds(2500));
        assert_eq!(saved.details.vat, Money::from_pounds(500));
        assert_eq!(saved.details.total_cost_vat, Money::from_pounds(3000));
        assert_eq!(repo.list_invoices().await.unwrap(), vec![saved]);
    }

    #[tokio::test]
    async fn test_duplicate_company_fails() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        execute(&repo, &args("Acme Ltd", 3, 10)).await.unwrap();
        let err = execute(&repo, &args("Acme Ltd", 1, 20)).await.unwrap_err();

        assert!(matches!(
            err,
            CliError::Rejected(ValidationError::Duplicate { ref value, .. }) if value == "Acme Ltd"
        ));
        assert_eq!(repo.list_invoices().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bad_input_never_reaches_the_database() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        let err = execute(&repo, &args("Acme Ltd", 4, 10)).await.unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::InvalidOption(4))));

        let err = execute(&repo, &args("Acme Ltd", 1, 12)).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(CoreError::Validation(ValidationError::NotMultipleOf { .. }))
        ));

        assert!(repo.list_invoices().await.unwrap().is_empty());
    }

    #[test]
    fn test_phone_type_labels_show_price() {
        assert_eq!(
            phone_type_labels(&PriceTable::standard()),
            vec!["Basic £250.00", "Standard £450.00", "Superior £950.00"]
        );
    }
}
