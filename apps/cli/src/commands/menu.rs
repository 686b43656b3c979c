//! Handler for the interactive menu (the default command).

use dialoguer::{theme::ColorfulTheme, Input, Select};
use masa_core::PriceTable;
use masa_db::{InvoiceRepository, SaveOutcome};
use tracing::error;

use crate::cli::ListArgs;
use crate::commands::{create, list};
use crate::error::{CliError, CliResult};
use crate::output;

const ACTIONS: [&str; 3] = ["Read all invoices", "Create new invoice", "Quit"];

/// Loops until the operator picks "Quit".
///
/// A failed action is shown and the menu comes back; only a broken terminal
/// ends the loop early.
pub async fn execute(repo: &InvoiceRepository) -> CliResult<()> {
    let theme = ColorfulTheme::default();
    let table = PriceTable::standard();

    println!("{}", output::BANNER);

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("Choose function")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        let result = match choice {
            0 => list::execute(repo, &ListArgs { json: false }).await,
            1 => create_interactive(repo, &theme, &table).await,
            _ => break,
        };

        match result {
            Ok(()) => {}
            Err(CliError::Prompt(e)) => return Err(CliError::Prompt(e)),
            Err(e) => {
                error!(error = %e, "Menu action failed");
                output::error(&e.to_string());
            }
        }

        pause(&theme)?;
    }

    Ok(())
}

async fn create_interactive(
    repo: &InvoiceRepository,
    theme: &ColorfulTheme,
    table: &PriceTable,
) -> CliResult<()> {
    let invoice = create::prompt_invoice(theme, table)?;
    println!("{}", output::invoice_summary(&invoice));

    match repo.save_invoice(&invoice).await? {
        SaveOutcome::Saved(saved) => output::ok(&format!("Invoice #{} saved", saved.id)),
        SaveOutcome::Rejected(reason) => output::error(&CliError::Rejected(reason).to_string()),
    }
    Ok(())
}

fn pause(theme: &ColorfulTheme) -> CliResult<()> {
    let _: String = Input::with_theme(theme)
        .with_prompt("Press Enter to continue")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}
