//! # Commands
//!
//! One module per subcommand. Every command receives an
//! [`InvoiceRepository`](masa_db::InvoiceRepository) whose schema has already
//! been bootstrapped.
//!
//! ```text
//! masa            ─► menu::execute   (loop: list / create / quit)
//! masa list       ─► list::execute
//! masa create ... ─► create::execute
//! masa init       ─► init::execute
//! ```

pub mod create;
pub mod init;
pub mod list;
pub mod menu;
