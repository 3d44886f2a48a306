use std::io::{self, IsTerminal, Write};
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::billing::Invoice;
use crate::cli::Opts;
use crate::error::RunError;
use crate::input::{self, Lines, Prompter, Terminal};
use crate::render;

pub fn run(opts: &Opts) -> Result<(), RunError> {
    let stdin = io::stdin();
    let invoice = if stdin.is_terminal() {
        collect(&mut Terminal, today)?
    } else {
        collect(&mut Lines::new(stdin.lock(), io::stdout()), today)?
    };

    report(&invoice, &opts.output, &mut io::stdout())?;
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Ask for the customer and the items. The invoice is dated when the
/// customer has been entered.
pub fn collect(
    prompter: &mut impl Prompter,
    today: impl FnOnce() -> NaiveDate,
) -> Result<Invoice, RunError> {
    let customer = input::customer(prompter)?;
    let date = today();
    let items = input::line_items(prompter)?;
    let invoice = Invoice::dated(customer, date, items);
    debug!("collected invoice:\n{}", invoice);
    Ok(invoice)
}

/// Write the invoice document and tell the user how it went. A failed
/// write is reported, not returned.
pub fn report(
    invoice: &Invoice,
    path: &Path,
    out: &mut impl Write,
) -> io::Result<()> {
    match render::write(invoice, path) {
        Ok(()) => {
            info!(
                path = %path.display(),
                items = invoice.items.len(),
                total = %invoice.total().amount(),
                "invoice written"
            );
            writeln!(out, "Factura generada exitosamente: {}", path.display())
        }
        Err(error) => writeln!(out, "Error al generar el PDF: {}", error),
    }
}
