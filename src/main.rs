/*
 * Console invoice generator
 *
 * - Ask for the customer's name, the date is today
 * - Ask for products as name, quantity and unit price until 'fin'
 *     - A bad quantity or price drops the product and asks again
 * - Lay out a one page invoice:
 *     - title, customer and date
 *     - one bordered row per product with its subtotal
 *     - grand total row
 * - Write it to factura.pdf (or --output), replacing any existing file
 */

mod billing;
mod cli;
mod document;
mod error;
mod fonts;
mod input;
mod logging;
mod render;
mod run;

use clap::Parser;
use crate::cli::Opts;

fn main() {
    let opts = Opts::parse();
    logging::init();

    if let Err(error) = run::run(&opts) {
        eprintln!("{}", error);
    }
}
