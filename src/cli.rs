use clap::{Parser, ValueHint};
use std::path::PathBuf;

/// Collect invoice items from the console and write a one page PDF invoice
#[derive(Parser)]
#[clap(version)]
pub struct Opts {
    /// Path of the generated invoice, overwritten if it exists
    #[clap(short, long, default_value="factura.pdf",
        value_hint=ValueHint::FilePath)]
    pub output: PathBuf,
}
