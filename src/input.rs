use std::io::{BufRead, Write};
use std::str::FromStr;

use const_format::formatcp;
use inquire::Text;
use rust_decimal::Decimal;
use tracing::debug;

use crate::billing::LineItem;
use crate::error::RunError;

pub const SENTINEL: &str = "fin";

const CUSTOMER_PROMPT: &str = "Ingrese el nombre del cliente: ";
const PRODUCT_PROMPT: &str = formatcp!(
    "Ingrese el nombre del producto (o '{}' para terminar): ",
    SENTINEL
);
const QUANTITY_PROMPT: &str = "Ingrese la cantidad: ";
const PRICE_PROMPT: &str = "Ingrese el precio unitario: ";

const INVALID_QUANTITY: &str = "Cantidad no válida.";
const INVALID_PRICE: &str = "Precio no válido.";

type InputResult<T> = Result<T, RunError>;

/// Source of answers to the collector's questions.
pub trait Prompter {
    /// Ask for one line of text, `None` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> InputResult<Option<String>>;

    /// Tell the user an answer was rejected.
    fn reject(&mut self, message: &str) -> InputResult<()>;
}

/// Interactive prompts on a terminal.
pub struct Terminal;

impl Prompter for Terminal {
    fn ask(&mut self, prompt: &str) -> InputResult<Option<String>> {
        Ok(Some(Text::new(prompt.trim_end()).prompt()?))
    }

    fn reject(&mut self, message: &str) -> InputResult<()> {
        println!("{}", message);
        Ok(())
    }
}

/// Plain prompts for piped input, one answer per line.
pub struct Lines<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Lines<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompter for Lines<R, W> {
    fn ask(&mut self, prompt: &str) -> InputResult<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn reject(&mut self, message: &str) -> InputResult<()> {
        writeln!(self.writer, "{}", message)?;
        Ok(())
    }
}

enum Entry {
    Item(LineItem),
    Rejected,
    Done,
}

pub fn customer(prompter: &mut impl Prompter) -> InputResult<String> {
    let name = prompter.ask(CUSTOMER_PROMPT)?.unwrap_or_default();
    Ok(name.trim().to_string())
}

pub fn line_items(prompter: &mut impl Prompter) -> InputResult<Vec<LineItem>> {
    let mut items: Vec<LineItem> = Vec::new();
    loop {
        match next_entry(prompter)? {
            Entry::Item(item) => {
                debug!(%item, "item added");
                items.push(item);
            }
            Entry::Rejected => continue,
            Entry::Done => break,
        }
    }
    Ok(items)
}

fn next_entry(prompter: &mut impl Prompter) -> InputResult<Entry> {
    let Some(name) = prompter.ask(PRODUCT_PROMPT)? else {
        return Ok(Entry::Done);
    };
    let name = name.trim();
    if is_sentinel(name) {
        return Ok(Entry::Done);
    }

    let Some(quantity) = prompter.ask(QUANTITY_PROMPT)? else {
        return Ok(Entry::Done);
    };
    let Some(quantity) = parse_quantity(&quantity) else {
        debug!(quantity = quantity.trim(), "rejected quantity");
        prompter.reject(INVALID_QUANTITY)?;
        return Ok(Entry::Rejected);
    };

    let Some(price) = prompter.ask(PRICE_PROMPT)? else {
        return Ok(Entry::Done);
    };
    let Some(price) = parse_price(&price) else {
        debug!(price = price.trim(), "rejected price");
        prompter.reject(INVALID_PRICE)?;
        return Ok(Entry::Rejected);
    };

    Ok(Entry::Item(LineItem::new(name.to_string(), quantity, price)))
}

pub fn is_sentinel(name: &str) -> bool {
    name.eq_ignore_ascii_case(SENTINEL)
}

pub fn parse_quantity(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

pub fn parse_price(text: &str) -> Option<Decimal> {
    let text = text.trim();
    // rust_decimal would read '_' as a digit separator
    if text.contains('_') {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
