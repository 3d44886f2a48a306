use std::path::Path;

use tracing::warn;

use crate::billing::{Invoice, Money};
use crate::document::{Align, Border, Document};
use crate::error::RenderError;
use crate::fonts::Style;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;

const HEADING_WIDTH: f32 = 40.0;
const NAME_WIDTH: f32 = 70.0;
const QUANTITY_WIDTH: f32 = 30.0;
const PRICE_WIDTH: f32 = 40.0;
const TOTAL_WIDTH: f32 = 40.0;
const ROW_HEIGHT: f32 = 10.0;

/// Lay out the invoice as a single page.
pub fn invoice(invoice: &Invoice) -> Document {
    let mut doc = Document::new();
    doc.add_page();

    doc.set_font(Style::Bold, TITLE_SIZE);
    doc.cell(HEADING_WIDTH, ROW_HEIGHT, "Factura", Border::None, Align::Left);
    doc.ln(12.0);

    doc.set_font(Style::Regular, BODY_SIZE);
    doc.cell(
        HEADING_WIDTH,
        ROW_HEIGHT,
        &format!("Cliente: {}", invoice.customer),
        Border::None,
        Align::Left,
    );
    doc.ln(8.0);
    doc.cell(
        HEADING_WIDTH,
        ROW_HEIGHT,
        &format!("Fecha: {}", invoice.formatted_date()),
        Border::None,
        Align::Left,
    );
    doc.ln(12.0);

    doc.set_font(Style::Bold, BODY_SIZE);
    row(
        &mut doc,
        ["Producto", "Cantidad", "Precio Unitario", "Total"].map(String::from),
    );

    doc.set_font(Style::Regular, BODY_SIZE);
    let mut total = Money::default();
    for item in invoice.items.iter() {
        let subtotal = item.subtotal();
        total = total + subtotal;

        row(
            &mut doc,
            [
                item.name.clone(),
                item.quantity.to_string(),
                item.price().to_string(),
                subtotal.to_string(),
            ],
        );
    }

    doc.set_font(Style::Bold, BODY_SIZE);
    doc.ln(ROW_HEIGHT);
    doc.cell(NAME_WIDTH, ROW_HEIGHT, "", Border::None, Align::Left);
    doc.cell(QUANTITY_WIDTH, ROW_HEIGHT, "", Border::None, Align::Left);
    doc.cell(
        PRICE_WIDTH,
        ROW_HEIGHT,
        "Total General:",
        Border::Frame,
        Align::Center,
    );
    doc.cell(
        TOTAL_WIDTH,
        ROW_HEIGHT,
        &total.to_string(),
        Border::Frame,
        Align::Center,
    );

    let hidden_rows = doc.rows_past_bottom();
    if hidden_rows > 0 {
        warn!(
            hidden_rows,
            items = invoice.items.len(),
            "invoice does not fit on one page, rows past the bottom margin"
        );
    }

    doc
}

fn row(doc: &mut Document, [name, quantity, price, total]: [String; 4]) {
    doc.cell(NAME_WIDTH, ROW_HEIGHT, &name, Border::Frame, Align::Left);
    doc.cell(QUANTITY_WIDTH, ROW_HEIGHT, &quantity, Border::Frame, Align::Center);
    doc.cell(PRICE_WIDTH, ROW_HEIGHT, &price, Border::Frame, Align::Center);
    doc.cell(TOTAL_WIDTH, ROW_HEIGHT, &total, Border::Frame, Align::Center);
    doc.ln(ROW_HEIGHT);
}

pub fn write(invoice: &Invoice, path: &Path) -> Result<(), RenderError> {
    self::invoice(invoice).save(path)
}
