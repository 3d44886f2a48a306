use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl Add<Money> for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::default(), |acc, x| acc + x)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "${:.2}", rounded)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct LineItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn new(name: String, quantity: i64, unit_price: Decimal) -> Self {
        Self {
            name,
            quantity,
            unit_price,
        }
    }

    pub fn price(&self) -> Money {
        Money::new(self.unit_price)
    }

    pub fn subtotal(&self) -> Money {
        Money(Decimal::from(self.quantity).saturating_mul(self.unit_price))
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} @ {}: {}",
            self.name,
            self.quantity,
            self.price(),
            self.subtotal()
        )
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Invoice {
    pub customer: String,
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
}

impl Invoice {
    pub fn dated(
        customer: String,
        date: NaiveDate,
        items: Vec<LineItem>,
    ) -> Self {
        Self {
            customer,
            date,
            items,
        }
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Cliente: {}\n\
             Fecha: {}\n\n",
            self.customer,
            self.formatted_date(),
        )?;

        for item in self.items.iter() {
            writeln!(f, "{}", item)?;
        }

        write!(f, "\nTotal General: {}", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn groceries() -> Invoice {
        Invoice::dated(
            "Ana".to_string(),
            ymd(2024, 3, 5),
            vec![
                LineItem::new("Pan".to_string(), 2, dec!(1.50)),
                LineItem::new("Leche".to_string(), 3, dec!(0.80)),
            ],
        )
    }

    #[test]
    fn money_always_shows_two_decimals() {
        assert_eq!(Money::new(dec!(5.4)).to_string(), "$5.40");
        assert_eq!(Money::new(dec!(0)).to_string(), "$0.00");
        assert_eq!(Money::new(dec!(1000)).to_string(), "$1000.00");
        assert_eq!(Money::new(dec!(-3)).to_string(), "$-3.00");
    }

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(Money::new(dec!(1.005)).to_string(), "$1.01");
        assert_eq!(Money::new(dec!(2.344)).to_string(), "$2.34");
    }

    #[test]
    fn subtotal_is_quantity_times_price() {
        let item = LineItem::new("Pan".to_string(), 2, dec!(1.50));
        assert_eq!(item.subtotal(), Money::new(dec!(3.00)));

        let free = LineItem::new("Muestra".to_string(), 0, dec!(9.99));
        assert_eq!(free.subtotal(), Money::new(dec!(0)));
    }

    #[test]
    fn grand_total() {
        let invoice = groceries();
        assert_eq!(invoice.total().amount(), dec!(5.40));
        assert_eq!(invoice.total().to_string(), "$5.40");
    }

    #[test]
    fn empty_invoice_totals_zero() {
        let invoice = Invoice::dated("Ana".to_string(), ymd(2024, 3, 5), vec![]);
        assert_eq!(invoice.total().to_string(), "$0.00");
    }

    #[test]
    fn date_is_day_month_year() {
        assert_eq!(groceries().formatted_date(), "05/03/2024");
        let invoice =
            Invoice::dated(String::new(), ymd(2023, 12, 31), vec![]);
        assert_eq!(invoice.formatted_date(), "31/12/2023");
    }

    #[test]
    fn display_lists_items_and_total() {
        let shown = groceries().to_string();
        assert!(shown.starts_with("Cliente: Ana\nFecha: 05/03/2024\n"));
        assert!(shown.contains("Leche 3 @ $0.80: $2.40"));
        assert!(shown.ends_with("Total General: $5.40"));
    }

    fn line_item() -> impl Strategy<Value = LineItem> {
        (".{0,12}", -1000i64..1000, -1_000_000i64..1_000_000).prop_map(
            |(name, quantity, cents)| {
                LineItem::new(name, quantity, Decimal::new(cents, 2))
            },
        )
    }

    proptest! {
        #[test]
        fn total_is_sum_of_subtotals(
            items in proptest::collection::vec(line_item(), 0..20)
        ) {
            let expected = items.iter().fold(Decimal::ZERO, |acc, i| {
                acc + Decimal::from(i.quantity) * i.unit_price
            });
            let invoice = Invoice::dated(String::new(), ymd(2024, 1, 1), items);
            prop_assert_eq!(invoice.total().amount(), expected);
        }
    }
}
