use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use wealthgrabber_types::{Position, pnl_ratio};

/// Summed position values for one currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyTotals {
    pub currency: String,
    /// Units held across all positions in this currency
    pub quantity: Decimal,
    pub market_value: Decimal,
    pub book_value: Decimal,
    pub pnl: Decimal,
    pub pnl_pct: Option<Decimal>,
}

#[derive(Default)]
struct Sums {
    quantity: Decimal,
    market_value: Decimal,
    book_value: Decimal,
    pnl: Decimal,
}

/// One entry per currency, ordered by currency code.
pub fn position_totals<'a>(
    positions: impl IntoIterator<Item = &'a Position>,
) -> Vec<CurrencyTotals> {
    let mut sums: BTreeMap<&str, Sums> = BTreeMap::new();
    for position in positions {
        let entry = sums.entry(position.currency.as_str()).or_default();
        entry.quantity += position.quantity;
        entry.market_value += position.market_value;
        entry.book_value += position.book_value;
        entry.pnl += position.pnl;
    }

    sums.into_iter()
        .map(|(currency, sums)| CurrencyTotals {
            currency: currency.to_string(),
            quantity: sums.quantity,
            market_value: sums.market_value,
            book_value: sums.book_value,
            pnl: sums.pnl,
            pnl_pct: pnl_ratio(sums.pnl, sums.book_value),
        })
        .collect()
}

/// Sum of `(currency, amount)` pairs per currency, ordered by currency code.
pub fn value_totals<'a>(
    values: impl IntoIterator<Item = (&'a str, Decimal)>,
) -> Vec<(String, Decimal)> {
    let mut sums: BTreeMap<&str, Decimal> = BTreeMap::new();
    for (currency, amount) in values {
        *sums.entry(currency).or_default() += amount;
    }
    sums.into_iter()
        .map(|(currency, total)| (currency.to_string(), total))
        .collect()
}
