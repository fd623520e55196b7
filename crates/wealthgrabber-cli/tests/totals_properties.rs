use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use wealthgrabber::presentation::get_formatter;
use wealthgrabber_testing::assertions::json_decimal;
use wealthgrabber_types::Position;

fn money() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn position() -> impl Strategy<Value = Position> {
    (
        "[A-Z]{1,5}",
        prop::sample::select(vec!["CAD", "USD", "EUR"]),
        money(),
        money(),
    )
        .prop_map(|(symbol, currency, market_value, book_value)| {
            Position::new(
                symbol.clone(),
                symbol,
                Decimal::ONE,
                market_value,
                book_value,
                currency,
            )
        })
}

proptest! {
    #[test]
    fn pnl_totals_match_value_totals(positions in prop::collection::vec(position(), 0..20)) {
        let out = get_formatter("json")
            .unwrap()
            .format_positions(&positions, true, None)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        let mut expected: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
        for p in &positions {
            let entry = expected.entry(p.currency.as_str()).or_default();
            entry.0 += p.market_value;
            entry.1 += p.book_value;
        }

        let totals = value["totals"].as_array().unwrap();
        prop_assert_eq!(totals.len(), expected.len());
        for (total, (currency, (mv, bv))) in totals.iter().zip(&expected) {
            prop_assert_eq!(total["currency"].as_str().unwrap(), *currency);
            let pnl = json_decimal(&total["pnl"]).unwrap();
            prop_assert!((pnl - (*mv - *bv)).abs() <= Decimal::new(1, 2));
        }
    }
}
