//! Sample records.
//!
//! `raw_*` builders produce upstream records for the fake service; `sample_*`
//! functions produce domain records for formatter tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use wealthgrabber_core::schema::{
    RawAccount, RawAccountFinancials, RawActivity, RawCombinedFinancials, RawIdRef, RawMoney,
    RawPosition, RawSecurity, RawStock,
};
use wealthgrabber_types::{Account, Activity, Position};

pub fn raw_money(amount: Decimal, currency: &str) -> RawMoney {
    RawMoney {
        amount: Some(amount),
        currency: Some(currency.to_string()),
    }
}

pub fn raw_account(
    id: &str,
    description: &str,
    number: &str,
    amount: Decimal,
    currency: &str,
) -> RawAccount {
    RawAccount {
        id: Some(id.to_string()),
        description: Some(description.to_string()),
        number: Some(number.to_string()),
        financials: Some(RawAccountFinancials {
            current_combined: Some(RawCombinedFinancials {
                net_liquidation_value: Some(raw_money(amount, currency)),
            }),
        }),
        ..Default::default()
    }
}

/// An activity with the common fields set; adjust the rest with struct update syntax
pub fn raw_activity(
    activity_type: &str,
    description: &str,
    occurred_at: &str,
    amount: Decimal,
    positive: bool,
) -> RawActivity {
    RawActivity {
        activity_type: Some(activity_type.to_string()),
        description: Some(description.to_string()),
        occurred_at: Some(occurred_at.to_string()),
        amount: Some(amount),
        amount_sign: Some(if positive { "positive" } else { "negative" }.to_string()),
        currency: Some("CAD".to_string()),
        ..Default::default()
    }
}

pub fn raw_position(
    security_id: &str,
    account_ids: &[&str],
    quantity: Decimal,
    market_value: Decimal,
    book_value: Decimal,
    currency: &str,
) -> RawPosition {
    RawPosition {
        id: Some(format!("pos-{}", security_id)),
        quantity: Some(quantity),
        accounts: account_ids
            .iter()
            .map(|id| RawIdRef {
                id: Some(id.to_string()),
            })
            .collect(),
        security: Some(RawIdRef {
            id: Some(security_id.to_string()),
        }),
        total_value: Some(raw_money(market_value, currency)),
        book_value: Some(raw_money(book_value, currency)),
    }
}

pub fn raw_security(id: &str, symbol: Option<&str>, name: Option<&str>) -> RawSecurity {
    RawSecurity {
        id: Some(id.to_string()),
        stock: Some(RawStock {
            symbol: symbol.map(str::to_string),
            name: name.map(str::to_string),
        }),
    }
}

/// AAPL and GOOG in CAD, MSFT in USD: CAD P&L +400, USD P&L +100
pub fn sample_positions() -> Vec<Position> {
    vec![
        Position::new("AAPL", "Apple Inc.", dec!(10), dec!(1500), dec!(1000), "CAD"),
        Position::new("GOOG", "Alphabet Inc.", dec!(5), dec!(2500), dec!(2600), "CAD"),
        Position::new("MSFT", "Microsoft Corp.", dec!(2), dec!(400), dec!(300), "USD"),
    ]
}

pub fn sample_accounts() -> Vec<Account> {
    vec![
        Account {
            description: "TFSA".to_string(),
            number: "TFSA-001".to_string(),
            value: dec!(15234.56),
            currency: "CAD".to_string(),
        },
        Account {
            description: "RRSP".to_string(),
            number: "RRSP-001".to_string(),
            value: dec!(48000),
            currency: "CAD".to_string(),
        },
        Account {
            description: "USD Cash".to_string(),
            number: "CASH-USD".to_string(),
            value: dec!(1200.5),
            currency: "USD".to_string(),
        },
    ]
}

pub fn sample_activities() -> Vec<Activity> {
    vec![
        Activity {
            date: "2024-03-15".to_string(),
            activity_type: "DIY_DIVIDEND".to_string(),
            description: "Dividend from XEQT".to_string(),
            amount: dec!(12.34),
            currency: "CAD".to_string(),
            sign: "+".to_string(),
            account_label: Some("TFSA (TFSA-001)".to_string()),
        },
        Activity {
            date: "2024-03-10".to_string(),
            activity_type: "DIY_BUY".to_string(),
            description: "Bought 10 VFV, at market".to_string(),
            amount: dec!(1250),
            currency: "CAD".to_string(),
            sign: "-".to_string(),
            account_label: Some("RRSP (RRSP-001)".to_string()),
        },
    ]
}
