use rust_decimal::{Decimal, RoundingStrategy};

/// `1234.5` -> `1,234.50`
pub fn format_money(value: Decimal) -> String {
    let rounded = round_money(value);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, with_commas(int_part), frac_part)
}

/// Like [`format_money`] with an explicit `+` for zero and gains
pub fn format_signed_money(value: Decimal) -> String {
    let formatted = format_money(value);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!("+{}", formatted)
    }
}

/// A ratio as a signed percentage with one decimal: `0.25` -> `+25.0%`
pub fn format_percent(ratio: Option<Decimal>) -> String {
    let Some(ratio) = ratio else {
        return "n/a".to_string();
    };
    let pct = (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let sign = if pct.is_sign_negative() && !pct.is_zero() {
        ""
    } else {
        "+"
    };
    format!("{}{:.1}%", sign, pct)
}

/// Quantities keep up to four decimals, without trailing zeros
pub fn format_quantity(quantity: Decimal) -> String {
    quantity
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// Two decimals, no separators; for machine-readable output
pub fn format_plain(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn with_commas(digits: &str) -> String {
    let mut result = String::new();

    for (count, c) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}
