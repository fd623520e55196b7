//! Format-independent shaping of records: per-currency totals and grouping.

pub mod grouping;
pub mod totals;

pub use grouping::{GroupLabel, PositionGroup, activity_sections, group_positions};
pub use totals::{CurrencyTotals, position_totals, value_totals};
