use rust_decimal::Decimal;
use thiserror::Error;

/// Description keywords that mark an account as non-liquid (matched case-insensitively)
pub const NON_LIQUID_KEYWORDS: &[&str] = &["rrsp", "lira", "private equity", "private credit"];

/// Activity type or description fragments that mark a dividend
pub const DIVIDEND_MARKERS: &[&str] = &["DIY_DIVIDEND", "DIVIDEND", "DISTRIBUTION"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liquidity {
    Liquid,
    NonLiquid,
}

pub fn classify_liquidity(description: &str) -> Liquidity {
    let lower = description.to_lowercase();
    if NON_LIQUID_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        Liquidity::NonLiquid
    } else {
        Liquidity::Liquid
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{first} and {second} cannot be used together")]
pub struct FlagConflict {
    pub first: &'static str,
    pub second: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LiquidityFilter {
    #[default]
    All,
    LiquidOnly,
    NotLiquid,
}

impl LiquidityFilter {
    pub fn from_flags(liquid_only: bool, not_liquid: bool) -> Result<Self, FlagConflict> {
        match (liquid_only, not_liquid) {
            (true, true) => Err(FlagConflict {
                first: "--liquid-only",
                second: "--not-liquid",
            }),
            (true, false) => Ok(Self::LiquidOnly),
            (false, true) => Ok(Self::NotLiquid),
            (false, false) => Ok(Self::All),
        }
    }

    pub fn admits(self, liquidity: Liquidity) -> bool {
        match self {
            Self::All => true,
            Self::LiquidOnly => liquidity == Liquidity::Liquid,
            Self::NotLiquid => liquidity == Liquidity::NonLiquid,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PnlFilter {
    #[default]
    All,
    Profit,
    Loss,
}

impl PnlFilter {
    pub fn from_flags(profits: bool, losses: bool) -> Result<Self, FlagConflict> {
        match (profits, losses) {
            (true, true) => Err(FlagConflict {
                first: "--profits",
                second: "--losses",
            }),
            (true, false) => Ok(Self::Profit),
            (false, true) => Ok(Self::Loss),
            (false, false) => Ok(Self::All),
        }
    }

    /// Break-even positions pass only the unfiltered view
    pub fn admits(self, pnl: Decimal) -> bool {
        match self {
            Self::All => true,
            Self::Profit => pnl > Decimal::ZERO,
            Self::Loss => pnl < Decimal::ZERO,
        }
    }
}

pub fn is_dividend(activity_type: &str, description: &str) -> bool {
    let activity_type = activity_type.to_uppercase();
    let description = description.to_uppercase();
    DIVIDEND_MARKERS
        .iter()
        .any(|marker| activity_type.contains(marker) || description.contains(marker))
}
