use crate::DEFAULT_BASE_CURRENCY;
use crate::error::{RetrievalError, ServiceError};
use crate::filters::{LiquidityFilter, classify_liquidity};
use crate::schema::RawAccount;
use crate::service::WealthService;
use log::info;
use rust_decimal::Decimal;
use wealthgrabber_types::{Account, RecordKind};

pub const UNKNOWN_ACCOUNT: &str = "Unknown Account";
pub const MISSING_NUMBER: &str = "N/A";

#[derive(Debug, Clone)]
pub struct AccountQuery {
    pub show_zero_balances: bool,
    pub liquidity: LiquidityFilter,
    pub base_currency: String,
}

impl Default for AccountQuery {
    fn default() -> Self {
        Self {
            show_zero_balances: false,
            liquidity: LiquidityFilter::All,
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
        }
    }
}

pub fn get_accounts_data(
    service: &dyn WealthService,
    query: &AccountQuery,
) -> Result<Vec<Account>, RetrievalError> {
    info!("Fetching accounts...");
    let raw = fetch_accounts(service)?;

    let accounts = raw
        .iter()
        .map(|account| to_account(account, &query.base_currency))
        .filter(|account| query.liquidity.admits(classify_liquidity(&account.description)))
        .filter(|account| query.show_zero_balances || !account.value.is_zero())
        .collect();

    Ok(accounts)
}

/// Upstream id of the account with this number, if any
pub fn resolve_account_id(
    service: &dyn WealthService,
    number: &str,
) -> Result<Option<String>, RetrievalError> {
    let raw = fetch_accounts(service)?;
    Ok(raw
        .into_iter()
        .find(|account| account.number.as_deref() == Some(number))
        .and_then(|account| account.id))
}

/// `"<description> (<number>)"`, used to tag activities and positions
pub fn account_label(raw: &RawAccount) -> String {
    format!(
        "{} ({})",
        raw.description.as_deref().unwrap_or(UNKNOWN_ACCOUNT),
        raw.number.as_deref().unwrap_or(MISSING_NUMBER)
    )
}

pub(crate) fn fetch_accounts(
    service: &dyn WealthService,
) -> Result<Vec<RawAccount>, RetrievalError> {
    service
        .accounts()
        .map_err(|e: ServiceError| RetrievalError::new(RecordKind::Accounts, e))
}

fn to_account(raw: &RawAccount, base_currency: &str) -> Account {
    let value = raw.net_liquidation_value();
    Account {
        description: raw
            .description
            .clone()
            .unwrap_or_else(|| UNKNOWN_ACCOUNT.to_string()),
        number: raw.number.clone().unwrap_or_else(|| MISSING_NUMBER.to_string()),
        value: value.and_then(|v| v.amount).unwrap_or(Decimal::ZERO),
        currency: value
            .and_then(|v| v.currency.clone())
            .unwrap_or_else(|| base_currency.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RawAccountFinancials, RawCombinedFinancials, RawMoney};
    use rust_decimal_macros::dec;

    fn raw(description: Option<&str>, number: Option<&str>, amount: Option<Decimal>) -> RawAccount {
        RawAccount {
            id: Some("id-1".to_string()),
            description: description.map(str::to_string),
            number: number.map(str::to_string),
            financials: Some(RawAccountFinancials {
                current_combined: Some(RawCombinedFinancials {
                    net_liquidation_value: Some(RawMoney {
                        amount,
                        currency: None,
                    }),
                }),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_to_account_applies_defaults() {
        let account = to_account(&raw(None, None, None), "USD");
        assert_eq!(account.description, "Unknown Account");
        assert_eq!(account.number, "N/A");
        assert_eq!(account.value, Decimal::ZERO);
        assert_eq!(account.currency, "USD");
    }

    #[test]
    fn test_to_account_without_financials() {
        let account = to_account(&RawAccount::default(), "CAD");
        assert_eq!(account.value, Decimal::ZERO);
        assert_eq!(account.currency, "CAD");
    }

    #[test]
    fn test_account_label() {
        assert_eq!(
            account_label(&raw(Some("TFSA"), Some("TFSA-001"), Some(dec!(1)))),
            "TFSA (TFSA-001)"
        );
        assert_eq!(account_label(&raw(None, None, None)), "Unknown Account (N/A)");
    }
}
