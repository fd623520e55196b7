use rust_decimal_macros::dec;
use wealthgrabber_core::accounts::{AccountQuery, get_accounts_data, resolve_account_id};
use wealthgrabber_core::schema::RawAccount;
use wealthgrabber_core::{LiquidityFilter, ServiceError};
use wealthgrabber_testing::FakeWealthService;
use wealthgrabber_testing::fixtures::raw_account;
use wealthgrabber_types::RecordKind;

fn service() -> FakeWealthService {
    FakeWealthService::new()
        .with_account(raw_account("a1", "TFSA", "TFSA-001", dec!(15000), "CAD"))
        .with_account(raw_account("a2", "RRSP", "RRSP-001", dec!(48000), "CAD"))
        .with_account(raw_account("a3", "Cash", "CASH-001", dec!(0), "CAD"))
        .with_account(raw_account("a4", "Private Credit", "PC-001", dec!(5000), "CAD"))
        .with_account(raw_account("a5", "USD Cash", "CASH-USD", dec!(120.5), "USD"))
}

fn numbers(query: &AccountQuery) -> Vec<String> {
    get_accounts_data(&service(), query)
        .unwrap()
        .into_iter()
        .map(|a| a.number)
        .collect()
}

#[test]
fn test_zero_balances_hidden_by_default() {
    assert_eq!(
        numbers(&AccountQuery::default()),
        vec!["TFSA-001", "RRSP-001", "PC-001", "CASH-USD"]
    );
}

#[test]
fn test_show_zero_balances_keeps_upstream_order() {
    let query = AccountQuery {
        show_zero_balances: true,
        ..Default::default()
    };
    assert_eq!(
        numbers(&query),
        vec!["TFSA-001", "RRSP-001", "CASH-001", "PC-001", "CASH-USD"]
    );
}

#[test]
fn test_liquidity_filters() {
    let liquid = AccountQuery {
        liquidity: LiquidityFilter::LiquidOnly,
        ..Default::default()
    };
    assert_eq!(numbers(&liquid), vec!["TFSA-001", "CASH-USD"]);

    let not_liquid = AccountQuery {
        liquidity: LiquidityFilter::NotLiquid,
        ..Default::default()
    };
    assert_eq!(numbers(&not_liquid), vec!["RRSP-001", "PC-001"]);
}

#[test]
fn test_missing_fields_are_defaulted() {
    let svc = FakeWealthService::new().with_account(RawAccount {
        id: Some("x".to_string()),
        ..Default::default()
    });
    let query = AccountQuery {
        show_zero_balances: true,
        base_currency: "USD".to_string(),
        ..Default::default()
    };

    let accounts = get_accounts_data(&svc, &query).unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].description, "Unknown Account");
    assert_eq!(accounts[0].number, "N/A");
    assert_eq!(accounts[0].value, dec!(0));
    assert_eq!(accounts[0].currency, "USD");
}

#[test]
fn test_no_accounts_is_empty_not_error() {
    let accounts = get_accounts_data(&FakeWealthService::new(), &AccountQuery::default()).unwrap();
    assert!(accounts.is_empty());
}

#[test]
fn test_service_failure_names_record_kind() {
    let err = get_accounts_data(&service().failing_accounts(), &AccountQuery::default())
        .unwrap_err();
    assert_eq!(err.kind, RecordKind::Accounts);
    assert!(matches!(err.source, ServiceError::Unauthorized));
}

#[test]
fn test_resolve_account_id_matches_number_exactly() {
    let svc = service();
    assert_eq!(resolve_account_id(&svc, "RRSP-001").unwrap(), Some("a2".to_string()));
    assert_eq!(resolve_account_id(&svc, "rrsp-001").unwrap(), None);
    assert_eq!(resolve_account_id(&svc, "NOPE").unwrap(), None);
}
