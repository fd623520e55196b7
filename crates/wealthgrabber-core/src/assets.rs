use crate::DEFAULT_BASE_CURRENCY;
use crate::accounts::{account_label, fetch_accounts};
use crate::error::RetrievalError;
use crate::filters::PnlFilter;
use crate::schema::RawPosition;
use crate::securities::SecurityResolver;
use crate::service::WealthService;
use log::info;
use rust_decimal::Decimal;
use wealthgrabber_types::{Position, RecordKind};

#[derive(Debug, Clone)]
pub struct AssetQuery {
    /// Upstream account id; positions held elsewhere are dropped
    pub account_id: Option<String>,
    /// Emit positions per account, tagged with the account label
    pub by_account: bool,
    pub currency: String,
    pub pnl_filter: PnlFilter,
}

impl Default for AssetQuery {
    fn default() -> Self {
        Self {
            account_id: None,
            by_account: false,
            currency: DEFAULT_BASE_CURRENCY.to_string(),
            pnl_filter: PnlFilter::All,
        }
    }
}

pub fn get_assets_data(
    service: &dyn WealthService,
    query: &AssetQuery,
) -> Result<Vec<Position>, RetrievalError> {
    info!("Fetching positions...");
    let mut raw = service
        .positions(&query.currency)
        .map_err(|e| RetrievalError::new(RecordKind::Positions, e))?;

    if let Some(account_id) = &query.account_id {
        raw.retain(|position| position.held_in(account_id));
    }
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let mut resolver = SecurityResolver::new(service);
    let positions = if query.by_account {
        let accounts = fetch_accounts(service).map_err(|e| e.with_context("grouping positions"))?;
        let mut grouped = Vec::new();
        for account in &accounts {
            let Some(account_id) = account.id.as_deref() else {
                continue;
            };
            if query.account_id.as_deref().is_some_and(|wanted| wanted != account_id) {
                continue;
            }
            let label = account_label(account);
            grouped.extend(
                raw.iter()
                    .filter(|position| position.held_in(account_id))
                    .map(|position| {
                        to_position(position, &mut resolver, &query.currency)
                            .with_account_label(label.clone())
                    }),
            );
        }
        grouped
    } else {
        raw.iter()
            .map(|position| to_position(position, &mut resolver, &query.currency))
            .collect()
    };

    Ok(positions
        .into_iter()
        .filter(|position| query.pnl_filter.admits(position.pnl))
        .collect())
}

fn to_position(raw: &RawPosition, resolver: &mut SecurityResolver<'_>, currency: &str) -> Position {
    let (symbol, name) = resolver.symbol_and_name(raw.security_id());
    let market = raw.total_value.as_ref();

    Position::new(
        symbol,
        name,
        raw.quantity.unwrap_or(Decimal::ZERO),
        market.and_then(|m| m.amount).unwrap_or(Decimal::ZERO),
        raw.book_value
            .as_ref()
            .and_then(|b| b.amount)
            .unwrap_or(Decimal::ZERO),
        market
            .and_then(|m| m.currency.clone())
            .unwrap_or_else(|| currency.to_string()),
    )
}
