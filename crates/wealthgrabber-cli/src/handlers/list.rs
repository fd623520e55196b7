use crate::config::Config;
use crate::error::Result;
use crate::presentation::{Formatter, get_formatter};
use wealthgrabber_core::accounts::{AccountQuery, get_accounts_data};
use wealthgrabber_core::{LiquidityFilter, WealthService};

pub struct ListOptions {
    pub show_zero: bool,
    pub liquid_only: bool,
    pub not_liquid: bool,
    pub format: String,
}

pub fn handle(config: &Config, options: ListOptions) -> Result<String> {
    let formatter = get_formatter(&options.format)?;
    let query = AccountQuery {
        show_zero_balances: options.show_zero,
        liquidity: LiquidityFilter::from_flags(options.liquid_only, options.not_liquid)?,
        base_currency: config.base_currency.clone(),
    };

    let client = super::connect(config, None, false)?;
    render(&client, formatter, &query)
}

pub(crate) fn render(
    service: &dyn WealthService,
    formatter: &dyn Formatter,
    query: &AccountQuery,
) -> Result<String> {
    let accounts = get_accounts_data(service, query)?;
    Ok(formatter.format_accounts(&accounts)?)
}
