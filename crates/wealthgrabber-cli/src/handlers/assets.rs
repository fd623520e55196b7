use super::resolve_account;
use crate::config::Config;
use crate::error::Result;
use crate::presentation::{Formatter, GroupLabel, get_formatter};
use wealthgrabber_core::assets::{AssetQuery, get_assets_data};
use wealthgrabber_core::{PnlFilter, WealthService};

pub struct AssetsOptions {
    /// Account number, resolved to an upstream id before fetching
    pub account: Option<String>,
    pub by_account: bool,
    pub profits: bool,
    pub losses: bool,
    pub format: String,
}

pub fn handle(config: &Config, options: AssetsOptions) -> Result<String> {
    let formatter = get_formatter(&options.format)?;
    let pnl_filter = PnlFilter::from_flags(options.profits, options.losses)?;

    let client = super::connect(config, None, false)?;
    render(&client, formatter, config, &options, pnl_filter)
}

pub(crate) fn render(
    service: &dyn WealthService,
    formatter: &dyn Formatter,
    config: &Config,
    options: &AssetsOptions,
    pnl_filter: PnlFilter,
) -> Result<String> {
    let query = AssetQuery {
        account_id: resolve_account(service, options.account.as_deref())?,
        by_account: options.by_account,
        currency: config.base_currency.clone(),
        pnl_filter,
    };

    let positions = get_assets_data(service, &query)?;
    let group_label = options.by_account.then_some(GroupLabel::Account);
    Ok(formatter.format_positions(&positions, true, group_label)?)
}
