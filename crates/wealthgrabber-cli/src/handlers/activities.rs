use super::resolve_account;
use crate::config::Config;
use crate::error::Result;
use crate::presentation::{Formatter, get_formatter};
use wealthgrabber_core::WealthService;
use wealthgrabber_core::activities::{ActivityQuery, get_activities_data};

pub struct ActivitiesOptions {
    /// Account number, resolved to an upstream id before fetching
    pub account: Option<String>,
    pub dividends: bool,
    pub limit: Option<usize>,
    pub format: String,
}

pub fn handle(config: &Config, options: ActivitiesOptions) -> Result<String> {
    let formatter = get_formatter(&options.format)?;
    let client = super::connect(config, None, false)?;
    render(&client, formatter, config, &options)
}

pub(crate) fn render(
    service: &dyn WealthService,
    formatter: &dyn Formatter,
    config: &Config,
    options: &ActivitiesOptions,
) -> Result<String> {
    let query = ActivityQuery {
        account_id: resolve_account(service, options.account.as_deref())?,
        dividends_only: options.dividends,
        limit: options.limit.unwrap_or(config.activity_limit),
        base_currency: config.base_currency.clone(),
    };

    let activities = get_activities_data(service, &query)?;
    Ok(formatter.format_activities(&activities)?)
}
