use crate::DEFAULT_BASE_CURRENCY;
use crate::accounts::{account_label, fetch_accounts};
use crate::error::RetrievalError;
use crate::filters::is_dividend;
use crate::schema::RawActivity;
use crate::securities::SecurityResolver;
use crate::service::WealthService;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use log::info;
use regex::{NoExpand, Regex};
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::sync::LazyLock;
use wealthgrabber_types::{Activity, CREDIT_SIGN, DEBIT_SIGN, RecordKind};

/// Security id as it appears inside free-text descriptions, e.g. `[sec-s-3f2a]`
static SECURITY_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[?(sec-[a-z]-[a-f0-9]+)\]?").unwrap());

static BUY_QUANTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"buy (\d+\.?\d*)").unwrap());

const MISSING: &str = "N/A";

#[derive(Debug, Clone)]
pub struct ActivityQuery {
    /// Upstream account id; `None` walks every account
    pub account_id: Option<String>,
    pub dividends_only: bool,
    /// Maximum activities kept per account
    pub limit: usize,
    pub base_currency: String,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            account_id: None,
            dividends_only: false,
            limit: 50,
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
        }
    }
}

pub fn get_activities_data(
    service: &dyn WealthService,
    query: &ActivityQuery,
) -> Result<Vec<Activity>, RetrievalError> {
    info!("Fetching activities...");
    let mut resolver = SecurityResolver::new(service);

    if let Some(account_id) = &query.account_id {
        return account_activities(service, &mut resolver, account_id, None, query);
    }

    let mut activities = Vec::new();
    for account in fetch_accounts(service)? {
        let Some(account_id) = account.id.as_deref() else {
            continue;
        };
        let label = account_label(&account);
        activities.extend(account_activities(
            service,
            &mut resolver,
            account_id,
            Some(&label),
            query,
        )?);
    }
    Ok(activities)
}

fn account_activities(
    service: &dyn WealthService,
    resolver: &mut SecurityResolver<'_>,
    account_id: &str,
    label: Option<&str>,
    query: &ActivityQuery,
) -> Result<Vec<Activity>, RetrievalError> {
    // Dividends are sparse; filtering a capped page would under-report them
    let fetch_limit = (!query.dividends_only).then_some(query.limit);
    let mut raw = service
        .activities(account_id, fetch_limit)
        .map_err(|e| {
            RetrievalError::new(RecordKind::Activities, e)
                .with_context(format!("account {}", account_id))
        })?;

    if query.dividends_only {
        raw.retain(|activity| {
            is_dividend(
                activity.activity_type.as_deref().unwrap_or_default(),
                activity.description.as_deref().unwrap_or_default(),
            )
        });
    }

    // Newest first; stable, with unparseable timestamps last
    raw.sort_by_key(|activity| Reverse(occurred_at(activity)));
    raw.truncate(query.limit);

    Ok(raw
        .iter()
        .map(|activity| transform_activity(activity, resolver, label, &query.base_currency))
        .collect())
}

fn occurred_at(activity: &RawActivity) -> Option<NaiveDateTime> {
    activity.occurred_at.as_deref().and_then(parse_timestamp)
}

/// UTC instant of an upstream timestamp: RFC 3339, `YYYY-MM-DD HH:MM:SS`, or a leading date
fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.naive_utc());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed);
    }
    timestamp
        .get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}

fn transform_activity(
    raw: &RawActivity,
    resolver: &mut SecurityResolver<'_>,
    label: Option<&str>,
    base_currency: &str,
) -> Activity {
    let sign = if raw.amount_sign.as_deref() == Some("positive") {
        CREDIT_SIGN
    } else {
        DEBIT_SIGN
    };

    Activity {
        date: format_date(raw.occurred_at.as_deref().unwrap_or_default()),
        activity_type: raw
            .activity_type
            .clone()
            .unwrap_or_else(|| MISSING.to_string()),
        description: enhance_description(raw, resolver),
        amount: raw.amount.unwrap_or(Decimal::ZERO).abs(),
        currency: raw
            .currency
            .clone()
            .unwrap_or_else(|| base_currency.to_string()),
        sign: sign.to_string(),
        account_label: label.map(str::to_string),
    }
}

/// `YYYY-MM-DD` from an RFC 3339 timestamp, else its first ten characters, else `N/A`
pub fn format_date(timestamp: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return parsed.format("%Y-%m-%d").to_string();
    }
    match timestamp.get(..10) {
        Some(prefix) => prefix.to_string(),
        None => MISSING.to_string(),
    }
}

/// Replace security ids in the description with display names.
fn enhance_description(raw: &RawActivity, resolver: &mut SecurityResolver<'_>) -> String {
    let description = raw.description.clone().unwrap_or_else(|| MISSING.to_string());

    let security_id = raw
        .referenced_security_id()
        .map(str::to_string)
        .or_else(|| {
            SECURITY_ID_REGEX
                .captures(&description)
                .map(|caps| caps[1].to_string())
        });
    let Some(security_id) = security_id else {
        return description;
    };

    let name = resolver.display_name(&security_id);
    let enhanced = SECURITY_ID_REGEX
        .replace_all(&description, NoExpand(&name))
        .into_owned();

    let is_buy = raw
        .activity_type
        .as_deref()
        .is_some_and(|t| t.contains("DIY_BUY"));
    if is_buy && !enhanced.contains(&name) {
        if let Some(caps) = BUY_QUANTITY_REGEX.captures(&enhanced) {
            return format!("Dividend reinvestment: buy {} {}", &caps[1], name);
        }
    }
    enhanced
}
