//! HTTP implementation of [`WealthService`] and [`LoginBackend`].
//!
//! Login uses the OAuth password grant (with the OTP header for 2FA); data
//! comes from the GraphQL endpoint using the bearer token of the session.

mod queries;

use crate::auth::{LoginBackend, Session};
use crate::error::ServiceError;
use crate::schema::{RawAccount, RawActivity, RawPosition, RawSecurity};
use crate::service::WealthService;
use chrono::{Duration, Utc};
use log::{debug, trace, warn};
use queries::{
    AccountsData, ActivitiesData, Connection, FETCH_ACCOUNTS, FETCH_ACTIVITIES, FETCH_POSITIONS,
    FETCH_SECURITY, GraphqlResponse, PositionsData, SecurityData, TokenResponse,
};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub const OAUTH_TOKEN_URL: &str = "https://api.production.wealthsimple.com/v1/oauth/v2/token";
pub const GRAPHQL_URL: &str = "https://my.wealthsimple.com/graphql";

const CLIENT_ID: &str = "4da53ac2b03225bed1550eba8e4611e086c7b905a3855e6ed12ea08c246758fa";
const SCOPE: &str = "invest.read trade.read tax.read";
const OTP_HEADER: &str = "x-wealthsimple-otp";
const OTP_REQUIRED_HEADER: &str = "x-wealthsimple-otp-required";
const PAGE_SIZE: usize = 100;
/// Upper bound on pages followed for one listing
const MAX_PAGES: usize = 50;

/// Where the client sends its requests; overridable for local testing
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub token_url: String,
    pub graphql_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: OAUTH_TOKEN_URL.to_string(),
            graphql_url: GRAPHQL_URL.to_string(),
        }
    }
}

pub struct WealthsimpleBackend {
    http: Client,
    endpoints: Endpoints,
}

impl WealthsimpleBackend {
    pub fn new() -> Result<Self, ServiceError> {
        Self::with_endpoints(Endpoints::default())
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .user_agent(concat!("wealthgrabber/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;
        Ok(Self { http, endpoints })
    }
}

impl LoginBackend for WealthsimpleBackend {
    type Service = WealthsimpleClient;

    fn login(
        &self,
        username: &str,
        password: &str,
        otp: Option<&str>,
    ) -> Result<Session, ServiceError> {
        let body = json!({
            "grant_type": "password",
            "username": username,
            "password": password,
            "skip_provision": "true",
            "scope": SCOPE,
            "client_id": CLIENT_ID,
        });

        let mut request = self.http.post(&self.endpoints.token_url).json(&body);
        if let Some(code) = otp {
            request = request.header(OTP_HEADER, code);
        }
        let response = request.send().map_err(transport)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let otp_required = response
                .headers()
                .get(OTP_REQUIRED_HEADER)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with("required"));
            return Err(if otp_required && otp.is_none() {
                ServiceError::OtpRequired
            } else {
                ServiceError::LoginFailed
            });
        }
        let token: TokenResponse = decode(check_status(response)?)?;

        Ok(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            identity_id: token.identity_canonical_id,
            expires_at: token
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        })
    }

    fn connect(&self, session: Session) -> Result<Self::Service, ServiceError> {
        if session.is_expired(Utc::now()) {
            return Err(ServiceError::Unauthorized);
        }
        Ok(WealthsimpleClient {
            http: self.http.clone(),
            graphql_url: self.endpoints.graphql_url.clone(),
            session,
        })
    }
}

/// A GraphQL client bound to one authenticated session.
pub struct WealthsimpleClient {
    http: Client,
    graphql_url: String,
    session: Session,
}

impl WealthsimpleClient {
    fn identity_id(&self) -> Result<&str, ServiceError> {
        self.session
            .identity_id
            .as_deref()
            .ok_or_else(|| ServiceError::Malformed("session carries no identity id".to_string()))
    }

    fn graphql<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, ServiceError> {
        debug!("GraphQL {}", operation);
        let response = self
            .http
            .post(&self.graphql_url)
            .bearer_auth(&self.session.access_token)
            .header("x-ws-profile", "trade")
            .json(&json!({
                "operationName": operation,
                "query": query,
                "variables": variables,
            }))
            .send()
            .map_err(transport)?;

        let envelope: GraphqlResponse<T> = decode(check_status(response)?)?;
        if let Some(first) = envelope.errors.first() {
            return Err(ServiceError::Malformed(format!(
                "{} failed: {}",
                operation, first.message
            )));
        }
        envelope
            .data
            .ok_or_else(|| ServiceError::Malformed(format!("{} returned no data", operation)))
    }
}

impl WealthService for WealthsimpleClient {
    fn accounts(&self) -> Result<Vec<RawAccount>, ServiceError> {
        let identity_id = self.identity_id()?;
        collect_pages(None, |cursor, first| {
            let data: AccountsData = self.graphql(
                "FetchAllAccounts",
                FETCH_ACCOUNTS,
                json!({ "identityId": identity_id, "first": first, "cursor": cursor }),
            )?;
            Ok(data.identity.accounts)
        })
    }

    fn activities(
        &self,
        account_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RawActivity>, ServiceError> {
        collect_pages(limit, |cursor, first| {
            let data: ActivitiesData = self.graphql(
                "FetchActivityFeedItems",
                FETCH_ACTIVITIES,
                json!({ "accountIds": [account_id], "first": first, "cursor": cursor }),
            )?;
            Ok(data.activity_feed_items)
        })
    }

    fn positions(&self, currency: &str) -> Result<Vec<RawPosition>, ServiceError> {
        let identity_id = self.identity_id()?;
        collect_pages(None, |cursor, first| {
            let data: PositionsData = self.graphql(
                "FetchIdentityPositions",
                FETCH_POSITIONS,
                json!({
                    "identityId": identity_id,
                    "currency": currency,
                    "first": first,
                    "cursor": cursor,
                }),
            )?;
            Ok(data.identity.financials.current.positions)
        })
    }

    fn security(&self, security_id: &str) -> Result<Option<RawSecurity>, ServiceError> {
        let data: SecurityData =
            self.graphql("FetchSecurityMarketData", FETCH_SECURITY, json!({ "id": security_id }))?;
        Ok(data.security)
    }
}

/// Follow a cursor-paginated connection until it ends, `limit` nodes are
/// collected, or [`MAX_PAGES`] pages have been read.
///
/// `fetch_page` receives the cursor to resume from and the page size to ask for.
fn collect_pages<T, F>(limit: Option<usize>, mut fetch_page: F) -> Result<Vec<T>, ServiceError>
where
    F: FnMut(Option<&str>, usize) -> Result<Connection<T>, ServiceError>,
{
    let mut nodes = Vec::new();
    let mut cursor: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let remaining = limit.map_or(PAGE_SIZE, |limit| limit.saturating_sub(nodes.len()));
        if remaining == 0 {
            return Ok(nodes);
        }

        let page = fetch_page(cursor.as_deref(), remaining.min(PAGE_SIZE))?;
        let next = page.next_cursor();
        nodes.extend(page.into_nodes());

        if let Some(limit) = limit
            && nodes.len() >= limit
        {
            nodes.truncate(limit);
            return Ok(nodes);
        }
        match next {
            Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
            _ => return Ok(nodes),
        }
    }

    warn!(
        "Stopped after {} pages ({} records); results may be incomplete",
        MAX_PAGES,
        nodes.len()
    );
    Ok(nodes)
}

fn transport(e: reqwest::Error) -> ServiceError {
    ServiceError::Transport(e.to_string())
}

fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ServiceError::Unauthorized);
    }
    let message = response.text().unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        message: message.chars().take(200).collect(),
    })
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let body = response.text().map_err(transport)?;
    trace!("response: {} bytes", body.len());
    serde_json::from_str(&body).map_err(|e| ServiceError::Malformed(e.to_string()))
}
