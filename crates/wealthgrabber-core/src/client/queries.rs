//! GraphQL documents and the response envelopes they decode into.

use crate::schema::{RawAccount, RawActivity, RawPosition, RawSecurity};
use serde::Deserialize;

pub const FETCH_ACCOUNTS: &str = r#"
query FetchAllAccounts($identityId: ID!, $first: Int, $cursor: String) {
  identity(id: $identityId) {
    accounts(filter: {}, first: $first, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      edges {
        node {
          id
          description
          nickname
          unifiedAccountType
          number
          financials {
            currentCombined {
              netLiquidationValue { amount currency }
            }
          }
        }
      }
    }
  }
}
"#;

pub const FETCH_ACTIVITIES: &str = r#"
query FetchActivityFeedItems($accountIds: [String!], $first: Int, $cursor: Cursor) {
  activityFeedItems(
    first: $first
    after: $cursor
    condition: { accountIds: $accountIds }
    orderBy: OCCURRED_AT_DESC
  ) {
    pageInfo { hasNextPage endCursor }
    edges {
      node {
        type
        subType
        description
        occurredAt
        amount
        amountSign
        currency
        securityId
      }
    }
  }
}
"#;

pub const FETCH_POSITIONS: &str = r#"
query FetchIdentityPositions(
  $identityId: ID!
  $currency: Currency!
  $first: Int
  $cursor: String
) {
  identity(id: $identityId) {
    financials(filter: {}) {
      current(currency: $currency) {
        positions(first: $first, after: $cursor) {
          pageInfo { hasNextPage endCursor }
          edges {
            node {
              id
              quantity
              accounts { id }
              security { id }
              totalValue { amount currency }
              bookValue { amount currency }
            }
          }
        }
      }
    }
  }
}
"#;

pub const FETCH_SECURITY: &str = r#"
query FetchSecurityMarketData($id: ID!) {
  security(id: $id) {
    id
    stock { symbol name }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default = "Vec::new")]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(default)]
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    /// Cursor of the following page, if the connection says there is one
    pub fn next_cursor(&self) -> Option<String> {
        self.page_info
            .as_ref()
            .filter(|info| info.has_next_page)
            .and_then(|info| info.end_cursor.clone())
    }

    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountsData {
    pub identity: AccountsIdentity,
}

#[derive(Debug, Deserialize)]
pub struct AccountsIdentity {
    pub accounts: Connection<RawAccount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitiesData {
    pub activity_feed_items: Connection<RawActivity>,
}

#[derive(Debug, Deserialize)]
pub struct PositionsData {
    pub identity: PositionsIdentity,
}

#[derive(Debug, Deserialize)]
pub struct PositionsIdentity {
    pub financials: PositionsFinancials,
}

#[derive(Debug, Deserialize)]
pub struct PositionsFinancials {
    pub current: PositionsCurrent,
}

#[derive(Debug, Deserialize)]
pub struct PositionsCurrent {
    pub positions: Connection<RawPosition>,
}

#[derive(Debug, Deserialize)]
pub struct SecurityData {
    #[serde(default)]
    pub security: Option<RawSecurity>,
}

/// Token endpoint reply
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub identity_canonical_id: Option<String>,
}
