//! Raw upstream records.
//!
//! Field names follow the service's camelCase JSON. Every field is optional:
//! the service omits what it does not know, and defaulting is the retrieval
//! layer's job. Amounts arrive as JSON strings or numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoney {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccount {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub unified_account_type: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub financials: Option<RawAccountFinancials>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccountFinancials {
    #[serde(default)]
    pub current_combined: Option<RawCombinedFinancials>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCombinedFinancials {
    #[serde(default)]
    pub net_liquidation_value: Option<RawMoney>,
}

impl RawAccount {
    pub fn net_liquidation_value(&self) -> Option<&RawMoney> {
        self.financials
            .as_ref()?
            .current_combined
            .as_ref()?
            .net_liquidation_value
            .as_ref()
    }
}

/// Reference to a security inside an activity: either a bare id or an object carrying one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSecurityRef {
    Id(String),
    Object {
        #[serde(default)]
        id: Option<String>,
    },
}

impl RawSecurityRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            RawSecurityRef::Id(id) => Some(id.as_str()),
            RawSecurityRef::Object { id } => id.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivity {
    #[serde(default, rename = "type")]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Option<Decimal>,
    /// `"positive"` for credits; anything else is a debit
    #[serde(default)]
    pub amount_sign: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub security_id: Option<String>,
    #[serde(default)]
    pub security: Option<RawSecurityRef>,
}

impl RawActivity {
    /// Security referenced by this activity, preferring the structured reference
    pub fn referenced_security_id(&self) -> Option<&str> {
        self.security
            .as_ref()
            .and_then(RawSecurityRef::id)
            .or(self.security_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawIdRef {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosition {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub accounts: Vec<RawIdRef>,
    #[serde(default)]
    pub security: Option<RawIdRef>,
    #[serde(default)]
    pub total_value: Option<RawMoney>,
    #[serde(default)]
    pub book_value: Option<RawMoney>,
}

impl RawPosition {
    pub fn held_in(&self, account_id: &str) -> bool {
        self.accounts
            .iter()
            .any(|account| account.id.as_deref() == Some(account_id))
    }

    pub fn security_id(&self) -> Option<&str> {
        self.security
            .as_ref()
            .and_then(|security| security.id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSecurity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub stock: Option<RawStock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStock {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Accept `"12.50"`, `12.5`, `1e3` or `null` for a decimal field.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => {
            parse_decimal(s.trim()).map(Some).map_err(D::Error::custom)
        }
        Some(serde_json::Value::Number(n)) => {
            parse_decimal(&n.to_string()).map(Some).map_err(D::Error::custom)
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected a decimal amount, found {}",
            other
        ))),
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, String> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|e| format!("invalid decimal '{}': {}", s, e))
}
