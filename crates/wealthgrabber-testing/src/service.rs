use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use wealthgrabber_core::ServiceError;
use wealthgrabber_core::WealthService;
use wealthgrabber_core::schema::{RawAccount, RawActivity, RawPosition, RawSecurity};

use crate::fixtures::raw_security;

/// One recorded request against the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Accounts,
    Activities {
        account_id: String,
        limit: Option<usize>,
    },
    Positions {
        currency: String,
    },
    Security(String),
}

/// In-memory brokerage.
///
/// Activities are returned in insertion order and cut to the requested page
/// size, the way the real feed pages. Clones share the call log.
#[derive(Debug, Clone, Default)]
pub struct FakeWealthService {
    accounts: Vec<RawAccount>,
    activities: HashMap<String, Vec<RawActivity>>,
    positions: Vec<RawPosition>,
    securities: HashMap<String, RawSecurity>,
    failing_securities: HashSet<String>,
    failing_activities: HashSet<String>,
    fail_accounts: bool,
    fail_positions: bool,
    calls: Rc<RefCell<Vec<Call>>>,
}

impl FakeWealthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, account: RawAccount) -> Self {
        self.accounts.push(account);
        self
    }

    pub fn with_activities(mut self, account_id: &str, activities: Vec<RawActivity>) -> Self {
        self.activities
            .entry(account_id.to_string())
            .or_default()
            .extend(activities);
        self
    }

    pub fn with_position(mut self, position: RawPosition) -> Self {
        self.positions.push(position);
        self
    }

    pub fn with_security(mut self, id: &str, symbol: &str, name: &str) -> Self {
        self.securities
            .insert(id.to_string(), raw_security(id, Some(symbol), Some(name)));
        self
    }

    pub fn with_raw_security(mut self, security: RawSecurity) -> Self {
        if let Some(id) = security.id.clone() {
            self.securities.insert(id, security);
        }
        self
    }

    /// Lookups of this id fail with a transport error
    pub fn with_failing_security(mut self, id: &str) -> Self {
        self.failing_securities.insert(id.to_string());
        self
    }

    pub fn with_failing_activities(mut self, account_id: &str) -> Self {
        self.failing_activities.insert(account_id.to_string());
        self
    }

    pub fn failing_accounts(mut self) -> Self {
        self.fail_accounts = true;
        self
    }

    pub fn failing_positions(mut self) -> Self {
        self.fail_positions = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn security_lookups(&self, id: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::Security(s) if s == id))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl WealthService for FakeWealthService {
    fn accounts(&self) -> Result<Vec<RawAccount>, ServiceError> {
        self.record(Call::Accounts);
        if self.fail_accounts {
            return Err(ServiceError::Unauthorized);
        }
        Ok(self.accounts.clone())
    }

    fn activities(
        &self,
        account_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RawActivity>, ServiceError> {
        self.record(Call::Activities {
            account_id: account_id.to_string(),
            limit,
        });
        if self.failing_activities.contains(account_id) {
            return Err(ServiceError::Transport("connection reset".to_string()));
        }
        let mut activities = self.activities.get(account_id).cloned().unwrap_or_default();
        if let Some(limit) = limit {
            activities.truncate(limit);
        }
        Ok(activities)
    }

    fn positions(&self, currency: &str) -> Result<Vec<RawPosition>, ServiceError> {
        self.record(Call::Positions {
            currency: currency.to_string(),
        });
        if self.fail_positions {
            return Err(ServiceError::Status {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(self.positions.clone())
    }

    fn security(&self, security_id: &str) -> Result<Option<RawSecurity>, ServiceError> {
        self.record(Call::Security(security_id.to_string()));
        if self.failing_securities.contains(security_id) {
            return Err(ServiceError::Transport("lookup timed out".to_string()));
        }
        Ok(self.securities.get(security_id).cloned())
    }
}
