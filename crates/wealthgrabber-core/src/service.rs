use crate::error::ServiceError;
use crate::schema::{RawAccount, RawActivity, RawPosition, RawSecurity};

/// The upstream brokerage, as seen by the retrieval functions.
///
/// Implementations return raw records exactly as delivered; all defaulting,
/// filtering and ordering happens on this side of the boundary.
pub trait WealthService {
    /// All accounts of the authenticated identity, in upstream order
    fn accounts(&self) -> Result<Vec<RawAccount>, ServiceError>;

    /// Activities of one account. `limit` caps the page size when set
    fn activities(
        &self,
        account_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RawActivity>, ServiceError>;

    /// Positions across all accounts, valued in `currency`
    fn positions(&self, currency: &str) -> Result<Vec<RawPosition>, ServiceError>;

    /// Market data for one security; `Ok(None)` when the service knows nothing about it
    fn security(&self, security_id: &str) -> Result<Option<RawSecurity>, ServiceError>;
}

impl<T: WealthService + ?Sized> WealthService for &T {
    fn accounts(&self) -> Result<Vec<RawAccount>, ServiceError> {
        (**self).accounts()
    }

    fn activities(
        &self,
        account_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RawActivity>, ServiceError> {
        (**self).activities(account_id, limit)
    }

    fn positions(&self, currency: &str) -> Result<Vec<RawPosition>, ServiceError> {
        (**self).positions(currency)
    }

    fn security(&self, security_id: &str) -> Result<Option<RawSecurity>, ServiceError> {
        (**self).security(security_id)
    }
}
