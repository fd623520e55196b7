//! Retrieval and authentication layer for wealthgrabber.
//!
//! Everything that talks to the brokerage lives behind [`WealthService`]:
//! the retrieval functions in [`accounts`], [`activities`] and [`assets`]
//! turn its raw, loosely-typed records into the flat records of
//! `wealthgrabber-types`, applying defaults, filters and name lookups on the
//! way. [`auth`] restores or creates the session that yields a service, and
//! [`client`] is the HTTP implementation used by the binary.
//!
//! ```no_run
//! use wealthgrabber_core::accounts::{get_accounts_data, AccountQuery};
//! use wealthgrabber_core::WealthService;
//!
//! fn print_totals(service: &dyn WealthService) -> Result<(), wealthgrabber_core::RetrievalError> {
//!     let accounts = get_accounts_data(service, &AccountQuery::default())?;
//!     for account in &accounts {
//!         println!("{} {} {}", account.number, account.value, account.currency);
//!     }
//!     Ok(())
//! }
//! ```

pub mod accounts;
pub mod activities;
pub mod assets;
pub mod auth;
pub mod client;
pub mod error;
pub mod filters;
pub mod schema;
pub mod securities;
pub mod service;

pub use error::{AuthError, RetrievalError, ServiceError, StoreError};
pub use filters::{FlagConflict, Liquidity, LiquidityFilter, PnlFilter, classify_liquidity};
pub use service::WealthService;

/// Currency used when the upstream record does not carry one
pub const DEFAULT_BASE_CURRENCY: &str = "CAD";
