mod account;
mod activity;
mod position;

pub use account::Account;
pub use activity::{Activity, CREDIT_SIGN, DEBIT_SIGN};
pub use position::{Position, pnl_ratio};
