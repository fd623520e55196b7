pub mod domain;
mod kind;

pub use domain::*;
pub use kind::RecordKind;
