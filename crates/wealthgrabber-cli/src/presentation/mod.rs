pub mod formatters;
pub mod presenters;

pub use formatters::{Formatter, get_formatter};
pub use presenters::GroupLabel;
