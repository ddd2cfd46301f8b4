pub mod chart;
pub mod coin_settings;
pub mod diff;
pub mod error;
pub mod fee;
pub mod filter;
pub mod format;
pub mod list;
pub mod presenter;
pub mod snapshot;
pub mod status;
pub mod types;
pub mod view_item;

#[cfg(test)]
pub(crate) mod test_util;

pub use error::CoreError;
pub use status::TransactionStatus;
pub use types::{BlockHeight, Threshold};
pub use view_item::{TransactionViewItem, ViewItemFactory};
