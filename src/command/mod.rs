mod action;
mod history;

pub use action::{ActionId, Payload};
pub use history::{DEFAULT_HISTORY_CAPACITY, SnapshotHistory};
