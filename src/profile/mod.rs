pub mod events;
pub mod name;
pub mod record;
pub mod store;

pub use events::{ProfileEvent, SubscriptionId};
pub use name::normalize_name;
pub use record::{ProfileBook, ProfileRecord};
pub use store::ProfileStore;
