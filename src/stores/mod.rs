pub mod activity_store;
pub mod events;
pub mod profile_store;
pub mod user_store;

pub use activity_store::ActivityStore;
pub use events::{StoreEvent, Subscription};
pub use profile_store::ProfileStore;
pub use user_store::UserStore;
