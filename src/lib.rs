pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod models;
pub mod stores;

pub use config::ClientConfig;
pub use error::{ApiError, FieldError};
pub use form::{ActivityForm, FormError, FormField, FormState};
pub use gateway::{AccountGateway, ActivityGateway, HttpGateway, ProfileGateway};
pub use models::{Activity, ActivityFormValues, LoginCredentials, Profile, User};
pub use stores::{ActivityStore, ProfileStore, StoreEvent, Subscription, UserStore};
