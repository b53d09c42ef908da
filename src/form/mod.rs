pub mod activity_form;

pub use activity_form::{validate_values, ActivityForm, FormError, FormField, FormState};
