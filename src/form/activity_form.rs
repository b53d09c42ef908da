use thiserror::Error;
use uuid::Uuid;

use crate::error::{ApiError, FieldError};
use crate::gateway::ActivityGateway;
use crate::models::ActivityFormValues;
use crate::stores::ActivityStore;

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle,
    LoadingInitial,
    Editing,
    Submitting,
    Navigated(String),
    EditingWithError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Category,
    Date,
    Venue,
    City,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("nothing changed")]
    Unchanged,

    #[error("form is not ready to submit")]
    NotEditable,

    #[error(transparent)]
    Gateway(#[from] ApiError),
}

// Controller for a single create-or-edit session. It owns a transient
// staging copy of the record, never a shared reference into the store.
pub struct ActivityForm {
    state: FormState,
    pending_id: Option<String>,
    values: ActivityFormValues,
    baseline: ActivityFormValues,
}

impl ActivityForm {
    pub fn new() -> Self {
        Self {
            state: FormState::Idle,
            pending_id: None,
            values: ActivityFormValues::default(),
            baseline: ActivityFormValues::default(),
        }
    }

    // An identifier in the navigation context means an edit session that
    // loads first; no identifier means creation and editing starts at once.
    pub fn open(&mut self, id: Option<&str>) {
        match id {
            Some(id) => {
                self.pending_id = Some(id.to_string());
                self.values = ActivityFormValues::default();
                self.baseline = ActivityFormValues::default();
                self.state = FormState::LoadingInitial;
            }
            None => {
                self.pending_id = None;
                self.values = ActivityFormValues::default();
                self.baseline = ActivityFormValues::default();
                self.state = FormState::Editing;
            }
        }
    }

    // Hydrates the staging copy for the edit flow. On failure the form stays
    // in `LoadingInitial` so the caller can retry or navigate away.
    pub async fn load<G: ActivityGateway>(
        &mut self,
        store: &mut ActivityStore<G>,
    ) -> Result<(), ApiError> {
        let Some(id) = self.pending_id.clone() else {
            return Ok(());
        };

        let activity = store.load_activity(&id).await?;
        self.values = ActivityFormValues::from_activity(&activity);
        self.baseline = self.values.clone();
        self.state = FormState::Editing;
        Ok(())
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn values(&self) -> &ActivityFormValues {
        &self.values
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        if !self.is_editable() {
            return;
        }
        let value = value.into();
        match field {
            FormField::Title => self.values.title = value,
            FormField::Description => self.values.description = value,
            FormField::Category => self.values.category = value,
            FormField::Date => self.values.date = value,
            FormField::Venue => self.values.venue = value,
            FormField::City => self.values.city = value,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.baseline
    }

    pub fn errors(&self) -> Vec<FieldError> {
        validate_values(&self.values)
    }

    pub fn can_submit(&self) -> bool {
        self.is_editable() && self.errors().is_empty() && self.is_dirty()
    }

    fn is_editable(&self) -> bool {
        matches!(self.state, FormState::Editing | FormState::EditingWithError)
    }

    // Validates, decides create-vs-update, and navigates on success. Entered
    // values survive a failed submit; a fresh identifier is generated per
    // create attempt, so a retry after failure gets a new one.
    pub async fn submit<G: ActivityGateway>(
        &mut self,
        store: &mut ActivityStore<G>,
    ) -> Result<String, FormError> {
        if !self.is_editable() {
            return Err(FormError::NotEditable);
        }
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(FormError::Validation(errors));
        }
        if !self.is_dirty() {
            return Err(FormError::Unchanged);
        }

        let creating = self.pending_id.is_none();
        let mut values = self.values.clone();
        if creating && values.id.is_empty() {
            values.id = Uuid::new_v4().to_string();
        }

        self.state = FormState::Submitting;
        let result = if creating {
            store.create_activity(values).await
        } else {
            store.update_activity(values).await
        };

        match result {
            Ok(activity) => {
                self.state = FormState::Navigated(activity.id.clone());
                Ok(activity.id)
            }
            Err(err) => {
                self.state = FormState::EditingWithError;
                Err(FormError::Gateway(err))
            }
        }
    }

    // Detail-view target once the form has navigated.
    pub fn navigated_to(&self) -> Option<&str> {
        match &self.state {
            FormState::Navigated(id) => Some(id),
            _ => None,
        }
    }
}

impl Default for ActivityForm {
    fn default() -> Self {
        Self::new()
    }
}

// Declarative required-field rules. The identifier is exempt because the
// create flow generates it at submit time.
pub fn validate_values(values: &ActivityFormValues) -> Vec<FieldError> {
    let rules = [
        ("title", &values.title, "Activity title is required"),
        (
            "description",
            &values.description,
            "Activity description is required",
        ),
        ("category", &values.category, "Activity category is required"),
        ("date", &values.date, "Activity date is required"),
        ("venue", &values.venue, "Activity venue is required"),
        ("city", &values.city, "Activity city is required"),
    ];

    rules
        .into_iter()
        .filter(|(_, value, _)| value.trim().is_empty())
        .map(|(field, _, message)| FieldError::new(field, message))
        .collect()
}
