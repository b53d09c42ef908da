use serde::{Deserialize, Serialize};

use crate::models::Profile;

// `is_going` and `is_host` are session-local: the store recomputes them
// against the signed-in user whenever a record enters its map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub category: String,
    pub city: String,
    pub venue: String,
    #[serde(default)]
    pub host_username: String,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub attendees: Vec<Profile>,
    #[serde(skip)]
    pub is_going: bool,
    #[serde(skip)]
    pub is_host: bool,
}

impl Activity {
    pub fn host(&self) -> Option<&Profile> {
        self.attendees
            .iter()
            .find(|a| a.username == self.host_username)
    }

    // Calendar-day part of the ISO date, used for grouping.
    pub fn date_key(&self) -> &str {
        self.date.get(0..10).unwrap_or(&self.date)
    }

    pub fn from_values(values: &ActivityFormValues) -> Self {
        Self {
            id: values.id.clone(),
            title: values.title.clone(),
            date: values.date.clone(),
            description: values.description.clone(),
            category: values.category.clone(),
            city: values.city.clone(),
            venue: values.venue.clone(),
            host_username: String::new(),
            is_cancelled: false,
            attendees: Vec::new(),
            is_going: false,
            is_host: false,
        }
    }

    // Merges the editable fields only. The identifier never changes once
    // assigned; attendees, host and cancellation state stay as they are.
    pub fn apply_values(&mut self, values: &ActivityFormValues) {
        self.title = values.title.clone();
        self.date = values.date.clone();
        self.description = values.description.clone();
        self.category = values.category.clone();
        self.city = values.city.clone();
        self.venue = values.venue.clone();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFormValues {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub date: String,
    pub city: String,
    pub venue: String,
}

impl ActivityFormValues {
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            id: activity.id.clone(),
            title: activity.title.clone(),
            category: activity.category.clone(),
            description: activity.description.clone(),
            date: activity.date.clone(),
            city: activity.city.clone(),
            venue: activity.venue.clone(),
        }
    }
}
