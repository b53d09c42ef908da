use std::collections::HashMap;

use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::ActivityGateway;
use crate::models::{Activity, ActivityFormValues, Profile, User};
use crate::stores::events::{StoreEvent, Subscribers, Subscription};

// Client-side authoritative cache of activity records. The store owns the
// identifier -> record map exclusively; callers only ever get clones, so a
// half-edited staging copy can never leak into the map.
pub struct ActivityStore<G: ActivityGateway> {
    gateway: G,
    registry: HashMap<String, Activity>,
    current_user: Option<User>,
    loading_initial: bool,
    loading: bool,
    subscribers: Subscribers,
}

impl<G: ActivityGateway> ActivityStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            registry: HashMap::new(),
            current_user: None,
            loading_initial: false,
            loading: false,
            subscribers: Subscribers::new(),
        }
    }

    pub fn set_current_user(&mut self, user: Option<User>) {
        self.current_user = user;
        let current = self.current_user.clone();
        for activity in self.registry.values_mut() {
            apply_session_flags(activity, current.as_ref());
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn loading_initial(&self) -> bool {
        self.loading_initial
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.registry.get(id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn subscribe(&mut self) -> Subscription {
        self.subscribers.subscribe()
    }

    pub fn unsubscribe(&mut self, id: u64) {
        self.subscribers.unsubscribe(id);
    }

    pub fn activities_by_date(&self) -> Vec<&Activity> {
        let mut list: Vec<&Activity> = self.registry.values().collect();
        list.sort_by(|a, b| a.date.cmp(&b.date));
        list
    }

    // Records bucketed per calendar day, buckets in date order.
    pub fn grouped_by_date(&self) -> Vec<(String, Vec<&Activity>)> {
        let mut groups: Vec<(String, Vec<&Activity>)> = Vec::new();
        for activity in self.activities_by_date() {
            let key = activity.date_key();
            match groups.last_mut() {
                Some((current, bucket)) if current == key => bucket.push(activity),
                _ => groups.push((key.to_string(), vec![activity])),
            }
        }
        groups
    }

    pub async fn load_activities(&mut self) -> Result<(), ApiError> {
        self.set_loading_initial(true);
        let result = self.gateway.list_activities().await;
        self.set_loading_initial(false);

        let activities = result?;
        for activity in activities {
            self.set_activity(activity);
        }
        Ok(())
    }

    pub async fn load_activity(&mut self, id: &str) -> Result<Activity, ApiError> {
        if let Some(activity) = self.registry.get(id) {
            return Ok(activity.clone());
        }

        self.set_loading_initial(true);
        let result = self.gateway.load_activity(id).await;
        self.set_loading_initial(false);

        let activity = result?;
        Ok(self.set_activity(activity))
    }

    // A missing identifier gets a freshly generated one; it never changes
    // afterwards. On failure the map stays untouched.
    pub async fn create_activity(
        &mut self,
        mut values: ActivityFormValues,
    ) -> Result<Activity, ApiError> {
        if values.id.is_empty() {
            values.id = Uuid::new_v4().to_string();
        }

        self.set_loading(true);
        let result = self.gateway.create_activity(&values).await;
        self.set_loading(false);

        if let Err(err) = result {
            warn!("Create failed for activity {}: {}", values.id, err);
            return Err(err);
        }

        let mut activity = Activity::from_values(&values);
        if let Some(user) = self.current_user.as_ref() {
            activity.host_username = user.username.clone();
            activity.attendees = vec![Profile::from(user)];
        }
        Ok(self.set_activity(activity))
    }

    // Fails closed: the cached entry is replaced only after the gateway
    // confirmed the write, and only its editable fields change.
    pub async fn update_activity(
        &mut self,
        values: ActivityFormValues,
    ) -> Result<Activity, ApiError> {
        self.set_loading(true);
        let result = self.gateway.update_activity(&values).await;
        self.set_loading(false);

        if let Err(err) = result {
            warn!("Update failed for activity {}: {}", values.id, err);
            return Err(err);
        }

        let activity = match self.registry.get(&values.id) {
            Some(existing) => {
                let mut merged = existing.clone();
                merged.apply_values(&values);
                merged
            }
            None => Activity::from_values(&values),
        };
        Ok(self.set_activity(activity))
    }

    pub async fn delete_activity(&mut self, id: &str) -> Result<(), ApiError> {
        self.set_loading(true);
        let result = self.gateway.delete_activity(id).await;
        self.set_loading(false);

        result?;
        if self.registry.remove(id).is_some() {
            self.subscribers
                .emit(StoreEvent::ActivityRemoved(id.to_string()));
        }
        Ok(())
    }

    // Toggles the signed-in user's attendance.
    pub async fn update_attendance(&mut self, id: &str) -> Result<(), ApiError> {
        let Some(user) = self.current_user.clone() else {
            return Err(ApiError::Unauthorized);
        };

        self.set_loading(true);
        let result = self.gateway.attend_activity(id).await;
        self.set_loading(false);

        result?;
        if let Some(activity) = self.registry.get_mut(id) {
            if activity.is_going {
                activity.attendees.retain(|a| a.username != user.username);
                activity.is_going = false;
            } else {
                activity.attendees.push(Profile::from(&user));
                activity.is_going = true;
            }
            self.subscribers
                .emit(StoreEvent::ActivityUpserted(id.to_string()));
        }
        Ok(())
    }

    // Host-only: the API treats the host hitting the attend endpoint as a
    // cancel/reactivate toggle.
    pub async fn cancel_activity_toggle(&mut self, id: &str) -> Result<(), ApiError> {
        self.set_loading(true);
        let result = self.gateway.attend_activity(id).await;
        self.set_loading(false);

        result?;
        if let Some(activity) = self.registry.get_mut(id) {
            activity.is_cancelled = !activity.is_cancelled;
            self.subscribers
                .emit(StoreEvent::ActivityUpserted(id.to_string()));
        }
        Ok(())
    }

    fn set_activity(&mut self, mut activity: Activity) -> Activity {
        apply_session_flags(&mut activity, self.current_user.as_ref());
        let id = activity.id.clone();
        self.registry.insert(id.clone(), activity.clone());
        self.subscribers.emit(StoreEvent::ActivityUpserted(id));
        activity
    }

    fn set_loading_initial(&mut self, value: bool) {
        self.loading_initial = value;
        self.subscribers.emit(StoreEvent::LoadingInitial(value));
    }

    fn set_loading(&mut self, value: bool) {
        self.loading = value;
        self.subscribers.emit(StoreEvent::Loading(value));
    }
}

fn apply_session_flags(activity: &mut Activity, user: Option<&User>) {
    match user {
        Some(user) => {
            activity.is_going = activity
                .attendees
                .iter()
                .any(|a| a.username == user.username);
            activity.is_host = activity.host_username == user.username;
        }
        None => {
            activity.is_going = false;
            activity.is_host = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::apply_session_flags;
    use crate::models::{Activity, ActivityFormValues, Profile, User};

    fn user(username: &str) -> User {
        User {
            username: username.to_string(),
            display_name: username.to_string(),
            token: "token".to_string(),
            image: None,
        }
    }

    fn activity(id: &str, host: &str, attendees: &[&str]) -> Activity {
        let mut activity = Activity::from_values(&ActivityFormValues {
            id: id.to_string(),
            title: "Padel".to_string(),
            category: "sport".to_string(),
            description: "2v2".to_string(),
            date: "2025-06-01T19:00".to_string(),
            city: "Utrecht".to_string(),
            venue: "Baan 4".to_string(),
        });
        activity.host_username = host.to_string();
        activity.attendees = attendees.iter().map(|name| Profile::from(&user(name))).collect();
        activity
    }

    #[test]
    fn session_flags_follow_the_signed_in_user() {
        let mut a = activity("a1", "bob", &["bob", "jane"]);

        apply_session_flags(&mut a, Some(&user("jane")));
        assert!(a.is_going);
        assert!(!a.is_host);

        apply_session_flags(&mut a, Some(&user("bob")));
        assert!(a.is_going);
        assert!(a.is_host);

        apply_session_flags(&mut a, None);
        assert!(!a.is_going);
        assert!(!a.is_host);
    }

    #[test]
    fn date_key_is_the_calendar_day() {
        let a = activity("a1", "bob", &[]);
        assert_eq!(a.date_key(), "2025-06-01");
    }
}
