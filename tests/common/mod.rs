#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use activities_client::{
    AccountGateway, Activity, ActivityFormValues, ActivityGateway, ApiError, LoginCredentials,
    Profile, ProfileGateway, User,
};

// Scripted in-memory stand-in for the HTTP gateway. `fail_next` poisons the
// next call only, so a retry afterwards goes through.
#[derive(Default)]
pub struct StubGateway {
    pub remote: Mutex<Vec<Activity>>,
    pub created: Mutex<Vec<ActivityFormValues>>,
    pub token: Mutex<Option<String>>,
    fail_next: Mutex<Option<ApiError>>,
    calls: AtomicUsize,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote(activities: Vec<Activity>) -> Self {
        Self {
            remote: Mutex::new(activities),
            ..Self::default()
        }
    }

    pub fn fail_next(&self, err: ApiError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl ActivityGateway for &StubGateway {
    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        self.hit()?;
        Ok(self.remote.lock().unwrap().clone())
    }

    async fn load_activity(&self, id: &str) -> Result<Activity, ApiError> {
        self.hit()?;
        self.remote
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn create_activity(&self, values: &ActivityFormValues) -> Result<(), ApiError> {
        self.hit()?;
        self.created.lock().unwrap().push(values.clone());
        Ok(())
    }

    async fn update_activity(&self, _values: &ActivityFormValues) -> Result<(), ApiError> {
        self.hit()
    }

    async fn delete_activity(&self, _id: &str) -> Result<(), ApiError> {
        self.hit()
    }

    async fn attend_activity(&self, _id: &str) -> Result<(), ApiError> {
        self.hit()
    }
}

impl AccountGateway for &StubGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, ApiError> {
        self.hit()?;
        if credentials.password == "wrong" {
            return Err(ApiError::Unauthorized);
        }
        Ok(sample_user("bob"))
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.hit()?;
        match self.token.lock().unwrap().as_deref() {
            Some(_) => Ok(sample_user("bob")),
            None => Err(ApiError::Unauthorized),
        }
    }

    fn set_token(&self, token: Option<&str>) {
        *self.token.lock().unwrap() = token.map(|t| t.to_string());
    }
}

impl ProfileGateway for &StubGateway {
    async fn load_profile(&self, username: &str) -> Result<Profile, ApiError> {
        self.hit()?;
        Ok(Profile::from(&sample_user(username)))
    }
}

pub fn sample_user(username: &str) -> User {
    User {
        username: username.to_string(),
        display_name: username.to_string(),
        token: format!("token-{}", username),
        image: None,
    }
}

pub fn sample_activity(id: &str, title: &str, date: &str, host: &str) -> Activity {
    Activity {
        id: id.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        description: "5k".to_string(),
        category: "culture".to_string(),
        city: "Springfield".to_string(),
        venue: "Park".to_string(),
        host_username: host.to_string(),
        is_cancelled: false,
        attendees: vec![Profile::from(&sample_user(host))],
        is_going: false,
        is_host: false,
    }
}

pub fn run_club_values(id: &str) -> ActivityFormValues {
    ActivityFormValues {
        id: id.to_string(),
        title: "Run club".to_string(),
        category: "culture".to_string(),
        description: "5k".to_string(),
        date: "2025-01-01T18:00".to_string(),
        city: "Springfield".to_string(),
        venue: "Park".to_string(),
    }
}
