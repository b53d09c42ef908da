pub mod account_api;
pub mod activities_api;
pub mod profiles_api;

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::{ApiError, FieldError};
use crate::models::{Activity, ActivityFormValues, LoginCredentials, Profile, User};

// Activity CRUD surface consumed by the activity store. Implemented over
// HTTP by `HttpGateway`; tests substitute scripted stubs.
#[allow(async_fn_in_trait)]
pub trait ActivityGateway {
    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError>;
    async fn load_activity(&self, id: &str) -> Result<Activity, ApiError>;
    async fn create_activity(&self, values: &ActivityFormValues) -> Result<(), ApiError>;
    async fn update_activity(&self, values: &ActivityFormValues) -> Result<(), ApiError>;
    async fn delete_activity(&self, id: &str) -> Result<(), ApiError>;
    async fn attend_activity(&self, id: &str) -> Result<(), ApiError>;
}

#[allow(async_fn_in_trait)]
pub trait AccountGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, ApiError>;
    async fn current_user(&self) -> Result<User, ApiError>;
    fn set_token(&self, token: Option<&str>);
}

#[allow(async_fn_in_trait)]
pub trait ProfileGateway {
    async fn load_profile(&self, username: &str) -> Result<Profile, ApiError>;
}

#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build http client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_token(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self.token.read().ok().and_then(|guard| guard.clone());
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.with_token(self.client.get(self.url(path)));
        let response = request.send().await.map_err(transport_error)?;
        read_json(response).await
    }

    pub(crate) async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let request = self.with_token(self.client.post(self.url(path))).json(body);
        let response = request.send().await.map_err(transport_error)?;
        read_unit(response).await
    }

    pub(crate) async fn post_json_response<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.with_token(self.client.post(self.url(path))).json(body);
        let response = request.send().await.map_err(transport_error)?;
        read_json(response).await
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let request = self.with_token(self.client.post(self.url(path)));
        let response = request.send().await.map_err(transport_error)?;
        read_unit(response).await
    }

    pub(crate) async fn put_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let request = self.with_token(self.client.put(self.url(path))).json(body);
        let response = request.send().await.map_err(transport_error)?;
        read_unit(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.with_token(self.client.delete(self.url(path)));
        let response = request.send().await.map_err(transport_error)?;
        read_unit(response).await
    }
}

impl ActivityGateway for HttpGateway {
    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        activities_api::list_activities(self).await
    }

    async fn load_activity(&self, id: &str) -> Result<Activity, ApiError> {
        activities_api::load_activity(self, id).await
    }

    async fn create_activity(&self, values: &ActivityFormValues) -> Result<(), ApiError> {
        activities_api::create_activity(self, values).await
    }

    async fn update_activity(&self, values: &ActivityFormValues) -> Result<(), ApiError> {
        activities_api::update_activity(self, values).await
    }

    async fn delete_activity(&self, id: &str) -> Result<(), ApiError> {
        activities_api::delete_activity(self, id).await
    }

    async fn attend_activity(&self, id: &str) -> Result<(), ApiError> {
        activities_api::attend_activity(self, id).await
    }
}

impl AccountGateway for HttpGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, ApiError> {
        account_api::login(self, credentials).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        account_api::current_user(self).await
    }

    fn set_token(&self, token: Option<&str>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token.map(|t| t.to_string());
        }
    }
}

impl ProfileGateway for HttpGateway {
    async fn load_profile(&self, username: &str) -> Result<Profile, ApiError> {
        profiles_api::load_profile(self, username).await
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    warn!("HTTP transport failure: {}", err);
    ApiError::NetworkError(err.to_string())
}

#[derive(Deserialize)]
struct ValidationBody {
    errors: BTreeMap<String, Vec<String>>,
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        404 => Err(ApiError::NotFound),
        401 | 403 => Err(ApiError::Unauthorized),
        400 | 422 => {
            let body = response.text().await.unwrap_or_default();
            Err(parse_validation_body(&body))
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            warn!("API returned {}: {}", status, body);
            Err(ApiError::ServerError(status.to_string()))
        }
    }
}

fn parse_validation_body(body: &str) -> ApiError {
    let Ok(parsed) = serde_json::from_str::<ValidationBody>(body) else {
        return ApiError::ValidationFailed(Vec::new());
    };

    let mut errors = Vec::new();
    for (field, messages) in parsed.errors {
        for message in messages {
            errors.push(FieldError::new(field.clone(), message));
        }
    }
    ApiError::ValidationFailed(errors)
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    response.json().await.map_err(|e| {
        warn!("API response JSON parse failed: {}", e);
        ApiError::ServerError(format!("invalid response body: {}", e))
    })
}

async fn read_unit(response: reqwest::Response) -> Result<(), ApiError> {
    check_status(response).await.map(|_| ())
}
