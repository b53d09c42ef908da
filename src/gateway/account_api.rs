use crate::error::ApiError;
use crate::gateway::HttpGateway;
use crate::models::{LoginCredentials, User};

pub async fn login(
    gateway: &HttpGateway,
    credentials: &LoginCredentials,
) -> Result<User, ApiError> {
    gateway.post_json_response("/account/login", credentials).await
}

pub async fn current_user(gateway: &HttpGateway) -> Result<User, ApiError> {
    gateway.get_json("/account").await
}
