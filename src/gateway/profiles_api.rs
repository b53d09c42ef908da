use crate::error::ApiError;
use crate::gateway::HttpGateway;
use crate::models::Profile;

pub async fn load_profile(gateway: &HttpGateway, username: &str) -> Result<Profile, ApiError> {
    gateway.get_json(&format!("/profiles/{}", username)).await
}
