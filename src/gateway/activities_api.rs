use crate::error::ApiError;
use crate::gateway::HttpGateway;
use crate::models::{Activity, ActivityFormValues};

pub async fn list_activities(gateway: &HttpGateway) -> Result<Vec<Activity>, ApiError> {
    gateway.get_json("/activities").await
}

pub async fn load_activity(gateway: &HttpGateway, id: &str) -> Result<Activity, ApiError> {
    gateway.get_json(&format!("/activities/{}", id)).await
}

pub async fn create_activity(
    gateway: &HttpGateway,
    values: &ActivityFormValues,
) -> Result<(), ApiError> {
    gateway.post_json("/activities", values).await
}

pub async fn update_activity(
    gateway: &HttpGateway,
    values: &ActivityFormValues,
) -> Result<(), ApiError> {
    gateway
        .put_json(&format!("/activities/{}", values.id), values)
        .await
}

pub async fn delete_activity(gateway: &HttpGateway, id: &str) -> Result<(), ApiError> {
    gateway.delete(&format!("/activities/{}", id)).await
}

// The attend endpoint is a toggle: it flips the caller's attendance, or the
// cancellation state when the caller is the host.
pub async fn attend_activity(gateway: &HttpGateway, id: &str) -> Result<(), ApiError> {
    gateway.post_empty(&format!("/activities/{}/attend", id)).await
}
