use crate::error::ApiError;
use crate::gateway::ProfileGateway;
use crate::models::Profile;

pub struct ProfileStore<G: ProfileGateway> {
    gateway: G,
    profile: Option<Profile>,
    loading_profile: bool,
}

impl<G: ProfileGateway> ProfileStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            profile: None,
            loading_profile: false,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn loading_profile(&self) -> bool {
        self.loading_profile
    }

    pub async fn load_profile(&mut self, username: &str) -> Result<Profile, ApiError> {
        self.loading_profile = true;
        let result = self.gateway.load_profile(username).await;
        self.loading_profile = false;

        let profile = result?;
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    pub fn clear(&mut self) {
        self.profile = None;
    }
}
