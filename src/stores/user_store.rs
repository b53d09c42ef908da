use crate::error::ApiError;
use crate::gateway::AccountGateway;
use crate::models::{LoginCredentials, User};

// Session state for the signed-in user. The token is pushed into the
// gateway on login and dropped again on logout.
pub struct UserStore<G: AccountGateway> {
    gateway: G,
    user: Option<User>,
    loading: bool,
}

impl<G: AccountGateway> UserStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            user: None,
            loading: false,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<User, ApiError> {
        self.loading = true;
        let result = self.gateway.login(credentials).await;
        self.loading = false;

        let user = result?;
        self.gateway.set_token(Some(&user.token));
        self.user = Some(user.clone());
        Ok(user)
    }

    // Restores the session when a token is already known to the gateway.
    pub async fn load_current_user(&mut self) -> Result<User, ApiError> {
        self.loading = true;
        let result = self.gateway.current_user().await;
        self.loading = false;

        let user = result?;
        self.user = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.gateway.set_token(None);
        self.user = None;
    }
}
