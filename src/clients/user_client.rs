use crate::{
    clients::ApiTransport,
    error::{ApiError, Result},
    models::User,
};
use tracing::{debug, error, info};

const USERS_PATH: &str = "users";

#[derive(Debug, Clone)]
pub struct UserClient {
    transport: ApiTransport,
}

impl UserClient {
    /// Create a new UserClient on top of a shared transport
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// Create a new UserClient with its own transport for the given base URL
    pub fn connect(base_url: &str) -> Result<Self> {
        info!("Using user service at: {}", base_url);
        Ok(Self::new(ApiTransport::new(base_url)?))
    }

    /// Fetch every user profile
    pub async fn fetch_all(&self) -> Result<Vec<User>> {
        debug!("Fetching users");

        let users: Vec<User> = self
            .transport
            .get_json(USERS_PATH)
            .await
            .map_err(|e| {
                error!("Error fetching users: {}", e);
                ApiError::Fetch {
                    resource: USERS_PATH,
                    source: e,
                }
            })?;

        info!("Fetched {} users", users.len());
        Ok(users)
    }
}
