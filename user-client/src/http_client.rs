use crate::error::UserClientError;
use crate::{User, UserApi, UserRequest};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::sync::Arc;
use tracing::debug;

pub const USERS_PATH: &str = "/api/users";

#[derive(Clone, Debug)]
pub struct UserClientHttp {
    client: Arc<Client>,
    base_url: String,
}

impl UserClientHttp {
    pub async fn connect(endpoint: &str) -> Result<Self, UserClientError> {
        let base_url = normalize_endpoint(endpoint)?;
        Ok(Self {
            client: Arc::new(Client::builder().build()?),
            base_url,
        })
    }

    /// Uses a transport configured by the host instead of a default one.
    pub fn with_client(client: Client, endpoint: &str) -> Result<Self, UserClientError> {
        Ok(Self {
            client: Arc::new(client),
            base_url: normalize_endpoint(endpoint)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resource_root(&self) -> String {
        format!("{}{}", self.base_url, USERS_PATH)
    }

    fn user_url(&self, id: i64) -> String {
        format!("{}/{}", self.resource_root(), id)
    }
}

fn normalize_endpoint(endpoint: &str) -> Result<String, UserClientError> {
    let base_url = endpoint.trim().trim_end_matches('/');
    if base_url.is_empty() {
        return Err(UserClientError::InvalidUrl(
            "endpoint cannot be empty".to_string(),
        ));
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(UserClientError::InvalidUrl(format!(
            "{base_url}: must start with http:// or https://"
        )));
    }
    Ok(base_url.to_string())
}

// An unreadable body counts as no body.
async fn error_body(resp: Response) -> Option<String> {
    resp.text().await.ok()
}

#[async_trait]
impl UserApi for UserClientHttp {
    async fn get_all_users(&self) -> Result<Vec<User>, UserClientError> {
        let url = self.resource_root();
        debug!(url = %url, "GET users");

        let resp = self.client.get(url).send().await?;

        if resp.status().is_success() {
            let users: Vec<User> = resp.json().await?;
            Ok(users)
        } else {
            Err(UserClientError::RequestFailed {
                status: resp.status(),
            })
        }
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User, UserClientError> {
        let url = self.user_url(id);
        debug!(url = %url, "GET user");

        let resp = self.client.get(url).send().await?;

        if resp.status().is_success() {
            let user: User = resp.json().await?;
            Ok(user)
        } else {
            Err(UserClientError::NotFound {
                status: resp.status(),
            })
        }
    }

    async fn create_user(&self, request: &UserRequest) -> Result<User, UserClientError> {
        let url = self.resource_root();
        debug!(url = %url, email = %request.email, "POST user");

        let resp = self.client.post(url).json(request).send().await?;

        if resp.status().is_success() {
            let user: User = resp.json().await?;
            Ok(user)
        } else {
            let status = resp.status();
            Err(UserClientError::create_failed(status, error_body(resp).await))
        }
    }

    async fn update_user(
        &self,
        id: i64,
        request: &UserRequest,
    ) -> Result<User, UserClientError> {
        let url = self.user_url(id);
        debug!(url = %url, email = %request.email, "PUT user");

        let resp = self.client.put(url).json(request).send().await?;

        if resp.status().is_success() {
            let user: User = resp.json().await?;
            Ok(user)
        } else {
            let status = resp.status();
            Err(UserClientError::update_failed(status, error_body(resp).await))
        }
    }

    async fn delete_user(&self, id: i64) -> Result<(), UserClientError> {
        let url = self.user_url(id);
        debug!(url = %url, "DELETE user");

        let resp = self.client.delete(url).send().await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(UserClientError::DeleteFailed {
                status: resp.status(),
            })
        }
    }
}
