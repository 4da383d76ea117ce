//! Client for the `/api/users` REST resource.
//!
//! ```ignore
//! use user_client::{UserApi, UserClientHttp, UserRequest};
//!
//! let client = UserClientHttp::connect("http://127.0.0.1:8080").await?;
//! let user = client.create_user(&UserRequest::new("a@b.com", "A")).await?;
//! println!("{user}");
//! ```

use async_trait::async_trait;

mod error;
mod http_client;
mod user;

pub use error::{
    CREATE_FAILED, DELETE_FAILED, LIST_FAILED, NOT_FOUND, UPDATE_FAILED, UserClientError,
};
pub use http_client::{USERS_PATH, UserClientHttp};
pub use user::{User, UserRequest};

/// The five operations on the user collection.
///
/// Each call is one request/response exchange; a non-2xx status is an error.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn get_all_users(&self) -> Result<Vec<User>, UserClientError>;
    async fn get_user_by_id(&self, id: i64) -> Result<User, UserClientError>;
    async fn create_user(&self, request: &UserRequest) -> Result<User, UserClientError>;
    async fn update_user(&self, id: i64, request: &UserRequest)
    -> Result<User, UserClientError>;
    async fn delete_user(&self, id: i64) -> Result<(), UserClientError>;
}
