use std::sync::Arc;

use crate::data::user_repository::UserRepository;
use crate::domain::{error::DomainError, user::User};
use crate::presentation::dto::UserRequest;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_user(&self, request: &UserRequest) -> Result<User, DomainError> {
        request.ensure_valid()?;

        if self.repo.exists_by_email(&request.email).await? {
            warn!("email already in use");
            return Err(DomainError::EmailAlreadyExists(request.email.clone()));
        }

        self.repo.create(&request.email, &request.name).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.repo.find_all().await?;
        info!(count = users.len(), "users fetched");
        Ok(users)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            warn!(user_id = id, "user not found");
            DomainError::UserNotFound(id)
        })
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn update_user(&self, id: i64, request: &UserRequest) -> Result<User, DomainError> {
        request.ensure_valid()?;

        let current = self.get_user(id).await?;
        if current.email != request.email && self.repo.exists_by_email(&request.email).await? {
            warn!(user_id = id, "email already in use");
            return Err(DomainError::EmailAlreadyExists(request.email.clone()));
        }

        self.repo
            .update(id, &request.email, &request.name)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            warn!(user_id = id, "user not found");
            return Err(DomainError::UserNotFound(id));
        }
        Ok(())
    }
}
