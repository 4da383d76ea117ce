use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::User;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Repository backed by a map, for tests that should not need PostgreSQL.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, email: &str, name: &str) -> Result<User, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.users.values().any(|u| u.email == email) {
            return Err(DomainError::EmailAlreadyExists(email.to_string()));
        }
        state.next_id += 1;
        let now = Utc::now().naive_utc();
        let user = User {
            id: state.next_id,
            email: email.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.state.lock().unwrap().users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.state.lock().unwrap().users.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .values()
            .any(|u| u.email == email))
    }

    async fn update(&self, id: i64, email: &str, name: &str) -> Result<Option<User>, DomainError> {
        let mut state = self.state.lock().unwrap();
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        user.email = email.to_string();
        user.name = name.to_string();
        user.updated_at = Utc::now().naive_utc();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.state.lock().unwrap().users.remove(&id).is_some())
    }
}
