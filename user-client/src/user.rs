use serde::{Deserialize, Serialize};
use std::fmt;

/// A user record as returned by the server.
///
/// `id`, `created_at` and `updated_at` are assigned by the server; timestamps
/// are kept exactly as the server formatted them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} <{}>", self.id, self.name, self.email)
    }
}

/// Body of create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    pub email: String,
    pub name: String,
}

impl UserRequest {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}
