use serde::{Deserialize, Serialize};

use crate::domain::models::user::User;

/// Persisted shape of an entry under the `users` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    id: String,
    full_name: String,
    email: String,
    created_at: String,
}

impl From<&User> for StoredUser {
    fn from(user: &User) -> Self {
        StoredUser {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            created_at: user.created_at.clone(),
        }
    }
}

impl From<StoredUser> for User {
    fn from(user: StoredUser) -> Self {
        User {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
