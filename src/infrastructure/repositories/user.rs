use std::sync::Arc;

use tracing::debug;

use crate::domain::models::user::User;
use crate::domain::repositories::repository::{RepositoryError, RepositoryResult};
use crate::domain::repositories::user::UserRepository;
use crate::infrastructure::models::user::StoredUser;
use crate::infrastructure::storage::KeyValueStore;

pub struct UserRepositoryImpl {
    store: Arc<dyn KeyValueStore>,
}

impl UserRepositoryImpl {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

pub const USERS: &str = "users";

impl UserRepository for UserRepositoryImpl {
    fn find_all(&self) -> RepositoryResult<Option<Vec<User>>> {
        // A blank document reads the same as one never written.
        let Some(raw) = self.store.get(USERS)?.filter(|raw| !raw.trim().is_empty()) else {
            return Ok(None);
        };

        let users: Vec<StoredUser> =
            serde_json::from_str(&raw).map_err(|source| RepositoryError::Malformed {
                key: USERS,
                source,
            })?;

        debug!(total = users.len(), "user collection read");

        Ok(Some(users.into_iter().map(Into::into).collect()))
    }

    fn save_all(&self, users: &[User]) -> RepositoryResult<()> {
        let stored: Vec<StoredUser> = users.iter().map(StoredUser::from).collect();
        let raw = serde_json::to_string(&stored).map_err(|source| RepositoryError::Encode {
            key: USERS,
            source,
        })?;

        self.store.set(USERS, &raw)?;

        debug!(total = users.len(), "user collection written");

        Ok(())
    }
}
