use crate::domain::models::user::User;

use super::repository::RepositoryResult;

pub trait UserRepository: Send + Sync {
    /// `None` when the collection has never been written.
    fn find_all(&self) -> RepositoryResult<Option<Vec<User>>>;
    /// Overwrites the whole collection.
    fn save_all(&self, users: &[User]) -> RepositoryResult<()>;
}
