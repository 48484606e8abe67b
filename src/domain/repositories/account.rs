use crate::domain::models::account::{Account, CreateAccount};

use super::repository::RepositoryResult;

pub trait AccountRepository: Send + Sync {
    /// Case-insensitive lookup by email.
    fn is_account(&self, email: &str) -> RepositoryResult<bool>;
    fn signup(&self, new_account: CreateAccount) -> RepositoryResult<Account>;
    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Account>>;
    fn count(&self) -> RepositoryResult<usize>;
}
