use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::models::account::{Account, CreateAccount};
use crate::domain::repositories::account::AccountRepository;
use crate::domain::repositories::repository::{RepositoryError, RepositoryResult};
use crate::infrastructure::models::account::StoredAccount;
use crate::infrastructure::storage::KeyValueStore;

pub struct AccountRepositoryImpl {
    store: Arc<dyn KeyValueStore>,
}

impl AccountRepositoryImpl {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// A malformed collection reads as empty, the next signup overwrites it.
    fn accounts(&self) -> RepositoryResult<Vec<Account>> {
        let Some(raw) = self.store.get(ACCOUNTS)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<StoredAccount>>(&raw) {
            Ok(accounts) => Ok(accounts.into_iter().map(Into::into).collect()),
            Err(err) => {
                warn!(key = ACCOUNTS, error = %err, "discarding malformed collection");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, accounts: &[Account]) -> RepositoryResult<()> {
        let stored: Vec<StoredAccount> = accounts.iter().map(StoredAccount::from).collect();
        let raw = serde_json::to_string(&stored).map_err(|source| RepositoryError::Encode {
            key: ACCOUNTS,
            source,
        })?;

        Ok(self.store.set(ACCOUNTS, &raw)?)
    }
}

pub const ACCOUNTS: &str = "accounts";

impl AccountRepository for AccountRepositoryImpl {
    fn is_account(&self, email: &str) -> RepositoryResult<bool> {
        Ok(self.accounts()?.iter().any(|a| a.has_email(email)))
    }

    fn signup(&self, new_account: CreateAccount) -> RepositoryResult<Account> {
        let mut accounts = self.accounts()?;
        let account = Account::from(new_account);

        accounts.push(account.clone());
        self.save(&accounts)?;

        debug!(total = accounts.len(), "account collection written");

        Ok(account)
    }

    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Account>> {
        Ok(self.accounts()?.into_iter().find(|a| a.has_email(email)))
    }

    fn count(&self) -> RepositoryResult<usize> {
        Ok(self.accounts()?.len())
    }
}
