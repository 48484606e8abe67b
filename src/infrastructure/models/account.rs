use serde::{Deserialize, Serialize};

use crate::domain::models::account::Account;

/// Persisted shape of an entry under the `accounts` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAccount {
    email: String,
    password: String,
    full_name: String,
}

impl From<&Account> for StoredAccount {
    fn from(acc: &Account) -> Self {
        StoredAccount {
            email: acc.email.clone(),
            password: acc.password.clone(),
            full_name: acc.full_name.clone(),
        }
    }
}

impl From<StoredAccount> for Account {
    fn from(acc: StoredAccount) -> Self {
        Account {
            email: acc.email,
            password: acc.password,
            full_name: acc.full_name,
        }
    }
}
