use serde_json::json;

use crate::domain::models::account::Account;
use crate::infrastructure::repositories::account::ACCOUNTS;
use crate::infrastructure::repositories::user::USERS;
use crate::infrastructure::storage::KeyValueStore;

pub fn seed_account(store: &dyn KeyValueStore) -> Account {
    let account = Account {
        email: "test_account@email.com".to_string(),
        password: "p4ssw0rd".to_string(),
        full_name: "Test Account".to_string(),
    };

    let raw = json!([{
        "email": account.email,
        "password": account.password,
        "fullName": account.full_name,
    }]);
    store.set(ACCOUNTS, &raw.to_string()).unwrap();

    account
}

pub fn seed_users(store: &dyn KeyValueStore) {
    let raw = json!([
        { "id": "1", "fullName": "John Doe", "email": "john@example.com", "createdAt": "2024-01-01T00:00:00.000Z" },
        { "id": "2", "fullName": "Jane Smith", "email": "jane@example.com", "createdAt": "2024-01-02T00:00:00.000Z" },
    ]);
    store.set(USERS, &raw.to_string()).unwrap();
}
