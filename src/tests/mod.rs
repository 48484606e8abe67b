
pub mod utils;

use std::sync::Arc;

use serde::Deserialize;

use crate::App;
use crate::container::Container;
use crate::forms::account::{LoginForm, RegisterForm};
use crate::infrastructure::repositories::user::USERS;
use crate::infrastructure::storage::{KeyValueStore, MemoryStore};

use rstest::*;

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: App,
}

#[fixture]
fn context() -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let app = Container::with_store(store.clone(), false).app();

    TestContext { store, app }
}

/// Context already sitting on an authenticated dashboard.
#[fixture]
fn dashboard(context: TestContext) -> TestContext {
    let mut context = context;
    context.app.submit_login(login_form("admin@example.com", "secret1")).unwrap();
    context
}

fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn register_form(email: &str, password: &str) -> RegisterForm {
    RegisterForm {
        full_name: "New Account".to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
        agreed_to_terms: true,
    }
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct PersistedUser {
    id: String,
    full_name: String,
    email: String,
    created_at: String,
}

fn persisted_users(store: &MemoryStore) -> Vec<PersistedUser> {
    let raw = store.get(USERS).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}
