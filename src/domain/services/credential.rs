use crate::domain::error::AppResult;
use crate::domain::models::account::Account;
use crate::forms::account::{LoginForm, RegisterForm};

pub trait CredentialService: 'static + Sync + Send {
    fn register(&self, form: RegisterForm) -> AppResult<Account>;
    fn login(&self, form: LoginForm) -> AppResult<()>;
}
