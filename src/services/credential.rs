use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::{
    error::{AppError, AppResult},
    models::account::{Account, Credentials},
    repositories::account::AccountRepository,
    services::credential::CredentialService,
};
use crate::forms::account::{LoginForm, RegisterErrors, RegisterForm};

pub struct CredentialServiceImpl {
    repository: Arc<dyn AccountRepository>,
    verify_credentials: bool,
}

impl CredentialServiceImpl {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self {
            repository,
            verify_credentials: false,
        }
    }

    /// Requires logins to match a registered account.
    pub fn verifying(mut self, verify_credentials: bool) -> Self {
        self.verify_credentials = verify_credentials;
        self
    }

    fn verify(&self, credentials: &Credentials) -> AppResult<()> {
        match self.repository.find_by_email(&credentials.email)? {
            Some(account) if account.password == credentials.password => Ok(()),
            _ => Err(AppError::InvalidCredentials),
        }
    }
}

impl CredentialService for CredentialServiceImpl {
    #[instrument(skip_all, fields(email = %form.email))]
    fn register(&self, form: RegisterForm) -> AppResult<Account> {
        form.check().map_err(AppError::InvalidRegistration)?;

        if self.repository.is_account(&form.email)? {
            return Err(AppError::DuplicateEmail(RegisterErrors::duplicate_email()));
        }

        let account = self.repository.signup(form.into())?;

        info!("account registered");

        Ok(account)
    }

    #[instrument(skip_all, fields(email = %form.email))]
    fn login(&self, form: LoginForm) -> AppResult<()> {
        form.check().map_err(AppError::InvalidLogin)?;

        if self.verify_credentials {
            self.verify(&form.into())?;
        }

        info!("login accepted");

        Ok(())
    }
}
