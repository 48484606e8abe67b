use thiserror::Error;

use crate::domain::models::session::{Screen, Transition};
use crate::domain::repositories::repository::RepositoryError;
use crate::forms::account::{LoginErrors, RegisterErrors};
use crate::forms::user::UserFormErrors;

pub type AppResult<T> = core::result::Result<T, AppError>;

#[rustfmt::skip]
pub mod message {
    pub static INVALID_FORM: &str = "The submitted form contains invalid fields";
    pub static DUPLICATE_EMAIL: &str = "An account with this email already exists";
    pub static INVALID_CREDENTIALS: &str = "The email or password does not match a registered account";
    pub static DIRECTORY_NOT_LOADED: &str = "The user directory must be loaded before it can be changed";
}

/// Everything an operation can refuse. Form-related variants carry the
/// field-scoped messages for the presentation layer to render inline.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", message::INVALID_FORM)]
    InvalidLogin(LoginErrors),
    #[error("{}", message::INVALID_FORM)]
    InvalidRegistration(RegisterErrors),
    #[error("{}", message::INVALID_FORM)]
    InvalidUser(UserFormErrors),
    #[error("{}", message::DUPLICATE_EMAIL)]
    DuplicateEmail(RegisterErrors),
    #[error("{}", message::INVALID_CREDENTIALS)]
    InvalidCredentials,
    #[error("{}", message::DIRECTORY_NOT_LOADED)]
    DirectoryNotLoaded,
    #[error("cannot {transition} from the {from} screen")]
    InvalidTransition { from: Screen, transition: Transition },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AppError {
    /// Field errors to show on the registration form, if this error has any.
    pub fn registration_errors(&self) -> Option<&RegisterErrors> {
        match self {
            Self::InvalidRegistration(errors) | Self::DuplicateEmail(errors) => Some(errors),
            _ => None,
        }
    }
}
