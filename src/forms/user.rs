use validator::{Validate, ValidationErrors};

use crate::domain::models::user::{User, UserData};
use crate::forms::first_message;
use crate::forms::validation::{is_user_email, is_user_full_name};

#[derive(Debug, Clone, Default, Validate)]
pub struct UserForm {
    #[validate(custom(function = "is_user_full_name"))]
    pub full_name: String,

    #[validate(custom(function = "is_user_email"))]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFormErrors {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl UserForm {
    /// Form prefilled with the record being edited.
    pub fn editing(user: &User) -> Self {
        UserForm {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
        }
    }

    pub fn check(&self) -> Result<(), UserFormErrors> {
        self.validate().map_err(|errors| UserFormErrors::from(&errors))
    }
}

impl From<&ValidationErrors> for UserFormErrors {
    fn from(errors: &ValidationErrors) -> Self {
        UserFormErrors {
            full_name: first_message(errors, "full_name"),
            email: first_message(errors, "email"),
        }
    }
}

impl From<UserForm> for UserData {
    fn from(form: UserForm) -> Self {
        UserData {
            full_name: form.full_name,
            email: form.email,
        }
    }
}
