use validator::{Validate, ValidationErrors};

use crate::domain::models::account::{CreateAccount, Credentials};
use crate::forms::first_message;
use crate::forms::validation::{
    DUPLICATE_EMAIL, has_agreed, is_confirmation, is_email, is_full_name, is_password,
    passwords_match,
};

#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(custom(function = "is_email"))]
    pub email: String,

    #[validate(custom(function = "is_password"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct RegisterForm {
    #[validate(custom(function = "is_full_name"))]
    pub full_name: String,

    #[validate(custom(function = "is_email"))]
    pub email: String,

    #[validate(custom(function = "is_password"))]
    pub password: String,

    #[validate(custom(function = "is_confirmation"))]
    pub confirm_password: String,

    #[validate(custom(function = "has_agreed"))]
    pub agreed_to_terms: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterErrors {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub terms: Option<String>,
}

impl LoginForm {
    pub fn check(&self) -> Result<(), LoginErrors> {
        self.validate().map_err(|errors| LoginErrors::from(&errors))
    }
}

impl RegisterForm {
    pub fn check(&self) -> Result<(), RegisterErrors> {
        let mut errors = match self.validate() {
            Ok(()) => RegisterErrors::default(),
            Err(errors) => RegisterErrors::from(&errors),
        };

        if errors.confirm_password.is_none() {
            errors.confirm_password = passwords_match(&self.password, &self.confirm_password)
                .err()
                .map(|error| error.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl RegisterErrors {
    pub fn duplicate_email() -> Self {
        RegisterErrors {
            email: Some(DUPLICATE_EMAIL.to_string()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
            && self.terms.is_none()
    }
}

impl From<&ValidationErrors> for LoginErrors {
    fn from(errors: &ValidationErrors) -> Self {
        LoginErrors {
            email: first_message(errors, "email"),
            password: first_message(errors, "password"),
        }
    }
}

impl From<&ValidationErrors> for RegisterErrors {
    fn from(errors: &ValidationErrors) -> Self {
        RegisterErrors {
            full_name: first_message(errors, "full_name"),
            email: first_message(errors, "email"),
            password: first_message(errors, "password"),
            confirm_password: first_message(errors, "confirm_password"),
            terms: first_message(errors, "agreed_to_terms"),
        }
    }
}

impl From<RegisterForm> for CreateAccount {
    fn from(form: RegisterForm) -> Self {
        CreateAccount {
            full_name: form.full_name,
            email: form.email,
            password: form.password,
        }
    }
}

impl From<LoginForm> for Credentials {
    fn from(form: LoginForm) -> Self {
        Credentials {
            email: form.email,
            password: form.password,
        }
    }
}
