#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Clone)]
pub struct CreateAccount {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Account {
    /// Account emails are unique regardless of case.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

impl From<CreateAccount> for Account {
    fn from(acc: CreateAccount) -> Self {
        Account {
            email: acc.email,
            password: acc.password,
            full_name: acc.full_name,
        }
    }
}
