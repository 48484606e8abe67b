use chrono::{SecondsFormat, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub created_at: String,
}

/// The editable part of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub full_name: String,
    pub email: String,
}

impl User {
    pub fn new(id: String, data: UserData) -> Self {
        User {
            id,
            full_name: data.full_name,
            email: data.email,
            created_at: timestamp(),
        }
    }

    /// Replaces the editable fields, `id` and `created_at` are kept.
    pub fn apply(&mut self, data: UserData) {
        self.full_name = data.full_name;
        self.email = data.email;
    }

    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();

        self.full_name.to_lowercase().contains(&term) || self.email.to_lowercase().contains(&term)
    }

    /// Directory contents of a store that has never been written.
    pub fn samples() -> Vec<User> {
        vec![
            User {
                id: "1".to_string(),
                full_name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                created_at: timestamp(),
            },
            User {
                id: "2".to_string(),
                full_name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
                created_at: timestamp(),
            },
        ]
    }
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        UserData {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
