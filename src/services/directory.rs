use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::{
    error::{AppError, AppResult},
    models::user::{User, UserData},
    repositories::repository::RepositoryError,
    repositories::user::UserRepository,
};
use crate::forms::user::UserForm;

/// Emitted to subscribers after every state change so the presentation layer
/// can refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    Loaded { total: usize },
    Added { id: String },
    Updated { id: String },
    Deleted { id: String },
    FormVisibility { visible: bool },
    EditingChanged,
    SearchChanged,
}

type Listener = Box<dyn Fn(&DirectoryEvent)>;

/// Hands out creation-time ids, strictly increasing within the process.
#[derive(Debug, Default)]
struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    fn next(&mut self, taken: &[User]) -> String {
        let id = Utc::now().timestamp_micros().max(self.last.saturating_add(1));
        self.last = id;

        let candidate = id.to_string();
        if !taken.iter().any(|u| u.id == candidate) {
            return candidate;
        }

        // Only reachable once the counter is pinned at `i64::MAX`.
        (1u64..)
            .map(|n| format!("{candidate}-{n}"))
            .find(|suffixed| !taken.iter().any(|u| &u.id == suffixed))
            .unwrap_or(candidate)
    }

    fn observe(&mut self, users: &[User]) {
        let highest = users.iter().filter_map(|u| u.id.parse::<i64>().ok()).max();

        if let Some(highest) = highest {
            self.last = self.last.max(highest);
        }
    }
}

/// In-memory copy of the `users` collection plus the dashboard's transient
/// state. Every mutation writes the whole collection through to the
/// repository before the cache is replaced, so both stay identical.
pub struct UserDirectory {
    repository: Arc<dyn UserRepository>,
    users: Vec<User>,
    search_term: String,
    editing: Option<User>,
    form_visible: bool,
    ids: IdGenerator,
    loaded: bool,
    listeners: Vec<Listener>,
}

impl UserDirectory {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self {
            repository,
            users: Vec::new(),
            search_term: String::new(),
            editing: None,
            form_visible: false,
            ids: IdGenerator::default(),
            loaded: false,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&DirectoryEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, event: DirectoryEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn total(&self) -> usize {
        self.users.len()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn editing(&self) -> Option<&User> {
        self.editing.as_ref()
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    /// Reads the persisted collection, seeding sample records into an empty
    /// store. An unreadable collection leaves the directory empty.
    pub fn load(&mut self) -> AppResult<&[User]> {
        let users = match self.repository.find_all() {
            Ok(Some(users)) => users,
            Ok(None) => {
                let samples = User::samples();
                self.repository.save_all(&samples)?;
                info!(total = samples.len(), "seeded empty user directory");
                samples
            }
            Err(err @ RepositoryError::Malformed { .. }) => {
                warn!(error = %err, "resetting user directory");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        self.ids.observe(&users);
        self.users = users;
        self.loaded = true;
        self.notify(DirectoryEvent::Loaded {
            total: self.users.len(),
        });

        Ok(&self.users)
    }

    pub fn add(&mut self, form: UserForm) -> AppResult<User> {
        form.check().map_err(AppError::InvalidUser)?;

        let user = User::new(self.ids.next(&self.users), UserData::from(form));

        let mut users = self.users.clone();
        users.push(user.clone());
        self.persist(users)?;

        info!(id = %user.id, "user added");

        self.form_visible = false;
        self.notify(DirectoryEvent::Added {
            id: user.id.clone(),
        });

        Ok(user)
    }

    /// Applies the form to the record being edited. Without one this does
    /// nothing and returns `None`.
    pub fn update(&mut self, form: UserForm) -> AppResult<Option<User>> {
        let Some(editing) = self.editing.as_ref() else {
            debug!("update without a record being edited");
            return Ok(None);
        };

        form.check().map_err(AppError::InvalidUser)?;

        let id = editing.id.clone();
        let data = UserData::from(form);

        let mut users = self.users.clone();
        let mut updated = None;
        for user in users.iter_mut().filter(|u| u.id == id) {
            user.apply(data.clone());
            updated = Some(user.clone());
        }
        self.persist(users)?;

        info!(id = %id, found = updated.is_some(), "user updated");

        self.editing = None;
        self.form_visible = false;
        self.notify(DirectoryEvent::Updated { id });

        Ok(updated)
    }

    /// Dispatches a submitted form to `update` while editing, else to `add`.
    pub fn submit(&mut self, form: UserForm) -> AppResult<Option<User>> {
        if self.editing.is_some() {
            self.update(form)
        } else {
            self.add(form).map(Some)
        }
    }

    /// Removes the record with `id`, returning whether one existed. The
    /// collection is written either way.
    pub fn delete(&mut self, id: &str) -> AppResult<bool> {
        let mut users = self.users.clone();
        users.retain(|u| u.id != id);
        let removed = users.len() != self.users.len();
        self.persist(users)?;

        info!(id, removed, "user deleted");

        self.notify(DirectoryEvent::Deleted { id: id.to_owned() });

        Ok(removed)
    }

    /// Records whose name or email contains `term`, ignoring case, in
    /// directory order. An empty term matches everything.
    pub fn filter(&self, term: &str) -> Vec<&User> {
        if term.is_empty() {
            return self.users.iter().collect();
        }

        self.users.iter().filter(|u| u.matches(term)).collect()
    }

    pub fn filtered(&self) -> Vec<&User> {
        self.filter(&self.search_term)
    }

    pub fn set_editing(&mut self, user: Option<User>) {
        self.editing = user;
        self.notify(DirectoryEvent::EditingChanged);
    }

    pub fn set_form_visible(&mut self, visible: bool) {
        self.form_visible = visible;
        self.notify(DirectoryEvent::FormVisibility { visible });
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.notify(DirectoryEvent::SearchChanged);
    }

    /// Opens the form on the record with `id`. Returns `false` if there is no
    /// such record.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(user) = self.users.iter().find(|u| u.id == id).cloned() else {
            return false;
        };

        self.set_editing(Some(user));
        self.set_form_visible(true);

        true
    }

    pub fn cancel_form(&mut self) {
        self.set_form_visible(false);
        self.set_editing(None);
    }

    /// The "add new user" button: never edits, flips the form open or shut.
    pub fn toggle_form(&mut self) {
        self.set_editing(None);
        self.set_form_visible(!self.form_visible);
    }

    /// Refuses to write before `load`, an unloaded cache would overwrite the
    /// stored collection.
    fn persist(&mut self, users: Vec<User>) -> AppResult<()> {
        if !self.loaded {
            return Err(AppError::DirectoryNotLoaded);
        }

        self.repository.save_all(&users)?;
        self.users = users;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Mutex;

    use super::*;
    use crate::infrastructure::repositories::user::mock::UserRepositoryImpl;
    use rstest::*;

    fn user(id: &str, full_name: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn form(full_name: &str, email: &str) -> UserForm {
        UserForm {
            full_name: full_name.to_string(),
            email: email.to_string(),
        }
    }

    #[fixture]
    fn repo() -> Arc<UserRepositoryImpl> {
        Arc::new(UserRepositoryImpl {
            users: Mutex::new(Some(vec![
                user("1", "John Doe", "john@example.com"),
                user("2", "Jane Smith", "jane@example.com"),
                user("3", "Alan Turing", "alan@bletchley.uk"),
            ])),
            ..Default::default()
        })
    }

    #[fixture]
    fn directory(repo: Arc<UserRepositoryImpl>) -> UserDirectory {
        let mut directory = UserDirectory::new(repo);
        directory.load().unwrap();
        directory
    }

    fn persisted(repo: &UserRepositoryImpl) -> Vec<User> {
        repo.users.lock().unwrap().clone().unwrap_or_default()
    }

    #[test]
    fn test_load_seeds_empty_store() {
        let repo = Arc::new(UserRepositoryImpl::default());
        let mut directory = UserDirectory::new(repo.clone());

        let users = directory.load().unwrap().to_vec();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, "1");
        assert_eq!(users[0].full_name, "John Doe");
        assert_eq!(users[0].email, "john@example.com");
        assert_eq!(users[1].id, "2");
        assert_eq!(users[1].full_name, "Jane Smith");
        assert_eq!(users[1].email, "jane@example.com");
        assert_eq!(persisted(&repo), users);
    }

    #[test]
    fn test_load_malformed_resets_to_empty() {
        let repo = Arc::new(UserRepositoryImpl {
            malformed: true,
            ..Default::default()
        });
        let mut directory = UserDirectory::new(repo.clone());

        assert!(directory.load().unwrap().is_empty());
        assert_eq!(*repo.writes.lock().unwrap(), 0);
    }

    #[rstest]
    fn test_load_keeps_persisted_order(repo: Arc<UserRepositoryImpl>) {
        let mut directory = UserDirectory::new(repo.clone());

        let ids: Vec<_> = directory.load().unwrap().iter().map(|u| u.id.clone()).collect();

        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(*repo.writes.lock().unwrap(), 0);
    }

    #[rstest]
    fn test_add(repo: Arc<UserRepositoryImpl>) {
        let mut directory = UserDirectory::new(repo.clone());
        directory.load().unwrap();
        directory.set_form_visible(true);

        let added = directory
            .add(form("Barbara Liskov", "barbara@mit.edu"))
            .unwrap();

        assert_eq!(directory.total(), 4);
        assert_eq!(added.full_name, "Barbara Liskov");
        assert_eq!(added.email, "barbara@mit.edu");
        assert_eq!(directory.users().last(), Some(&added));
        assert!(!directory.is_form_visible());
        assert_eq!(persisted(&repo), directory.users());
    }

    #[rstest]
    fn test_add_assigns_distinct_ids(mut directory: UserDirectory) {
        let first = directory.add(form("Ken Thompson", "ken@bell-labs.com")).unwrap();
        let second = directory.add(form("Ken Thompson", "ken@bell-labs.com")).unwrap();

        assert_ne!(first.id, second.id);
        assert!(second.id.parse::<i64>().unwrap() > first.id.parse::<i64>().unwrap());
    }

    #[test]
    fn test_add_after_highest_possible_id() {
        let repo = Arc::new(UserRepositoryImpl {
            users: Mutex::new(Some(vec![user(
                &i64::MAX.to_string(),
                "Max Id",
                "max@example.com",
            )])),
            ..Default::default()
        });
        let mut directory = UserDirectory::new(repo);
        directory.load().unwrap();

        let first = directory.add(form("Ken Thompson", "ken@bell-labs.com")).unwrap();
        let second = directory.add(form("Dennis Ritchie", "dmr@bell-labs.com")).unwrap();

        let ids: Vec<_> = directory.users().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(first.id, i64::MAX.to_string());
        assert_ne!(first.id, second.id);
        assert!(!ids[..2].contains(&second.id.as_str()));
    }

    #[rstest]
    fn test_mutations_require_load(repo: Arc<UserRepositoryImpl>) {
        let mut directory = UserDirectory::new(repo.clone());

        let added = directory.add(form("Barbara Liskov", "barbara@mit.edu"));
        let deleted = directory.delete("1");

        assert!(matches!(added, Err(AppError::DirectoryNotLoaded)));
        assert!(matches!(deleted, Err(AppError::DirectoryNotLoaded)));
        assert_eq!(*repo.writes.lock().unwrap(), 0);
        assert_eq!(persisted(&repo).len(), 3);
        assert_eq!(directory.total(), 0);
    }

    #[rstest]
    fn test_add_allows_duplicate_email(mut directory: UserDirectory) {
        directory.add(form("Johnny Doe", "john@example.com")).unwrap();

        assert_eq!(directory.filter("john@example.com").len(), 2);
    }

    #[rstest]
    fn test_add_invalid_form(repo: Arc<UserRepositoryImpl>) {
        let mut directory = UserDirectory::new(repo.clone());
        directory.load().unwrap();

        let err = directory.add(form("Al", "not-an-email")).unwrap_err();

        let AppError::InvalidUser(errors) = err else {
            panic!("expected a validation failure");
        };
        assert_eq!(
            errors.full_name.as_deref(),
            Some("Full name must be at least 3 characters")
        );
        assert_eq!(errors.email.as_deref(), Some("Email is invalid"));
        assert_eq!(directory.total(), 3);
        assert_eq!(*repo.writes.lock().unwrap(), 0);
    }

    #[rstest]
    fn test_update_preserves_identity(repo: Arc<UserRepositoryImpl>) {
        let mut directory = UserDirectory::new(repo.clone());
        directory.load().unwrap();
        assert!(directory.begin_edit("2"));

        let updated = directory
            .update(form("Jane Doe", "jane.doe@example.com"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, "2");
        assert_eq!(updated.created_at, "2024-01-01T00:00:00.000Z");
        assert_eq!(updated.full_name, "Jane Doe");
        assert_eq!(directory.users()[1], updated);
        assert!(directory.editing().is_none());
        assert!(!directory.is_form_visible());
        assert_eq!(persisted(&repo), directory.users());
    }

    #[rstest]
    fn test_update_without_editing_is_noop(repo: Arc<UserRepositoryImpl>) {
        let mut directory = UserDirectory::new(repo.clone());
        directory.load().unwrap();
        let before = directory.users().to_vec();

        let result = directory.update(form("Jane Doe", "jane.doe@example.com"));

        assert!(result.unwrap().is_none());
        assert_eq!(directory.users(), before.as_slice());
        assert_eq!(*repo.writes.lock().unwrap(), 0);
    }

    #[rstest]
    fn test_update_invalid_form_keeps_editing(mut directory: UserDirectory) {
        directory.begin_edit("1");

        let result = directory.update(form("", "john@example.com"));

        assert!(matches!(result, Err(AppError::InvalidUser(_))));
        assert_eq!(directory.editing().map(|u| u.id.as_str()), Some("1"));
        assert_eq!(directory.users()[0].full_name, "John Doe");
    }

    #[rstest]
    fn test_submit_dispatches(mut directory: UserDirectory) {
        directory.submit(form("Donald Knuth", "knuth@stanford.edu")).unwrap();
        assert_eq!(directory.total(), 4);

        directory.begin_edit("3");
        directory.submit(form("Alan M. Turing", "alan@bletchley.uk")).unwrap();

        assert_eq!(directory.total(), 4);
        assert_eq!(directory.users()[2].full_name, "Alan M. Turing");
    }

    #[rstest]
    fn test_delete(repo: Arc<UserRepositoryImpl>) {
        let mut directory = UserDirectory::new(repo.clone());
        directory.load().unwrap();

        assert!(directory.delete("1").unwrap());

        let ids: Vec<_> = directory.users().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["2", "3"]);
        assert!(directory.filter("").iter().all(|u| u.id != "1"));
        assert_eq!(persisted(&repo), directory.users());
    }

    #[rstest]
    fn test_delete_absent_id(repo: Arc<UserRepositoryImpl>) {
        let mut directory = UserDirectory::new(repo.clone());
        directory.load().unwrap();

        assert!(!directory.delete("404").unwrap());
        assert_eq!(directory.total(), 3);
        assert_eq!(*repo.writes.lock().unwrap(), 1);
    }

    #[rstest]
    #[case::empty("", &["1", "2", "3"])]
    #[case::name_any_case("jOhN", &["1"])]
    #[case::email_substring("example.com", &["1", "2"])]
    #[case::surname("smith", &["2"])]
    #[case::no_match("grace", &[])]
    fn test_filter(directory: UserDirectory, #[case] term: &str, #[case] expected: &[&str]) {
        let ids: Vec<_> = directory.filter(term).iter().map(|u| u.id.as_str()).collect();

        assert_eq!(ids, expected);
        assert_eq!(directory.total(), 3);
    }

    #[rstest]
    fn test_filtered_uses_search_term(mut directory: UserDirectory) {
        directory.set_search_term("BLETCHLEY");

        let ids: Vec<_> = directory.filtered().iter().map(|u| u.id.as_str()).collect();

        assert_eq!(ids, ["3"]);
    }

    #[rstest]
    fn test_form_state(mut directory: UserDirectory) {
        assert!(!directory.begin_edit("missing"));

        directory.begin_edit("1");
        assert!(directory.is_form_visible());

        directory.toggle_form();
        assert!(directory.editing().is_none());
        assert!(!directory.is_form_visible());

        directory.toggle_form();
        assert!(directory.is_form_visible());

        directory.begin_edit("2");
        directory.cancel_form();
        assert!(directory.editing().is_none());
        assert!(!directory.is_form_visible());
    }

    #[rstest]
    fn test_listeners_see_every_change(mut directory: UserDirectory) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        directory.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        directory.set_search_term("jane");
        directory.delete("3").unwrap();

        assert_eq!(
            *events.borrow(),
            [
                DirectoryEvent::SearchChanged,
                DirectoryEvent::Deleted {
                    id: "3".to_string()
                },
            ]
        );
    }
}
