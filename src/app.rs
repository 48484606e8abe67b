use std::sync::Arc;

use tracing::info;

use crate::domain::{
    error::AppResult,
    models::account::Account,
    models::session::{Screen, Session, Transition},
    services::credential::CredentialService,
};
use crate::forms::account::{LoginForm, RegisterForm};
use crate::services::directory::UserDirectory;

/// The context handed to the presentation layer: it owns the session and the
/// directory and routes form submissions through the credential service.
pub struct App {
    credentials: Arc<dyn CredentialService>,
    directory: UserDirectory,
    session: Session,
}

impl App {
    pub fn new(credentials: Arc<dyn CredentialService>, directory: UserDirectory) -> Self {
        Self {
            credentials,
            directory,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn switch_to_register(&mut self) -> AppResult<Screen> {
        self.session.apply(Transition::SwitchToRegister)
    }

    pub fn switch_to_login(&mut self) -> AppResult<Screen> {
        self.session.apply(Transition::SwitchToLogin)
    }

    /// On success the session moves to the dashboard and the directory is
    /// loaded from storage.
    pub fn submit_login(&mut self, form: LoginForm) -> AppResult<Screen> {
        self.ensure(Transition::LoginSucceeded)?;

        self.credentials.login(form)?;
        self.directory.load()?;

        let screen = self.session.apply(Transition::LoginSucceeded)?;
        info!(%screen, "session authenticated");

        Ok(screen)
    }

    /// On success the session returns to the login screen, unauthenticated.
    pub fn submit_registration(&mut self, form: RegisterForm) -> AppResult<Account> {
        self.ensure(Transition::RegistrationSucceeded)?;

        let account = self.credentials.register(form)?;
        self.session.apply(Transition::RegistrationSucceeded)?;

        Ok(account)
    }

    pub fn logout(&mut self) -> AppResult<Screen> {
        let screen = self.session.apply(Transition::Logout)?;
        self.directory.cancel_form();

        info!("session closed");

        Ok(screen)
    }

    /// The directory, reachable only from an authenticated dashboard.
    pub fn dashboard(&mut self) -> Option<&mut UserDirectory> {
        self.session
            .can_view_dashboard()
            .then_some(&mut self.directory)
    }

    /// Refuses a submission whose outcome could not be applied to the
    /// current screen, before anything is written.
    fn ensure(&self, transition: Transition) -> AppResult<()> {
        let mut probe = self.session;
        probe.apply(transition).map(|_| ())
    }
}
