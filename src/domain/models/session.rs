use std::fmt;

use crate::domain::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Register,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    SwitchToRegister,
    SwitchToLogin,
    LoginSucceeded,
    RegistrationSucceeded,
    Logout,
}

/// Navigation and authentication state of the running process. Never
/// persisted, a fresh process always starts on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    screen: Screen,
    authenticated: bool,
}

impl Session {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn can_view_dashboard(&self) -> bool {
        self.authenticated && self.screen == Screen::Dashboard
    }

    pub fn apply(&mut self, transition: Transition) -> AppResult<Screen> {
        let (screen, authenticated) = match (self.screen, transition) {
            (Screen::Login, Transition::SwitchToRegister) => (Screen::Register, self.authenticated),
            (Screen::Register, Transition::SwitchToLogin) => (Screen::Login, self.authenticated),
            (Screen::Login, Transition::LoginSucceeded) => (Screen::Dashboard, true),
            (Screen::Register, Transition::RegistrationSucceeded) => (Screen::Login, false),
            (Screen::Dashboard, Transition::Logout) => (Screen::Login, false),
            (from, transition) => return Err(AppError::InvalidTransition { from, transition }),
        };

        self.screen = screen;
        self.authenticated = authenticated;

        Ok(screen)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Register => write!(f, "register"),
            Self::Dashboard => write!(f, "dashboard"),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwitchToRegister => write!(f, "switch to register"),
            Self::SwitchToLogin => write!(f, "switch to login"),
            Self::LoginSucceeded => write!(f, "login succeeded"),
            Self::RegistrationSucceeded => write!(f, "registration succeeded"),
            Self::Logout => write!(f, "logout"),
        }
    }
}
