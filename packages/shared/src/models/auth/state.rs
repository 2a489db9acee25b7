use serde::Serialize;

/// Operator session held at the application root.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggedIn { username: String },
}

impl AuthState {
    pub fn login(&mut self, username: &str) {
        *self = AuthState::LoggedIn {
            username: username.to_string(),
        };
    }

    pub fn logout(&mut self) {
        *self = AuthState::LoggedOut;
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            AuthState::LoggedIn { username } => Some(username),
            AuthState::LoggedOut => None,
        }
    }
}
