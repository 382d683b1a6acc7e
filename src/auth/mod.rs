mod form;
mod widget;
pub(crate) use self::form::{AuthForm, Control, Field, FormKind, Outcome};
pub(crate) use self::widget::AuthModal;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Eq, PartialEq)]
pub(crate) struct Credentials {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) remember_me: bool,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<hidden>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

#[derive(Clone, Eq, PartialEq)]
pub(crate) struct Registration {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) phone: Option<String>,
    pub(crate) password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<hidden>")
            .finish()
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account is already registered with {0}")]
    EmailTaken(String),
}

/// Collaborator that signs visitors in and creates accounts
pub(crate) trait AuthService {
    fn login(&mut self, credentials: &Credentials) -> Result<(), AuthError>;

    fn register(&mut self, registration: &Registration) -> Result<(), AuthError>;
}

/// Stand-in account service that keeps accounts for the current session only
/// and logs every request.
///
/// Unknown emails are signed in as-is.  An email registered during the session
/// must be signed in with its password, and cannot be registered again.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct LogAuth {
    accounts: HashMap<String, String>,
}

impl AuthService for LogAuth {
    fn login(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        log::info!("Login attempt: {credentials:?}");
        match self.accounts.get(&credentials.email.to_lowercase()) {
            Some(password) if *password != credentials.password => {
                log::warn!("Wrong password for {}", credentials.email);
                Err(AuthError::InvalidCredentials)
            }
            _ => Ok(()),
        }
    }

    fn register(&mut self, registration: &Registration) -> Result<(), AuthError> {
        log::info!("Registration attempt: {registration:?}");
        let key = registration.email.to_lowercase();
        if self.accounts.contains_key(&key) {
            return Err(AuthError::EmailTaken(registration.email.clone()));
        }
        self.accounts.insert(key, registration.password.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str) -> Registration {
        Registration {
            first_name: String::from("Abebe"),
            last_name: String::from("Bikila"),
            email: String::from(email),
            phone: None,
            password: String::from("marathon1960"),
        }
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials {
            email: String::from("abebe@example.com"),
            password: String::from("hunter22"),
            remember_me: true,
        };
        let s = format!("{creds:?}");
        assert!(!s.contains("hunter22"), "{s}");
        assert!(s.contains("abebe@example.com"), "{s}");
        let s = format!("{:?}", registration("abebe@example.com"));
        assert!(!s.contains("marathon1960"), "{s}");
    }

    #[test]
    fn test_log_auth_accounts() {
        let mut auth = LogAuth::default();
        let guest = Credentials {
            email: String::from("guest@example.com"),
            password: String::from("anything"),
            remember_me: false,
        };
        assert_eq!(auth.login(&guest), Ok(()));
        assert_eq!(auth.register(&registration("Abebe@example.com")), Ok(()));
        assert_eq!(
            auth.register(&registration("abebe@example.com")),
            Err(AuthError::EmailTaken(String::from("abebe@example.com")))
        );
        let wrong = Credentials {
            email: String::from("abebe@example.com"),
            password: String::from("marathon1964"),
            remember_me: false,
        };
        assert_eq!(auth.login(&wrong), Err(AuthError::InvalidCredentials));
        let right = Credentials {
            password: String::from("marathon1960"),
            ..wrong
        };
        assert_eq!(auth.login(&right), Ok(()));
    }
}
