use super::{AuthService, Credentials, Registration};
use crate::dropdown::Boundary;
use ratatui::layout::{Position, Rect};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("hardcoded regex pattern is valid"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{7,15}$").expect("hardcoded regex pattern is valid"));

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum FormKind {
    Login,
    Register,
}

static LOGIN_CONTROLS: [Control; 5] = [
    Control::Input(Field::Email),
    Control::Input(Field::Password),
    Control::RememberMe,
    Control::Submit,
    Control::Switch,
];

static REGISTER_CONTROLS: [Control; 8] = [
    Control::Input(Field::FirstName),
    Control::Input(Field::LastName),
    Control::Input(Field::Email),
    Control::Input(Field::Phone),
    Control::Input(Field::Password),
    Control::Input(Field::ConfirmPassword),
    Control::Submit,
    Control::Switch,
];

impl FormKind {
    pub(crate) fn title(self) -> &'static str {
        match self {
            FormKind::Login => "Sign In",
            FormKind::Register => "Create Account",
        }
    }

    /// The form's controls in focus order
    pub(crate) fn controls(self) -> &'static [Control] {
        match self {
            FormKind::Login => &LOGIN_CONTROLS,
            FormKind::Register => &REGISTER_CONTROLS,
        }
    }

    pub(crate) fn fields(self) -> impl Iterator<Item = Field> {
        self.controls().iter().filter_map(|&c| match c {
            Control::Input(field) => Some(field),
            _ => None,
        })
    }

    pub(crate) fn other(self) -> FormKind {
        match self {
            FormKind::Login => FormKind::Register,
            FormKind::Register => FormKind::Login,
        }
    }

    /// Prompt and link text leading to the other form
    pub(crate) fn switch_prompt(self) -> (&'static str, &'static str) {
        match self {
            FormKind::Login => ("Don't have an account? ", "Create account"),
            FormKind::Register => ("Already have an account? ", "Sign in"),
        }
    }

    fn rejection(self) -> &'static str {
        match self {
            FormKind::Login => "Invalid email or password",
            FormKind::Register => "Registration failed",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Password,
    ConfirmPassword,
}

impl Field {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email Address",
            Field::Phone => "Phone (optional)",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
        }
    }

    pub(crate) fn placeholder(self) -> &'static str {
        match self {
            Field::FirstName => "Enter your first name",
            Field::LastName => "Enter your last name",
            Field::Email => "Enter your email",
            Field::Phone => "+251...",
            Field::Password => "Enter your password",
            Field::ConfirmPassword => "Repeat your password",
        }
    }

    pub(crate) fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Control {
    Input(Field),
    RememberMe,
    Submit,
    Switch,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Outcome {
    /// The form stays open.  `false` if the input did nothing.
    Stay(bool),
    /// The account service accepted the form
    Completed,
    /// The visitor asked for the other form
    Switch,
    /// A pointer press landed outside the modal
    Dismissed,
}

/// State of an open sign-in or create-account modal
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct AuthForm {
    kind: FormKind,
    values: BTreeMap<Field, String>,
    remember_me: bool,
    focus: usize,
    errors: BTreeMap<Field, &'static str>,
    failure: Option<&'static str>,
    pub(super) boundary: Boundary,
    pub(super) hits: Vec<(Rect, Control)>,
}

impl AuthForm {
    pub(crate) fn new(kind: FormKind) -> AuthForm {
        AuthForm {
            kind,
            values: BTreeMap::new(),
            remember_me: false,
            focus: 0,
            errors: BTreeMap::new(),
            failure: None,
            boundary: Boundary::default(),
            hits: Vec::new(),
        }
    }

    pub(crate) fn kind(&self) -> FormKind {
        self.kind
    }

    pub(crate) fn value(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    pub(crate) fn remember_me(&self) -> bool {
        self.remember_me
    }

    pub(crate) fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Message shown when the account service turned the form down
    pub(crate) fn failure(&self) -> Option<&'static str> {
        self.failure
    }

    pub(crate) fn focus(&self) -> Control {
        let controls = self.kind.controls();
        controls.get(self.focus).copied().unwrap_or(controls[0])
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.kind.controls().len();
    }

    pub(crate) fn focus_previous(&mut self) {
        self.focus = self
            .focus
            .checked_sub(1)
            .unwrap_or(self.kind.controls().len() - 1);
    }

    pub(crate) fn focus_on(&mut self, control: Control) -> bool {
        match self.kind.controls().iter().position(|&c| c == control) {
            Some(i) => {
                self.focus = i;
                true
            }
            None => false,
        }
    }

    /// Types `ch` into the focused field.  A space toggles the focused
    /// "remember me" box.
    pub(crate) fn type_char(&mut self, ch: char) -> bool {
        match self.focus() {
            Control::Input(field) => {
                self.values.entry(field).or_default().push(ch);
                self.errors.remove(&field);
                true
            }
            Control::RememberMe if ch == ' ' => {
                self.remember_me = !self.remember_me;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn backspace(&mut self) -> bool {
        let Control::Input(field) = self.focus() else {
            return false;
        };
        if self.values.get_mut(&field).and_then(String::pop).is_some() {
            self.errors.remove(&field);
            true
        } else {
            false
        }
    }

    /// Checks every field, replacing the previous messages.  Returns `true`
    /// if nothing is wrong.
    pub(crate) fn validate(&mut self) -> bool {
        let mut errors = BTreeMap::new();
        let email = self.value(Field::Email).trim();
        if email.is_empty() {
            errors.insert(Field::Email, "Email is required");
        } else if !EMAIL_RE.is_match(email) {
            errors.insert(Field::Email, "Email is invalid");
        }
        let password = self.value(Field::Password);
        if password.is_empty() {
            errors.insert(Field::Password, "Password is required");
        }
        if self.kind == FormKind::Register {
            if self.value(Field::FirstName).trim().is_empty() {
                errors.insert(Field::FirstName, "First name is required");
            }
            if self.value(Field::LastName).trim().is_empty() {
                errors.insert(Field::LastName, "Last name is required");
            }
            let phone = self.value(Field::Phone).trim();
            if !phone.is_empty() && !PHONE_RE.is_match(phone) {
                errors.insert(Field::Phone, "Phone number is invalid");
            }
            if !password.is_empty() && password.chars().count() < MIN_PASSWORD_LENGTH {
                errors.insert(Field::Password, "Password must be at least 8 characters");
            }
            if self.value(Field::ConfirmPassword) != password {
                errors.insert(Field::ConfirmPassword, "Passwords do not match");
            }
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validates the form and, if it is acceptable, hands it to `auth`.  On
    /// success the form is cleared.
    pub(crate) fn submit<A: AuthService>(&mut self, auth: &mut A) -> Outcome {
        self.failure = None;
        if !self.validate() {
            log::debug!(
                "{} form has {} invalid field(s)",
                self.kind.title(),
                self.errors.len()
            );
            return Outcome::Stay(true);
        }
        let r = match self.kind {
            FormKind::Login => auth.login(&self.credentials()),
            FormKind::Register => auth.register(&self.registration()),
        };
        match r {
            Ok(()) => {
                *self = AuthForm::new(self.kind);
                Outcome::Completed
            }
            Err(e) => {
                log::warn!("{} rejected: {e}", self.kind.title());
                self.failure = Some(self.kind.rejection());
                Outcome::Stay(true)
            }
        }
    }

    /// Acts on the focused control, as when Enter is pressed
    pub(crate) fn activate<A: AuthService>(&mut self, auth: &mut A) -> Outcome {
        match self.focus() {
            Control::RememberMe => {
                self.remember_me = !self.remember_me;
                Outcome::Stay(true)
            }
            Control::Switch => Outcome::Switch,
            Control::Input(_) | Control::Submit => self.submit(auth),
        }
    }

    pub(crate) fn pointer_down<A: AuthService>(&mut self, pos: Position, auth: &mut A) -> Outcome {
        if self.boundary.is_outside(pos) {
            return Outcome::Dismissed;
        }
        let target = self
            .hits
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|&(_, c)| c);
        match target {
            Some(control) => {
                self.focus_on(control);
                if matches!(control, Control::Input(_)) {
                    Outcome::Stay(true)
                } else {
                    self.activate(auth)
                }
            }
            None => Outcome::Stay(false),
        }
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.value(Field::Email).trim().to_owned(),
            password: self.value(Field::Password).to_owned(),
            remember_me: self.remember_me,
        }
    }

    fn registration(&self) -> Registration {
        let phone = self.value(Field::Phone).trim();
        Registration {
            first_name: self.value(Field::FirstName).trim().to_owned(),
            last_name: self.value(Field::LastName).trim().to_owned(),
            email: self.value(Field::Email).trim().to_owned(),
            phone: (!phone.is_empty()).then(|| phone.to_owned()),
            password: self.value(Field::Password).to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;

    #[derive(Debug, Default)]
    struct Recorder {
        logins: Vec<Credentials>,
        registrations: Vec<Registration>,
        reject: bool,
    }

    impl AuthService for Recorder {
        fn login(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
            self.logins.push(credentials.clone());
            if self.reject {
                Err(AuthError::InvalidCredentials)
            } else {
                Ok(())
            }
        }

        fn register(&mut self, registration: &Registration) -> Result<(), AuthError> {
            self.registrations.push(registration.clone());
            if self.reject {
                Err(AuthError::EmailTaken(registration.email.clone()))
            } else {
                Ok(())
            }
        }
    }

    fn type_into(form: &mut AuthForm, field: Field, text: &str) {
        assert!(form.focus_on(Control::Input(field)));
        for ch in text.chars() {
            assert!(form.type_char(ch));
        }
    }

    #[test]
    fn test_login_bad_email_empty_password() {
        let mut form = AuthForm::new(FormKind::Login);
        let mut auth = Recorder::default();
        type_into(&mut form, Field::Email, "bad");
        assert!(form.focus_on(Control::Submit));
        assert_eq!(form.activate(&mut auth), Outcome::Stay(true));
        assert_eq!(form.error(Field::Email), Some("Email is invalid"));
        assert_eq!(form.error(Field::Password), Some("Password is required"));
        assert!(auth.logins.is_empty());
    }

    #[test]
    fn test_login_empty_email() {
        let mut form = AuthForm::new(FormKind::Login);
        let mut auth = Recorder::default();
        type_into(&mut form, Field::Password, "secret");
        assert_eq!(form.submit(&mut auth), Outcome::Stay(true));
        assert_eq!(form.error(Field::Email), Some("Email is required"));
        assert_eq!(form.error(Field::Password), None);
        assert!(auth.logins.is_empty());
    }

    #[test]
    fn test_editing_clears_error() {
        let mut form = AuthForm::new(FormKind::Login);
        let mut auth = Recorder::default();
        assert_eq!(form.submit(&mut auth), Outcome::Stay(true));
        assert!(form.error(Field::Email).is_some());
        assert!(form.error(Field::Password).is_some());
        type_into(&mut form, Field::Password, "x");
        assert_eq!(form.error(Field::Password), None);
        assert!(form.error(Field::Email).is_some());
        assert!(form.backspace());
        assert!(!form.backspace());
    }

    #[test]
    fn test_login_success_resets_form() {
        let mut form = AuthForm::new(FormKind::Login);
        let mut auth = Recorder::default();
        type_into(&mut form, Field::Email, " tsion@example.com ");
        type_into(&mut form, Field::Password, "pa55word");
        assert!(form.focus_on(Control::RememberMe));
        assert!(form.type_char(' '));
        assert!(form.remember_me());
        assert_eq!(form.submit(&mut auth), Outcome::Completed);
        assert_eq!(
            auth.logins,
            [Credentials {
                email: String::from("tsion@example.com"),
                password: String::from("pa55word"),
                remember_me: true,
            }]
        );
        assert_eq!(form, AuthForm::new(FormKind::Login));
    }

    #[test]
    fn test_login_rejected() {
        let mut form = AuthForm::new(FormKind::Login);
        let mut auth = Recorder {
            reject: true,
            ..Recorder::default()
        };
        type_into(&mut form, Field::Email, "tsion@example.com");
        type_into(&mut form, Field::Password, "pa55word");
        assert_eq!(form.submit(&mut auth), Outcome::Stay(true));
        assert_eq!(form.failure(), Some("Invalid email or password"));
        assert_eq!(form.value(Field::Email), "tsion@example.com");
        assert_eq!(auth.logins.len(), 1);
    }

    #[test]
    fn test_register_validation() {
        let mut form = AuthForm::new(FormKind::Register);
        let mut auth = Recorder::default();
        type_into(&mut form, Field::Email, "dawit@example.com");
        type_into(&mut form, Field::Phone, "12ab");
        type_into(&mut form, Field::Password, "short");
        type_into(&mut form, Field::ConfirmPassword, "shorter");
        assert_eq!(form.submit(&mut auth), Outcome::Stay(true));
        assert_eq!(form.error(Field::FirstName), Some("First name is required"));
        assert_eq!(form.error(Field::LastName), Some("Last name is required"));
        assert_eq!(form.error(Field::Email), None);
        assert_eq!(form.error(Field::Phone), Some("Phone number is invalid"));
        assert_eq!(
            form.error(Field::Password),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(
            form.error(Field::ConfirmPassword),
            Some("Passwords do not match")
        );
        assert!(auth.registrations.is_empty());
    }

    #[test]
    fn test_register_success() {
        let mut form = AuthForm::new(FormKind::Register);
        let mut auth = Recorder::default();
        type_into(&mut form, Field::FirstName, "Dawit");
        type_into(&mut form, Field::LastName, "Haile");
        type_into(&mut form, Field::Email, "dawit@example.com");
        type_into(&mut form, Field::Password, "longenough");
        type_into(&mut form, Field::ConfirmPassword, "longenough");
        assert_eq!(form.submit(&mut auth), Outcome::Completed);
        assert_eq!(auth.registrations.len(), 1);
        assert_eq!(auth.registrations[0].phone, None);
        assert_eq!(auth.registrations[0].first_name, "Dawit");
    }

    #[test]
    fn test_register_accepts_phone() {
        let mut form = AuthForm::new(FormKind::Register);
        let mut auth = Recorder {
            reject: true,
            ..Recorder::default()
        };
        type_into(&mut form, Field::FirstName, "Dawit");
        type_into(&mut form, Field::LastName, "Haile");
        type_into(&mut form, Field::Email, "dawit@example.com");
        type_into(&mut form, Field::Phone, "+251922978877");
        type_into(&mut form, Field::Password, "longenough");
        type_into(&mut form, Field::ConfirmPassword, "longenough");
        assert_eq!(form.submit(&mut auth), Outcome::Stay(true));
        assert_eq!(form.error(Field::Phone), None);
        assert_eq!(form.failure(), Some("Registration failed"));
        assert_eq!(
            auth.registrations[0].phone.as_deref(),
            Some("+251922978877")
        );
    }

    #[test]
    fn test_focus_cycle() {
        let mut form = AuthForm::new(FormKind::Login);
        assert_eq!(form.focus(), Control::Input(Field::Email));
        form.focus_previous();
        assert_eq!(form.focus(), Control::Switch);
        assert_eq!(form.activate(&mut Recorder::default()), Outcome::Switch);
        form.focus_next();
        assert_eq!(form.focus(), Control::Input(Field::Email));
        assert!(!form.focus_on(Control::Input(Field::Phone)));
        assert_eq!(
            FormKind::Register.fields().collect::<Vec<_>>(),
            [
                Field::FirstName,
                Field::LastName,
                Field::Email,
                Field::Phone,
                Field::Password,
                Field::ConfirmPassword
            ]
        );
    }
}
