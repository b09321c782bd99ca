use crate::app::runtime::{LoginFailure, LoginField, LoginRequest};
use crate::app::state::InputState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginFocus {
    Address,
    Username,
    Password,
    Tls,
    Submit,
}

const FOCUS_ORDER: [LoginFocus; 5] = [
    LoginFocus::Address,
    LoginFocus::Username,
    LoginFocus::Password,
    LoginFocus::Tls,
    LoginFocus::Submit,
];

impl LoginFocus {
    fn position(self) -> usize {
        FOCUS_ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or(0)
    }

    fn field(self) -> Option<LoginField> {
        match self {
            LoginFocus::Address => Some(LoginField::Address),
            LoginFocus::Username => Some(LoginField::Username),
            LoginFocus::Password => Some(LoginField::Password),
            LoginFocus::Tls | LoginFocus::Submit => None,
        }
    }
}

impl From<LoginField> for LoginFocus {
    fn from(field: LoginField) -> Self {
        match field {
            LoginField::Address => LoginFocus::Address,
            LoginField::Username => LoginFocus::Username,
            LoginField::Password => LoginFocus::Password,
        }
    }
}

/// Login screen: three text fields, the TLS checkbox and per-field errors.
pub struct LoginForm {
    pub address: InputState,
    pub username: InputState,
    pub password: InputState,
    pub use_tls: bool,
    pub focus: LoginFocus,
    pub submitting: bool,
    address_error: Option<String>,
    username_error: Option<String>,
    password_error: Option<String>,
}

impl LoginForm {
    pub fn new(use_tls: bool) -> Self {
        Self {
            address: InputState::default(),
            username: InputState::default(),
            password: InputState::default(),
            use_tls,
            focus: LoginFocus::Address,
            submitting: false,
            address_error: None,
            username_error: None,
            password_error: None,
        }
    }

    pub fn error(&self, field: LoginField) -> Option<&str> {
        match field {
            LoginField::Address => self.address_error.as_deref(),
            LoginField::Username => self.username_error.as_deref(),
            LoginField::Password => self.password_error.as_deref(),
        }
    }

    fn error_slot(&mut self, field: LoginField) -> &mut Option<String> {
        match field {
            LoginField::Address => &mut self.address_error,
            LoginField::Username => &mut self.username_error,
            LoginField::Password => &mut self.password_error,
        }
    }

    pub fn set_error(&mut self, field: LoginField, message: impl Into<String>) {
        *self.error_slot(field) = Some(message.into());
    }

    pub fn input(&self, field: LoginField) -> &InputState {
        match field {
            LoginField::Address => &self.address,
            LoginField::Username => &self.username,
            LoginField::Password => &self.password,
        }
    }

    pub fn focus_next(&mut self) {
        let next = (self.focus.position() + 1) % FOCUS_ORDER.len();
        self.focus = FOCUS_ORDER[next];
    }

    pub fn focus_prev(&mut self) {
        let prev = (self.focus.position() + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len();
        self.focus = FOCUS_ORDER[prev];
    }

    pub fn toggle_tls(&mut self) {
        if !self.submitting {
            self.use_tls = !self.use_tls;
        }
    }

    /// Runs `edit` on the focused text field and clears that field's error. Returns false when
    /// nothing is editable (non-text focus or a submit in flight).
    pub fn edit_focused(&mut self, edit: impl FnOnce(&mut InputState)) -> bool {
        if self.submitting {
            return false;
        }
        let Some(field) = self.focus.field() else {
            return false;
        };
        *self.error_slot(field) = None;
        let input = match field {
            LoginField::Address => &mut self.address,
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        };
        edit(input);
        true
    }

    /// Checks required fields and, if all are filled in, marks the form as submitting and
    /// returns the request to send.
    pub fn submit(&mut self) -> Option<LoginRequest> {
        if self.submitting {
            return None;
        }
        let server_address = self.address.current().trim().to_string();
        let username = self.username.current().trim().to_string();
        let password = self.password.current();

        let mut first_missing = None;
        for (field, missing, message) in [
            (
                LoginField::Address,
                server_address.is_empty(),
                "Server address is required",
            ),
            (
                LoginField::Username,
                username.is_empty(),
                "Username is required",
            ),
            (
                LoginField::Password,
                password.is_empty(),
                "Password is required",
            ),
        ] {
            if missing {
                self.set_error(field, message);
                first_missing.get_or_insert(field);
            }
        }
        if let Some(field) = first_missing {
            self.focus = field.into();
            return None;
        }

        self.submitting = true;
        Some(LoginRequest {
            server_address,
            username,
            password,
            use_tls: self.use_tls,
        })
    }

    pub fn finish(&mut self, result: Result<(), LoginFailure>) {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.password.clear();
                self.focus = LoginFocus::Address;
            }
            Err(LoginFailure { field, reason }) => {
                if let Some(reason) = reason {
                    self.set_error(field, reason);
                }
                self.focus = field.into();
            }
        }
    }
}
