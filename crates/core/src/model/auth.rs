use std::fmt;

/// Credentials that gate every remote call.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    email: String,
    token: String,
}

impl AuthContext {
    /// Build a context from raw stored values.
    ///
    /// Returns `None` when either value is missing, empty, or one of the
    /// literal strings `"null"` / `"undefined"` left behind by older clients.
    #[must_use]
    pub fn from_parts(email: Option<String>, token: Option<String>) -> Option<Self> {
        let email = email.filter(|value| is_usable(value))?;
        let token = token.filter(|value| is_usable(value))?;
        Some(Self { email, token })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

// Tokens must not leak into logs.
impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

fn is_usable(value: &str) -> bool {
    !value.is_empty() && value != "null" && value != "undefined"
}
