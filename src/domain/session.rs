use std::fmt;

/// The caller's session cookie, forwarded verbatim on authenticated calls.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Session {
    cookie: String,
}

impl Session {
    /// Returns `None` for a blank cookie string.
    pub fn new(cookie: impl Into<String>) -> Option<Self> {
        let cookie = cookie.into();
        let trimmed = cookie.trim();
        (!trimmed.is_empty()).then(|| Self {
            cookie: trimmed.to_string(),
        })
    }

    /// Value for the outgoing `Cookie` header.
    pub fn cookie_header(&self) -> &str {
        &self.cookie
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cookie", &"<redacted>")
            .finish()
    }
}
