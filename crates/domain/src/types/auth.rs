//! Credentials and the authenticated session

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::http::CookieJar;

/// Account credentials; the password is wiped from memory on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    account: String,
    password: String,
}

impl Credentials {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self { account: account.into(), password: password.into() }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// The password should not be stored or logged by the caller.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Authenticated session: bearer token plus the cookies issued at login
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_name: String,
    pub cookies: CookieJar,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user_name", &self.user_name)
            .field("cookies", &self.cookies.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secrets() {
        let credentials = Credentials::new("13800000000", "hunter2");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("13800000000"));
        assert!(!rendered.contains("hunter2"));

        let session =
            Session { token: "T-secret".into(), user_name: "U".into(), cookies: CookieJar::new() };
        assert!(!format!("{session:?}").contains("T-secret"));
    }
}
