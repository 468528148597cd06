//! Credentials used to authenticate against imageboard APIs
use booru_common::serde::{self, Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AuthState {
    Authenticated,
    NotAuthenticated,
}

impl AuthState {
    #[inline]
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        match self {
            Self::Authenticated => true,
            Self::NotAuthenticated => false,
        }
    }
}

/// User credentials for a single imageboard.
///
/// `api_key` holds whatever secret the imageboard expects: the API key on Danbooru and
/// Gelbooru, the salted password hash on Moebooru sites. An empty username means the
/// requests are made anonymously.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(crate = "self::serde")]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

impl Credentials {
    #[must_use]
    pub const fn new(username: String, api_key: String) -> Self {
        Self { username, api_key }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> AuthState {
        if self.username.trim().is_empty() || self.api_key.trim().is_empty() {
            AuthState::NotAuthenticated
        } else {
            AuthState::Authenticated
        }
    }
}

#[cfg(test)]
mod test {
    use super::{AuthState, Credentials};

    #[test]
    fn blank_credentials_are_anonymous() {
        assert_eq!(Credentials::default().state(), AuthState::NotAuthenticated);
        assert_eq!(
            Credentials::new("user".into(), " ".into()).state(),
            AuthState::NotAuthenticated
        );
        assert!(Credentials::new("user".into(), "key".into())
            .state()
            .is_auth());
    }
}
