//! Источник токена авторизации.
//!
//! The HTTP client receives a [`CredentialProvider`] at construction and asks it
//! for a bearer token on every request.

pub trait CredentialProvider {
    fn bearer_token(&self) -> Option<String>;
}

/// Anonymous requests; the server decides what is allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Value for the `Authorization` header, if there is a usable token.
pub fn authorization_header(provider: &dyn CredentialProvider) -> Option<String> {
    provider
        .bearer_token()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {}", t))
}

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageCredentials;

#[cfg(target_arch = "wasm32")]
mod storage {
    use super::CredentialProvider;
    use web_sys::window;

    const ACCESS_TOKEN_KEY: &str = "auth_access_token";

    /// Reads the access token the login page saved to localStorage.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorageCredentials;

    impl CredentialProvider for LocalStorageCredentials {
        fn bearer_token(&self) -> Option<String> {
            window()?
                .local_storage()
                .ok()??
                .get_item(ACCESS_TOKEN_KEY)
                .ok()?
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        assert_eq!(
            authorization_header(&StaticToken("abc".into())),
            Some("Bearer abc".to_string())
        );
        assert_eq!(authorization_header(&NoCredentials), None);
        assert_eq!(authorization_header(&StaticToken("  ".into())), None);
    }
}
