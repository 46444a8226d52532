//! HTTP-слой: контракт клиента, классификация ошибок, токен авторизации
//!
//! The list controller only depends on the [`HttpClient`] trait. The browser
//! transport lives in `gloo_client` and is compiled for wasm32 only.

pub mod cancel;
pub mod credentials;
pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod gloo_client;
#[cfg(test)]
pub(crate) mod testing;

use std::future::Future;

use async_trait::async_trait;
use futures::future::{select, Either};
use serde_json::Value;

pub use cancel::CancelToken;
pub use credentials::{authorization_header, CredentialProvider, NoCredentials, StaticToken};
pub use error::{classify_response, ApiError};
#[cfg(target_arch = "wasm32")]
pub use gloo_client::GlooHttpClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Ordered query pairs, not yet encoded.
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub cancel: Option<CancelToken>,
}

impl RequestOptions {
    pub fn get(query: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Get,
            query,
            body: None,
            cancel: None,
        }
    }

    pub fn with_body(method: Method, body: Option<Value>) -> Self {
        Self {
            method,
            query: Vec::new(),
            body,
            cancel: None,
        }
    }

    pub fn cancel_with(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// One network call with a normalized outcome.
///
/// Implementations attach the bearer credential themselves, enforce a fixed
/// timeout (reported as [`ApiError::Network`]) and honour
/// [`RequestOptions::cancel`] on a best-effort basis.
#[async_trait(?Send)]
pub trait HttpClient {
    async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError>;
}

/// Собирает полный URL: base + path + закодированный query
pub fn build_url(base: &str, path: &str, query: &[(String, String)]) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    let mut url = if base.is_empty() {
        format!("/{}", path)
    } else {
        format!("{}/{}", base, path)
    };

    if !query.is_empty() {
        let params: Vec<String> = query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        url.push('?');
        url.push_str(&params.join("&"));
    }
    url
}

/// Path of a single record: `{resource}/{id}` with the id percent-encoded.
pub fn record_path(resource_path: &str, id: &str) -> String {
    format!(
        "{}/{}",
        resource_path.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

/// Races a whole exchange (headers and body) against `deadline`. On expiry
/// `on_expire` runs and the call fails as a network error.
pub async fn with_deadline<T, F, D>(
    path: &str,
    exchange: F,
    deadline: D,
    on_expire: impl FnOnce(),
) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
    D: Future<Output = ()>,
{
    let exchange = Box::pin(exchange);
    let deadline = Box::pin(deadline);
    match select(exchange, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            log::warn!("{}: no complete response before the deadline", path);
            on_expire();
            Err(ApiError::network(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{pending, ready};
    use std::cell::Cell;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_url_joins_slashes() {
        assert_eq!(
            build_url("http://host:3000/", "/api/reservations", &[]),
            "http://host:3000/api/reservations"
        );
        assert_eq!(build_url("", "api/x", &[]), "/api/x");
    }

    #[test]
    fn test_build_url_encodes_query_in_order() {
        let url = build_url(
            "http://h",
            "/api/reservations",
            &pairs(&[("q", "o'brien & co"), ("page", "1")]),
        );
        assert_eq!(url, "http://h/api/reservations?q=o%27brien%20%26%20co&page=1");
    }

    #[test]
    fn test_record_path_encodes_id() {
        assert_eq!(record_path("/api/deposits/", "a/b"), "/api/deposits/a%2Fb");
        assert_eq!(record_path("/api/deposits", "42"), "/api/deposits/42");
    }

    #[test]
    fn test_deadline_covers_body_read() {
        let expired = Cell::new(false);
        // заголовки пришли, тело так и не пришло
        let exchange = async {
            ready(()).await;
            pending::<()>().await;
            Ok::<_, ApiError>("body")
        };
        let result = block_on(with_deadline("/api/x", exchange, ready(()), || expired.set(true)));

        assert_eq!(result, Err(ApiError::network("/api/x")));
        assert_eq!(result.unwrap_err().status(), Some(0));
        assert!(expired.get());
    }

    #[test]
    fn test_exchange_before_deadline() {
        let expired = Cell::new(false);
        let result = block_on(with_deadline(
            "/api/x",
            ready(Ok::<_, ApiError>(5)),
            pending::<()>(),
            || expired.set(true),
        ));
        assert_eq!(result, Ok(5));
        assert!(!expired.get());
    }
}
