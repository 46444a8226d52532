//! Browser transport on top of `gloo-net`.

use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use web_sys::AbortController;

use crate::shared::config::ApiConfig;

use super::credentials::{authorization_header, CredentialProvider, LocalStorageCredentials};
use super::error::{classify_response, ApiError};
use super::{build_url, with_deadline, HttpClient, Method, RequestOptions};

pub struct GlooHttpClient {
    base: String,
    timeout_ms: u32,
    credentials: Rc<dyn CredentialProvider>,
}

impl GlooHttpClient {
    pub fn new(
        base: impl Into<String>,
        timeout_ms: u32,
        credentials: Rc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            base: base.into(),
            timeout_ms,
            credentials,
        }
    }

    /// Client for the configured backend, authorised from localStorage.
    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(
            api.resolve_base(),
            api.timeout_ms,
            Rc::new(LocalStorageCredentials),
        )
    }

    fn builder(&self, method: Method, url: &str) -> RequestBuilder {
        match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Patch => Request::patch(url),
            Method::Delete => Request::delete(url),
        }
    }
}

#[async_trait(?Send)]
impl HttpClient for GlooHttpClient {
    async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let url = build_url(&self.base, path, &options.query);
        log::debug!("{} {}", options.method.as_str(), url);

        // Один AbortController на запрос: его дёргают и отмена, и таймаут
        let abort = AbortController::new().ok();
        if let (Some(token), Some(controller)) = (&options.cancel, abort.clone()) {
            token.on_cancel(move || controller.abort());
        }
        let signal = abort.as_ref().map(|c| c.signal());

        let mut builder = self
            .builder(options.method, &url)
            .header("Accept", "application/json")
            .abort_signal(signal.as_ref());
        if let Some(auth) = authorization_header(self.credentials.as_ref()) {
            builder = builder.header("Authorization", &auth);
        }

        let request = match &options.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::transport(path, e))?;

        // Таймаут покрывает весь обмен: заголовки и чтение тела
        let exchange = async {
            let response = request.send().await.map_err(|e| ApiError::transport(path, e))?;
            let status = response.status();
            let status_text = response.status_text();
            let text = response
                .text()
                .await
                .map_err(|e| ApiError::transport(path, e))?;
            Ok::<_, ApiError>((status, status_text, text))
        };
        let timeout = TimeoutFuture::new(self.timeout_ms);
        let (status, status_text, text) = with_deadline(path, exchange, timeout, || {
            if let Some(controller) = &abort {
                controller.abort();
            }
        })
        .await?;

        classify_response(path, status, &status_text, &text)
    }
}
