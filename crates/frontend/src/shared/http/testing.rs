//! Scripted [`HttpClient`] for unit tests.
//!
//! Queued replies are returned immediately; otherwise the call stays pending
//! until the test answers it with [`ScriptedClient::respond`], which lets tests
//! control the order in which responses resolve.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;

use super::{ApiError, CancelToken, HttpClient, Method, RequestOptions};

type Reply = Result<Value, ApiError>;

pub struct RecordedCall {
    pub path: String,
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub cancel: Option<CancelToken>,
    reply: Option<oneshot::Sender<Reply>>,
}

impl RecordedCall {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
pub struct ScriptedClient {
    queued: RefCell<VecDeque<Reply>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self, reply: Reply) {
        self.queued.borrow_mut().push_back(reply);
    }

    pub fn respond(&self, index: usize, reply: Reply) {
        let sender = self.calls.borrow_mut()[index]
            .reply
            .take()
            .expect("call already answered");
        let _ = sender.send(reply);
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn with_call<T>(&self, index: usize, f: impl FnOnce(&RecordedCall) -> T) -> T {
        f(&self.calls.borrow()[index])
    }
}

#[async_trait(?Send)]
impl HttpClient for ScriptedClient {
    async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let queued = self.queued.borrow_mut().pop_front();
        let (sender, receiver) = oneshot::channel();
        self.calls.borrow_mut().push(RecordedCall {
            path: path.to_string(),
            method: options.method,
            query: options.query,
            body: options.body,
            cancel: options.cancel,
            reply: if queued.is_some() { None } else { Some(sender) },
        });

        match queued {
            Some(reply) => reply,
            None => receiver
                .await
                .unwrap_or_else(|_| Err(ApiError::network(path))),
        }
    }
}
