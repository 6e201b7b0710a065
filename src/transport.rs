//! Network transport seam
//!
//! The pipeline and session talk to the network through the [`Transport`]
//! trait. Production uses blocking `ureq` under `spawn_blocking`; tests
//! substitute scripted mocks. Non-2xx statuses come back as responses,
//! not transport errors, so the pipeline can classify them and read the
//! server's error body.

use crate::error::{FindashError, FindashResult};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// HTTP method
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

    /// Mutating methods are never served from or written to the cache
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound request as the transport sees it
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Bearer credential, attached as `Authorization: Bearer <token>`
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// A completed response: status plus parsed JSON body.
///
/// Empty bodies read as `Value::Null`; non-JSON bodies are preserved as
/// `Value::String` so server error text is not lost.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The network boundary
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch a request and return the response.
    ///
    /// `Err` means no response was received (transport failure, including
    /// timeouts); HTTP error statuses are `Ok` responses.
    async fn send(&self, request: HttpRequest) -> FindashResult<HttpResponse>;
}

/// Production transport backed by a blocking `ureq` agent
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Build a transport with the given global timeout
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            // Error statuses must reach the classifier as responses
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build();

        Self {
            agent: config.new_agent(),
        }
    }

    fn dispatch(agent: &ureq::Agent, request: &HttpRequest) -> FindashResult<HttpResponse> {
        let bearer = request
            .bearer
            .as_ref()
            .map(|token| format!("Bearer {}", token));

        let result = match request.method {
            Method::Get | Method::Delete => {
                let mut builder = match request.method {
                    Method::Get => agent.get(&request.url),
                    _ => agent.delete(&request.url),
                };
                if let Some(ref auth) = bearer {
                    builder = builder.header("Authorization", auth);
                }
                builder.call()
            }
            Method::Post | Method::Put | Method::Patch => {
                let mut builder = match request.method {
                    Method::Post => agent.post(&request.url),
                    Method::Put => agent.put(&request.url),
                    _ => agent.patch(&request.url),
                };
                if let Some(ref auth) = bearer {
                    builder = builder.header("Authorization", auth);
                }
                // Requests without an explicit body still send a JSON object
                let body = request.body.clone().unwrap_or(Value::Object(Default::default()));
                builder.send_json(&body)
            }
        };

        let mut response = result.map_err(|e| FindashError::Network(e.to_string()))?;
        let status = response.status().as_u16();

        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| FindashError::Network(format!("reading response body: {}", e)))?;

        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        debug!("{} {} -> {}", request.method, request.url, status);
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> FindashResult<HttpResponse> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || Self::dispatch(&agent, &request))
            .await
            .map_err(|e| FindashError::Internal(format!("transport task failed: {}", e)))?
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted transport for session and pipeline tests

    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    struct Scripted {
        result: FindashResult<HttpResponse>,
        delay: Option<Duration>,
    }

    /// Route-matching mock: responses are enqueued per URL substring and
    /// consumed in order.
    #[derive(Default)]
    pub struct MockTransport {
        routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
        calls: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn enqueue(&self, route: &str, result: FindashResult<HttpResponse>) {
            self.enqueue_delayed(route, result, None);
        }

        pub fn enqueue_delayed(
            &self,
            route: &str,
            result: FindashResult<HttpResponse>,
            delay: Option<Duration>,
        ) {
            self.routes
                .lock()
                .unwrap()
                .entry(route.to_string())
                .or_default()
                .push_back(Scripted { result, delay });
        }

        /// Enqueue a plain JSON response
        pub fn respond(&self, route: &str, status: u16, body: Value) {
            self.enqueue(route, Ok(HttpResponse { status, body }));
        }

        pub fn calls(&self) -> Vec<HttpRequest> {
            self.calls.lock().unwrap().clone()
        }

        pub fn calls_to(&self, route: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.url.contains(route))
                .count()
        }

        pub fn bearers_sent_to(&self, route: &str) -> Vec<Option<String>> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.url.contains(route))
                .map(|c| c.bearer.clone())
                .collect()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: HttpRequest) -> FindashResult<HttpResponse> {
            self.calls.lock().unwrap().push(request.clone());

            let scripted = {
                // Match routes against the URL path so the host part
                // (e.g. the "/a" inside "http://api.test") can't hijack
                // an unrelated route.
                let path = request
                    .url
                    .find("://")
                    .and_then(|i| {
                        request.url[i + 3..]
                            .find('/')
                            .map(|j| &request.url[i + 3 + j..])
                    })
                    .unwrap_or(request.url.as_str());
                let mut routes = self.routes.lock().unwrap();
                let route = routes
                    .iter_mut()
                    .find(|(k, _)| path.starts_with(k.as_str()))
                    .map(|(_, q)| q.pop_front());
                match route {
                    Some(Some(s)) => s,
                    _ => panic!("no scripted response for {}", request.url),
                }
            };

            if let Some(delay) = scripted.delay {
                tokio::time::sleep(delay).await;
            }
            scripted.result
        }
    }
}
