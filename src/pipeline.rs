//! The request pipeline
//!
//! Every outbound call flows through here: cache lookup, credential
//! attachment, dispatch, outcome classification, and the single
//! refresh-and-retry recovery on authorization failure. The pipeline is
//! an owned, injected object; the composition root wires it to its
//! cache, session, and transport.
//!
//! A logical call moves through one path of:
//! pending -> cache hit -> done, or
//! pending -> in flight -> success | auth failure | other failure, where
//! an auth failure triggers exactly one refresh and, if that succeeds,
//! exactly one retry.

use crate::cache::ResponseCache;
use crate::error::{FindashError, FindashResult};
use crate::observe::{CallRecord, PipelineObserver};
use crate::session::SessionStore;
use crate::transport::{HttpRequest, Method, Transport};
use chrono::Duration;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Per-call options
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Whether a GET may be served from and stored to the response cache
    pub cacheable: bool,
    /// Cache TTL override; `None` uses the cache default
    pub ttl: Option<Duration>,
}

impl RequestOptions {
    /// Cacheable with the default TTL
    pub fn cached() -> Self {
        Self {
            cacheable: true,
            ttl: None,
        }
    }

    /// Cacheable with an explicit TTL
    pub fn cached_for(ttl: Duration) -> Self {
        Self {
            cacheable: true,
            ttl: Some(ttl),
        }
    }
}

/// Orchestrates outbound API calls
pub struct RequestPipeline {
    base_url: String,
    transport: Arc<dyn Transport>,
    cache: ResponseCache,
    cache_enabled: bool,
    default_ttl: Option<Duration>,
    session: SessionStore,
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl RequestPipeline {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        session: SessionStore,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            cache: ResponseCache::new(),
            cache_enabled: true,
            default_ttl: None,
            session,
            observers: Vec::new(),
        }
    }

    /// Override caching behavior from configuration
    pub fn with_cache_settings(mut self, enabled: bool, default_ttl: Duration) -> Self {
        self.cache_enabled = enabled;
        self.default_ttl = Some(default_ttl);
        self
    }

    /// Attach a passive observer
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// The session this pipeline authenticates through
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Issue a request and classify its outcome.
    ///
    /// Cacheable GETs short-circuit on a fresh cache entry with no
    /// network activity. Mutating methods never touch the cache; callers
    /// invalidate related keys explicitly after successful mutations.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> FindashResult<T> {
        let started = Instant::now();
        let key = cache_key(endpoint);

        let cacheable = !method.is_mutating() && options.cacheable && self.cache_enabled;
        if cacheable {
            if let Some(value) = self.cache.get(&key) {
                debug!("Cache hit for {}", endpoint);
                let result = serde_json::from_value(value).map_err(FindashError::from);
                self.emit(method, endpoint, result_kind(&result), started, true, false);
                return result;
            }
        }

        let (result, retried) = self.dispatch_with_recovery(method, endpoint, body).await;

        if let Ok(ref value) = result {
            if cacheable {
                self.cache.set(&key, value.clone(), options.ttl.or(self.default_ttl));
            }
        }

        // Decode before emitting, so the recorded outcome matches what
        // the caller actually receives
        let result =
            result.and_then(|value| serde_json::from_value(value).map_err(FindashError::from));
        self.emit(method, endpoint, result_kind(&result), started, false, retried);
        result
    }

    /// GET with options
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> FindashResult<T> {
        self.request(Method::Get, endpoint, None, options).await
    }

    /// POST with a JSON body, never cached
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Value,
    ) -> FindashResult<T> {
        self.request(Method::Post, endpoint, Some(body), RequestOptions::default())
            .await
    }

    /// PUT with a JSON body, never cached
    pub async fn put<T: DeserializeOwned>(&self, endpoint: &str, body: Value) -> FindashResult<T> {
        self.request(Method::Put, endpoint, Some(body), RequestOptions::default())
            .await
    }

    /// DELETE, never cached
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> FindashResult<T> {
        self.request(Method::Delete, endpoint, None, RequestOptions::default())
            .await
    }

    /// Drop the cached response for one endpoint
    pub fn invalidate(&self, endpoint: &str) {
        self.cache.remove(&cache_key(endpoint));
    }

    /// Drop every cached response
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Dispatch once; on a 401, refresh the session once and retry the
    /// original call exactly once with the renewed credential. A failed
    /// refresh propagates SessionExpired with no retry.
    ///
    /// Returns the classified outcome and whether a retry happened.
    async fn dispatch_with_recovery(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> (FindashResult<Value>, bool) {
        let first = self.dispatch_once(method, endpoint, body.clone()).await;

        match first {
            Err(FindashError::Unauthorized) => match self.session.refresh().await {
                Ok(_) => {
                    debug!("Retrying {} {} with refreshed credential", method, endpoint);
                    (self.dispatch_once(method, endpoint, body).await, true)
                }
                Err(_) => (Err(FindashError::SessionExpired), false),
            },
            other => (other, false),
        }
    }

    async fn dispatch_once(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> FindashResult<Value> {
        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: format!("{}{}", self.base_url, endpoint),
                bearer: self.session.token(),
                body,
            })
            .await?;

        classify(endpoint, response.status, response.body)
    }

    fn emit(
        &self,
        method: Method,
        endpoint: &str,
        outcome: &'static str,
        started: Instant,
        served_from_cache: bool,
        retried: bool,
    ) {
        if self.observers.is_empty() {
            return;
        }
        let record = CallRecord {
            method: method.as_str(),
            endpoint: endpoint.to_string(),
            outcome,
            elapsed: started.elapsed(),
            served_from_cache,
            retried,
        };
        for observer in &self.observers {
            observer.on_call(&record);
        }
    }
}

fn result_kind<T>(result: &FindashResult<T>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(e) => e.kind(),
    }
}

/// Classify an HTTP outcome into the error taxonomy
fn classify(endpoint: &str, status: u16, body: Value) -> FindashResult<Value> {
    match status {
        s if (200..300).contains(&s) => Ok(body),
        401 => Err(FindashError::Unauthorized),
        403 => Err(FindashError::Forbidden),
        404 => Err(FindashError::NotFound(endpoint.to_string())),
        s if s >= 500 => Err(FindashError::Server { status: s }),
        s => {
            let message = body["message"]
                .as_str()
                .unwrap_or("request failed")
                .to_string();
            Err(FindashError::Client { status: s, message })
        }
    }
}

/// Cache key for a logical endpoint: path plus query parameters
/// normalized by sorting, so parameter order does not split the cache.
pub fn cache_key(endpoint: &str) -> String {
    match endpoint.split_once('?') {
        None => endpoint.to_string(),
        Some((path, query)) => {
            let mut params: Vec<&str> = query.split('&').filter(|p| !p.is_empty()).collect();
            params.sort_unstable();
            if params.is_empty() {
                path.to_string()
            } else {
                format!("{}?{}", path, params.join("&"))
            }
        }
    }
}
