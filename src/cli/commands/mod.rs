//! CLI command implementations

pub mod accounts;
pub mod config;
pub mod dashboard;
pub mod login;
pub mod logout;
pub mod market;
pub mod portfolio;
pub mod status;

pub use accounts::execute as accounts;
pub use config::execute as config;
pub use dashboard::execute as dashboard;
pub use login::execute as login;
pub use logout::execute as logout;
pub use market::execute as market;
pub use portfolio::execute as portfolio;
pub use status::execute as status;

use crate::config::Config;
use crate::error::FindashResult;
use crate::observe::TracingObserver;
use crate::pipeline::RequestPipeline;
use crate::session::SessionStore;
use crate::store::KeyValueStore;
use crate::transport::UreqTransport;
use std::sync::Arc;
use std::time::Duration;

/// Build the request pipeline every data command runs through.
///
/// Wires persisted session state, the HTTP transport, and tracing
/// instrumentation together from the loaded configuration.
pub async fn build_pipeline(config: &Config) -> FindashResult<Arc<RequestPipeline>> {
    let kv = KeyValueStore::open_default().await?;
    let transport = Arc::new(UreqTransport::new(Duration::from_secs(
        config.api.timeout_secs,
    )));
    let session = SessionStore::connect(kv, transport.clone(), config.api.normalized_base_url())
        .await?;

    Ok(Arc::new(
        RequestPipeline::new(config.api.normalized_base_url(), transport, session)
            .with_cache_settings(
                config.cache.enabled,
                chrono::Duration::seconds(config.cache.ttl_secs),
            )
            .with_observer(Arc::new(TracingObserver)),
    ))
}
