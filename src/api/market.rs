//! Market data endpoints
//!
//! Quotes move fast, so they get short TTLs rather than the cache
//! default.

use crate::api::models::{HistoricalPoint, MarketSummary, StockQuote};
use crate::error::FindashResult;
use crate::pipeline::{RequestOptions, RequestPipeline};
use chrono::Duration;
use std::sync::Arc;

/// Quotes go stale quickly
const QUOTE_TTL_SECS: i64 = 30;
/// Index summary refreshes a little slower
const SUMMARY_TTL_SECS: i64 = 60;

pub struct MarketDataService {
    pipeline: Arc<RequestPipeline>,
}

impl MarketDataService {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    pub async fn stock_quote(&self, symbol: &str) -> FindashResult<StockQuote> {
        let endpoint = format!("/market/stock/{}", symbol.to_uppercase());
        self.pipeline
            .get(
                &endpoint,
                RequestOptions::cached_for(Duration::seconds(QUOTE_TTL_SECS)),
            )
            .await
    }

    pub async fn summary(&self) -> FindashResult<MarketSummary> {
        self.pipeline
            .get(
                "/market/summary",
                RequestOptions::cached_for(Duration::seconds(SUMMARY_TTL_SECS)),
            )
            .await
    }

    pub async fn historical(
        &self,
        symbol: &str,
        range: &str,
    ) -> FindashResult<Vec<HistoricalPoint>> {
        let endpoint = format!(
            "/market/historical/{}?range={}",
            symbol.to_uppercase(),
            range
        );
        self.pipeline.get(&endpoint, RequestOptions::cached()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use crate::store::KeyValueStore;
    use crate::transport::mock::MockTransport;
    use serde_json::json;
    use tempfile::TempDir;

    async fn service() -> (MarketDataService, Arc<MockTransport>, TempDir) {
        let temp = TempDir::new().unwrap();
        let kv = KeyValueStore::open(temp.path()).await.unwrap();
        let transport = MockTransport::new();
        let session = SessionStore::connect(kv, transport.clone(), "http://api.test")
            .await
            .unwrap();
        let pipeline = Arc::new(RequestPipeline::new(
            "http://api.test",
            transport.clone(),
            session,
        ));
        (MarketDataService::new(pipeline), transport, temp)
    }

    #[tokio::test]
    async fn quote_symbol_is_normalized_and_cached() {
        let (service, transport, _temp) = service().await;
        transport.respond(
            "/market/stock/VTI",
            200,
            json!({
                "symbol": "VTI", "name": "Vanguard Total Market",
                "price": 220.0, "change": 1.5, "changePercent": 0.7,
                "volume": 1000000.0
            }),
        );

        let quote = service.stock_quote("vti").await.unwrap();
        assert_eq!(quote.symbol, "VTI");

        // Lowercase input hits the same cache entry
        service.stock_quote("VTI").await.unwrap();
        assert_eq!(transport.calls_to("/market/stock/VTI"), 1);
    }

    #[tokio::test]
    async fn historical_includes_range_parameter() {
        let (service, transport, _temp) = service().await;
        transport.respond("/market/historical/VTI", 200, json!([]));

        service.historical("VTI", "1y").await.unwrap();

        let calls = transport.calls();
        assert!(calls[0].url.ends_with("/market/historical/VTI?range=1y"));
    }
}
