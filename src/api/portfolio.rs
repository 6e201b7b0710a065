//! Portfolio endpoints
//!
//! Reads are cached with the default TTL. Mutations invalidate the
//! account's summary, holdings, and transactions keys; the dependency
//! graph between portfolio endpoints is shallow enough that this
//! explicit set is exhaustive.

use crate::api::models::{PortfolioHolding, PortfolioSummary, PortfolioTransaction, TransactionKind};
use crate::error::FindashResult;
use crate::pipeline::{RequestOptions, RequestPipeline};
use serde::Serialize;
use std::sync::Arc;

/// Input for creating or updating a holding
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingDraft {
    pub symbol: String,
    pub quantity: f64,
    pub average_price: f64,
}

/// Input for recording a transaction
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub quantity: f64,
    pub price: f64,
}

pub struct PortfolioService {
    pipeline: Arc<RequestPipeline>,
}

impl PortfolioService {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    pub async fn summary(&self, account_id: i64) -> FindashResult<PortfolioSummary> {
        self.pipeline
            .get(&summary_key(account_id), RequestOptions::cached())
            .await
    }

    pub async fn holdings(&self, account_id: i64) -> FindashResult<Vec<PortfolioHolding>> {
        self.pipeline
            .get(&holdings_key(account_id), RequestOptions::cached())
            .await
    }

    pub async fn holding(&self, account_id: i64, symbol: &str) -> FindashResult<PortfolioHolding> {
        self.pipeline
            .get(&holding_key(account_id, symbol), RequestOptions::cached())
            .await
    }

    pub async fn add_holding(
        &self,
        account_id: i64,
        draft: &HoldingDraft,
    ) -> FindashResult<PortfolioHolding> {
        let created = self
            .pipeline
            .post(&holdings_key(account_id), serde_json::to_value(draft)?)
            .await?;
        self.invalidate_account(account_id);
        Ok(created)
    }

    pub async fn update_holding(
        &self,
        account_id: i64,
        symbol: &str,
        draft: &HoldingDraft,
    ) -> FindashResult<PortfolioHolding> {
        let updated = self
            .pipeline
            .put(
                &holding_key(account_id, symbol),
                serde_json::to_value(draft)?,
            )
            .await?;
        self.pipeline.invalidate(&holding_key(account_id, symbol));
        self.invalidate_account(account_id);
        Ok(updated)
    }

    pub async fn remove_holding(&self, account_id: i64, symbol: &str) -> FindashResult<()> {
        let _: serde_json::Value = self
            .pipeline
            .delete(&holding_key(account_id, symbol))
            .await?;
        self.pipeline.invalidate(&holding_key(account_id, symbol));
        self.invalidate_account(account_id);
        Ok(())
    }

    pub async fn transactions(&self, account_id: i64) -> FindashResult<Vec<PortfolioTransaction>> {
        self.pipeline
            .get(&transactions_key(account_id), RequestOptions::cached())
            .await
    }

    pub async fn add_transaction(
        &self,
        account_id: i64,
        draft: &TransactionDraft,
    ) -> FindashResult<PortfolioTransaction> {
        let created = self
            .pipeline
            .post(&transactions_key(account_id), serde_json::to_value(draft)?)
            .await?;
        self.invalidate_account(account_id);
        Ok(created)
    }

    /// Drop every cached read for one account's portfolio
    fn invalidate_account(&self, account_id: i64) {
        self.pipeline.invalidate(&summary_key(account_id));
        self.pipeline.invalidate(&holdings_key(account_id));
        self.pipeline.invalidate(&transactions_key(account_id));
    }
}

fn summary_key(account_id: i64) -> String {
    format!("/portfolio/{}/summary", account_id)
}

fn holdings_key(account_id: i64) -> String {
    format!("/portfolio/{}/holdings", account_id)
}

fn holding_key(account_id: i64, symbol: &str) -> String {
    format!("/portfolio/{}/holdings/{}", account_id, symbol)
}

fn transactions_key(account_id: i64) -> String {
    format!("/portfolio/{}/transactions", account_id)
}
