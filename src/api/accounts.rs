//! Account endpoints

use crate::api::models::Account;
use crate::error::FindashResult;
use crate::pipeline::{RequestOptions, RequestPipeline};
use serde::Serialize;
use std::sync::Arc;

const ACCOUNTS_KEY: &str = "/accounts";

/// Input for creating an account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraft {
    pub name: String,
    pub account_type: String,
    pub currency: String,
}

pub struct AccountsService {
    pipeline: Arc<RequestPipeline>,
}

impl AccountsService {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    pub async fn list(&self) -> FindashResult<Vec<Account>> {
        self.pipeline
            .get(ACCOUNTS_KEY, RequestOptions::cached())
            .await
    }

    pub async fn get(&self, id: i64) -> FindashResult<Account> {
        self.pipeline
            .get(&account_key(id), RequestOptions::cached())
            .await
    }

    pub async fn create(&self, draft: &AccountDraft) -> FindashResult<Account> {
        let created: Account = self
            .pipeline
            .post(ACCOUNTS_KEY, serde_json::to_value(draft)?)
            .await?;
        self.pipeline.invalidate(ACCOUNTS_KEY);
        Ok(created)
    }

    pub async fn delete(&self, id: i64) -> FindashResult<()> {
        let _: serde_json::Value = self.pipeline.delete(&account_key(id)).await?;
        self.pipeline.invalidate(ACCOUNTS_KEY);
        self.pipeline.invalidate(&account_key(id));
        Ok(())
    }
}

fn account_key(id: i64) -> String {
    format!("/accounts/{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use crate::store::KeyValueStore;
    use crate::transport::mock::MockTransport;
    use serde_json::json;
    use tempfile::TempDir;

    async fn service() -> (AccountsService, Arc<MockTransport>, TempDir) {
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
        (AccountsService::new(pipeline), transport, temp)
    }

    fn account_body(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id, "name": name, "accountType": "brokerage",
            "balance": 1000.0, "currency": "USD"
        })
    }

    #[tokio::test]
    async fn create_invalidates_list() {
        let (service, transport, _temp) = service().await;
        transport.respond("/accounts", 200, json!([account_body(1, "Main")]));
        transport.respond("/accounts", 200, account_body(2, "New"));
        transport.respond(
            "/accounts",
            200,
            json!([account_body(1, "Main"), account_body(2, "New")]),
        );

        assert_eq!(service.list().await.unwrap().len(), 1);

        service
            .create(&AccountDraft {
                name: "New".to_string(),
                account_type: "brokerage".to_string(),
                currency: "USD".to_string(),
            })
            .await
            .unwrap();

        // The list read refetches after the mutation
        assert_eq!(service.list().await.unwrap().len(), 2);
        assert_eq!(transport.calls_to("/accounts"), 3);
    }

    #[tokio::test]
    async fn delete_invalidates_both_keys() {
        let (service, transport, _temp) = service().await;
        transport.respond("/accounts/5", 200, account_body(5, "Old"));
        transport.respond("/accounts/5", 200, serde_json::Value::Null);
        transport.respond("/accounts/5", 404, json!({}));

        service.get(5).await.unwrap();
        service.delete(5).await.unwrap();

        // The cached entity is gone; a fresh read hits the network
        let err = service.get(5).await.unwrap_err();
        assert!(matches!(err, crate::error::FindashError::NotFound(_)));
    }
}
