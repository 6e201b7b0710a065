//! API data models
//!
//! Field names follow the backend's camelCase JSON.

use serde::{Deserialize, Serialize};

/// A brokerage or bank account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub account_type: String,
    pub balance: f64,
    pub currency: String,
}

/// A position held in a portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHolding {
    pub id: i64,
    pub account_id: i64,
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    pub average_price: f64,
    pub current_price: f64,
    pub total_value: f64,
    pub gain_loss: f64,
    pub gain_loss_percentage: f64,
}

/// Buy/sell transaction on a portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTransaction {
    pub id: i64,
    pub account_id: i64,
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub quantity: f64,
    pub price: f64,
    pub total_amount: f64,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Buy,
    Sell,
}

/// Aggregate view of a portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_gain_loss: f64,
    pub gain_loss_percentage: f64,
    #[serde(default)]
    pub holdings: Vec<PortfolioHolding>,
    #[serde(default)]
    pub transactions: Vec<PortfolioTransaction>,
}

/// Quote for a listed security
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: f64,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// Top-line index values for the dashboard header
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub sp500_value: f64,
    pub sp500_change: f64,
    pub dow_jones_value: f64,
    pub dow_jones_change: f64,
    pub nasdaq_value: f64,
    pub nasdaq_change: f64,
    pub bitcoin_value: f64,
    pub bitcoin_change: f64,
}

/// Aggregate dashboard view across every linked account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_portfolio_value: f64,
    pub total_gain_loss: f64,
    pub gain_loss_percentage: f64,
    #[serde(default)]
    pub account_balances: Vec<AccountBalance>,
    #[serde(default)]
    pub top_holdings: Vec<TopHolding>,
    #[serde(default)]
    pub recent_transactions: Vec<ActivityItem>,
    #[serde(default)]
    pub market_trends: Vec<MarketTrend>,
}

/// Per-account balance line on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub account_id: i64,
    pub account_name: String,
    pub balance: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One of the largest positions across accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopHolding {
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    pub current_price: f64,
    pub total_value: f64,
    pub gain_loss: f64,
    pub gain_loss_percentage: f64,
}

/// A recent transaction shown on the dashboard activity feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: i64,
    pub account_id: i64,
    pub account_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Price movement of a trending symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTrend {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percentage: f64,
}

/// Portfolio value on one day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePoint {
    pub date: String,
    pub value: f64,
}

/// Share of the portfolio held in one asset class
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub percentage: f64,
}

/// One OHLCV point of price history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn holding_deserializes_from_backend_json() {
        let holding: PortfolioHolding = serde_json::from_value(json!({
            "id": 1,
            "accountId": 7,
            "symbol": "VTI",
            "name": "Vanguard Total Market",
            "quantity": 10.0,
            "averagePrice": 200.0,
            "currentPrice": 220.0,
            "totalValue": 2200.0,
            "gainLoss": 200.0,
            "gainLossPercentage": 10.0
        }))
        .unwrap();

        assert_eq!(holding.symbol, "VTI");
        assert_eq!(holding.account_id, 7);
    }

    #[test]
    fn transaction_kind_uses_uppercase_wire_format() {
        let tx: PortfolioTransaction = serde_json::from_value(json!({
            "id": 1,
            "accountId": 7,
            "symbol": "VTI",
            "type": "BUY",
            "quantity": 1.0,
            "price": 220.0,
            "totalAmount": 220.0,
            "date": "2024-05-01"
        }))
        .unwrap();

        assert_eq!(tx.kind, TransactionKind::Buy);
        assert!(tx.description.is_none());
    }

    #[test]
    fn dashboard_summary_tolerates_missing_collections() {
        let summary: DashboardSummary = serde_json::from_value(json!({
            "totalPortfolioValue": 12500.0,
            "totalGainLoss": 500.0,
            "gainLossPercentage": 4.2,
            "accountBalances": [
                {"accountId": 1, "accountName": "Main", "balance": 12500.0, "type": "brokerage"}
            ]
        }))
        .unwrap();

        assert_eq!(summary.account_balances[0].kind, "brokerage");
        assert!(summary.top_holdings.is_empty());
        assert!(summary.market_trends.is_empty());
    }

    #[test]
    fn allocation_slice_uses_type_on_the_wire() {
        let slice: AllocationSlice = serde_json::from_value(json!({
            "type": "ETF",
            "value": 9000.0,
            "percentage": 72.0
        }))
        .unwrap();

        assert_eq!(slice.kind, "ETF");
    }

    #[test]
    fn summary_tolerates_missing_collections() {
        let summary: PortfolioSummary = serde_json::from_value(json!({
            "totalValue": 100.0,
            "totalGainLoss": 5.0,
            "gainLossPercentage": 5.0
        }))
        .unwrap();

        assert!(summary.holdings.is_empty());
        assert!(summary.transactions.is_empty());
    }
}
