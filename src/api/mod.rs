//! Typed views over the backend API, layered on the request pipeline.

pub mod accounts;
pub mod dashboard;
pub mod market;
pub mod models;
pub mod portfolio;

pub use accounts::{AccountDraft, AccountsService};
pub use dashboard::DashboardService;
pub use market::MarketDataService;
pub use models::{
    Account, AccountBalance, ActivityItem, AllocationSlice, DashboardSummary, HistoricalPoint,
    MarketSummary, MarketTrend, PortfolioHolding, PortfolioSummary, PortfolioTransaction,
    StockQuote, TopHolding, TransactionKind, ValuePoint,
};
pub use portfolio::{HoldingDraft, PortfolioService, TransactionDraft};
