//! Portfolio command - views and updates for one account

use crate::api::{PortfolioService, TransactionDraft, TransactionKind};
use crate::cli::args::{PortfolioAction, PortfolioArgs, SideArg};
use crate::config::Config;
use crate::error::FindashResult;
use crate::ui::{self, UiContext};
use console::style;

/// Execute the portfolio command
pub async fn execute(args: PortfolioArgs, config: &Config) -> FindashResult<()> {
    let ctx = UiContext::detect();
    let pipeline = super::build_pipeline(config).await?;
    let service = PortfolioService::new(pipeline);

    match args.action {
        PortfolioAction::Summary { account } => show_summary(&ctx, &service, account).await,
        PortfolioAction::Holdings { account } => show_holdings(&service, account).await,
        PortfolioAction::Transactions { account } => show_transactions(&service, account).await,
        PortfolioAction::Record {
            account,
            symbol,
            side,
            quantity,
            price,
        } => record(&ctx, &service, account, symbol, side, quantity, price).await,
    }
}

async fn show_summary(
    ctx: &UiContext,
    service: &PortfolioService,
    account: i64,
) -> FindashResult<()> {
    let summary = service.summary(account).await?;

    ui::section(ctx, &format!("Portfolio {}", account));
    ui::key_value(ctx, "Total value", &format!("{:.2}", summary.total_value));
    ui::key_value_status(
        ctx,
        "Gain/loss",
        &format!(
            "{:.2} ({:.2}%)",
            summary.total_gain_loss, summary.gain_loss_percentage
        ),
        summary.total_gain_loss >= 0.0,
    );
    ui::key_value(ctx, "Holdings", &summary.holdings.len().to_string());

    Ok(())
}

async fn show_holdings(service: &PortfolioService, account: i64) -> FindashResult<()> {
    let holdings = service.holdings(account).await?;

    if holdings.is_empty() {
        println!("No holdings");
        return Ok(());
    }

    println!(
        "{}",
        style(format!(
            "{:<8} {:>10} {:>10} {:>10} {:>12} {:>9}",
            "SYMBOL", "QTY", "AVG", "PRICE", "VALUE", "GAIN%"
        ))
        .bold()
    );
    for h in holdings {
        println!(
            "{:<8} {:>10.2} {:>10.2} {:>10.2} {:>12.2} {:>8.2}%",
            h.symbol, h.quantity, h.average_price, h.current_price, h.total_value,
            h.gain_loss_percentage
        );
    }

    Ok(())
}

async fn show_transactions(service: &PortfolioService, account: i64) -> FindashResult<()> {
    let transactions = service.transactions(account).await?;

    if transactions.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{}",
        style(format!(
            "{:<12} {:<8} {:<5} {:>10} {:>10} {:>12}",
            "DATE", "SYMBOL", "SIDE", "QTY", "PRICE", "TOTAL"
        ))
        .bold()
    );
    for tx in transactions {
        let side = match tx.kind {
            TransactionKind::Buy => "BUY",
            TransactionKind::Sell => "SELL",
        };
        println!(
            "{:<12} {:<8} {:<5} {:>10.2} {:>10.2} {:>12.2}",
            tx.date, tx.symbol, side, tx.quantity, tx.price, tx.total_amount
        );
    }

    Ok(())
}

async fn record(
    ctx: &UiContext,
    service: &PortfolioService,
    account: i64,
    symbol: String,
    side: SideArg,
    quantity: f64,
    price: f64,
) -> FindashResult<()> {
    let (kind, side_label) = match side {
        SideArg::Buy => (TransactionKind::Buy, "BUY"),
        SideArg::Sell => (TransactionKind::Sell, "SELL"),
    };

    let tx = service
        .add_transaction(
            account,
            &TransactionDraft {
                symbol: symbol.to_uppercase(),
                kind,
                quantity,
                price,
            },
        )
        .await?;

    ui::step_ok(
        ctx,
        &format!(
            "Recorded {} {} x{} @ {:.2} (total {:.2})",
            side_label, tx.symbol, tx.quantity, tx.price, tx.total_amount
        ),
    );

    Ok(())
}
