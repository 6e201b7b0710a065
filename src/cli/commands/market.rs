//! Market command - quotes, index summary, and price history

use crate::api::MarketDataService;
use crate::cli::args::{MarketAction, MarketArgs};
use crate::config::Config;
use crate::error::FindashResult;
use crate::ui::{self, UiContext};
use console::style;

/// Execute the market command
pub async fn execute(args: MarketArgs, config: &Config) -> FindashResult<()> {
    let ctx = UiContext::detect();
    let pipeline = super::build_pipeline(config).await?;
    let service = MarketDataService::new(pipeline);

    match args.action {
        MarketAction::Quote { symbol } => quote(&ctx, &service, &symbol).await,
        MarketAction::Summary => summary(&ctx, &service).await,
        MarketAction::History { symbol, range } => history(&service, &symbol, &range).await,
    }
}

async fn quote(ctx: &UiContext, service: &MarketDataService, symbol: &str) -> FindashResult<()> {
    let quote = service.stock_quote(symbol).await?;

    ui::section(ctx, &format!("{} - {}", quote.symbol, quote.name));
    ui::key_value(ctx, "Price", &format!("{:.2}", quote.price));
    ui::key_value_status(
        ctx,
        "Change",
        &format!("{:+.2} ({:+.2}%)", quote.change, quote.change_percent),
        quote.change >= 0.0,
    );
    ui::key_value(ctx, "Volume", &format!("{:.0}", quote.volume));
    if let Some(cap) = quote.market_cap {
        ui::key_value(ctx, "Market cap", &format!("{:.0}", cap));
    }

    Ok(())
}

async fn summary(ctx: &UiContext, service: &MarketDataService) -> FindashResult<()> {
    let summary = service.summary().await?;

    ui::section(ctx, "Markets");
    let rows = [
        ("S&P 500", summary.sp500_value, summary.sp500_change),
        ("Dow Jones", summary.dow_jones_value, summary.dow_jones_change),
        ("Nasdaq", summary.nasdaq_value, summary.nasdaq_change),
        ("Bitcoin", summary.bitcoin_value, summary.bitcoin_change),
    ];
    for (name, value, change) in rows {
        ui::key_value_status(
            ctx,
            name,
            &format!("{:.2} ({:+.2}%)", value, change),
            change >= 0.0,
        );
    }

    Ok(())
}

async fn history(service: &MarketDataService, symbol: &str, range: &str) -> FindashResult<()> {
    let points = service.historical(symbol, range).await?;

    if points.is_empty() {
        println!("No history for {} over {}", symbol.to_uppercase(), range);
        return Ok(());
    }

    println!(
        "{}",
        style(format!(
            "{:<12} {:>10} {:>10} {:>10} {:>10} {:>12}",
            "DATE", "OPEN", "HIGH", "LOW", "CLOSE", "VOLUME"
        ))
        .bold()
    );
    for p in points {
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12.0}",
            p.date, p.open, p.high, p.low, p.close, p.volume
        );
    }

    Ok(())
}
