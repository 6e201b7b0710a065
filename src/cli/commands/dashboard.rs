//! Dashboard command - the cross-account overview

use crate::api::dashboard::{DEFAULT_ACTIVITY_LIMIT, DEFAULT_HISTORY_DAYS};
use crate::api::DashboardService;
use crate::cli::args::{DashboardAction, DashboardArgs};
use crate::config::Config;
use crate::error::FindashResult;
use crate::ui::{self, UiContext};
use console::style;

/// Execute the dashboard command
pub async fn execute(args: DashboardArgs, config: &Config) -> FindashResult<()> {
    let ctx = UiContext::detect();
    let pipeline = super::build_pipeline(config).await?;
    let service = DashboardService::new(pipeline);

    match args.action.unwrap_or(DashboardAction::Summary) {
        DashboardAction::Summary => summary(&ctx, &service).await,
        DashboardAction::History { days } => history(&service, days).await,
        DashboardAction::Allocation => allocation(&ctx, &service).await,
        DashboardAction::Activity { limit } => activity(&service, limit).await,
    }
}

async fn summary(ctx: &UiContext, service: &DashboardService) -> FindashResult<()> {
    let summary = service.summary().await?;

    ui::section(ctx, "Portfolio");
    ui::key_value(
        ctx,
        "Total value",
        &format!("{:.2}", summary.total_portfolio_value),
    );
    ui::key_value_status(
        ctx,
        "Gain/loss",
        &format!(
            "{:+.2} ({:+.2}%)",
            summary.total_gain_loss, summary.gain_loss_percentage
        ),
        summary.total_gain_loss >= 0.0,
    );

    if !summary.account_balances.is_empty() {
        ui::section(ctx, "Accounts");
        for account in &summary.account_balances {
            ui::key_value(
                ctx,
                &account.account_name,
                &format!("{:.2} ({})", account.balance, account.kind),
            );
        }
    }

    if !summary.top_holdings.is_empty() {
        ui::section(ctx, "Top holdings");
        for holding in &summary.top_holdings {
            ui::key_value_status(
                ctx,
                &holding.symbol,
                &format!(
                    "{:.2} ({:+.2}%)",
                    holding.total_value, holding.gain_loss_percentage
                ),
                holding.gain_loss >= 0.0,
            );
        }
    }

    if !summary.market_trends.is_empty() {
        ui::section(ctx, "Market trends");
        for trend in &summary.market_trends {
            ui::key_value_status(
                ctx,
                &trend.symbol,
                &format!("{:.2} ({:+.2}%)", trend.current_price, trend.change_percentage),
                trend.change >= 0.0,
            );
        }
    }

    Ok(())
}

async fn history(service: &DashboardService, days: u32) -> FindashResult<()> {
    let days = if days == 0 { DEFAULT_HISTORY_DAYS } else { days };
    let points = service.value_history(days).await?;

    if points.is_empty() {
        println!("No portfolio history for the last {} days", days);
        return Ok(());
    }

    println!(
        "{}",
        style(format!("{:<12} {:>14}", "DATE", "VALUE")).bold()
    );
    for p in points {
        println!("{:<12} {:>14.2}", p.date, p.value);
    }

    Ok(())
}

async fn allocation(ctx: &UiContext, service: &DashboardService) -> FindashResult<()> {
    let slices = service.allocation().await?;

    ui::section(ctx, "Asset allocation");
    if slices.is_empty() {
        ui::remark(ctx, "No holdings to allocate");
        return Ok(());
    }

    for slice in slices {
        ui::key_value(
            ctx,
            &slice.kind,
            &format!("{:.2} ({:.1}%)", slice.value, slice.percentage),
        );
    }

    Ok(())
}

async fn activity(service: &DashboardService, limit: u32) -> FindashResult<()> {
    let limit = if limit == 0 { DEFAULT_ACTIVITY_LIMIT } else { limit };
    let items = service.recent_activity(limit).await?;

    if items.is_empty() {
        println!("No recent activity");
        return Ok(());
    }

    println!(
        "{}",
        style(format!(
            "{:<12} {:<20} {:<8} {:>12}  {}",
            "DATE", "ACCOUNT", "TYPE", "AMOUNT", "DESCRIPTION"
        ))
        .bold()
    );
    for item in items {
        println!(
            "{:<12} {:<20} {:<8} {:>12.2}  {}",
            item.date,
            item.account_name,
            item.kind,
            item.amount,
            item.description.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
