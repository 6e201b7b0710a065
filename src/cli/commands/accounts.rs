//! Accounts command - manage linked accounts

use crate::api::{Account, AccountDraft, AccountsService};
use crate::cli::args::{AccountsAction, AccountsArgs, OutputFormat};
use crate::config::Config;
use crate::error::FindashResult;
use crate::ui::{self, UiContext};
use console::style;

/// Execute the accounts command
pub async fn execute(args: AccountsArgs, config: &Config) -> FindashResult<()> {
    let ctx = UiContext::detect();
    let pipeline = super::build_pipeline(config).await?;
    let service = AccountsService::new(pipeline);

    match args.action {
        AccountsAction::List { format } => list(&service, format).await,
        AccountsAction::Show { id } => show(&ctx, &service, id).await,
        AccountsAction::Create {
            name,
            account_type,
            currency,
        } => create(&ctx, &service, name, account_type, currency).await,
        AccountsAction::Delete { id } => delete(&ctx, &service, id).await,
    }
}

async fn list(service: &AccountsService, format: OutputFormat) -> FindashResult<()> {
    let accounts = service.list().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&accounts)?);
        }
        OutputFormat::Plain => {
            for account in accounts {
                println!("{}\t{}", account.id, account.name);
            }
        }
        OutputFormat::Table => {
            if accounts.is_empty() {
                println!("No accounts");
                return Ok(());
            }
            println!(
                "{}",
                style(format!(
                    "{:<6} {:<24} {:<12} {:>14} {:<4}",
                    "ID", "NAME", "TYPE", "BALANCE", "CCY"
                ))
                .bold()
            );
            for a in accounts {
                println!(
                    "{:<6} {:<24} {:<12} {:>14.2} {:<4}",
                    a.id, a.name, a.account_type, a.balance, a.currency
                );
            }
        }
    }

    Ok(())
}

async fn show(ctx: &UiContext, service: &AccountsService, id: i64) -> FindashResult<()> {
    let account = service.get(id).await?;
    print_account(ctx, &account);
    Ok(())
}

async fn create(
    ctx: &UiContext,
    service: &AccountsService,
    name: String,
    account_type: String,
    currency: String,
) -> FindashResult<()> {
    let account = service
        .create(&AccountDraft {
            name,
            account_type,
            currency,
        })
        .await?;

    ui::step_ok(ctx, &format!("Created account {}", account.id));
    print_account(ctx, &account);
    Ok(())
}

async fn delete(ctx: &UiContext, service: &AccountsService, id: i64) -> FindashResult<()> {
    service.delete(id).await?;
    ui::step_ok(ctx, &format!("Deleted account {}", id));
    Ok(())
}

fn print_account(ctx: &UiContext, account: &Account) {
    ui::key_value(ctx, "ID", &account.id.to_string());
    ui::key_value(ctx, "Name", &account.name);
    ui::key_value(ctx, "Type", &account.account_type);
    ui::key_value(ctx, "Balance", &format!("{:.2}", account.balance));
    ui::key_value(ctx, "Currency", &account.currency);
}
