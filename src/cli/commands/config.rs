//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{FindashError, FindashResult};
use crate::ui::{self, UiContext};

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> FindashResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> FindashResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn(
            &ctx,
            &format!(
                "Config already exists at {} (use --force to overwrite)",
                path.display()
            ),
        );
        return Ok(());
    }

    let config = Config::default();
    manager.save(&config).await?;

    ui::step_ok(&ctx, &format!("Configuration written to {}", path.display()));

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> FindashResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();

    // Parse dot-separated key path
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
        ["general", "log_format"] => config.general.log_format = value.to_string(),

        ["api", "base_url"] => config.api.base_url = value.to_string(),
        ["api", "timeout_secs"] => config.api.timeout_secs = parse_u64(value)?,

        ["cache", "enabled"] => config.cache.enabled = parse_bool(value)?,
        ["cache", "ttl_secs"] => config.cache.ttl_secs = parse_i64(value)?,

        _ => {
            ui::step_error(&ctx, &format!("Unknown config key: {}", key));
            ui::remark(&ctx, "Valid keys:");
            print_valid_keys();
            return Ok(());
        }
    }

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

fn parse_bool(value: &str) -> FindashResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(FindashError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_u64(value: &str) -> FindashResult<u64> {
    value
        .parse()
        .map_err(|_| FindashError::User(format!("Invalid number: {}", value)))
}

fn parse_i64(value: &str) -> FindashResult<i64> {
    value
        .parse()
        .map_err(|_| FindashError::User(format!("Invalid number: {}", value)))
}

fn print_valid_keys() {
    let keys = [
        "general.verbose",
        "general.log_format",
        "api.base_url",
        "api.timeout_secs",
        "cache.enabled",
        "cache.ttl_secs",
    ];

    for key in keys {
        eprintln!("  {}", key);
    }
}
