//! Status command - show session and configuration state

use crate::config::Config;
use crate::error::FindashResult;
use crate::session::Provider;
use crate::store::KeyValueStore;
use crate::ui::{self, UiContext};

/// Execute the status command
pub async fn execute(config: &Config) -> FindashResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Findash Status");

    ui::section(&ctx, "Backend");
    ui::key_value(&ctx, "API", config.api.normalized_base_url());
    ui::key_value(
        &ctx,
        "Cache",
        &if config.cache.enabled {
            format!("enabled ({}s TTL)", config.cache.ttl_secs)
        } else {
            "disabled".to_string()
        },
    );

    ui::section(&ctx, "Session");
    let pipeline = super::build_pipeline(config).await?;
    let state = pipeline.session().current();

    if !state.authenticated {
        ui::key_value_status(&ctx, "State", "logged out", false);
        ui::remark(&ctx, "Run: findash login <provider>");
        return Ok(());
    }

    ui::key_value_status(&ctx, "State", "active", true);
    if state.provider != Provider::None {
        ui::key_value(&ctx, "Provider", state.provider.as_str());
    }
    if let Some(principal) = &state.principal {
        if let Some(email) = &principal.email {
            ui::key_value(&ctx, "User", email);
        }
    }
    if state.token_expired() {
        ui::key_value_status(&ctx, "Token", "expired (will refresh on next call)", false);
    } else {
        ui::key_value_status(&ctx, "Token", "valid", true);
    }
    ui::key_value(
        &ctx,
        "State dir",
        &KeyValueStore::default_dir().display().to_string(),
    );

    Ok(())
}
