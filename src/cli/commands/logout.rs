//! Logout command - clear the stored session

use crate::config::Config;
use crate::error::FindashResult;
use crate::ui::{self, UiContext};

/// Execute the logout command
pub async fn execute(config: &Config) -> FindashResult<()> {
    let ctx = UiContext::detect();
    let pipeline = super::build_pipeline(config).await?;

    if !pipeline.session().is_authenticated() {
        ui::step_info(&ctx, "No active session");
        return Ok(());
    }

    pipeline.session().logout().await?;
    ui::step_ok(&ctx, "Logged out");

    Ok(())
}
