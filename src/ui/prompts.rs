//! Interactive prompts with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{FindashError, FindashResult};

/// Prompt for a line of text, masked input not required.
///
/// Non-interactive environments cannot prompt, so the caller must have
/// supplied the value up front (flag or environment variable).
pub async fn input(ctx: &UiContext, message: &str) -> FindashResult<String> {
    if !ctx.is_interactive() {
        return Err(FindashError::User(format!(
            "{} must be provided via flags in non-interactive mode",
            message
        )));
    }

    // Run blocking cliclack prompt in spawn_blocking
    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::input(&message)
            .validate(|value: &String| {
                if value.trim().is_empty() {
                    Err("Value cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact::<String>()
    })
    .await
    .map_err(|e| FindashError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| FindashError::User(format!("Prompt failed: {}", e)))
}

/// Prompt for a password with masked input
pub async fn password(ctx: &UiContext, message: &str) -> FindashResult<String> {
    if !ctx.is_interactive() {
        return Err(FindashError::User(format!(
            "{} must be provided via flags in non-interactive mode",
            message
        )));
    }

    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::password(&message).mask('*').interact()
    })
    .await
    .map_err(|e| FindashError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| FindashError::User(format!("Prompt failed: {}", e)))
}
