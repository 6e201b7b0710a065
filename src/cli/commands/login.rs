//! Login command - authenticate with a brokerage provider

use crate::cli::args::{LoginArgs, ProviderArg};
use crate::config::Config;
use crate::error::FindashResult;
use crate::session::{Credentials, Provider, Registration};
use crate::ui::{self, UiContext};

/// Execute the login command
pub async fn execute(args: LoginArgs, config: &Config) -> FindashResult<()> {
    let ctx = UiContext::detect();
    let provider = match args.provider {
        ProviderArg::Schwab => Provider::Schwab,
        ProviderArg::Fidelity => Provider::Fidelity,
    };

    ui::intro(&ctx, &format!("Login to {}", provider.as_str()));

    let username = match args.username {
        Some(u) => u,
        None => ui::input(&ctx, "Username").await?,
    };
    let password = match args.password {
        Some(p) => p,
        None => ui::password(&ctx, "Password").await?,
    };

    let pipeline = super::build_pipeline(config).await?;

    if args.register {
        let email = match args.email {
            Some(e) => e,
            None => ui::input(&ctx, "Email").await?,
        };
        pipeline
            .session()
            .register(&Registration {
                username: username.clone(),
                email,
                password: password.clone(),
            })
            .await?;
        ui::step_ok(&ctx, &format!("Registered user {}", username));
    }

    pipeline
        .session()
        .login(provider, &Credentials { username, password })
        .await?;

    let state = pipeline.session().current();
    if let Some(email) = state.principal.as_ref().and_then(|p| p.email.as_deref()) {
        ui::step_ok(&ctx, &format!("Signed in as {}", email));
    }
    ui::outro_success(&ctx, &format!("Session active with {}", provider.as_str()));

    Ok(())
}
