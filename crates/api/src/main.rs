//! Pathwise - career guidance client
//!
//! Usage:
//!   pathwise [PATH]            open the view at PATH (default `/`)
//!   pathwise login USERNAME    log in; the password is read from PATHWISE_PASSWORD
//!   pathwise logout
//!
//! The resolved view model is written to stdout as JSON.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use pathwise_core::GuardDecision;
use pathwise_infra::config;
use pathwise_lib::{hydrate_session, login, logout, navigate, open_route, AppContext, LoginForm};
use serde_json::{json, Value};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = config::load().context("failed to load configuration")?;
    pathwise_lib::utils::init_tracing(&config.logging);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let ctx = AppContext::new(config).context("failed to initialize application")?;
    hydrate_session(&ctx).await;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["login", username] => {
            let password = std::env::var("PATHWISE_PASSWORD")
                .context("PATHWISE_PASSWORD must be set to log in")?;
            let form = LoginForm { username: (*username).to_string(), password };
            render(login(&ctx, form).await)?
        }
        ["logout"] => serde_json::to_value(logout(&ctx).await)?,
        [] => open(&ctx, "/").await?,
        [path] => open(&ctx, path).await?,
        _ => bail!("usage: pathwise [PATH] | login USERNAME | logout"),
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;
    Ok(())
}

async fn open(ctx: &AppContext, path: &str) -> Result<Value> {
    match navigate(ctx, path) {
        GuardDecision::Render { route } => {
            info!(route = %route, "Opening view");
            let view = open_route(ctx, &route).await;
            Ok(json!({"route": route.path(), "view": render(view)?}))
        }
        GuardDecision::Redirect { to } => Ok(json!({"redirect": to.path()})),
        GuardDecision::Loading => Ok(json!({"loading": true})),
    }
}

fn render<T: serde::Serialize>(result: Result<T, pathwise_lib::ViewError>) -> Result<Value> {
    Ok(match result {
        Ok(view) => serde_json::to_value(view)?,
        Err(error) => json!({"error": error}),
    })
}
