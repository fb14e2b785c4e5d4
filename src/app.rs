/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config → verifier → database → AppState → Router
 * - Router-wide middleware (http, CORS, security headers)
 * - axum::serve()
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::middleware::{cors, http, security_headers};
use crate::services::auth::build_verifier;
use crate::state::AppState;
use crate::{api, db};

fn init_tracing() {
    // RUST_LOG wins, e.g. RUST_LOG=info,algovisualizer_backend=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(%info, "panic");

        // Development: crash the whole process so it is noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env().inspect_err(|err| {
        tracing::error!(error = %err, "invalid configuration");
    })?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let verifier = build_verifier(&config.auth).context("loading trusted JWT key")?;

    // Fail fast: never serve requests against a broken connection.
    let db = match db::connect(&config.database).await {
        Ok(database) => database,
        Err(err) => {
            tracing::error!(error = %err, "database bootstrap failed, exiting");
            process::exit(1);
        }
    };

    let state = AppState::new(db, verifier);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app).await.context("serving HTTP")?;

    Ok(())
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes(&state).with_state(state);
    let router = security_headers::apply(router);
    let router = cors::apply(router, config);
    http::apply(router, config)
}
