/*
 * Responsibility
 * - load Config -> build dependencies (store, id codec, auth, links) -> assemble Router
 * - apply middleware (http / security headers / CORS / content negotiation)
 * - serve with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    repos::{ExpenseStore, MemoryExpenseStore, PgExpenseStore},
    services::{auth::build_auth_service, id_codec::IdCodec, links::LinkBuilder},
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,expense_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(?config, "starting expense API on {}", config.addr);

    let store = build_store(&config).await?;
    let state = build_state(&config, store)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Postgres when `DATABASE_URL` is set, in-memory otherwise.
pub async fn build_store(config: &Config) -> Result<Arc<dyn ExpenseStore>> {
    match &config.database_url {
        Some(url) => {
            let store = PgExpenseStore::connect(url)
                .await
                .context("failed to connect to the expense database")?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; records are kept in memory only");
            Ok(Arc::new(MemoryExpenseStore::new()))
        }
    }
}

pub fn build_state(config: &Config, store: Arc<dyn ExpenseStore>) -> Result<AppState> {
    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)
        .context("invalid SQIDS_MIN_LENGTH / SQIDS_ALPHABET")?;
    let links = LinkBuilder::new(config.public_base_url.clone())
        .context("invalid PUBLIC_BASE_URL")?;
    let auth = build_auth_service(config);

    Ok(AppState::new(
        store,
        id_codec,
        auth,
        links,
        config.response_shapes,
    ))
}

/// Full service: routes + middleware stack.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = middleware::negotiate::apply(api::routes(state.clone())).with_state(state);
    let router = middleware::cors::apply(router, config);
    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router)
}
