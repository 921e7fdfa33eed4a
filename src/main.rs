mod db;
mod env;
mod mail;
mod portfolio;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::mail::{Mailer, ResendMailer};

#[tokio::main]
async fn main() {
    // A missing .env is normal in production; variables come from the environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let portfolio = portfolio::Portfolio::from_env().expect("portfolio content invalid");
    tracing::info!(name = %portfolio.profile.name, projects = portfolio.projects.len(), "portfolio content loaded");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Mail is optional: contact messages are still stored without it.
    let mailer: Option<Arc<dyn Mailer>> = match ResendMailer::from_env() {
        Ok(mailer) => {
            tracing::info!("contact mailer configured");
            Some(Arc::new(mailer))
        }
        Err(e) => {
            tracing::warn!(error = %e, "contact mailer not configured; messages will only be stored");
            None
        }
    };

    let admin_token = env::env_string("ADMIN_TOKEN");
    if admin_token.is_none() {
        tracing::info!("ADMIN_TOKEN not set; stored message listing disabled");
    }

    let state = state::AppState::new(
        pool,
        portfolio,
        mailer,
        rate_limit::RateLimiter::from_env(),
        admin_token,
    );

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "portfolio listening");
    axum::serve(listener, app).await.expect("server failed");
}
