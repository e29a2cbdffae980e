#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    error::{BindListenerSnafu, RosterResult, ServeSnafu},
    routes::{
        intake::{get_intake_form, post_intake},
        students::{
            get_students, get_students_csv, internal_get_students, internal_post_students_pdf,
        },
    },
    state::RosterState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use snafu::ResultExt;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod data;
mod error;
mod maud_conveniences;
mod routes;
mod state;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

fn router(state: RosterState) -> Router {
    let max_upload_bytes = state.config().server_config().max_upload_bytes;

    Router::new()
        .route("/", get(get_intake_form))
        .route("/intake", post(post_intake))
        .route("/students", get(get_students))
        .route("/students/export_csv", get(get_students_csv))
        .route("/internal/students", get(internal_get_students))
        .route(
            "/internal/students/export_pdf",
            post(internal_post_students_pdf),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve(config: RuntimeConfiguration) -> RosterResult<()> {
    let server_ip = config.server_config().server_ip.clone();
    let state = RosterState::new(config)?;

    let listener = TcpListener::bind(&server_ip)
        .await
        .context(BindListenerSnafu {
            address: server_ip.clone(),
        })?;

    info!(?server_ip, "Listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(ServeSnafu)
}

#[tokio::main]
async fn main() {
    let dotenv_result = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");
    if let Err(e) = dotenv_result {
        warn!(?e, "Not loading .env file");
    }

    let config = RuntimeConfiguration::new().expect("unable to create config");
    if let Err(e) = serve(config).await {
        error!(?e, "Error running server");
        std::process::exit(1);
    }
}
