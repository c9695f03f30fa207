//! Fleet Registry JSON API Server

use std::{mem, process};

use salvo::{
    affix_state::inject,
    catch_panic::CatchPanic,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use fleet_app::{auth::token::TokenSecret, context::AppContext};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod buses;
mod config;
mod envelope;
mod errors;
mod extensions;
mod healthcheck;
mod observability;
mod router;
mod shutdown;
mod state;
mod tenants;
#[cfg(test)]
mod test_helpers;

#[expect(
    clippy::exit,
    reason = "startup failures must terminate the process with a non-zero status"
)]
fn fail_startup(message: &str) -> ! {
    error!("{message}");

    process::exit(1);
}

/// Fleet JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let mut config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so there is nowhere else to report"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let secret = match TokenSecret::new(mem::take(&mut config.auth.jwt_secret)) {
        Ok(secret) => secret,
        Err(secret_error) => fail_startup(&format!("invalid JWT_SECRET: {secret_error}")),
    };

    let app = match AppContext::from_database_url(&config.database.database_url, &secret).await {
        Ok(app) => app,
        Err(init_error) => fail_startup(&format!("failed to initialize app context: {init_error}")),
    };

    let addr = config.socket_addr();

    info!(
        environment = ?config.server.environment,
        "starting server on {addr}"
    );

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::shared(app)))
        .push(router::app_router());

    let doc = OpenApi::new("Fleet Registry API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer).bearer_format("JWT")),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router::service(router)).await;
}
