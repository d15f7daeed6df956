use std::net::{Ipv4Addr, SocketAddr};

use quilltips_server::config::AppConfig;
use quilltips_server::init;
use quilltips_server::middleware::mw_ctx;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let _sentry_guard = config.sentry_project_link.as_ref().map(|link| {
        sentry::init((
            link.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let ctx_state = mw_ctx::create_ctx_state(&config);
    let routes_all = init::main_router(&ctx_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("bind webhook listener");

    axum::serve(listener, routes_all.into_make_service())
        .await
        .expect("serve webhook listener");
}
