use error_stack::{Result, ResultExt};
use quill_server::{build_axum_router, App};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info};

#[derive(Debug, Error)]
#[error("Could not start Quill HTTP server")]
struct StartError;

#[tracing::instrument(skip_all, name = "server.run")]
async fn start_quill_server(config: quill_config::Server) -> Result<(), StartError> {
    if cfg!(debug_assertions) {
        info!(?config, "Starting Quill HTTP server...");
    }

    let app = App::new(config);

    debug!("binding server");
    let listener = TcpListener::bind(app.config.socket_addr())
        .await
        .change_context(StartError)
        .attach_printable("could not bind server with address and port")?;

    let addr = listener
        .local_addr()
        .change_context(StartError)
        .attach_printable("could not get socket address of the server")?;

    info!("Quill HTTP server is listening at http://{addr}");

    axum::serve(listener, build_axum_router(app))
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Received graceful shutdown signal. Shutting down server...");
        })
        .await
        .change_context(StartError)
        .attach_printable("could not serve Quill HTTP service")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "could not install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), StartError> {
    let config = quill_config::Server::from_env().change_context(StartError)?;
    quill_tracing::init(&config.logging).change_context(StartError)?;

    start_quill_server(config).await
}
