use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::storage::{ProductStore, UploadStore};

mod handlers;
pub mod models;
pub mod views;

pub use views::Views;

#[derive(Clone)]
pub struct AppState<S: ProductStore> {
    pub store: S,
    pub uploads: UploadStore,
    pub views: Views,
}

pub fn router<S: ProductStore + Clone + Send + Sync + 'static>(
    public_dir: PathBuf,
    state: AppState<S>,
) -> Router {
    Router::new()
        .route("/", get(handlers::index::<S>))
        .route("/sobre", get(handlers::sobre::<S>))
        .route("/blog", get(handlers::blog::<S>))
        .route("/cadastro", get(handlers::cadastro::<S>))
        .route("/pesquisa", get(handlers::pesquisa::<S>))
        .route("/editar/:id", get(handlers::editar::<S>))
        .route("/cadastrar", post(handlers::cadastrar::<S>))
        .route("/atualizar", post(handlers::atualizar::<S>))
        .route("/remover/:id/:imagem", get(handlers::remover::<S>))
        .nest_service("/public", ServeDir::new(public_dir))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve<S: ProductStore + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    public_dir: PathBuf,
    state: AppState<S>,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    let app = router(public_dir, state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 HTTP listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 HTTP shutdown requested");
        })
        .await?;
    log::info!("👋 HTTP server exited");
    Ok(())
}
