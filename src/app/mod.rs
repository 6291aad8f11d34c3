mod wiring;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::{cli, context, storage, web};

pub struct App {
    pub ctx: context::Context,
    pub store: storage::SqliteStore,
    pub uploads: storage::UploadStore,
    pub views: web::Views,
}

impl App {
    pub fn from_cli() -> Result<Self> {
        let cli = cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::tracing::init(ctx.config.log_file.as_deref());
        log::info!("🚀 Starting produtos");
        log::info!("🌐 Listen address: {}", ctx.config.listen);
        log::info!("📂 Data dir: {}", ctx.config.data_dir.display());
        log::info!("🖼️ Uploads dir: {}", ctx.config.uploads_dir().display());
        log::info!("📄 Templates dir: {}", ctx.config.templates_dir.display());
        if let Some(path) = ctx.config.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.display());
        }

        wiring::init_dirs(&ctx)?;
        let store = wiring::init_store(&ctx)?;
        let uploads = wiring::init_uploads(&ctx);
        let views = wiring::init_views(&ctx)?;

        Ok(Self {
            ctx,
            store,
            uploads,
            views,
        })
    }
}

pub async fn run() -> Result<()> {
    let app = App::from_cli()?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("🧨 Ctrl-C received, shutting down");
            signal.cancel();
        }
    });

    let state = web::AppState {
        store: app.store,
        uploads: app.uploads,
        views: app.views,
    };
    web::serve(
        app.ctx.config.listen,
        app.ctx.config.public_dir.clone(),
        state,
        shutdown,
    )
    .await?;

    log::info!("✅ Shutdown complete");
    Ok(())
}
