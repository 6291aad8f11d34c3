use anyhow::{Context, Result};

use crate::{context, storage, web};

pub fn init_dirs(ctx: &context::Context) -> Result<()> {
    std::fs::create_dir_all(&ctx.config.data_dir).context("creating data dir")?;
    std::fs::create_dir_all(ctx.config.uploads_dir()).context("creating uploads dir")?;
    Ok(())
}

pub fn init_store(ctx: &context::Context) -> Result<storage::SqliteStore> {
    let store = storage::SqliteStore::new(ctx.config.db_path());
    if ctx.config.reset {
        store.reset_all().context("resetting storage")?;
    }
    store.init().context("initializing storage")?;
    Ok(store)
}

pub fn init_uploads(ctx: &context::Context) -> storage::UploadStore {
    storage::UploadStore::new(ctx.config.uploads_dir())
}

pub fn init_views(ctx: &context::Context) -> Result<web::Views> {
    web::Views::new(&ctx.config.templates_dir).context("registering views")
}
