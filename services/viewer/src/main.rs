mod config;
mod render;

use anyhow::{Context, Result};
use dataset::{read_dataset_file, DatasetStore};
use kvstore::FileBackedStorage;
use session::Session;
use tracing::{error, info, warn};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    let storage = FileBackedStorage::new(&cfg.state_path)
        .with_context(|| format!("Failed to open state file {}", cfg.state_path.display()))?;
    let mut session = Session::new(DatasetStore::open(storage));
    info!(
        state = %cfg.state_path.display(),
        records = session.store().records().len(),
        "state restored"
    );

    if let Some(path) = cfg.upload.clone() {
        // blocking read + parse; a failure leaves the restored dataset in place
        let loaded = tokio::task::spawn_blocking(move || read_dataset_file(&path))
            .await
            .context("dataset load task panicked")?;
        match loaded {
            Ok(upload) => {
                if upload.report.parse_errors > 0 {
                    warn!(skipped = upload.report.parse_errors, "some lines could not be parsed");
                }
                session.install(upload);
            }
            Err(e) => {
                error!("dataset load failed: {e}");
                eprintln!("Error reading file: {e}");
            }
        }
    }

    session.set_filter(cfg.filter.clone());
    if let Some(id) = &cfg.select {
        if !session.select(id) {
            warn!(id = %id, "no problem with that id");
        }
    }

    let mut out = String::new();
    render::catalog(&session, &mut out)?;
    if let Some(record) = session.selected() {
        render::problem(&session, record, &mut out)?;
    }
    print!("{out}");

    Ok(())
}
