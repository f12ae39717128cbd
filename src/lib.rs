use std::path::PathBuf;
use std::sync::Arc;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// ─── Log level ────────────────────────────────────────────────────────────────

/// Controls the verbosity of tplsync's internal tracing output.
///
/// Pass to [`init_tracing`] before calling any async entry point.
///
/// | Variant | `tracing` level | When to use                            |
/// |---------|-----------------|----------------------------------------|
/// | `Error` | `error`         | CI scripting                           |
/// | `Info`  | `info`          | Default                                |
/// | `Debug` | `debug`         | Shows connection and query diagnostics |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Info,
    Debug,
}

/// Initialise the global `tracing` subscriber for tplsync.
///
/// This is a convenience wrapper around `tracing_subscriber`. It respects
/// `RUST_LOG` when set, falling back to `level` otherwise.
///
/// Call this **once** at application startup, before any tplsync async
/// function. Library consumers who manage their own subscriber should skip
/// this and configure tracing themselves.
///
/// Only available when the `cli` feature is enabled (pulls in
/// `tracing-subscriber`).
#[cfg(feature = "cli")]
pub fn init_tracing(level: LogLevel) {
    use tracing_subscriber::fmt::format::FmtSpan;

    let default_filter = match level {
        LogLevel::Error => "tplsync=error",
        LogLevel::Info => "tplsync=info",
        LogLevel::Debug => "tplsync=debug",
    };

    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

// ─── Public API Facade ───

pub use application::sync::{
    diff_documents, SyncOutcome, SyncService, DATABASE_LABEL, FILE_LABEL,
};
pub use domain::canonical::to_canonical_pretty;
pub use domain::errors::SyncError;
pub use domain::memory::MemoryTemplateStore;
pub use domain::ports::{ConfirmPrompt, TemplateStore};
pub use domain::text_diff::{render, unified_diff, DiffLine};
pub use domain::value_objects::RowId;
pub use infrastructure::config::{AppConfig, DbConfig};
pub use infrastructure::document::load_document;

use crate::infrastructure::db::client::connect;

// ─── Public entry points ───

/// One sync invocation: which file, which config section, which row.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub file_path: PathBuf,
    pub section: String,
    pub row_id: RowId,
}

/// Run the full compare-and-confirm pipeline once.
///
/// Resolves the config section, connects, loads the file, fetches the row,
/// and, when the documents differ and `prompt` answers yes, overwrites the
/// row in a committed transaction. The step order matches the pipeline:
/// a bad config section or unreachable database stops the run before the
/// file is read, and a bad file stops it before any row is fetched.
///
/// Errors carry their own context ([`SyncError`]); the connection closes on
/// every exit path when the store drops.
pub async fn run(
    cfg: &AppConfig,
    request: &SyncRequest,
    prompt: &mut dyn ConfirmPrompt,
) -> Result<SyncOutcome, SyncError> {
    let db_cfg = cfg.section(&request.section)?;
    let store = Arc::new(connect(db_cfg).await?);

    let file_document = load_document(&request.file_path)?;

    let service = SyncService::new(store);
    service.run(request.row_id, &file_document, prompt).await
}
