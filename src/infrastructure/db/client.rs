use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;

use crate::domain::errors::SyncError;
use crate::domain::ports::TemplateStore;
use crate::domain::value_objects::RowId;
use crate::infrastructure::config::DbConfig;

const SELECT_DOCUMENT: &str = "SELECT data FROM template WHERE id = $1";
const UPDATE_DOCUMENT: &str = "UPDATE template SET data = $1 WHERE id = $2";

pub struct PgTemplateStore {
    pool: PgPool,
}

/// Connect to the database described in `cfg` and return a `PgTemplateStore`.
///
/// The pool is capped at one connection: a run issues at most one read and
/// one write, sequentially. Dropping the store closes the connection on
/// every exit path.
pub async fn connect(cfg: &DbConfig) -> Result<PgTemplateStore, SyncError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&cfg.url())
        .await
        .map_err(|source| SyncError::Connect {
            host: cfg.host.clone(),
            dbname: cfg.dbname.clone(),
            source,
        })?;

    debug!("connected to {}/{}", cfg.host, cfg.dbname);

    Ok(PgTemplateStore { pool })
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn fetch_document(&self, id: RowId) -> Result<Option<Value>, SyncError> {
        sqlx::query_scalar::<_, Value>(SELECT_DOCUMENT)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| SyncError::Fetch { id, source })
    }

    /// Overwrite the row inside an explicit transaction.
    ///
    /// A failed statement rolls back instead of committing, and an update
    /// that matches no row (deleted since the compare) also rolls back and
    /// reports [`SyncError::RowNotFound`].
    async fn replace_document(&self, id: RowId, document: &Value) -> Result<(), SyncError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|source| SyncError::Update { id, source })?;

        let result = sqlx::query(UPDATE_DOCUMENT)
            .bind(Json(document))
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => {
                let _ = tx.rollback().await;
                Err(SyncError::RowNotFound(id))
            }
            Ok(_) => {
                debug!("updated row {}", id);
                tx.commit()
                    .await
                    .map_err(|source| SyncError::Update { id, source })
            }
            Err(source) => {
                let _ = tx.rollback().await;
                Err(SyncError::Update { id, source })
            }
        }
    }
}
