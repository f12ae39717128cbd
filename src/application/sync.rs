use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::domain::canonical::to_canonical_pretty;
use crate::domain::errors::SyncError;
use crate::domain::ports::{ConfirmPrompt, TemplateStore};
use crate::domain::text_diff::{unified_diff, DiffLine};
use crate::domain::value_objects::RowId;

/// Diff label for the database side.
pub const DATABASE_LABEL: &str = "database";
/// Diff label for the file side.
pub const FILE_LABEL: &str = "file";

/// Result of one compare-and-confirm run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The two documents are deeply equal; nothing was written.
    InSync,
    /// The user consented and the row was overwritten.
    Updated(RowId),
    /// The user declined; the row is unchanged.
    Declined,
}

/// Canonical unified diff of the stored document against the file document.
///
/// Both values are serialized with sorted keys and fixed indentation first,
/// so key order and whitespace never produce diff lines; only value
/// differences do. Empty output means the values are deeply equal.
pub fn diff_documents(db_document: &Value, file_document: &Value) -> Vec<DiffLine> {
    unified_diff(
        &to_canonical_pretty(db_document),
        &to_canonical_pretty(file_document),
        DATABASE_LABEL,
        FILE_LABEL,
    )
}

// ─── Sync Service ───

/// Drives the row half of the pipeline: fetch, diff, confirm, overwrite.
pub struct SyncService {
    store: Arc<dyn TemplateStore>,
}

impl SyncService {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Compare the stored document of `id` against `file_document` and, when
    /// they differ and the prompt answers yes, overwrite the row.
    ///
    /// The prompt is only consulted when there is a difference to show.
    pub async fn run(
        &self,
        id: RowId,
        file_document: &Value,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<SyncOutcome, SyncError> {
        let db_document = self
            .store
            .fetch_document(id)
            .await?
            .ok_or(SyncError::RowNotFound(id))?;

        let diff = diff_documents(&db_document, file_document);
        if diff.is_empty() {
            debug!("row {} matches the file document", id);
            return Ok(SyncOutcome::InSync);
        }

        if prompt.confirm_overwrite(&diff)? {
            self.store.replace_document(id, file_document).await?;
            Ok(SyncOutcome::Updated(id))
        } else {
            Ok(SyncOutcome::Declined)
        }
    }
}
