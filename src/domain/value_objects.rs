use serde::{Deserialize, Serialize};

/// Newtype for the integer primary key of a template row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub i64);

impl RowId {
    /// Returns the raw key, e.g. for binding into a query.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        RowId(id)
    }
}
