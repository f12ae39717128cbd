use std::path::PathBuf;

use thiserror::Error;

use crate::domain::value_objects::RowId;

/// Everything that can go wrong during one sync run.
///
/// Each step of the pipeline returns the variant for its own failure mode, so
/// the caller can match on the kind instead of probing sentinel `None`s. All
/// variants are terminal for the invocation: there is no retry.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to read config file {path}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("section '{section}' not found in {path}")]
    SectionNotFound { section: String, path: String },

    #[error("failed to connect to {dbname} on {host}")]
    Connect {
        host: String,
        dbname: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to read template file {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template file {path} is not valid JSON")]
    FileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("row {0} not found in the template table")]
    RowNotFound(RowId),

    #[error("failed to fetch row {id}")]
    Fetch {
        id: RowId,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to update row {id}")]
    Update {
        id: RowId,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to read confirmation from stdin")]
    Prompt(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_names_the_row() {
        let err = SyncError::RowNotFound(RowId(42));
        assert_eq!(err.to_string(), "row 42 not found in the template table");
    }

    #[test]
    fn section_not_found_names_section_and_file() {
        let err = SyncError::SectionNotFound {
            section: "staging".into(),
            path: "config.toml".into(),
        };
        assert_eq!(
            err.to_string(),
            "section 'staging' not found in config.toml"
        );
    }
}
