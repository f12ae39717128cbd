use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::errors::SyncError;

/// All configured environments, keyed by section name.
///
/// The file is flat sectioned TOML: one `[section]` table per environment,
/// each carrying the connection fields for `DbConfig`. Loaded once at startup
/// and passed into the connector; nothing here is global or mutable.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    sections: BTreeMap<String, DbConfig>,
    #[serde(skip)]
    path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

fn default_port() -> u16 {
    5432
}

impl DbConfig {
    /// Build a sqlx-compatible connection URL from this config.
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.dbname
        )
    }
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, SyncError> {
        let content = std::fs::read_to_string(path).map_err(|source| SyncError::ConfigRead {
            path: path.to_string(),
            source,
        })?;
        let mut cfg: AppConfig =
            toml::from_str(&content).map_err(|source| SyncError::ConfigParse {
                path: path.to_string(),
                source,
            })?;
        cfg.path = path.to_string();
        Ok(cfg)
    }

    /// Look up the section named on the command line.
    pub fn section(&self, name: &str) -> Result<&DbConfig, SyncError> {
        self.sections
            .get(name)
            .ok_or_else(|| SyncError::SectionNotFound {
                section: name.to_string(),
                path: self.path.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[testing]
host = "db.test.internal"
dbname = "templates_test"
user = "app"
password = "secret"

[production]
host = "db.prod.internal"
port = 6432
dbname = "templates"
user = "app"
password = "hunter2"
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_resolves_sections_by_name() {
        let file = write_config(SAMPLE);
        let cfg = AppConfig::load(file.path().to_str().unwrap()).unwrap();

        let testing = cfg.section("testing").unwrap();
        assert_eq!(testing.host, "db.test.internal");
        assert_eq!(testing.dbname, "templates_test");

        let production = cfg.section("production").unwrap();
        assert_eq!(production.port, 6432);
    }

    #[test]
    fn port_defaults_to_postgres() {
        let file = write_config(SAMPLE);
        let cfg = AppConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.section("testing").unwrap().port, 5432);
    }

    #[test]
    fn missing_section_is_reported_with_the_file_path() {
        let file = write_config(SAMPLE);
        let path = file.path().to_str().unwrap().to_string();
        let cfg = AppConfig::load(&path).unwrap();

        let err = cfg.section("staging").unwrap_err();
        assert!(matches!(err, SyncError::SectionNotFound { .. }));
        assert!(err.to_string().contains("staging"));
        assert!(err.to_string().contains(&path));
    }

    #[test]
    fn unreadable_file_is_a_config_read_error() {
        let err = AppConfig::load("/nonexistent/config.toml").unwrap_err();
        assert!(matches!(err, SyncError::ConfigRead { .. }));
    }

    #[test]
    fn invalid_toml_is_a_config_parse_error() {
        let file = write_config("[broken\nhost =");
        let err = AppConfig::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SyncError::ConfigParse { .. }));
    }

    #[test]
    fn url_builds_a_postgres_connection_string() {
        let cfg = DbConfig {
            host: "localhost".into(),
            port: 5432,
            dbname: "templates".into(),
            user: "app".into(),
            password: "pw".into(),
        };
        assert_eq!(cfg.url(), "postgres://app:pw@localhost:5432/templates");
    }
}
