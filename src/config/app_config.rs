use std::path::PathBuf;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DatabaseBackend {
    Postgres,
    Sqlite,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_backend: DatabaseBackend,
    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_user: String,
    pub postgres_password: String,
    pub postgres_database: String,
    pub postgres_schema: String,
    pub sqlite_path: PathBuf,
    pub metadata_dir: PathBuf,
    pub ai_docs_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // A configured `DB_HOST` selects PostgreSQL.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let postgres_host = lookup("DB_HOST").filter(|host| !host.trim().is_empty());

        Self {
            database_backend: if postgres_host.is_some() {
                DatabaseBackend::Postgres
            } else {
                DatabaseBackend::Sqlite
            },
            postgres_host: postgres_host.unwrap_or_else(|| "localhost".to_string()),
            postgres_port: lookup("DB_PORT")
                .unwrap_or_else(|| "5432".to_string())
                .parse()
                .unwrap_or(5432),
            postgres_user: lookup("DB_USER").unwrap_or_else(|| "postgres".to_string()),
            postgres_password: lookup("DB_PASSWORD").unwrap_or_default(),
            postgres_database: lookup("DB_NAME").unwrap_or_else(|| "datadoc_ai".to_string()),
            postgres_schema: lookup("DB_SCHEMA").unwrap_or_else(|| "public".to_string()),
            sqlite_path: lookup("SQLITE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("datadoc_demo.db")),
            metadata_dir: lookup("METADATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("metadata")),
            ai_docs_dir: lookup("AI_DOCS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("ai_docs")),
        }
    }

    pub fn postgres_database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.postgres_user,
            self.postgres_password,
            self.postgres_host,
            self.postgres_port,
            self.postgres_database
        )
    }

    pub fn sqlite_database_url(&self) -> String {
        format!("sqlite://{}", self.sqlite_path.to_string_lossy().replace('\\', "/"))
    }
}
