use serde::{Deserialize, Serialize};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_URL: &str = "sqlite://books.db";
const MEMORY_DB_URL: &str = "sqlite::memory:";

// Configuration abstracts the process level options of the bookstore
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub database_url: String,
    pub port: u16,
    pub log_level: String,
    pub test_mode: bool,
}

impl Configuration {
    pub fn new(database_url: &str, port: u16) -> Self {
        Configuration {
            database_url: database_url.to_string(),
            port,
            log_level: "info".to_string(),
            test_mode: false,
        }
    }

    /// Configuration backed by a private in-memory database.
    pub fn for_tests() -> Self {
        Configuration {
            test_mode: true,
            ..Configuration::new(MEMORY_DB_URL, DEFAULT_PORT)
        }
    }

    pub fn from_env(test_mode: bool) -> Self {
        Self::from_vars(test_mode, |key| std::env::var(key).ok())
    }

    /// Builds configuration from a variable lookup.
    ///
    /// `DB_URI` is the base location of the databases. Test mode always uses
    /// `{DB_URI}/books-test.db` (or memory when `DB_URI` is unset), otherwise
    /// `DATABASE_URL` wins over `{DB_URI}/books.db`.
    pub fn from_vars<F>(test_mode: bool, lookup: F) -> Self
        where F: Fn(&str) -> Option<String> {
        let db_uri = lookup("DB_URI").filter(|uri| !uri.is_empty());
        let database_url = if test_mode {
            match db_uri {
                Some(uri) => format!("{}/books-test.db", uri.trim_end_matches('/')),
                None => MEMORY_DB_URL.to_string(),
            }
        } else {
            match (lookup("DATABASE_URL").filter(|url| !url.is_empty()), db_uri) {
                (Some(url), _) => url,
                (None, Some(uri)) => format!("{}/books.db", uri.trim_end_matches('/')),
                (None, None) => DEFAULT_DB_URL.to_string(),
            }
        };
        let port = lookup("PORT").and_then(|p| p.parse::<u16>().ok()).unwrap_or(DEFAULT_PORT);
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        Configuration {
            database_url,
            port,
            log_level,
            test_mode,
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
