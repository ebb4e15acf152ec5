use std::env;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::AppError;

const DEFAULT_DB_NAME: &str = "bistroDb";
const DEFAULT_DB_HOST: &str = "cluster0.mongodb.net";

/// URI userinfo: RFC 3986 unreserved characters pass through.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Which document store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreProfile {
    /// In-process store; nothing survives a restart
    Memory,
    /// MongoDB deployment
    Mongo { uri: String, database: String },
}

impl StoreProfile {
    /// Resolve the store from the environment.
    ///
    /// `MONGODB_URI` wins when set. Otherwise `DB_USER` and `DB_PASS` build an
    /// Atlas-style SRV URI against `DB_HOST`. With neither, the in-memory store
    /// is used. Setting only one of `DB_USER`/`DB_PASS` is a config error.
    pub fn from_env() -> Result<Self, AppError> {
        let database = env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string());

        if let Some(uri) = non_empty_var("MONGODB_URI") {
            return Ok(StoreProfile::Mongo { uri, database });
        }

        match (non_empty_var("DB_USER"), non_empty_var("DB_PASS")) {
            (Some(user), Some(pass)) => {
                let host = env::var("DB_HOST").unwrap_or_else(|_| DEFAULT_DB_HOST.to_string());
                Ok(StoreProfile::Mongo {
                    uri: srv_uri(&user, &pass, &host),
                    database,
                })
            }
            (None, None) => Ok(StoreProfile::Memory),
            _ => Err(AppError::config(
                "DB_USER and DB_PASS must be set together".to_string(),
            )),
        }
    }

    /// Label safe for logs (no credentials).
    pub fn describe(&self) -> String {
        match self {
            StoreProfile::Memory => "memory".to_string(),
            StoreProfile::Mongo { database, .. } => format!("mongodb/{database}"),
        }
    }
}

fn srv_uri(user: &str, pass: &str, host: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{host}/?retryWrites=true&w=majority",
        utf8_percent_encode(user, USERINFO),
        utf8_percent_encode(pass, USERINFO)
    )
}

pub(crate) fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
