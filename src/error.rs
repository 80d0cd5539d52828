//! Error taxonomy for the accessor.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open database {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to copy seed database {seed:?} to {path:?}: {source}")]
    Seed {
        seed: PathBuf,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("query failed ({sql}): {source}")]
    Query {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("statement failed ({sql}): {source}")]
    Statement {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to close database: {0}")]
    Close(#[source] rusqlite::Error),
}

impl Error {
    pub(crate) fn query(sql: &str, source: rusqlite::Error) -> Self {
        Error::Query {
            sql: sql.to_string(),
            source,
        }
    }

    pub(crate) fn statement(sql: &str, source: rusqlite::Error) -> Self {
        Error::Statement {
            sql: sql.to_string(),
            source,
        }
    }

    /// The engine error behind this failure, if there is one.
    pub fn sqlite_error(&self) -> Option<&rusqlite::Error> {
        match self {
            Error::Open { source, .. } | Error::Query { source, .. } | Error::Statement { source, .. } => {
                Some(source)
            }
            Error::Close(source) => Some(source),
            Error::Seed { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
