//! Thin synchronous accessor over a local SQLite database file.
//!
//! # Intention
//!
//! - Open (or create) a database file and run free-form SQL text against it.
//! - Return rows as [`Value`]s tagged with their storage class, and the execution
//!   metadata of mutations as an explicit [`ExecOutcome`] per call.
//!
//! # Architectural Boundaries
//!
//! - Only SQLite access code belongs here.
//! - No pooling, statement caching, migrations or transaction orchestration.
//! - Errors are returned to the caller, never logged or retried here.

pub mod error;
pub mod output;
pub mod sqlite;
pub mod statement;
pub mod value;

pub use error::{Error, Result};
pub use output::{ExecOutcome, QueryOutput};
pub use sqlite::{AccessMode, DbAccessor, SqliteConfig};
pub use statement::StatementKind;
pub use value::{StorageClass, Value};
