use crate::error::{Error, Result};
use crate::output::{ExecOutcome, QueryOutput};
use crate::statement::StatementKind;
use crate::value::Value;
use rusqlite::hooks::Action;
use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// How the database file is opened
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
    #[default]
    Create,
}

impl AccessMode {
    fn open_flags(self) -> OpenFlags {
        let base = OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        match self {
            AccessMode::ReadOnly => base | OpenFlags::SQLITE_OPEN_READ_ONLY,
            AccessMode::ReadWrite => base | OpenFlags::SQLITE_OPEN_READ_WRITE,
            AccessMode::Create => base | OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        }
    }
}

/// SQLite accessor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    #[serde(default)]
    pub mode: AccessMode,
    /// How long to wait on a locked database before failing, in milliseconds
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,
    /// Prepared database copied to `db_path` when that file does not exist yet
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

impl SqliteConfig {
    /// Create a new config that opens or creates the file at `db_path`
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            mode: AccessMode::default(),
            busy_timeout_ms: None,
            seed_path: None,
        }
    }

    pub fn with_mode(mut self, mode: AccessMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_seed(mut self, seed_path: impl Into<PathBuf>) -> Self {
        self.seed_path = Some(seed_path.into());
        self
    }
}

/// Owns a single connection to a SQLite database and runs free-form SQL on it.
///
/// Every call runs to completion on the calling thread. The connection is closed when
/// the accessor is dropped or [`DbAccessor::close`] is called.
pub struct DbAccessor {
    conn: Connection,
    path: Option<PathBuf>,
}

impl DbAccessor {
    /// Open the database at `path`, creating the file if it does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(SqliteConfig::new(path.as_ref()))
    }

    pub fn open_with_config(config: SqliteConfig) -> Result<Self> {
        let path = config.db_path;
        if let Some(seed) = &config.seed_path {
            seed_database(seed, &path)?;
        }

        let open_error = |source: rusqlite::Error| Error::Open {
            path: path.clone(),
            source,
        };
        let conn = Connection::open_with_flags(&path, config.mode.open_flags()).map_err(open_error)?;
        if let Some(ms) = config.busy_timeout_ms {
            conn.busy_timeout(Duration::from_millis(ms)).map_err(open_error)?;
        }
        // sqlite only reads the file header lazily, force it so corrupt files fail here
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .map_err(open_error)?;

        log::debug!("opened sqlite database at {} ({:?})", path.display(), config.mode);
        Ok(Self { conn, path: Some(path) })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        log::debug!("opened in-memory sqlite database");
        Ok(Self { conn, path: None })
    }

    /// Path of the database file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a read statement and collect all of its rows.
    ///
    /// Column names are only reported when the statement produced at least one row.
    pub fn query(&self, sql: &str) -> Result<QueryOutput> {
        let mut stmt = self.conn.prepare(sql).map_err(|e| Error::query(sql, e))?;
        let column_count = stmt.column_count();
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([]).map_err(|e| Error::query(sql, e))?;
        while let Some(row) = cursor.next().map_err(|e| Error::query(sql, e))? {
            let values = (0..column_count)
                .map(|index| row.get_ref(index).map(Value::from))
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| Error::query(sql, e))?;
            rows.push(values);
        }

        log::trace!("query returned {} rows: {}", rows.len(), sql);
        Ok(QueryOutput {
            columns: if rows.is_empty() { Vec::new() } else { columns },
            rows,
        })
    }

    /// Run a single insert, update, delete or schema statement to completion.
    pub fn execute(&self, sql: &str) -> Result<ExecOutcome> {
        let kind = StatementKind::classify(sql);
        let inserted = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&inserted);
        self.conn.update_hook(Some(move |action: Action, _db: &str, _table: &str, rowid: i64| {
            if action == Action::SQLITE_INSERT {
                recorder.lock().unwrap_or_else(PoisonError::into_inner).push(rowid);
            }
        }));
        let result = self.conn.execute(sql, []);
        self.conn.update_hook(None::<fn(Action, &str, &str, i64)>);
        let inserted = std::mem::take(&mut *inserted.lock().unwrap_or_else(PoisonError::into_inner));
        let changes = result.map_err(|e| Error::statement(sql, e))?;

        // sqlite keeps reporting the count of the last DML statement after DDL
        let affected_rows = if kind.is_dml() { changes } else { 0 };
        // the engine's rowid is stale unless this statement inserted that very row,
        // an upsert taking its update path inserts nothing
        let rowid = self.conn.last_insert_rowid();
        let last_insert_rowid =
            (kind == StatementKind::Insert && affected_rows > 0 && inserted.contains(&rowid)).then_some(rowid);

        log::trace!("{:?} statement changed {} rows: {}", kind, affected_rows, sql);
        Ok(ExecOutcome {
            affected_rows,
            last_insert_rowid,
        })
    }

    /// Run a batch of `;` separated statements, e.g. a schema script
    pub fn execute_script(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql).map_err(|e| Error::statement(sql, e))
    }

    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_conn, e)| Error::Close(e))?;
        match path {
            Some(path) => log::debug!("closed sqlite database at {}", path.display()),
            None => log::debug!("closed in-memory sqlite database"),
        }
        Ok(())
    }
}

fn seed_database(seed: &Path, path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    std::fs::copy(seed, path).map_err(|source| Error::Seed {
        seed: seed.to_path_buf(),
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("seeded {} from {}", path.display(), seed.display());
    Ok(())
}
