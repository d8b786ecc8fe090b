//! [`JsonStore`] — the flat-file implementation of
//! [`RecordStore`](gradebook_core::store::RecordStore).

use std::{
  collections::HashMap,
  fs,
  io::Write as _,
  path::{Path, PathBuf},
  sync::{Mutex, MutexGuard},
};

use gradebook_core::{
  entity::Entity,
  record::Row,
  statement::{Statement, StatementOutcome, delete_rows, insert_row, select_rows, update_rows},
  store::RecordStore,
};
use tempfile::NamedTempFile;

use crate::{Error, Result};

/// A gradebook store backed by one JSON file per collection.
///
/// Construction takes an explicit data directory — nothing is global, so
/// tests isolate themselves with a temporary directory each.
///
/// Every statement runs its full load → transform → save cycle under the
/// target collection's mutex, so concurrent in-process writers cannot lose
/// updates to each other. There is no cache between calls: each load
/// re-reads the file. Both choices size the store for collections in the
/// hundreds to low thousands of records; anything bigger wants an indexed
/// backend behind the same trait.
pub struct JsonStore {
  data_dir: PathBuf,
  locks:    HashMap<Entity, Mutex<()>>,
}

impl JsonStore {
  /// Open a store rooted at `data_dir`, creating the directory and empty
  /// collection files as needed.
  pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
    let data_dir = data_dir.as_ref().to_path_buf();
    fs::create_dir_all(&data_dir).map_err(|source| Error::Io {
      path: data_dir.clone(),
      source,
    })?;

    let store = Self {
      locks:    Entity::ALL.iter().map(|&e| (e, Mutex::new(()))).collect(),
      data_dir,
    };

    for entity in Entity::ALL {
      if !store.collection_path(entity).exists() {
        store.save(entity, &[])?;
      }
    }

    Ok(store)
  }

  /// Path of the file backing `entity`.
  pub fn collection_path(&self, entity: Entity) -> PathBuf {
    self.data_dir.join(format!("{}.json", entity.name()))
  }

  fn lock(&self, entity: Entity) -> Result<MutexGuard<'_, ()>> {
    self.locks[&entity]
      .lock()
      .map_err(|_| Error::Poisoned(entity.to_string()))
  }

  /// Read the full collection for `entity`.
  ///
  /// A missing file is an empty collection. A malformed file also loads as
  /// empty — the store fails open — but leaves a warning in the log, since
  /// that state can hide data. Only I/O faults are hard errors.
  pub fn load(&self, entity: Entity) -> Result<Vec<Row>> {
    let path = self.collection_path(entity);
    let raw = match fs::read_to_string(&path) {
      Ok(raw) => raw,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
      Err(source) => return Err(Error::Io { path, source }),
    };

    match serde_json::from_str(&raw) {
      Ok(rows) => Ok(rows),
      Err(err) => {
        tracing::warn!(
          path = %path.display(),
          error = %err,
          "collection file is malformed, treating as empty"
        );
        Ok(Vec::new())
      }
    }
  }

  /// Replace the full collection for `entity`.
  ///
  /// The new contents go to a temp file in the data directory, are synced,
  /// then renamed over the target, so a crash mid-write never leaves a
  /// truncated collection behind. Pretty-printed UTF-8; non-ASCII field
  /// values are written verbatim, not escaped.
  pub fn save(&self, entity: Entity, rows: &[Row]) -> Result<()> {
    let path = self.collection_path(entity);
    let json = serde_json::to_string_pretty(rows).map_err(|source| Error::Serialize {
      collection: entity.to_string(),
      source,
    })?;

    let mut tmp = NamedTempFile::new_in(&self.data_dir).map_err(|source| Error::Io {
      path: self.data_dir.clone(),
      source,
    })?;
    tmp.write_all(json.as_bytes()).map_err(|source| Error::Io {
      path: tmp.path().to_path_buf(),
      source,
    })?;
    tmp.as_file().sync_all().map_err(|source| Error::Io {
      path: tmp.path().to_path_buf(),
      source,
    })?;
    tmp.persist(&path).map_err(|err| Error::Io {
      path,
      source: err.error,
    })?;

    Ok(())
  }
}

impl RecordStore for JsonStore {
  type Error = Error;

  /// Unknown collection names yield empty results and zero counts, never
  /// errors: collection-name correctness is the caller's responsibility.
  fn execute(&self, statement: Statement) -> Result<StatementOutcome> {
    let Some(entity) = Entity::from_name(statement.collection()) else {
      tracing::debug!(
        collection = statement.collection(),
        "statement against unknown collection"
      );
      return Ok(match statement {
        Statement::Select { .. } => StatementOutcome::Rows(Vec::new()),
        _ => StatementOutcome::Affected(0),
      });
    };

    let _guard = self.lock(entity)?;
    match statement {
      Statement::Select { filter, .. } => {
        let rows = self.load(entity)?;
        Ok(StatementOutcome::Rows(select_rows(&rows, filter.as_ref())))
      }
      Statement::Insert { row, .. } => {
        let mut rows = self.load(entity)?;
        insert_row(&mut rows, row);
        self.save(entity, &rows)?;
        Ok(StatementOutcome::Affected(1))
      }
      Statement::Update {
        matching, changes, ..
      } => {
        let mut rows = self.load(entity)?;
        let matched = update_rows(&mut rows, &matching, &changes);
        if matched > 0 {
          self.save(entity, &rows)?;
        }
        Ok(StatementOutcome::Affected(matched))
      }
      Statement::Delete { matching, .. } => {
        let mut rows = self.load(entity)?;
        let removed = delete_rows(&mut rows, &matching);
        if removed > 0 {
          self.save(entity, &rows)?;
        }
        Ok(StatementOutcome::Affected(removed))
      }
    }
  }
}
