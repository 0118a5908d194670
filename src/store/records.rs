//! RecordStore — one CSV file per collection, read and written whole.
//!
//! Every mutation is "load all, change in memory, save all". There is no
//! locking and no atomic rename: two writers racing on the same file end in
//! last-write-wins, and a crash mid-save can leave a truncated file.

use std::fs::File;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};

/// A typed row with a fixed column layout.
///
/// `HEADER` must list the serialized field names in struct declaration order;
/// rows are written positionally under it and read back by column name.
pub trait Record: Serialize + DeserializeOwned {
    const HEADER: &'static [&'static str];
}

pub struct RecordStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every row. A missing or unparsable file reads as an empty
    /// collection; the failure is only logged.
    pub fn load(&self) -> Vec<T> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) if is_missing_file(&e) => {
                tracing::debug!(path = %self.path.display(), "no records file yet");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), "error loading records: {:#}", e);
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> anyhow::Result<Vec<T>> {
        let file = File::open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<T>().enumerate() {
            let record = row.with_context(|| {
                format!("parsing row {} of {}", i + 1, self.path.display())
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Overwrite the whole file with `records` under the fixed header.
    pub fn save(&self, records: &[T]) -> anyhow::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .with_context(|| format!("creating {}", self.path.display()))?;

        writer.write_record(T::HEADER)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        tracing::debug!(path = %self.path.display(), rows = records.len(), "saved records");
        Ok(())
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}
