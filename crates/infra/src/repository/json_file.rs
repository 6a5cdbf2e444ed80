//! File-backed document store.
//!
//! One pretty-printed JSON document per key, stored as `<encoded key>.json`
//! under a base directory. Keys are percent-encoded into file names so any
//! identifier maps to exactly one file inside the directory.
//!
//! Documents are written to a `.json.tmp` sibling first and only then moved
//! into place, so readers never observe a partially written document.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Repository, RepositoryError};

const EXTENSION: &str = "json";

#[derive(Debug)]
pub struct JsonFileRepository<K, V> {
    base_path: PathBuf,
    // Serializes writers so temp files and renames never interleave.
    write_lock: Mutex<()>,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K, V> JsonFileRepository<K, V> {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(base_path: P) -> Result<Self, RepositoryError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|e| RepositoryError::Io(e.to_string()))?;
        Ok(Self {
            base_path,
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.{EXTENSION}", encode_file_stem(key)))
    }
}

impl<K, V> JsonFileRepository<K, V>
where
    V: Serialize + DeserializeOwned,
{
    fn read_document(path: &Path) -> Result<Option<V>, RepositoryError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepositoryError::Io(e.to_string())),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| RepositoryError::Serialization(format!("{}: {e}", path.display())))
    }

    fn encode(value: &V) -> Result<String, RepositoryError> {
        serde_json::to_string_pretty(value).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    fn write_replacing(&self, path: &Path, contents: &str) -> Result<(), RepositoryError> {
        let tmp = write_temp(path, contents)?;
        fs::rename(&tmp, path).map_err(|e| {
            discard(&tmp);
            RepositoryError::Io(e.to_string())
        })
    }

    /// Link the finished temp file into place; fails if `path` already exists.
    fn write_new(&self, key: &str, path: &Path, contents: &str) -> Result<(), RepositoryError> {
        let tmp = write_temp(path, contents)?;
        let linked = fs::hard_link(&tmp, path);
        discard(&tmp);
        match linked {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(RepositoryError::AlreadyExists(key.to_string()))
            }
            Err(e) => Err(RepositoryError::Io(e.to_string())),
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    path.with_extension(format!("{EXTENSION}.tmp"))
}

fn write_temp(path: &Path, contents: &str) -> Result<PathBuf, RepositoryError> {
    let tmp = temp_path(path);
    fs::write(&tmp, contents).map_err(|e| {
        discard(&tmp);
        RepositoryError::Io(e.to_string())
    })?;
    Ok(tmp)
}

fn discard(tmp: &Path) {
    if let Err(e) = fs::remove_file(tmp) {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(path = %tmp.display(), "could not remove temp document: {e}");
        }
    }
}

impl<K, V> Repository<K, V> for JsonFileRepository<K, V>
where
    K: AsRef<str> + Send + Sync + 'static,
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Result<Option<V>, RepositoryError> {
        Self::read_document(&self.document_path(key.as_ref()))
    }

    fn put(&self, key: K, value: V) -> Result<(), RepositoryError> {
        let contents = Self::encode(&value)?;
        let _guard = self.write_lock.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        self.write_replacing(&self.document_path(key.as_ref()), &contents)
    }

    fn insert(&self, key: K, value: V) -> Result<(), RepositoryError> {
        let contents = Self::encode(&value)?;
        let _guard = self.write_lock.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        self.write_new(key.as_ref(), &self.document_path(key.as_ref()), &contents)
    }

    fn list(&self, filter: &dyn Fn(&V) -> bool) -> Result<Vec<V>, RepositoryError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| RepositoryError::Io(e.to_string()))?;

        let mut keyed = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| RepositoryError::Io(e.to_string()))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(key) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(decode_file_stem)
            else {
                continue;
            };
            match Self::read_document(&path) {
                Ok(Some(doc)) if filter(&doc) => keyed.push((key, doc)),
                Ok(_) => {}
                Err(RepositoryError::Serialization(reason)) => {
                    tracing::warn!(%reason, "skipping unreadable document");
                }
                Err(e) => return Err(e),
            }
        }

        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(keyed.into_iter().map(|(_, doc)| doc).collect())
    }
}

fn is_plain(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Percent-encode every byte outside `[A-Za-z0-9_-]`.
fn encode_file_stem(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if is_plain(b) {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

fn decode_file_stem(stem: &str) -> Option<String> {
    let bytes = stem.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = stem.get(i + 1..i + 3)?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            b if is_plain(b) => {
                out.push(b);
                i += 1;
            }
            _ => return None,
        }
    }
    String::from_utf8(out).ok()
}
