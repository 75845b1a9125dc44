// Resume Data Store — owns the one `ResumeData` value and writes it through
// to a durable key-value store on every mutation.

use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::form::{apply_action, FormAction, FormError};
use crate::models::resume::ResumeData;

/// Fixed key the resume draft is stored under.
pub const RESUME_KEY: &str = "resume-data";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resume JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Durable string key-value storage. Writes are synchronous.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Moves the value under `key` aside so it is kept but no longer read.
    fn set_aside(&self, key: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Write to a sibling file first so a crash never leaves a torn value.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn set_aside(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        std::fs::rename(&path, path.with_extension("json.bad"))?;
        Ok(())
    }
}

pub struct ResumeStore {
    backend: Box<dyn KeyValueStore>,
    current: RwLock<ResumeData>,
}

impl ResumeStore {
    /// Loads the draft under [`RESUME_KEY`], or starts from an empty resume.
    ///
    /// A draft that no longer decodes is set aside and the store starts empty.
    pub fn load(backend: Box<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let current = match backend.get(RESUME_KEY)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(data) => {
                    info!("Loaded saved resume draft");
                    data
                }
                Err(e) => {
                    warn!("Saved resume draft could not be decoded ({e}); setting it aside");
                    backend.set_aside(RESUME_KEY)?;
                    ResumeData::default()
                }
            },
            None => {
                info!("No saved resume draft, starting empty");
                ResumeData::default()
            }
        };

        Ok(Self {
            backend,
            current: RwLock::new(current),
        })
    }

    pub fn current(&self) -> Result<ResumeData, StoreError> {
        let guard = self.current.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    /// Applies one form action and persists the resulting value.
    /// On any error the held value is left untouched.
    pub fn apply(&self, action: FormAction) -> Result<ResumeData, StoreError> {
        let mut guard = self.current.write().map_err(|_| StoreError::Poisoned)?;
        let next = apply_action(&guard, action)?;
        self.persist(&next)?;
        *guard = next.clone();
        Ok(next)
    }

    /// Replaces the whole draft.
    pub fn replace(&self, data: ResumeData) -> Result<ResumeData, StoreError> {
        let mut guard = self.current.write().map_err(|_| StoreError::Poisoned)?;
        self.persist(&data)?;
        *guard = data.clone();
        Ok(data)
    }

    fn persist(&self, data: &ResumeData) -> Result<(), StoreError> {
        let raw = serde_json::to_string(data)?;
        self.backend.set(RESUME_KEY, &raw)?;
        debug!("Persisted resume draft ({} bytes)", raw.len());
        Ok(())
    }
}
