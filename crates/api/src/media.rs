//! Local filesystem blob store for place images.
//!
//! Files are addressed by relative keys (`places/<uuid>.<ext>`) under a root
//! directory that is also served statically at the configured media URL.

use std::path::{Path, PathBuf};

use placemap_core::media::{media_url, validate_image_key};

/// Errors raised by [`MediaStorage`].
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The key would escape the storage root or is malformed.
    #[error("{0}")]
    InvalidKey(String),

    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Path-addressed image store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
    url_prefix: String,
}

impl MediaStorage {
    /// `url_prefix` must already be normalised (leading and trailing `/`).
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative public URL of a stored key; `None` for an empty reference.
    pub fn url(&self, key: &str) -> Option<String> {
        media_url(&self.url_prefix, key)
    }

    /// Write `data` under `key`, creating parent directories as needed.
    pub async fn save(&self, key: &str, data: &[u8]) -> Result<(), MediaError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| io_error(key, source))?;
        }
        tokio::fs::write(&path, data)
            .await
            .map_err(|source| io_error(key, source))?;
        tracing::debug!(key, bytes = data.len(), "Stored media file");
        Ok(())
    }

    /// Remove the file stored under `key`. A missing file is not an error.
    pub async fn delete(&self, key: &str) -> Result<(), MediaError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(io_error(key, source)),
        }
    }

    /// Remove several files, logging failures instead of returning them.
    ///
    /// Used after the owning rows are already gone from the database.
    pub async fn delete_best_effort<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            let key = key.as_ref();
            if key.is_empty() {
                continue;
            }
            if let Err(err) = self.delete(key).await {
                tracing::warn!(key, error = %err, "Failed to remove media file");
            }
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, MediaError> {
        validate_image_key(key).map_err(|e| MediaError::InvalidKey(e.to_string()))?;
        Ok(self.root.join(key))
    }
}

fn io_error(key: &str, source: std::io::Error) -> MediaError {
    MediaError::Io {
        key: key.to_string(),
        source,
    }
}
