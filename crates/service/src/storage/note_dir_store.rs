use std::{collections::BTreeSet, io::ErrorKind, path::{Path, PathBuf}};

use async_trait::async_trait;
use models::note::NOTE_EXTENSION;
use tokio::fs;
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::{RecordStore, Records};

/// Notes collection kept as one directory of `<title>.txt` files.
///
/// The directory is the document: `load` reads every note file and `save`
/// rewrites the set, deleting files whose title is gone from the map.
pub struct NoteDirStore {
    dir: PathBuf,
    resource: String,
}

impl NoteDirStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        let dir = dir.into();
        let resource = format!("{}/", dir.display());
        Self { dir, resource }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn note_path(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{title}.{NOTE_EXTENSION}"))
    }

    fn title_of(path: &Path) -> Option<String> {
        if path.extension().and_then(|e| e.to_str()) != Some(NOTE_EXTENSION) {
            return None;
        }
        path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
    }

    async fn note_files(&self) -> Result<Vec<(String, PathBuf)>, ServiceError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ServiceError::io(&self.resource, e)),
        };
        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ServiceError::io(&self.resource, e))?
        {
            let path = entry.path();
            let is_file = entry
                .file_type()
                .await
                .map_err(|e| ServiceError::io(&self.resource, e))?
                .is_file();
            if !is_file {
                continue;
            }
            if let Some(title) = Self::title_of(&path) {
                files.push((title, path));
            }
        }
        Ok(files)
    }
}

#[async_trait]
impl RecordStore<String> for NoteDirStore {
    fn resource(&self) -> &str {
        &self.resource
    }

    async fn load(&self) -> Result<Records<String>, ServiceError> {
        let mut notes = Records::new();
        for (title, path) in self.note_files().await? {
            let content = match fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    return Err(ServiceError::corrupted(
                        &self.resource,
                        format!("{} is not valid UTF-8", path.display()),
                    ))
                }
                Err(e) => return Err(ServiceError::io(&self.resource, e)),
            };
            notes.insert(title, content);
        }
        debug!(resource = %self.resource, records = notes.len(), "loaded notes");
        Ok(notes)
    }

    async fn save(&self, records: &Records<String>) -> Result<(), ServiceError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ServiceError::io(&self.resource, e))?;
        for (title, content) in records {
            fs::write(self.note_path(title), content)
                .await
                .map_err(|e| ServiceError::io(&self.resource, e))?;
        }
        let keep: BTreeSet<&str> = records.keys().map(String::as_str).collect();
        for (title, path) in self.note_files().await? {
            if !keep.contains(title.as_str()) {
                fs::remove_file(&path)
                    .await
                    .map_err(|e| ServiceError::io(&self.resource, e))?;
            }
        }
        debug!(resource = %self.resource, records = records.len(), "saved notes");
        Ok(())
    }
}
