//! Local key-value cache for the uploaded-file list and selected file.
//!
//! Stored as a single JSON object in `$RAGDESK_HOME/state.json`. Each key
//! holds an arbitrary JSON value; the typed helpers below use fixed keys.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::paths;

/// Key holding the uploaded-file list (newest first).
pub const UPLOADED_FILES_KEY: &str = "uploaded_files";
/// Key holding the selected file id.
pub const SELECTED_FILE_KEY: &str = "selected_file_id";

/// Audience a document is shared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Admin,
    Doctor,
    Nurse,
    Patient,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Doctor, Role::Nurse, Role::Patient];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == wanted)
            .with_context(|| {
                format!("Unknown role '{s}' (expected admin, doctor, nurse, or patient)")
            })
    }
}

/// A document the user uploaded from this machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub visibility: Role,
    pub timestamp: String,
}

impl UploadedFile {
    /// Creates a record with a fresh short id and today's local date.
    pub fn new(name: impl Into<String>, owner: impl Into<String>, visibility: Role) -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(9);
        Self {
            id,
            name: name.into(),
            owner: owner.into(),
            visibility,
            timestamp: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// JSON-object backed key-value store.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl Store {
    /// Opens the store at the default location.
    pub fn open() -> Result<Self> {
        Self::open_at(paths::state_path())
    }

    /// Opens the store at a specific path.
    /// A missing file is an empty store.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                entries: Map::new(),
            });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read state from {}", path.display()))?;
        let entries = if contents.trim().is_empty() {
            Map::new()
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse state from {}", path.display()))?
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes a key. Missing keys and JSON `null` read as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.entries.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .with_context(|| format!("Invalid value stored under '{key}'")),
        }
    }

    /// Encodes and stores a value, then saves.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to encode value for '{key}'"))?;
        self.entries.insert(key.to_string(), value);
        self.save()
    }

    /// Removes a key, then saves. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> Result<bool> {
        let existed = self.entries.remove(key).is_some();
        if existed {
            self.save()?;
        }
        Ok(existed)
    }

    /// Uploaded files, newest first.
    pub fn uploaded_files(&self) -> Result<Vec<UploadedFile>> {
        Ok(self.get(UPLOADED_FILES_KEY)?.unwrap_or_default())
    }

    /// Prepends an uploaded file and selects it if nothing is selected yet.
    pub fn record_upload(&mut self, file: UploadedFile) -> Result<()> {
        let mut files = self.uploaded_files()?;
        let id = file.id.clone();
        files.insert(0, file);
        self.entries.insert(
            UPLOADED_FILES_KEY.to_string(),
            serde_json::to_value(&files).context("Failed to encode file list")?,
        );
        if self.selected_file_id()?.is_none() {
            self.entries
                .insert(SELECTED_FILE_KEY.to_string(), Value::String(id));
        }
        self.save()
    }

    pub fn selected_file_id(&self) -> Result<Option<String>> {
        self.get(SELECTED_FILE_KEY)
    }

    /// The selected file record, if the selection still refers to a known file.
    pub fn selected_file(&self) -> Result<Option<UploadedFile>> {
        let Some(id) = self.selected_file_id()? else {
            return Ok(None);
        };
        Ok(self.uploaded_files()?.into_iter().find(|f| f.id == id))
    }

    /// Selects a cached file by id.
    pub fn select_file(&mut self, id: &str) -> Result<UploadedFile> {
        let Some(file) = self.uploaded_files()?.into_iter().find(|f| f.id == id) else {
            bail!("No uploaded file with id '{id}'");
        };
        self.set(SELECTED_FILE_KEY, &file.id)?;
        Ok(file)
    }

    /// Forgets the file list and selection.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.remove(UPLOADED_FILES_KEY);
        self.entries.remove(SELECTED_FILE_KEY);
        self.save()
    }

    /// Writes the store atomically (temp file + rename).
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(&self.entries).context("Failed to serialize state")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write state to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        tracing::debug!(path = %self.path.display(), keys = self.entries.len(), "saved state");
        Ok(())
    }
}
