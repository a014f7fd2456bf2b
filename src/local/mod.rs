//! Local project files
//!
//! Two files live beside a function project: the settings file
//! (`local.settings.json`, the `Values` object of which is the local side of
//! every sync pass) and the project config (`funcsync.toml`) carrying the
//! deploy metadata and the persisted ignore-on-upload side-list.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use funcsync_settings::{keys, ProjectLanguage, RuntimeVersion, SettingsMap};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Default name of the local settings file.
pub const SETTINGS_FILE_NAME: &str = "local.settings.json";

/// Default name of the project config file.
pub const CONFIG_FILE_NAME: &str = "funcsync.toml";

/// Errors from local file operations.
#[derive(Debug, Error)]
pub enum LocalError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed settings file: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("malformed project config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize project config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Shape of the local settings file.
///
/// Only `Values` takes part in reconciliation; the other sections round-trip
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_encrypted: Option<bool>,

    #[serde(default)]
    pub values: SettingsMap,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_strings: Option<SettingsMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<serde_json::Value>,
}

/// A settings file bound to its on-disk location.
#[derive(Debug)]
pub struct LocalSettingsFile {
    path: PathBuf,
    pub settings: LocalSettings,
    digest: Option<String>,
}

impl LocalSettingsFile {
    /// Load the settings file, or start a fresh default when it does not
    /// exist yet.
    pub fn load(path: &Path) -> Result<Self, LocalError> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                settings: LocalSettings::default(),
                digest: None,
            });
        }

        let raw = fs::read(path)?;
        let settings: LocalSettings = serde_json::from_slice(&raw)?;
        Ok(Self {
            path: path.to_path_buf(),
            settings,
            digest: Some(digest_of(&raw)),
        })
    }

    /// Write the settings back and refresh the digest.
    pub fn save(&mut self) -> Result<(), LocalError> {
        let mut raw = serde_json::to_vec_pretty(&self.settings)?;
        raw.push(b'\n');
        fs::write(&self.path, &raw)?;
        self.digest = Some(digest_of(&raw));
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// SHA-256 of the raw file bytes; `None` until the file exists.
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }
}

fn digest_of(raw: &[u8]) -> String {
    hex::encode(Sha256::digest(raw))
}

/// Project configuration (`funcsync.toml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Path of the app state file standing in for the remote app.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_state: Option<PathBuf>,

    /// Local runtime version (e.g. `~3`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<RuntimeVersion>,

    /// Language of the local project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<ProjectLanguage>,

    /// Whether deploys request a remote build.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_build: Option<bool>,

    /// Keys redacted by a download pass; skipped on the next upload.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub upload_ignore: Vec<String>,
}

impl ProjectConfig {
    /// Load the project config, or a default when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, LocalError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), LocalError> {
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Record newly redacted keys, keeping the list free of duplicates.
    pub fn merge_upload_ignore<'a>(&mut self, new_keys: impl IntoIterator<Item = &'a String>) {
        for key in new_keys {
            if !self.upload_ignore.contains(key) {
                self.upload_ignore.push(key.clone());
            }
        }
    }

    /// Full ignore set for an upload pass: the fixed security-sensitive
    /// names plus the persisted side-list.
    pub fn upload_ignore_set(&self) -> Vec<String> {
        let mut ignored: Vec<String> = keys::SECURITY_SENSITIVE
            .iter()
            .map(|k| k.to_string())
            .collect();
        for key in &self.upload_ignore {
            if !ignored.contains(key) {
                ignored.push(key.clone());
            }
        }
        ignored
    }
}
