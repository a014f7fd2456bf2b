//! Simulated remote app
//!
//! A file-backed [`RemoteApp`] used by the CLI and the integration tests in
//! place of a real platform client. The state file is a JSON document with
//! the app's name, plan, settings, and a reachability flag for injecting
//! the fetch-failure path.

use std::fs;
use std::path::{Path, PathBuf};

use funcsync_settings::SettingsMap;
use serde::{Deserialize, Serialize};

use crate::remote::{PlanOs, PlanTier, RemoteApp, RemoteError};

/// On-disk state of a simulated app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    pub name: String,
    pub os: PlanOs,
    pub tier: PlanTier,

    /// When false, every call fails as if host information were missing.
    #[serde(default = "default_reachable")]
    pub reachable: bool,

    #[serde(default)]
    pub settings: SettingsMap,
}

fn default_reachable() -> bool {
    true
}

/// File-backed remote app.
#[derive(Debug)]
pub struct SimulatedApp {
    path: PathBuf,
    state: AppState,
    updates_applied: u32,
}

impl SimulatedApp {
    /// Load a simulated app from its state file.
    pub fn load(path: &Path) -> Result<Self, RemoteError> {
        let raw = fs::read_to_string(path)?;
        let state: AppState = serde_json::from_str(&raw)?;
        Ok(Self {
            path: path.to_path_buf(),
            state,
            updates_applied: 0,
        })
    }

    /// Write a fresh state file and return the app backed by it.
    pub fn create(path: &Path, state: AppState) -> Result<Self, RemoteError> {
        let mut app = Self {
            path: path.to_path_buf(),
            state,
            updates_applied: 0,
        };
        app.persist()?;
        Ok(app)
    }

    /// How many batched settings updates this instance has applied.
    pub fn updates_applied(&self) -> u32 {
        self.updates_applied
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn persist(&mut self) -> Result<(), RemoteError> {
        let mut raw = serde_json::to_vec_pretty(&self.state)?;
        raw.push(b'\n');
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl RemoteApp for SimulatedApp {
    fn name(&self) -> &str {
        &self.state.name
    }

    fn os(&self) -> PlanOs {
        self.state.os
    }

    fn tier(&self) -> PlanTier {
        self.state.tier
    }

    fn list_settings(&mut self) -> Result<SettingsMap, RemoteError> {
        if !self.state.reachable {
            return Err(RemoteError::HostInformationUnavailable(
                self.state.name.clone(),
            ));
        }
        Ok(self.state.settings.clone())
    }

    fn update_settings(&mut self, settings: &SettingsMap) -> Result<(), RemoteError> {
        if !self.state.reachable {
            return Err(RemoteError::HostInformationUnavailable(
                self.state.name.clone(),
            ));
        }
        self.state.settings = settings.clone();
        self.updates_applied += 1;
        self.persist()
    }
}
