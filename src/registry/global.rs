//! Global registry of documentation trees.
//!
//! Users typically keep several generated trees around (one per project,
//! sometimes one per release). The registry lets commands fall back to a
//! named default tree when the current directory is not one.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::project::ProjectInfo;

const REGISTRY_FILE: &str = "registry.json";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "docdex";
const APP_NAME: &str = "docdex";

/// Registry of documentation trees, persisted as JSON in the platform data
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GlobalRegistry {
    /// Map of project name to tree info
    pub projects: HashMap<String, ProjectInfo>,
    /// Name of the default project (if set)
    pub default_project: Option<String>,
}

impl GlobalRegistry {
    /// Platform data directory holding the registry.
    pub fn global_dir() -> Result<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))
    }

    pub fn registry_path() -> Result<PathBuf> {
        Ok(Self::global_dir()?.join(REGISTRY_FILE))
    }

    /// Load the registry from disk, or start a fresh one.
    pub fn load() -> Result<Self> {
        let registry_path = Self::registry_path()?;

        if registry_path.exists() {
            let content = fs::read_to_string(&registry_path)
                .with_context(|| format!("Failed to read registry from {:?}", registry_path))?;

            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse registry from {:?}", registry_path))
        } else {
            debug!("No existing registry found, creating new one");
            Ok(Self::default())
        }
    }

    /// Save the registry using write-then-rename for atomicity.
    pub fn save(&self) -> Result<()> {
        let registry_path = Self::registry_path()?;
        let global_dir = Self::global_dir()?;

        fs::create_dir_all(&global_dir)
            .with_context(|| format!("Failed to create global directory {:?}", global_dir))?;

        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize registry")?;

        let temp_path = registry_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file {:?}", temp_path))?;
        file.write_all(content.as_bytes())
            .context("Failed to write registry content")?;
        file.sync_all().context("Failed to sync registry file")?;

        fs::rename(&temp_path, &registry_path)
            .with_context(|| format!("Failed to rename temp file to {:?}", registry_path))?;

        debug!("Saved registry to {:?}", registry_path);
        Ok(())
    }

    /// Register a new tree. Fails if the name is taken or the path is gone.
    pub fn add_project(&mut self, project: ProjectInfo) -> Result<()> {
        let name = project.name.clone();

        if self.projects.contains_key(&name) {
            anyhow::bail!("Project '{}' already exists in the registry", name);
        }

        if !project.path_exists() {
            anyhow::bail!("Project path does not exist: {:?}", project.path);
        }

        info!("Registering tree '{}' at {:?}", name, project.path);
        self.projects.insert(name, project);
        Ok(())
    }

    /// Remove a tree by name, returning it if it existed. Clears the
    /// default when the removed tree was the default.
    pub fn remove_project(&mut self, name: &str) -> Option<ProjectInfo> {
        let removed = self.projects.remove(name);

        if removed.is_some() && self.default_project.as_deref() == Some(name) {
            self.default_project = None;
        }

        removed
    }

    pub fn get(&self, name: &str) -> Option<&ProjectInfo> {
        self.projects.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ProjectInfo> {
        self.projects.get_mut(name)
    }

    /// Find the registered tree containing the given path, if any.
    pub fn find_by_path(&self, path: &Path) -> Option<&ProjectInfo> {
        self.projects.values().find(|p| p.path == path)
    }

    /// Mark a named tree as the default. Fails when unknown.
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.projects.contains_key(name) {
            anyhow::bail!("No project named '{}' in the registry", name);
        }
        self.default_project = Some(name.to_string());
        Ok(())
    }

    /// The default tree's info, when a default is set and still known.
    pub fn default_project_info(&self) -> Option<&ProjectInfo> {
        self.default_project
            .as_deref()
            .and_then(|name| self.projects.get(name))
    }

    /// Projects sorted by name for stable listings.
    pub fn list_projects(&self) -> Vec<&ProjectInfo> {
        let mut projects: Vec<&ProjectInfo> = self.projects.values().collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        projects
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
