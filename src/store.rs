//! Dashboard storage
//!
//! Persists the widgets that outlive a restart. Timer state is deliberately
//! not stored.
//! - Tasks: <data_dir>/tasks.json
//! - Preferences: <data_dir>/preferences.json

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{Preferences, Task};

/// JSON file store rooted at the dashboard data directory
#[derive(Debug, Clone)]
pub struct DashboardStore {
    data_dir: PathBuf,
}

impl DashboardStore {
    /// Create a store, creating `data_dir` if needed
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn tasks_path(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }

    fn preferences_path(&self) -> PathBuf {
        self.data_dir.join("preferences.json")
    }

    /// Read a JSON document; a missing or blank file yields `None`
    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(value))
    }

    /// Write via a temp file and rename so a crash never leaves half a document
    fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace {}", path.display()))
    }

    pub fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(Self::read_json(&self.tasks_path())?.unwrap_or_default())
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        Self::write_json(&self.tasks_path(), tasks)
    }

    pub fn load_preferences(&self) -> Result<Preferences> {
        Ok(Self::read_json(&self.preferences_path())?.unwrap_or_default())
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        Self::write_json(&self.preferences_path(), preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CategoryFilter, TaskList, TaskPriority, Theme};
    use tempfile::TempDir;

    fn test_store() -> (DashboardStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = DashboardStore::new(&temp_dir.path().join("focus-flow")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn empty_store_loads_defaults() {
        let (store, _dir) = test_store();
        assert!(store.load_tasks().unwrap().is_empty());
        assert_eq!(store.load_preferences().unwrap(), Preferences::default());
    }

    #[test]
    fn tasks_survive_a_reload() {
        let (store, _dir) = test_store();
        let mut list = TaskList::new();
        list.add("Plan sprint", CategoryFilter::Work, TaskPriority::High).unwrap();
        let id = list.tasks()[0].id.clone();
        list.toggle(&id).unwrap();

        store.save_tasks(list.tasks()).unwrap();
        let loaded = store.load_tasks().unwrap();
        assert_eq!(loaded, list.tasks());
    }

    #[test]
    fn preferences_survive_a_reload() {
        let (store, _dir) = test_store();
        let mut prefs = Preferences::default();
        prefs.toggle_theme();
        store.save_preferences(&prefs).unwrap();
        assert_eq!(store.load_preferences().unwrap().theme, Theme::Dark);
    }

    #[test]
    fn blank_file_is_treated_as_empty() {
        let (store, _dir) = test_store();
        fs::write(store.data_dir().join("tasks.json"), "  \n").unwrap();
        assert!(store.load_tasks().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_reports_path() {
        let (store, _dir) = test_store();
        fs::write(store.data_dir().join("tasks.json"), "{not json").unwrap();
        let err = store.load_tasks().unwrap_err();
        assert!(format!("{:#}", err).contains("tasks.json"));
    }
}
