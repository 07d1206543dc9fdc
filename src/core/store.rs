//! File-backed registry of departments.
//!
//! The [`Store`] owns the whole department mapping in memory. It only touches
//! the disk when asked to: once when it is opened in [`StoreMode::Restore`],
//! and whenever [`Store::save_to_file`] / [`Store::try_save`] or
//! [`Store::reload`] are called. Mutations in between stay in memory.
//!
//! Reads never fail: a missing, unreadable, or invalid snapshot yields an
//! empty mapping. Writes go to a sibling `.tmp` file first and are renamed
//! over the target.

use crate::domain::Department;
use crate::utils::error::{RegistryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Department code -> department, sorted by code.
pub type DepartmentMapping = BTreeMap<String, Department>;

pub const SNAPSHOT_VERSION: u32 = 1;

/// How a [`Store`] initializes its mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// Start empty, ignoring whatever is on disk.
    Fresh,
    /// Start from the snapshot on disk.
    Restore,
}

impl StoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreMode::Fresh => "fresh",
            StoreMode::Restore => "restore",
        }
    }
}

impl FromStr for StoreMode {
    type Err = RegistryError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fresh" => Ok(StoreMode::Fresh),
            "restore" => Ok(StoreMode::Restore),
            _ => Err(RegistryError::invalid_argument(format!(
                "Invalid flag value: {}",
                value
            ))),
        }
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    departments: &'a DepartmentMapping,
}

#[derive(Deserialize)]
struct SnapshotIn {
    version: u32,
    saved_at: DateTime<Utc>,
    departments: DepartmentMapping,
}

#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    departments: DepartmentMapping,
}

impl Store {
    pub fn new(mode: StoreMode, path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            departments: DepartmentMapping::new(),
        };
        if mode == StoreMode::Restore {
            store.departments = store.load_from_file();
        }
        tracing::info!(
            "Opened registry at {} ({} mode, {} departments)",
            store.path.display(),
            mode,
            store.departments.len()
        );
        store
    }

    /// Like [`Store::new`] but takes the mode as text, e.g. from a config file.
    pub fn open(mode: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let mode: StoreMode = mode.parse()?;
        Ok(Self::new(mode, path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mapping(&self) -> &DepartmentMapping {
        &self.departments
    }

    pub fn mapping_mut(&mut self) -> &mut DepartmentMapping {
        &mut self.departments
    }

    /// Replaces the whole mapping. The caller is trusted; nothing is checked.
    pub fn set_mapping(&mut self, departments: DepartmentMapping) {
        self.departments = departments;
    }

    pub fn department(&self, dept_code: &str) -> Option<&Department> {
        self.departments.get(dept_code)
    }

    pub fn department_mut(&mut self, dept_code: &str) -> Option<&mut Department> {
        self.departments.get_mut(dept_code)
    }

    /// Stores `department` under its own code, returning the one it replaced.
    pub fn insert_department(&mut self, department: Department) -> Option<Department> {
        self.departments
            .insert(department.dept_code().to_string(), department)
    }

    pub fn remove_department(&mut self, dept_code: &str) -> Option<Department> {
        self.departments.remove(dept_code)
    }

    /// Writes the current mapping to the persistence target.
    ///
    /// A mapping that could not be read back (a department stored under a key
    /// other than its own code) is refused and the file is left untouched.
    pub fn try_save(&self) -> Result<()> {
        check_mapping(&self.departments)?;
        let snapshot = SnapshotOut {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            departments: &self.departments,
        };
        let data = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        fs::write(&tmp_path, &data)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::info!(
            "Saved {} departments to {}",
            self.departments.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Best-effort save: a failure is logged and swallowed so shutdown is
    /// never blocked by the disk. Returns whether the write succeeded.
    pub fn save_to_file(&self) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    "❌ Failed to save registry to {}: {}",
                    self.path.display(),
                    e
                );
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                false
            }
        }
    }

    /// Reads the mapping stored at the persistence target. Anything that
    /// prevents a clean read results in an empty mapping.
    pub fn load_from_file(&self) -> DepartmentMapping {
        if !self.path.exists() {
            tracing::info!(
                "No registry file at {}, starting empty",
                self.path.display()
            );
            return DepartmentMapping::new();
        }

        match self.read_snapshot() {
            Ok(departments) => {
                tracing::debug!(
                    "Loaded {} departments from {}",
                    departments.len(),
                    self.path.display()
                );
                departments
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read registry file {}: {}; starting empty",
                    self.path.display(),
                    e
                );
                DepartmentMapping::new()
            }
        }
    }

    /// Discards in-memory changes and takes the mapping from disk.
    pub fn reload(&mut self) {
        self.departments = self.load_from_file();
    }

    fn read_snapshot(&self) -> Result<DepartmentMapping> {
        let data = fs::read(&self.path)?;
        let snapshot: SnapshotIn = serde_json::from_slice(&data)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(RegistryError::SnapshotVersionError {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        check_mapping(&snapshot.departments)?;
        tracing::debug!("Snapshot written at {}", snapshot.saved_at.to_rfc3339());
        Ok(snapshot.departments)
    }
}

/// Every department must be stored under its own code. Saving and loading
/// both go through here so whatever is written can be read back.
fn check_mapping(departments: &DepartmentMapping) -> Result<()> {
    match departments
        .iter()
        .find(|(key, department)| key.as_str() != department.dept_code())
    {
        Some((key, department)) => Err(RegistryError::invalid_argument(format!(
            "Department stored under {} has code {}",
            key,
            department.dept_code()
        ))),
        None => Ok(()),
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (dept_code, department) in &self.departments {
            write!(f, "For the {} department: \n{}", dept_code, department)?;
        }
        Ok(())
    }
}
