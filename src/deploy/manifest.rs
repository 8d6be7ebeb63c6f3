//! Deployment manifest: component name -> deployed address.
//!
//! The on-disk artifact (`deployed_<network>.json`) always reflects a single
//! complete run. It is removed before writing and only written once the whole
//! plan has succeeded, so its existence alone signals phase-1 completion.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BootError, BootResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, address: &str) {
        self.entries.insert(name.to_string(), address.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Address lookup that fails the run if phase 1 did not record the entry.
    pub fn require(&self, name: &str, needed_by: &str) -> BootResult<&str> {
        self.get(name).ok_or_else(|| BootError::UnresolvedDependency {
            component: needed_by.to_string(),
            dependency: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path_for(dir: &Path, network: &str) -> PathBuf {
        dir.join(format!("deployed_{network}.json"))
    }

    /// Replace any previous run's manifest with this one, pretty-printed.
    pub fn write(&self, dir: &Path, network: &str) -> BootResult<PathBuf> {
        let path = Self::path_for(dir, network);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    pub fn read(dir: &Path, network: &str) -> BootResult<Self> {
        let raw = fs::read_to_string(Self::path_for(dir, network))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_keyed_by_network() {
        let path = Manifest::path_for(Path::new("/tmp"), "mainnet");
        assert_eq!(path, Path::new("/tmp/deployed_mainnet.json"));
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = Manifest::new();
        manifest.insert("PoolPawn", "0xAAA");
        manifest.insert("PriceOracles", "0xBBB");
        manifest.write(dir.path(), "test").unwrap();

        let back = Manifest::read(dir.path(), "test").unwrap();
        assert_eq!(back, manifest);
        assert_eq!(back.require("PoolPawn", "init").unwrap(), "0xAAA");
    }

    #[test]
    fn rewrite_drops_stale_entries() {
        let dir = tempfile::tempdir().unwrap();

        let mut first = Manifest::new();
        first.insert("OldContract", "0x111");
        first.write(dir.path(), "test").unwrap();

        let mut second = Manifest::new();
        second.insert("PoolPawn", "0x222");
        second.write(dir.path(), "test").unwrap();

        let back = Manifest::read(dir.path(), "test").unwrap();
        assert!(!back.contains("OldContract"));
        assert_eq!(back.get("PoolPawn"), Some("0x222"));
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn missing_entry_is_an_unresolved_dependency() {
        let manifest = Manifest::new();
        let err = manifest.require("PoolPawn", "market init").unwrap_err();
        assert!(matches!(err, BootError::UnresolvedDependency { .. }), "{err:?}");
    }
}
