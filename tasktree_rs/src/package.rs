//! Metadata of the project the tasks belong to.
//!
//! Walks up from a start directory to the nearest `Cargo.toml` that has a
//! `[package]` table, or the nearest `package.json`, whichever comes first.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

/// Name, version and root directory of the hosting project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub root: PathBuf,
}

const UNKNOWN_VERSION: &str = "0.0.0";

#[derive(Deserialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
}

impl PackageInfo {
    /// Find the nearest package manifest at or above `start`.
    ///
    /// Falls back to the name of `start` itself and version `0.0.0`.
    pub fn discover(start: &Path) -> Self {
        for dir in start.ancestors() {
            if let Some(info) = Self::from_cargo_manifest(dir) {
                return info;
            }
            if let Some(info) = Self::from_package_json(dir) {
                return info;
            }
        }
        debug!("no package manifest above {}", start.display());
        Self::fallback(start)
    }

    pub fn fallback(root: &Path) -> Self {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tasks".to_string());
        Self {
            name,
            version: UNKNOWN_VERSION.to_string(),
            root: root.to_path_buf(),
        }
    }

    /// `name@version`
    pub fn label(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    fn from_cargo_manifest(dir: &Path) -> Option<Self> {
        let path = dir.join("Cargo.toml");
        let content = fs::read_to_string(&path).ok()?;
        let manifest: toml::Table = match toml::from_str(&content) {
            Ok(table) => table,
            Err(e) => {
                warn!("failed to parse {}: {}", path.display(), e);
                return None;
            }
        };

        // Workspace roots without [package] don't count
        let package = manifest.get("package")?.as_table()?;
        let name = package.get("name")?.as_str()?.to_string();
        let version = package
            .get("version")
            .and_then(toml::Value::as_str)
            .unwrap_or(UNKNOWN_VERSION)
            .to_string();

        Some(Self {
            name,
            version,
            root: dir.to_path_buf(),
        })
    }

    fn from_package_json(dir: &Path) -> Option<Self> {
        let path = dir.join("package.json");
        let content = fs::read_to_string(&path).ok()?;
        let pkg: PackageJson = match serde_json::from_str(&content) {
            Ok(pkg) => pkg,
            Err(e) => {
                warn!("failed to parse {}: {}", path.display(), e);
                return None;
            }
        };

        let fallback = Self::fallback(dir);
        Some(Self {
            name: pkg.name.unwrap_or(fallback.name),
            version: pkg.version.unwrap_or(fallback.version),
            root: dir.to_path_buf(),
        })
    }
}
