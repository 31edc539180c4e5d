//! Source discovery - locating compilation units and package directories

use crate::adapters::java::JAVA_EXTENSION;
use crate::domain::error::{AnalysisError, AnalysisResult};
use crate::domain::ports::SourceParser;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};
use walkdir::WalkDir;

static PACKAGE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^package\s+([\w.\s]+?)\s*;").expect("valid package regex"));

/// One `;`-terminated statement; a line may hold several.
static IMPORT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^import\s+(static\s+)?([\w.\s]+?)(\s*\.\s*\*)?\s*;$").expect("valid import regex")
});

/// Filesystem walker for one source language, identified by file extension
#[derive(Debug, Clone)]
pub struct SourceDiscovery {
    extension: String,
}

impl Default for SourceDiscovery {
    fn default() -> Self {
        Self::new(JAVA_EXTENSION)
    }
}

impl SourceDiscovery {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn is_compilation_unit(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy() == self.extension)
    }

    /// Every compilation unit under `root`, recursively, in walk order.
    pub fn list_compilation_units(&self, root: &Path) -> AnalysisResult<Vec<PathBuf>> {
        require_dir(root)?;

        let mut units = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    if self.is_compilation_unit(entry.path()) {
                        units.push(entry.into_path());
                    }
                }
                Ok(_) => {}
                Err(err) => warn!(root = %root.display(), error = %err, "skipping unreadable entry"),
            }
        }

        debug!(root = %root.display(), count = units.len(), "listed compilation units");
        Ok(units)
    }

    /// Compilation units directly inside `dir` (non-recursive), sorted by name.
    pub fn list_direct_compilation_units(&self, dir: &Path) -> AnalysisResult<Vec<PathBuf>> {
        require_dir(dir)?;

        let entries = std::fs::read_dir(dir).map_err(|e| AnalysisError::io(dir, e))?;
        let mut units: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| self.is_compilation_unit(path))
            .collect();
        units.sort();
        Ok(units)
    }

    /// Directories under `root` (itself included) that directly contain at
    /// least one compilation unit, in pre-order.
    pub fn list_package_directories(&self, root: &Path) -> AnalysisResult<Vec<PathBuf>> {
        require_dir(root)?;

        let mut packages = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            match self.list_direct_compilation_units(entry.path()) {
                Ok(units) if !units.is_empty() => packages.push(entry.into_path()),
                Ok(_) => {}
                Err(err) => warn!(dir = %entry.path().display(), error = %err, "skipping directory"),
            }
        }

        debug!(root = %root.display(), count = packages.len(), "listed package directories");
        Ok(packages)
    }

    /// Declared package of the first parseable unit in `dir`, else the
    /// directory's own name.
    pub fn infer_package_name(&self, dir: &Path, parser: &dyn SourceParser) -> String {
        let units = self.list_direct_compilation_units(dir).unwrap_or_default();
        for unit in units {
            let Ok(source) = std::fs::read_to_string(&unit) else {
                continue;
            };
            match parser.parse(&source) {
                Ok(parsed) => {
                    return parsed
                        .package_name()
                        .map(str::to_string)
                        .unwrap_or_else(|| dir_name(dir));
                }
                Err(err) => {
                    debug!(file = %unit.display(), error = %err, "package inference skipped unparseable unit")
                }
            }
        }
        warn!(dir = %dir.display(), "no parseable unit; package named after directory");
        dir_name(dir)
    }
}

fn require_dir(path: &Path) -> AnalysisResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(AnalysisError::invalid_path(path))
    }
}

/// Simple name of a directory, resolving `.` and `..` through the filesystem.
pub fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| {
            path.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| path.display().to_string())
}

/// Package named by the first `package <name>;` line, if any.
pub fn scan_package_declaration(source: &str) -> Option<String> {
    source.lines().find_map(|line| {
        PACKAGE_DECL
            .captures(line.trim())
            .map(|caps| caps[1].split_whitespace().collect())
    })
}

/// Non-static, non-wildcard imports, verbatim, in source order.
pub fn scan_imports(source: &str) -> Vec<String> {
    source
        .lines()
        .flat_map(|line| line.split_inclusive(';'))
        .filter_map(|statement| IMPORT_DECL.captures(statement.trim()))
        .filter(|caps| caps.get(1).is_none() && caps.get(3).is_none())
        .map(|caps| caps[2].split_whitespace().collect())
        .collect()
}

/// Class name of a file computed by line scan: `<package>.<file stem>`,
/// with `default` standing in for a missing package.
pub fn scan_class_name(path: &Path, source: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let package = scan_package_declaration(source).unwrap_or_else(|| "default".to_string());
    format!("{package}.{stem}")
}
