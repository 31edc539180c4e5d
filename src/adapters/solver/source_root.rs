use crate::adapters::fs::{SourceDiscovery, scan_package_declaration};
use crate::domain::error::AnalysisResult;
use crate::domain::ports::TypeSolver;
use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Solver over the compilation units of one source repository.
///
/// Every unit contributes `<declared package>.<file stem>`; nested types are
/// reached through the resolver's qualified-name handling.
#[derive(Debug, Clone)]
pub struct SourceRootTypeSolver {
    root: PathBuf,
    types: HashSet<String>,
}

impl SourceRootTypeSolver {
    /// Walk `root` and index every compilation unit found. Blocking.
    pub fn index(root: &Path, discovery: &SourceDiscovery) -> AnalysisResult<Self> {
        let mut types = HashSet::new();
        for unit in discovery.list_compilation_units(root)? {
            let Some(stem) = unit.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let source = match std::fs::read_to_string(&unit) {
                Ok(source) => source,
                Err(err) => {
                    warn!(file = %unit.display(), error = %err, "unit left out of source index");
                    continue;
                }
            };
            let fqn = match scan_package_declaration(&source) {
                Some(package) => format!("{package}.{stem}"),
                None => stem,
            };
            types.insert(fqn);
        }

        debug!(root = %root.display(), types = types.len(), "indexed source root");
        Ok(Self {
            root: root.to_path_buf(),
            types,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeSolver for SourceRootTypeSolver {
    fn solve(&self, qualified_name: &str) -> Result<bool> {
        Ok(self.types.contains(qualified_name))
    }

    fn name(&self) -> &str {
        "source-root"
    }
}
