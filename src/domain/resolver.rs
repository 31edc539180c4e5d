//! Best-effort resolution of type names to fully-qualified names.
//!
//! Declared types and single-type imports resolve directly; every other
//! candidate (same package, wildcard imports, `java.lang`) is accepted only
//! when a [`TypeSolver`] knows it.

use crate::domain::ast::CompilationUnit;
use crate::domain::ports::TypeSolver;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Names visible inside one compilation unit.
#[derive(Debug, Clone, Default)]
pub struct ResolutionScope {
    package: Option<String>,
    single_imports: HashMap<String, String>,
    wildcard_packages: Vec<String>,
    local_types: HashMap<String, String>,
}

impl ResolutionScope {
    pub fn from_unit(unit: &CompilationUnit) -> Self {
        let package = unit.package_name().map(str::to_string);

        let mut single_imports = HashMap::new();
        let mut wildcard_packages = Vec::new();
        for import in unit.imports().filter(|i| !i.is_static) {
            if import.is_wildcard {
                wildcard_packages.push(import.name.clone());
            } else if let Some(simple) = import.name.rsplit('.').next() {
                single_imports
                    .entry(simple.to_string())
                    .or_insert_with(|| import.name.clone());
            }
        }

        let mut local_types = HashMap::new();
        for path in unit.declared_types() {
            let fqn = qualify(package.as_deref(), &path);
            if let Some(simple) = path.rsplit('.').next() {
                local_types
                    .entry(simple.to_string())
                    .or_insert_with(|| fqn.clone());
            }
            local_types.entry(path).or_insert(fqn);
        }

        Self {
            package,
            single_imports,
            wildcard_packages,
            local_types,
        }
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }
}

fn qualify(package: Option<&str>, name: &str) -> String {
    match package {
        Some(package) => format!("{package}.{name}"),
        None => name.to_string(),
    }
}

/// Resolver over a single (usually combined) type solver.
#[derive(Clone)]
pub struct SymbolResolver {
    solver: Arc<dyn TypeSolver>,
}

impl SymbolResolver {
    pub fn new(solver: Arc<dyn TypeSolver>) -> Self {
        Self { solver }
    }

    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    /// Resolve an erased class-or-interface name (`Bar`, `Map.Entry`,
    /// `q.Bar`). `Ok(None)` means the name is unknown to every solver.
    pub fn resolve(&self, name: &str, scope: &ResolutionScope) -> Result<Option<String>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        if let Some(fqn) = scope.local_types.get(name) {
            return Ok(Some(fqn.clone()));
        }

        match name.split_once('.') {
            Some((head, rest)) => {
                if let Some(prefix) = self.resolve_simple(head, scope)? {
                    return Ok(Some(format!("{prefix}.{rest}")));
                }
                if self.solver.solve(name)? {
                    return Ok(Some(name.to_string()));
                }
                Ok(None)
            }
            None => self.resolve_simple(name, scope),
        }
    }

    fn resolve_simple(&self, simple: &str, scope: &ResolutionScope) -> Result<Option<String>> {
        if let Some(fqn) = scope.local_types.get(simple) {
            return Ok(Some(fqn.clone()));
        }

        // A single-type import names the type fully and shadows everything below it.
        if let Some(imported) = scope.single_imports.get(simple) {
            return Ok(Some(imported.clone()));
        }

        let same_package = qualify(scope.package(), simple);
        if self.solver.solve(&same_package)? {
            return Ok(Some(same_package));
        }

        for package in &scope.wildcard_packages {
            let candidate = format!("{package}.{simple}");
            if self.solver.solve(&candidate)? {
                return Ok(Some(candidate));
            }
        }

        let implicit = format!("java.lang.{simple}");
        if self.solver.solve(&implicit)? {
            return Ok(Some(implicit));
        }

        Ok(None)
    }
}
