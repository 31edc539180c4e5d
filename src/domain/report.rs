//! Hierarchical dependency reports
//!
//! A [`ProjectReport`] owns its [`PackageReport`]s, which own their
//! [`ClassReport`]s. Children never point back at their parents.

use crate::domain::dependency::Dependency;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Dependencies of a single compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassReport {
    class_name: String,
    dependencies: HashSet<Dependency>,
}

impl ClassReport {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            dependencies: HashSet::new(),
        }
    }

    /// Adds an edge; returns `false` when an equal edge is already present.
    pub fn add_dependency(&mut self, dependency: Dependency) -> bool {
        self.dependencies.insert(dependency)
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn dependencies(&self) -> &HashSet<Dependency> {
        &self.dependencies
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Dependencies ordered by kind, target and line; used for rendering.
    pub fn sorted_dependencies(&self) -> Vec<&Dependency> {
        let mut deps: Vec<&Dependency> = self.dependencies.iter().collect();
        deps.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.target_type.cmp(&b.target_type))
                .then_with(|| a.line.cmp(&b.line))
                .then_with(|| a.snippet.cmp(&b.snippet))
        });
        deps
    }
}

impl fmt::Display for ClassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Class: {}", self.class_name)?;
        writeln!(f, "Dependencies:")?;
        for dep in self.sorted_dependencies() {
            writeln!(f, "  - {}: {}", dep.kind, dep.target_type)?;
        }
        Ok(())
    }
}

/// Class reports of one package directory, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReport {
    package_name: String,
    class_reports: Vec<ClassReport>,
}

impl PackageReport {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            class_reports: Vec::new(),
        }
    }

    pub fn add_class_report(&mut self, report: ClassReport) {
        self.class_reports.push(report);
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn class_reports(&self) -> &[ClassReport] {
        &self.class_reports
    }

    pub fn is_empty(&self) -> bool {
        self.class_reports.is_empty()
    }

    /// Total number of edges across all classes of the package.
    pub fn dependency_count(&self) -> usize {
        self.class_reports.iter().map(ClassReport::len).sum()
    }
}

impl fmt::Display for PackageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Package: {}", self.package_name)?;
        for (i, report) in self.class_reports.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{report}")?;
        }
        Ok(())
    }
}

/// Package reports of a source tree, in package-discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReport {
    project_name: String,
    package_reports: Vec<PackageReport>,
}

impl ProjectReport {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            package_reports: Vec::new(),
        }
    }

    pub fn add_package_report(&mut self, report: PackageReport) {
        self.package_reports.push(report);
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn package_reports(&self) -> &[PackageReport] {
        &self.package_reports
    }

    pub fn is_empty(&self) -> bool {
        self.package_reports.is_empty()
    }

    pub fn class_reports(&self) -> impl Iterator<Item = &ClassReport> {
        self.package_reports
            .iter()
            .flat_map(|p| p.class_reports().iter())
    }

    pub fn dependency_count(&self) -> usize {
        self.package_reports
            .iter()
            .map(PackageReport::dependency_count)
            .sum()
    }
}

impl fmt::Display for ProjectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Project: {}", self.project_name)?;
        for (i, report) in self.package_reports.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{report}")?;
        }
        Ok(())
    }
}
